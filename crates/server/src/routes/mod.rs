//! Route handlers for the dashboard API.

pub mod auth;
pub mod crm;
pub mod email;
pub mod health;
pub mod pipeline;
pub mod settings;
pub mod stats;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
///
/// Everything under `/api` except login requires a session cookie, which
/// each handler enforces through the [`SessionUser`] extractor.
///
/// [`SessionUser`]: crate::session::SessionUser
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Session
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        // Lead sources
        .route("/api/crm/landlords", get(crm::landlords))
        .route("/api/crm/employers", get(crm::employers))
        .route("/api/crm/universities", get(crm::universities))
        // Email
        .route("/api/email/generate", post(email::generate))
        .route("/api/email/generate-reply", post(email::generate_reply))
        .route("/api/email/send", post(email::send))
        .route("/api/email/log", get(email::log_list).post(email::log_append))
        .route("/api/email/inbox", get(email::inbox))
        // Pipeline
        .route(
            "/api/pipeline",
            get(pipeline::list).post(pipeline::create).patch(pipeline::patch),
        )
        // Reporting and settings
        .route("/api/stats", get(stats::report))
        .route("/api/settings", get(settings::list).post(settings::upsert))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use connectors::{CricketConfig, CricketConnector, GrasshopperConfig, GrasshopperConnector};
    use database::Database;
    use email_engine::EmailEngine;
    use pipeline::PipelineEngine;

    use crate::session::mint_token;
    use crate::state::{AppState, AuthConfig};

    async fn test_state() -> AppState {
        let db = Database::connect("sqlite::memory:").await.expect("connect");
        db.migrate().await.expect("migrate");
        AppState {
            pipeline: PipelineEngine::new(db.clone()),
            db,
            cricket: Arc::new(CricketConnector::new(CricketConfig::default())),
            grasshopper: Arc::new(GrasshopperConnector::new(GrasshopperConfig::default())),
            email_engine: Arc::new(EmailEngine::new(None)),
            triage: None,
            mailer: None,
            mail_config: None,
            auth: Arc::new(AuthConfig {
                session_secret: "test-secret".to_string(),
                users: vec![("ops".to_string(), "hunter2".to_string())],
            }),
        }
    }

    fn app(state: &AppState) -> axum::Router {
        super::router().with_state(state.clone())
    }

    fn session_cookie(state: &AppState) -> String {
        format!("session={}", mint_token("ops", &state.auth.session_secret))
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn send_json(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_needs_no_session() {
        let state = test_state().await;
        let response = app(&state).oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_without_cookie_is_unauthorized() {
        let state = test_state().await;
        for uri in ["/api/pipeline", "/api/stats", "/api/settings", "/api/auth/me"] {
            let response = app(&state).oneshot(get(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_login_sets_cookie_that_authenticates_me() {
        let state = test_state().await;

        let bad = send_json(
            "POST",
            "/api/auth/login",
            None,
            &json!({"username": "ops", "password": "wrong"}),
        );
        let response = app(&state).oneshot(bad).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let good = send_json(
            "POST",
            "/api/auth/login",
            None,
            &json!({"username": "ops", "password": "hunter2"}),
        );
        let response = app(&state).oneshot(good).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let response = app(&state)
            .oneshot(get("/api/auth/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["username"], "ops");
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        // Create.
        let create = send_json(
            "POST",
            "/api/pipeline",
            Some(&cookie),
            &json!({"name": "Reyes Properties", "type": "landlord"}),
        );
        let response = app(&state).oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let deal = body_json(response).await;
        assert_eq!(deal["stage"], "lead");
        assert_eq!(deal["probability"], 10);
        let id = deal["id"].as_i64().unwrap();

        // Move the stage.
        let patch = send_json(
            "PATCH",
            "/api/pipeline",
            Some(&cookie),
            &json!({"id": id, "stage": "contacted"}),
        );
        let response = app(&state).oneshot(patch).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["stage"], "contacted");

        // The activity trail has exactly created + stage_change.
        let activities = database::activity::list_deal_activities(state.db.pool(), id)
            .await
            .unwrap();
        let types: Vec<&str> = activities.iter().map(|a| a.activity_type.as_str()).collect();
        assert_eq!(activities.len(), 2);
        assert!(types.contains(&"created"));
        assert!(types.contains(&"stage_change"));

        // Listing derives a zero stage age for a fresh deal.
        let response = app(&state)
            .oneshot(get("/api/pipeline", Some(&cookie)))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed[0]["days_in_stage"], 0);
        assert_eq!(listed[0]["type"], "landlord");
    }

    #[tokio::test]
    async fn test_pipeline_validation_and_not_found() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let bad_type = send_json(
            "POST",
            "/api/pipeline",
            Some(&cookie),
            &json!({"name": "Acme", "type": "university"}),
        );
        let response = app(&state).oneshot(bad_type).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let missing = send_json(
            "PATCH",
            "/api/pipeline",
            Some(&cookie),
            &json!({"id": 999, "stage": "closed"}),
        );
        let response = app(&state).oneshot(missing).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_without_ai_returns_template_source() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let request = send_json(
            "POST",
            "/api/email/generate",
            Some(&cookie),
            &json!({
                "leadType": "landlord",
                "lead": {"name": "Dana Reyes", "city": "Austin", "metric": 34},
                "emailNumber": 1,
            }),
        );
        let response = app(&state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let email = body_json(response).await;
        assert_eq!(email["source"], "template");
        assert!(email["subject"].as_str().unwrap().contains("Austin"));
    }

    #[tokio::test]
    async fn test_generate_reply_rejects_system_traffic() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let request = send_json(
            "POST",
            "/api/email/generate-reply",
            Some(&cookie),
            &json!({
                "originalEmail": {
                    "from": "mailer-daemon@example.com",
                    "subject": "Undeliverable: your message",
                    "body": "",
                }
            }),
        );
        let response = app(&state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_send_without_smtp_is_bad_gateway() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let request = send_json(
            "POST",
            "/api/email/send",
            Some(&cookie),
            &json!({"to": "dana@x.com", "subject": "s", "body": "b"}),
        );
        let response = app(&state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_email_log_appends_and_lists() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let append = send_json(
            "POST",
            "/api/email/log",
            Some(&cookie),
            &json!({"to": "dana@x.com", "subject": "Manual send", "body": "b", "leadType": "landlord"}),
        );
        let response = app(&state).oneshot(append).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app(&state)
            .oneshot(get("/api/email/log", Some(&cookie)))
            .await
            .unwrap();
        let entries = body_json(response).await;
        assert_eq!(entries[0]["subject"], "Manual send");
    }

    #[tokio::test]
    async fn test_unconfigured_crm_serves_sample_leads() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let response = app(&state)
            .oneshot(get("/api/crm/landlords", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_json(response).await;
        assert_eq!(page["source"], "sample");
        assert_eq!(page["leads"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_university_playbook_filters() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let response = app(&state)
            .oneshot(get("/api/crm/universities?tier=flagship", Some(&cookie)))
            .await
            .unwrap();
        let page = body_json(response).await;
        assert_eq!(page["source"], "playbook");
        assert_eq!(page["total"], 3);
    }

    #[tokio::test]
    async fn test_stats_validates_range_and_zeroes_empty_store() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let response = app(&state)
            .oneshot(get("/api/stats?range=365d", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app(&state)
            .oneshot(get("/api/stats?range=7d", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["rangeDays"], 7);
        assert_eq!(report["totalSends"], 0);
        assert!(report["dealsByStage"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settings_round_trip_and_reserved_rejection() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let reserved = send_json(
            "POST",
            "/api/settings",
            Some(&cookie),
            &json!({"key": "_smtp_configured", "value": "true"}),
        );
        let response = app(&state).oneshot(reserved).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let upsert = send_json(
            "POST",
            "/api/settings",
            Some(&cookie),
            &json!({"key": "daily_send_limit", "value": "50"}),
        );
        let response = app(&state).oneshot(upsert).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app(&state)
            .oneshot(get("/api/settings", Some(&cookie)))
            .await
            .unwrap();
        let view = body_json(response).await;
        assert_eq!(view["daily_send_limit"], "50");
        assert_eq!(view["_ai_configured"], false);
        assert_eq!(view["_smtp_configured"], false);
    }

    #[tokio::test]
    async fn test_inbox_without_imap_is_bad_gateway() {
        let state = test_state().await;
        let cookie = session_cookie(&state);

        let response = app(&state)
            .oneshot(get("/api/email/inbox", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
