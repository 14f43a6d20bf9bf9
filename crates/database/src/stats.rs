//! Read-only reporting queries.
//!
//! Everything here is derived on demand from the email log, deals, and
//! activity trail for a lookback window expressed in whole days. No caching;
//! each call recomputes.

use sqlx::SqlitePool;

use crate::error::Result;

fn window_start(days: i64) -> String {
    format!("-{} days", days)
}

/// Count email sends within the last `days` days.
pub async fn count_sends(pool: &SqlitePool, days: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM email_log
        WHERE sent_at >= datetime('now', ?)
        "#,
    )
    .bind(window_start(days))
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Count email sends in the period immediately before the current window,
/// used for delta comparison (e.g. days 14..7 for a 7-day window).
pub async fn count_previous_period_sends(pool: &SqlitePool, days: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM email_log
        WHERE sent_at >= datetime('now', ?)
          AND sent_at < datetime('now', ?)
        "#,
    )
    .bind(window_start(days * 2))
    .bind(window_start(days))
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Sends grouped by lead type within the window. Entries without a lead
/// type are grouped under "unknown".
pub async fn sends_by_lead_type(pool: &SqlitePool, days: i64) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT COALESCE(lead_type, 'unknown') AS lead_type, COUNT(*) AS sends
        FROM email_log
        WHERE sent_at >= datetime('now', ?)
        GROUP BY COALESCE(lead_type, 'unknown')
        ORDER BY sends DESC
        "#,
    )
    .bind(window_start(days))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Deals grouped by stage with count and summed value. Not windowed; the
/// pipeline is a point-in-time snapshot.
pub async fn deals_by_stage(pool: &SqlitePool) -> Result<Vec<(String, i64, f64)>> {
    let rows = sqlx::query_as::<_, (String, i64, f64)>(
        r#"
        SELECT stage, COUNT(*) AS deals, SUM(value) AS total_value
        FROM pipeline_deals
        GROUP BY stage
        ORDER BY deals DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Daily send counts within the window, oldest day first.
pub async fn daily_send_counts(pool: &SqlitePool, days: i64) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT date(sent_at) AS day, COUNT(*) AS sends
        FROM email_log
        WHERE sent_at >= datetime('now', ?)
        GROUP BY date(sent_at)
        ORDER BY day
        "#,
    )
    .bind(window_start(days))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// The most-reused subject lines within the window.
pub async fn top_subjects(pool: &SqlitePool, days: i64, limit: i64) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT subject, COUNT(*) AS uses
        FROM email_log
        WHERE sent_at >= datetime('now', ?)
        GROUP BY subject
        ORDER BY uses DESC, subject
        LIMIT ?
        "#,
    )
    .bind(window_start(days))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{insert_deal, NewDealRow};
    use crate::email_log::{append_entry, NewEmailLogEntry};
    use crate::test_db;

    fn send(subject: &str, lead_type: Option<&str>) -> NewEmailLogEntry {
        NewEmailLogEntry {
            recipient: "owner@example.com".to_string(),
            subject: subject.to_string(),
            body: "body".to_string(),
            lead_id: None,
            lead_type: lead_type.map(str::to_string),
            message_id: None,
        }
    }

    #[tokio::test]
    async fn test_empty_store_yields_zeroed_aggregates() {
        let db = test_db().await;

        assert_eq!(count_sends(db.pool(), 7).await.unwrap(), 0);
        assert_eq!(count_previous_period_sends(db.pool(), 7).await.unwrap(), 0);
        assert!(sends_by_lead_type(db.pool(), 7).await.unwrap().is_empty());
        assert!(deals_by_stage(db.pool()).await.unwrap().is_empty());
        assert!(daily_send_counts(db.pool(), 7).await.unwrap().is_empty());
        assert!(top_subjects(db.pool(), 7, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_counts_and_groupings() {
        let db = test_db().await;

        append_entry(db.pool(), &send("Quick question", Some("landlord")))
            .await
            .unwrap();
        append_entry(db.pool(), &send("Quick question", Some("landlord")))
            .await
            .unwrap();
        append_entry(db.pool(), &send("Relocation housing", Some("employer")))
            .await
            .unwrap();
        append_entry(db.pool(), &send("No type", None)).await.unwrap();

        assert_eq!(count_sends(db.pool(), 7).await.unwrap(), 4);

        let by_type = sends_by_lead_type(db.pool(), 7).await.unwrap();
        assert_eq!(by_type[0], ("landlord".to_string(), 2));
        assert!(by_type.contains(&("unknown".to_string(), 1)));

        let subjects = top_subjects(db.pool(), 7, 5).await.unwrap();
        assert_eq!(subjects[0], ("Quick question".to_string(), 2));

        let daily = daily_send_counts(db.pool(), 7).await.unwrap();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].1, 4);
    }

    #[tokio::test]
    async fn test_previous_period_excludes_current_window() {
        let db = test_db().await;
        append_entry(db.pool(), &send("Old send", Some("landlord")))
            .await
            .unwrap();
        // Push it back into the previous period.
        sqlx::query("UPDATE email_log SET sent_at = datetime('now', '-10 days')")
            .execute(db.pool())
            .await
            .unwrap();

        assert_eq!(count_sends(db.pool(), 7).await.unwrap(), 0);
        assert_eq!(count_previous_period_sends(db.pool(), 7).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deals_group_by_stage_with_summed_value() {
        let db = test_db().await;
        for (stage, value) in [("lead", 100.0), ("lead", 150.0), ("closed", 900.0)] {
            let row = NewDealRow {
                name: "n".to_string(),
                company: None,
                deal_type: "landlord".to_string(),
                stage: stage.to_string(),
                value,
                probability: 10,
                notes: None,
                next_action: None,
            };
            insert_deal(db.pool(), &row).await.unwrap();
        }

        let grouped = deals_by_stage(db.pool()).await.unwrap();
        assert_eq!(grouped[0], ("lead".to_string(), 2, 250.0));
        assert!(grouped.contains(&("closed".to_string(), 1, 900.0)));
    }
}
