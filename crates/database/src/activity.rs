//! Activity log operations.
//!
//! The activity log is append-only: rows are written on deal creation and
//! stage changes and never mutated afterwards.

use sqlx::sqlite::Sqlite;
use sqlx::{Executor, SqlitePool};

use crate::error::Result;
use crate::models::Activity;

/// Append an activity entry for a deal.
///
/// Takes any SQLite executor so the pipeline layer can append inside the
/// same transaction as the deal write it records.
pub async fn append_activity<'e, E>(
    executor: E,
    deal_id: i64,
    activity_type: &str,
    description: &str,
    metadata: Option<&serde_json::Value>,
) -> Result<Activity>
where
    E: Executor<'e, Database = Sqlite>,
{
    let metadata_text = metadata.map(|m| m.to_string());

    let activity = sqlx::query_as::<_, Activity>(
        r#"
        INSERT INTO activity_log (deal_id, activity_type, description, metadata)
        VALUES (?, ?, ?, ?)
        RETURNING id, deal_id, activity_type, description, metadata, created_at
        "#,
    )
    .bind(deal_id)
    .bind(activity_type)
    .bind(description)
    .bind(&metadata_text)
    .fetch_one(executor)
    .await?;

    Ok(activity)
}

/// Get all activities for a deal, newest first.
pub async fn list_deal_activities(pool: &SqlitePool, deal_id: i64) -> Result<Vec<Activity>> {
    let activities = sqlx::query_as::<_, Activity>(
        r#"
        SELECT id, deal_id, activity_type, description, metadata, created_at
        FROM activity_log
        WHERE deal_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(deal_id)
    .fetch_all(pool)
    .await?;

    Ok(activities)
}

/// Get the most recent activities across all deals, joined with the owning
/// deal's display name.
pub async fn recent_activities(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<(Activity, String)>> {
    let rows = sqlx::query_as::<_, ActivityWithDeal>(
        r#"
        SELECT a.id, a.deal_id, a.activity_type, a.description, a.metadata, a.created_at,
               d.name AS deal_name
        FROM activity_log a
        INNER JOIN pipeline_deals d ON d.id = a.deal_id
        ORDER BY a.created_at DESC, a.id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                Activity {
                    id: row.id,
                    deal_id: row.deal_id,
                    activity_type: row.activity_type,
                    description: row.description,
                    metadata: row.metadata,
                    created_at: row.created_at,
                },
                row.deal_name,
            )
        })
        .collect())
}

#[derive(sqlx::FromRow)]
struct ActivityWithDeal {
    id: i64,
    deal_id: i64,
    activity_type: String,
    description: String,
    metadata: Option<String>,
    created_at: String,
    deal_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{delete_deal, insert_deal, NewDealRow};
    use crate::test_db;

    async fn seed_deal(pool: &SqlitePool) -> i64 {
        let row = NewDealRow {
            name: "Acme Properties".to_string(),
            company: None,
            deal_type: "landlord".to_string(),
            stage: "lead".to_string(),
            value: 0.0,
            probability: 10,
            notes: None,
            next_action: None,
        };
        insert_deal(pool, &row).await.unwrap().id
    }

    #[tokio::test]
    async fn test_append_and_list_activities() {
        let db = test_db().await;
        let deal_id = seed_deal(db.pool()).await;

        let meta = serde_json::json!({"from": "lead", "to": "contacted"});
        append_activity(db.pool(), deal_id, "created", "Deal created", None)
            .await
            .unwrap();
        let change = append_activity(
            db.pool(),
            deal_id,
            "stage_change",
            "Moved from lead to contacted",
            Some(&meta),
        )
        .await
        .unwrap();

        assert_eq!(change.activity_type, "stage_change");
        let parsed: serde_json::Value =
            serde_json::from_str(change.metadata.as_deref().unwrap()).unwrap();
        assert_eq!(parsed["from"], "lead");
        assert_eq!(parsed["to"], "contacted");

        let activities = list_deal_activities(db.pool(), deal_id).await.unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].activity_type, "stage_change");
    }

    #[tokio::test]
    async fn test_deleting_deal_cascades_activities() {
        let db = test_db().await;
        let deal_id = seed_deal(db.pool()).await;
        append_activity(db.pool(), deal_id, "created", "Deal created", None)
            .await
            .unwrap();

        delete_deal(db.pool(), deal_id).await.unwrap();

        let activities = list_deal_activities(db.pool(), deal_id).await.unwrap();
        assert!(activities.is_empty());
    }

    #[tokio::test]
    async fn test_recent_activities_join_deal_name() {
        let db = test_db().await;
        let deal_id = seed_deal(db.pool()).await;
        append_activity(db.pool(), deal_id, "created", "Deal created", None)
            .await
            .unwrap();

        let recent = recent_activities(db.pool(), 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].1, "Acme Properties");
    }
}
