//! Deal mutations and reads, with the activity-trail invariant enforced.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use database::deal::{self, DealRowPatch, NewDealRow};
use database::{activity, Database, DatabaseError, Deal};

use crate::error::{PipelineError, Result};
use crate::stage::Stage;

const DEFAULT_PROBABILITY: i64 = 10;

/// Input for creating a deal. Only `name` and `type` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDeal {
    pub name: String,
    #[serde(rename = "type")]
    pub deal_type: String,
    pub company: Option<String>,
    pub stage: Option<String>,
    pub value: Option<f64>,
    pub probability: Option<i64>,
    pub notes: Option<String>,
    pub next_action: Option<String>,
}

/// Partial update for a deal. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealPatch {
    pub stage: Option<String>,
    pub value: Option<f64>,
    pub probability: Option<i64>,
    pub notes: Option<String>,
    pub next_action: Option<String>,
}

/// A deal plus its derived age in the current stage.
#[derive(Debug, Clone, Serialize)]
pub struct DealWithAge {
    #[serde(flatten)]
    pub deal: Deal,
    /// Whole days since the last update. Derived on read, never stored.
    pub days_in_stage: i64,
}

/// The pipeline state machine over the persistent store.
///
/// Every creation appends exactly one `created` activity and every stage
/// change exactly one `stage_change` activity; nothing else writes to the
/// activity trail.
#[derive(Clone)]
pub struct PipelineEngine {
    db: Database,
}

impl PipelineEngine {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a deal with defaults applied, plus its `created` activity.
    /// Row insert and activity append commit together or not at all.
    pub async fn create_deal(&self, new: NewDeal) -> Result<Deal> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(PipelineError::Validation("name is required".to_string()));
        }
        let deal_type = match new.deal_type.trim().to_lowercase().as_str() {
            t @ ("landlord" | "employer") => t.to_string(),
            other => {
                return Err(PipelineError::Validation(format!(
                    "unknown deal type: {}",
                    other
                )))
            }
        };
        let stage = match &new.stage {
            Some(s) => parse_stage(s)?,
            None => Stage::Lead,
        };
        if let Some(p) = new.probability {
            check_probability(p)?;
        }

        let row = NewDealRow {
            name: name.to_string(),
            company: new.company,
            deal_type,
            stage: stage.as_str().to_string(),
            value: new.value.unwrap_or(0.0),
            probability: new.probability.unwrap_or(DEFAULT_PROBABILITY),
            notes: new.notes,
            next_action: new.next_action,
        };

        let mut tx = self.db.pool().begin().await.map_err(DatabaseError::from)?;
        let deal = deal::insert_deal(&mut *tx, &row).await?;
        activity::append_activity(
            &mut *tx,
            deal.id,
            "created",
            &format!("Deal created in {} stage", deal.stage),
            Some(&json!({ "stage": deal.stage })),
        )
        .await?;
        tx.commit().await.map_err(DatabaseError::from)?;

        info!(deal_id = deal.id, stage = %deal.stage, "created deal");
        Ok(deal)
    }

    /// Apply a partial update. A stage change appends its activity inside
    /// the same transaction as the row update; an unchanged or omitted
    /// stage appends nothing.
    pub async fn patch_deal(&self, id: i64, patch: DealPatch) -> Result<Deal> {
        let new_stage = match &patch.stage {
            Some(s) => Some(parse_stage(s)?),
            None => None,
        };
        if let Some(p) = patch.probability {
            check_probability(p)?;
        }

        let mut tx = self.db.pool().begin().await.map_err(DatabaseError::from)?;
        let before = deal::get_deal(&mut *tx, id).await?;

        let row_patch = DealRowPatch {
            stage: new_stage.map(|s| s.as_str().to_string()),
            value: patch.value,
            probability: patch.probability,
            notes: patch.notes,
            next_action: patch.next_action,
        };
        let updated = deal::update_deal(&mut *tx, id, &row_patch).await?;

        if let Some(stage) = new_stage {
            if stage.as_str() != before.stage {
                activity::append_activity(
                    &mut *tx,
                    id,
                    "stage_change",
                    &format!("Moved from {} to {}", before.stage, stage.as_str()),
                    Some(&json!({ "from": before.stage, "to": stage.as_str() })),
                )
                .await?;
                info!(deal_id = id, from = %before.stage, to = stage.as_str(), "stage changed");
            }
        }
        tx.commit().await.map_err(DatabaseError::from)?;

        Ok(updated)
    }

    /// All deals, most recently updated first, with derived stage age.
    pub async fn list_deals(&self) -> Result<Vec<DealWithAge>> {
        let deals = deal::list_deals(self.db.pool()).await?;
        let now = Utc::now().naive_utc();
        let listed = deals
            .into_iter()
            .map(|deal| {
                let days_in_stage = days_since(&deal.updated_at, now);
                DealWithAge {
                    deal,
                    days_in_stage,
                }
            })
            .collect::<Vec<_>>();
        debug!(count = listed.len(), "listed deals");
        Ok(listed)
    }
}

fn parse_stage(value: &str) -> Result<Stage> {
    Stage::parse(value)
        .ok_or_else(|| PipelineError::Validation(format!("unknown stage: {}", value)))
}

fn check_probability(value: i64) -> Result<()> {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err(PipelineError::Validation(format!(
            "probability must be 0-100, got {}",
            value
        )))
    }
}

/// Whole days between a stored `datetime('now')` timestamp and `now`.
/// Unparseable timestamps count as zero days rather than failing the read.
fn days_since(stored: &str, now: NaiveDateTime) -> i64 {
    NaiveDateTime::parse_from_str(stored, "%Y-%m-%d %H:%M:%S")
        .map(|then| (now - then).num_days().max(0))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn engine() -> PipelineEngine {
        let db = Database::connect("sqlite::memory:").await.expect("connect");
        db.migrate().await.expect("migrate");
        PipelineEngine::new(db)
    }

    fn new_deal(name: &str) -> NewDeal {
        NewDeal {
            name: name.to_string(),
            deal_type: "landlord".to_string(),
            company: None,
            stage: None,
            value: None,
            probability: None,
            notes: None,
            next_action: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults_and_logs_one_activity() {
        let engine = engine().await;
        let deal = engine.create_deal(new_deal("Reyes Properties")).await.unwrap();

        assert_eq!(deal.stage, "lead");
        assert_eq!(deal.probability, 10);
        assert_eq!(deal.value, 0.0);

        let activities = activity::list_deal_activities(engine.db.pool(), deal.id)
            .await
            .unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].activity_type, "created");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_and_bad_type() {
        let engine = engine().await;

        let mut blank = new_deal("   ");
        blank.name = "   ".to_string();
        assert!(matches!(
            engine.create_deal(blank).await.unwrap_err(),
            PipelineError::Validation(_)
        ));

        let mut bad_type = new_deal("Acme");
        bad_type.deal_type = "university".to_string();
        assert!(matches!(
            engine.create_deal(bad_type).await.unwrap_err(),
            PipelineError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_stage_change_appends_activity_with_transition_metadata() {
        let engine = engine().await;
        let deal = engine.create_deal(new_deal("Reyes Properties")).await.unwrap();

        let patch = DealPatch {
            stage: Some("contacted".to_string()),
            ..Default::default()
        };
        let updated = engine.patch_deal(deal.id, patch).await.unwrap();
        assert_eq!(updated.stage, "contacted");

        let activities = activity::list_deal_activities(engine.db.pool(), deal.id)
            .await
            .unwrap();
        assert_eq!(activities.len(), 2);
        let change = activities
            .iter()
            .find(|a| a.activity_type == "stage_change")
            .unwrap();
        assert_eq!(change.description, "Moved from lead to contacted");
        let metadata: serde_json::Value =
            serde_json::from_str(change.metadata.as_deref().unwrap()).unwrap();
        assert_eq!(metadata["from"], "lead");
        assert_eq!(metadata["to"], "contacted");
    }

    #[tokio::test]
    async fn test_backward_and_skip_transitions_are_permitted() {
        let engine = engine().await;
        let deal = engine.create_deal(new_deal("Reyes Properties")).await.unwrap();

        // Skip forward to negotiation, then step back to qualified.
        for stage in ["negotiation", "qualified"] {
            let patch = DealPatch {
                stage: Some(stage.to_string()),
                ..Default::default()
            };
            let updated = engine.patch_deal(deal.id, patch).await.unwrap();
            assert_eq!(updated.stage, stage);
        }

        let activities = activity::list_deal_activities(engine.db.pool(), deal.id)
            .await
            .unwrap();
        let changes = activities
            .iter()
            .filter(|a| a.activity_type == "stage_change")
            .count();
        assert_eq!(changes, 2);
    }

    #[tokio::test]
    async fn test_unchanged_stage_appends_no_activity() {
        let engine = engine().await;
        let deal = engine.create_deal(new_deal("Reyes Properties")).await.unwrap();

        let same_stage = DealPatch {
            stage: Some("lead".to_string()),
            notes: Some("left voicemail".to_string()),
            ..Default::default()
        };
        engine.patch_deal(deal.id, same_stage).await.unwrap();

        let no_stage = DealPatch {
            value: Some(4800.0),
            ..Default::default()
        };
        let updated = engine.patch_deal(deal.id, no_stage).await.unwrap();
        assert_eq!(updated.value, 4800.0);
        assert_eq!(updated.notes.as_deref(), Some("left voicemail"));

        let activities = activity::list_deal_activities(engine.db.pool(), deal.id)
            .await
            .unwrap();
        assert_eq!(activities.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rolls_back_deal_when_activity_write_fails() {
        let engine = engine().await;
        sqlx::query("DROP TABLE activity_log")
            .execute(engine.db.pool())
            .await
            .unwrap();

        assert!(engine.create_deal(new_deal("Reyes Properties")).await.is_err());

        // The activity append failed, so the deal row must not survive.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pipeline_deals")
            .fetch_one(engine.db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_stage_change_rolls_back_update_when_activity_write_fails() {
        let engine = engine().await;
        let deal = engine.create_deal(new_deal("Reyes Properties")).await.unwrap();
        sqlx::query("DROP TABLE activity_log")
            .execute(engine.db.pool())
            .await
            .unwrap();

        let patch = DealPatch {
            stage: Some("contacted".to_string()),
            ..Default::default()
        };
        assert!(engine.patch_deal(deal.id, patch).await.is_err());

        let listed = engine.list_deals().await.unwrap();
        assert_eq!(listed[0].deal.stage, "lead");
    }

    #[tokio::test]
    async fn test_probability_outside_0_100_is_rejected() {
        let engine = engine().await;

        let mut over = new_deal("Acme");
        over.probability = Some(150);
        assert!(matches!(
            engine.create_deal(over).await.unwrap_err(),
            PipelineError::Validation(_)
        ));

        let deal = engine.create_deal(new_deal("Reyes Properties")).await.unwrap();
        let negative = DealPatch {
            probability: Some(-5),
            ..Default::default()
        };
        assert!(matches!(
            engine.patch_deal(deal.id, negative).await.unwrap_err(),
            PipelineError::Validation(_)
        ));

        let valid = DealPatch {
            probability: Some(85),
            ..Default::default()
        };
        let updated = engine.patch_deal(deal.id, valid).await.unwrap();
        assert_eq!(updated.probability, 85);
    }

    #[tokio::test]
    async fn test_patch_rejects_unknown_stage_and_unknown_id() {
        let engine = engine().await;
        let deal = engine.create_deal(new_deal("Reyes Properties")).await.unwrap();

        let bad_stage = DealPatch {
            stage: Some("won".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            engine.patch_deal(deal.id, bad_stage).await.unwrap_err(),
            PipelineError::Validation(_)
        ));

        assert!(matches!(
            engine.patch_deal(9999, DealPatch::default()).await.unwrap_err(),
            PipelineError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_fresh_deal_has_zero_days_in_stage() {
        let engine = engine().await;
        engine.create_deal(new_deal("Reyes Properties")).await.unwrap();

        let listed = engine.list_deals().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].days_in_stage, 0);
    }

    #[test]
    fn test_days_since_floors_and_tolerates_garbage() {
        let now = NaiveDateTime::parse_from_str("2026-08-30 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let three_days_ago = now - Duration::days(3) - Duration::hours(5);
        let stored = three_days_ago.format("%Y-%m-%d %H:%M:%S").to_string();
        assert_eq!(days_since(&stored, now), 3);
        assert_eq!(days_since("not a timestamp", now), 0);
        // A clock skewed into the future never yields negative days.
        let future = (now + Duration::days(2)).format("%Y-%m-%d %H:%M:%S").to_string();
        assert_eq!(days_since(&future, now), 0);
    }
}
