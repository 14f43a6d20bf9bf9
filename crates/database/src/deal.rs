//! Pipeline deal row operations.
//!
//! Stage semantics (validation, activity appending) live one layer up in
//! the pipeline crate; this module is plain row CRUD. Operations take any
//! SQLite executor so the pipeline layer can run a row write and its
//! activity append inside one transaction.

use sqlx::sqlite::Sqlite;
use sqlx::Executor;

use crate::error::{DatabaseError, Result};
use crate::models::Deal;

/// Field values for a new deal row. Defaults are applied by the caller.
#[derive(Debug, Clone)]
pub struct NewDealRow {
    pub name: String,
    pub company: Option<String>,
    pub deal_type: String,
    pub stage: String,
    pub value: f64,
    pub probability: i64,
    pub notes: Option<String>,
    pub next_action: Option<String>,
}

/// Partial update for a deal row. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DealRowPatch {
    pub stage: Option<String>,
    pub value: Option<f64>,
    pub probability: Option<i64>,
    pub notes: Option<String>,
    pub next_action: Option<String>,
}

/// Insert a deal and return the persisted row with generated id/timestamps.
pub async fn insert_deal<'e, E>(executor: E, row: &NewDealRow) -> Result<Deal>
where
    E: Executor<'e, Database = Sqlite>,
{
    let deal = sqlx::query_as::<_, Deal>(
        r#"
        INSERT INTO pipeline_deals (name, company, deal_type, stage, value, probability, notes, next_action)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, name, company, deal_type, stage, value, probability, notes, next_action,
                  created_at, updated_at
        "#,
    )
    .bind(&row.name)
    .bind(&row.company)
    .bind(&row.deal_type)
    .bind(&row.stage)
    .bind(row.value)
    .bind(row.probability)
    .bind(&row.notes)
    .bind(&row.next_action)
    .fetch_one(executor)
    .await?;

    Ok(deal)
}

/// Get a deal by id.
pub async fn get_deal<'e, E>(executor: E, id: i64) -> Result<Deal>
where
    E: Executor<'e, Database = Sqlite>,
{
    let deal = sqlx::query_as::<_, Deal>(
        r#"
        SELECT id, name, company, deal_type, stage, value, probability, notes, next_action,
               created_at, updated_at
        FROM pipeline_deals
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    deal.ok_or(DatabaseError::NotFound {
        entity: "Deal",
        id: id.to_string(),
    })
}

/// Apply a partial update to a deal. `updated_at` is always refreshed.
///
/// Returns the updated row, or `NotFound` if the id is unknown.
pub async fn update_deal<'e, E>(executor: E, id: i64, patch: &DealRowPatch) -> Result<Deal>
where
    E: Executor<'e, Database = Sqlite>,
{
    let deal = sqlx::query_as::<_, Deal>(
        r#"
        UPDATE pipeline_deals SET
            stage = COALESCE(?, stage),
            value = COALESCE(?, value),
            probability = COALESCE(?, probability),
            notes = COALESCE(?, notes),
            next_action = COALESCE(?, next_action),
            updated_at = datetime('now')
        WHERE id = ?
        RETURNING id, name, company, deal_type, stage, value, probability, notes, next_action,
                  created_at, updated_at
        "#,
    )
    .bind(&patch.stage)
    .bind(patch.value)
    .bind(patch.probability)
    .bind(&patch.notes)
    .bind(&patch.next_action)
    .bind(id)
    .fetch_optional(executor)
    .await?;

    deal.ok_or(DatabaseError::NotFound {
        entity: "Deal",
        id: id.to_string(),
    })
}

/// List all deals, most recently updated first.
pub async fn list_deals<'e, E>(executor: E) -> Result<Vec<Deal>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let deals = sqlx::query_as::<_, Deal>(
        r#"
        SELECT id, name, company, deal_type, stage, value, probability, notes, next_action,
               created_at, updated_at
        FROM pipeline_deals
        ORDER BY updated_at DESC, id DESC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(deals)
}

/// Delete a deal. Activities cascade at the schema level.
pub async fn delete_deal<'e, E>(executor: E, id: i64) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM pipeline_deals
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Deal",
            id: id.to_string(),
        });
    }

    Ok(())
}
