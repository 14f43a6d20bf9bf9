//! Flat key/value settings with upsert semantics.
//!
//! Keys prefixed with `_` are reserved for read-only runtime status values
//! the server injects at read time; writes to them are rejected here, before
//! any row is touched.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Setting;

/// Prefix marking reserved, read-only keys.
pub const RESERVED_PREFIX: char = '_';

/// Create or update a setting.
///
/// Rejects keys starting with `_` without modifying anything.
pub async fn upsert_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    if key.starts_with(RESERVED_PREFIX) {
        return Err(DatabaseError::Rejected(format!(
            "setting key '{}' is reserved",
            key
        )));
    }

    sqlx::query(
        r#"
        INSERT INTO settings (key, value)
        VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a setting by key.
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<Setting>> {
    let setting = sqlx::query_as::<_, Setting>(
        r#"
        SELECT key, value, updated_at
        FROM settings
        WHERE key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(setting)
}

/// List all settings, ordered by key.
pub async fn list_settings(pool: &SqlitePool) -> Result<Vec<Setting>> {
    let settings = sqlx::query_as::<_, Setting>(
        r#"
        SELECT key, value, updated_at
        FROM settings
        ORDER BY key
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_db;

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let db = test_db().await;

        upsert_setting(db.pool(), "daily_send_limit", "50")
            .await
            .unwrap();
        upsert_setting(db.pool(), "daily_send_limit", "75")
            .await
            .unwrap();

        let setting = get_setting(db.pool(), "daily_send_limit")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(setting.value, "75");

        let all = list_settings(db.pool()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_reserved_keys_are_rejected_without_write() {
        let db = test_db().await;

        let err = upsert_setting(db.pool(), "_smtp_configured", "true")
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Rejected(_)));

        assert!(get_setting(db.pool(), "_smtp_configured")
            .await
            .unwrap()
            .is_none());
    }
}
