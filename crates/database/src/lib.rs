//! SQLite persistence layer for the Relo outreach dashboard.
//!
//! This crate provides async database operations for pipeline deals, their
//! activity trail, the outbound email log, and flat key/value settings,
//! using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, deal::NewDealRow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:outreach.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let row = NewDealRow {
//!         name: "Acme Properties".to_string(),
//!         company: None,
//!         deal_type: "landlord".to_string(),
//!         stage: "lead".to_string(),
//!         value: 0.0,
//!         probability: 10,
//!         notes: None,
//!         next_action: None,
//!     };
//!     database::deal::insert_deal(db.pool(), &row).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod deal;
pub mod email_log;
pub mod error;
pub mod models;
pub mod settings;
pub mod stats;

pub use error::{DatabaseError, Result};
pub use models::{Activity, Deal, EmailLogEntry, Setting};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// The dashboard assumes a single operator, so a small pool suffices.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist, or
    /// `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up
    /// to date. Migrations are idempotent.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
pub(crate) async fn test_db() -> Database {
    let db = Database::connect("sqlite::memory:").await.expect("connect");
    db.migrate().await.expect("migrate");
    db
}
