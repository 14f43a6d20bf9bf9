//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Dashboard server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Secret used to sign session cookies.
    pub session_secret: String,
    /// Accepted dashboard logins as (username, password) pairs.
    pub users: Vec<(String, String)>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SERVER_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:relo.db?mode=rwc` |
    /// | `SESSION_SECRET` | Cookie signing secret | (required) |
    /// | `DASHBOARD_USERS` | `user:password` pairs, comma-delimited | (required) |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| "sqlite:relo.db?mode=rwc".to_string());

        let session_secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingSessionSecret)?;
        if session_secret.trim().is_empty() {
            return Err(ConfigError::MissingSessionSecret);
        }

        let users_raw =
            env::var("DASHBOARD_USERS").map_err(|_| ConfigError::MissingDashboardUsers)?;
        let users = parse_users(&users_raw)?;

        Ok(Self {
            addr,
            database_url,
            session_secret,
            users,
        })
    }
}

fn parse_users(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let users: Vec<(String, String)> = raw
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.split_once(':')
                .map(|(user, pass)| (user.trim().to_string(), pass.to_string()))
                .ok_or(ConfigError::MalformedUsers)
        })
        .collect::<Result<_, _>>()?;

    if users.is_empty() {
        return Err(ConfigError::MissingDashboardUsers);
    }
    Ok(users)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SERVER_ADDR format")]
    InvalidAddr,

    #[error("SESSION_SECRET environment variable is required")]
    MissingSessionSecret,

    #[error("DASHBOARD_USERS environment variable is required")]
    MissingDashboardUsers,

    #[error("DASHBOARD_USERS entries must be user:password pairs")]
    MalformedUsers,
}
