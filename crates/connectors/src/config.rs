//! Connector configuration loaded from environment variables.

use std::env;

/// Configuration for the cricket (landlord) connector.
///
/// | Variable | Description |
/// |----------|-------------|
/// | `CRICKET_API_URL` | Base URL of the cricket CRM |
/// | `CRICKET_CLIENT_ID` | OAuth-style client id |
/// | `CRICKET_CLIENT_SECRET` | OAuth-style client secret |
///
/// All are optional; an unconfigured connector serves sample data.
#[derive(Debug, Clone, Default)]
pub struct CricketConfig {
    pub api_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl CricketConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("CRICKET_API_URL").ok().filter(|v| !v.is_empty()),
            client_id: env::var("CRICKET_CLIENT_ID").ok().filter(|v| !v.is_empty()),
            client_secret: env::var("CRICKET_CLIENT_SECRET")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// Explicit constructor, mainly for tests.
    pub fn new(
        api_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_url: Some(api_url.into()),
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
        }
    }
}

/// Configuration for the grasshopper (employer) connector.
///
/// | Variable | Description |
/// |----------|-------------|
/// | `GRASSHOPPER_API_URL` | Base URL of the grasshopper CRM |
///
/// Optional; an unconfigured connector serves sample data. Grasshopper
/// requires no credential.
#[derive(Debug, Clone, Default)]
pub struct GrasshopperConfig {
    pub api_url: Option<String>,
}

impl GrasshopperConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("GRASSHOPPER_API_URL")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// Explicit constructor, mainly for tests.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
        }
    }
}
