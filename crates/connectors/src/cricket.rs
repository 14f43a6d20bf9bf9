//! Cricket CRM connector (landlord leads, bearer-token auth).

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::CricketConfig;
use crate::error::ConnectorError;
use crate::lead::{LeadFilters, LeadPage};
use crate::normalize::{landlord_lead, record_array};
use crate::samples::sample_landlords;
use crate::token::BearerTokenCache;
use crate::{SOURCE_CRICKET, SOURCE_SAMPLE};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expiry")]
    expires_in: u64,
}

fn default_expiry() -> u64 {
    900
}

/// Connector for the cricket landlord CRM.
///
/// Cricket issues short-lived bearer tokens from `/auth/token`; the token
/// is cached per connector instance and discarded the moment a protected
/// call answers 401, forcing one transparent re-auth before giving up.
pub struct CricketConnector {
    client: Client,
    config: CricketConfig,
    tokens: BearerTokenCache,
}

impl CricketConnector {
    /// Create a connector with the given configuration.
    pub fn new(config: CricketConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            tokens: BearerTokenCache::new(),
        }
    }

    /// Create a connector from environment variables.
    pub fn from_env() -> Self {
        Self::new(CricketConfig::from_env())
    }

    /// The token cache (exposed for tests with fake expiries).
    pub fn token_cache(&self) -> &BearerTokenCache {
        &self.tokens
    }

    /// Fetch landlord leads. Never fails: any upstream problem degrades to
    /// the fixed sample dataset tagged `source = "sample"`.
    pub async fn fetch_leads(&self, filters: &LeadFilters) -> LeadPage {
        match self.try_fetch(filters).await {
            Ok(page) if !page.leads.is_empty() => page,
            Ok(_) => {
                warn!("cricket returned zero records, serving sample data");
                sample_page()
            }
            Err(err) => {
                warn!(error = %err, "cricket fetch failed, serving sample data");
                sample_page()
            }
        }
    }

    async fn try_fetch(&self, filters: &LeadFilters) -> Result<LeadPage, ConnectorError> {
        let base = self
            .config
            .api_url
            .as_deref()
            .ok_or(ConnectorError::Unconfigured("CRICKET_API_URL"))?;

        let url = format!("{}/v1/landlords", base);
        let query = translate_filters(filters);

        let token = self.bearer_token().await?;
        let response = self.authorized_get(&url, &query, &token).await?;

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            // Stale or revoked token: drop it and re-auth exactly once.
            debug!("cricket token rejected, re-authenticating");
            self.tokens.invalidate();
            let fresh = self.authenticate().await?;
            let retry = self.authorized_get(&url, &query, &fresh).await?;
            if retry.status() == StatusCode::UNAUTHORIZED {
                return Err(ConnectorError::Auth(
                    "token rejected twice in a row".to_string(),
                ));
            }
            retry
        } else {
            response
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Status(status.as_u16()));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ConnectorError::Malformed(e.to_string()))?;

        let records = record_array(&payload, &["landlords", "results", "data"])
            .ok_or_else(|| ConnectorError::Malformed("no record array".to_string()))?;

        let leads: Vec<_> = records
            .iter()
            .map(|r| landlord_lead(r, SOURCE_CRICKET))
            .collect();
        let total = payload
            .get("total")
            .and_then(|v| v.as_i64())
            .unwrap_or(leads.len() as i64);

        debug!(count = leads.len(), total, "fetched cricket landlords");

        Ok(LeadPage {
            leads,
            total,
            source: SOURCE_CRICKET.to_string(),
        })
    }

    async fn authorized_get(
        &self,
        url: &str,
        query: &[(String, String)],
        token: &str,
    ) -> Result<reqwest::Response, ConnectorError> {
        self.client
            .get(url)
            .query(query)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| ConnectorError::Network(e.to_string()))
    }

    /// Get a usable bearer token, from cache or by authenticating.
    async fn bearer_token(&self) -> Result<String, ConnectorError> {
        if let Some(token) = self.tokens.get() {
            return Ok(token);
        }
        self.authenticate().await
    }

    /// Exchange client credentials for a fresh bearer token and cache it.
    async fn authenticate(&self) -> Result<String, ConnectorError> {
        let base = self
            .config
            .api_url
            .as_deref()
            .ok_or(ConnectorError::Unconfigured("CRICKET_API_URL"))?;
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or(ConnectorError::Unconfigured("CRICKET_CLIENT_ID"))?;
        let client_secret = self
            .config
            .client_secret
            .as_deref()
            .ok_or(ConnectorError::Unconfigured("CRICKET_CLIENT_SECRET"))?;

        let response = self
            .client
            .post(format!("{}/auth/token", base))
            .json(&serde_json::json!({
                "client_id": client_id,
                "client_secret": client_secret,
                "grant_type": "client_credentials",
            }))
            .send()
            .await
            .map_err(|e| ConnectorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Auth(format!(
                "token endpoint returned {}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::Auth(format!("bad token payload: {}", e)))?;

        self.tokens
            .store(token.access_token.clone(), Duration::from_secs(token.expires_in));
        debug!(expires_in = token.expires_in, "cached fresh cricket token");

        Ok(token.access_token)
    }
}

/// Translate canonical filters into cricket's query vocabulary.
fn translate_filters(filters: &LeadFilters) -> Vec<(String, String)> {
    let mut query = vec![
        ("page_size".to_string(), filters.limit_or_default().to_string()),
        ("page_offset".to_string(), filters.offset.to_string()),
    ];
    if let Some(status) = &filters.status {
        query.push(("property_status".to_string(), status.to_lowercase()));
    }
    if let Some(min) = filters.min_metric {
        query.push(("min_properties".to_string(), min.to_string()));
    }
    if let Some(region) = &filters.region {
        query.push(("market".to_string(), region.clone()));
    }
    query
}

fn sample_page() -> LeadPage {
    let leads = sample_landlords();
    LeadPage {
        total: leads.len() as i64,
        leads,
        source: SOURCE_SAMPLE.to_string(),
    }
}
