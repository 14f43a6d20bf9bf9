//! Grasshopper CRM connector (employer leads, no authentication).

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GrasshopperConfig;
use crate::error::ConnectorError;
use crate::lead::{LeadFilters, LeadPage};
use crate::normalize::{employer_lead, record_array};
use crate::samples::sample_employers;
use crate::{SOURCE_GRASSHOPPER, SOURCE_SAMPLE};

/// Connector for the grasshopper employer CRM.
///
/// Grasshopper exposes an open read endpoint, so there is no token dance;
/// the only failure modes are configuration, network, and payload shape.
pub struct GrasshopperConnector {
    client: Client,
    config: GrasshopperConfig,
}

impl GrasshopperConnector {
    /// Create a connector with the given configuration.
    pub fn new(config: GrasshopperConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create a connector from environment variables.
    pub fn from_env() -> Self {
        Self::new(GrasshopperConfig::from_env())
    }

    /// Fetch employer leads. Never fails: any upstream problem degrades to
    /// the fixed sample dataset tagged `source = "sample"`.
    pub async fn fetch_leads(&self, filters: &LeadFilters) -> LeadPage {
        match self.try_fetch(filters).await {
            Ok(page) if !page.leads.is_empty() => page,
            Ok(_) => {
                warn!("grasshopper returned zero records, serving sample data");
                sample_page()
            }
            Err(err) => {
                warn!(error = %err, "grasshopper fetch failed, serving sample data");
                sample_page()
            }
        }
    }

    async fn try_fetch(&self, filters: &LeadFilters) -> Result<LeadPage, ConnectorError> {
        let base = self
            .config
            .api_url
            .as_deref()
            .ok_or(ConnectorError::Unconfigured("GRASSHOPPER_API_URL"))?;

        let response = self
            .client
            .get(format!("{}/v1/employers", base))
            .query(&translate_filters(filters))
            .send()
            .await
            .map_err(|e| ConnectorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Status(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ConnectorError::Malformed(e.to_string()))?;

        let records = record_array(&payload, &["employers", "results", "data"])
            .ok_or_else(|| ConnectorError::Malformed("no record array".to_string()))?;

        let leads: Vec<_> = records
            .iter()
            .map(|r| employer_lead(r, SOURCE_GRASSHOPPER))
            .collect();
        let total = payload
            .get("total")
            .and_then(|v| v.as_i64())
            .unwrap_or(leads.len() as i64);

        debug!(count = leads.len(), total, "fetched grasshopper employers");

        Ok(LeadPage {
            leads,
            total,
            source: SOURCE_GRASSHOPPER.to_string(),
        })
    }
}

/// Translate canonical filters into grasshopper's query vocabulary.
fn translate_filters(filters: &LeadFilters) -> Vec<(String, String)> {
    let mut query = vec![
        ("limit".to_string(), filters.limit_or_default().to_string()),
        ("offset".to_string(), filters.offset.to_string()),
    ];
    if let Some(status) = &filters.status {
        query.push(("hiring_status".to_string(), status.to_lowercase()));
    }
    if let Some(min) = filters.min_metric {
        query.push(("min_relocations".to_string(), min.to_string()));
    }
    if let Some(region) = &filters.region {
        query.push(("sector".to_string(), region.clone()));
    }
    query
}

fn sample_page() -> LeadPage {
    let leads = sample_employers();
    LeadPage {
        total: leads.len() as i64,
        leads,
        source: SOURCE_SAMPLE.to_string(),
    }
}
