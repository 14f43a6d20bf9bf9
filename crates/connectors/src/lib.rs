//! Lead source connectors.
//!
//! Each connector adapts one external CRM backend into the canonical
//! [`Lead`] shape: cricket (landlord inventory, bearer-token auth),
//! grasshopper (employer relocation data, unauthenticated), and a static
//! in-repo university partnership playbook.
//!
//! Connectors are read-path only and never surface errors: any network
//! failure, non-2xx status, malformed payload, or empty result degrades to
//! a fixed sample dataset tagged `source = "sample"`. The only state shared
//! across requests is the cricket bearer-token cache.

mod config;
mod cricket;
mod error;
mod grasshopper;
mod lead;
mod normalize;
mod samples;
mod token;
mod university;

pub use config::{CricketConfig, GrasshopperConfig};
pub use cricket::CricketConnector;
pub use error::ConnectorError;
pub use grasshopper::GrasshopperConnector;
pub use lead::{Lead, LeadFilters, LeadPage, LeadStatus};
pub use samples::{sample_employers, sample_landlords};
pub use token::BearerTokenCache;
pub use university::{university_contacts, UniversityContact, UniversityFilters};

/// Source tag for live cricket data.
pub const SOURCE_CRICKET: &str = "cricket";
/// Source tag for live grasshopper data.
pub const SOURCE_GRASSHOPPER: &str = "grasshopper";
/// Source tag for the hardcoded fallback datasets.
pub const SOURCE_SAMPLE: &str = "sample";
/// Source tag for the static university playbook.
pub const SOURCE_PLAYBOOK: &str = "playbook";
