//! Outreach email generation.
//!
//! Drafting is a two-stage pipeline: an optional AI stage tried first, and
//! a deterministic template stage that always succeeds. Each lead type has
//! a fixed five-step sequence (hook, social proof, ROI, urgency, breakup);
//! replies are keyed by the inbound message's classification instead of a
//! sequence position.

mod engine;
mod lead;
mod reply;
mod sequences;
mod substitute;

pub use engine::{EmailEngine, GeneratedEmail};
pub use lead::{LeadDetails, LeadType};
pub use substitute::substitute;
