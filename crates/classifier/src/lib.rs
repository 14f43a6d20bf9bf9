//! Inbound reply classification.
//!
//! Every reply gets a deterministic verdict from ordered keyword rules, so
//! triage works with no AI configured. When a completion client is
//! available, [`classify_batch`] asks it to re-judge a page of messages in
//! one call and overrides the keyword verdicts where the answer is usable.

mod ai;
mod rules;

pub use ai::classify_batch;
pub use rules::{classify, Classification, Priority, Verdict};

use serde::{Deserialize, Serialize};

/// A reply pulled from the inbox, reduced to what classification and reply
/// drafting need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEmail {
    pub from: String,
    pub subject: String,
    pub body: String,
}
