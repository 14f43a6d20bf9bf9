//! Deal pipeline state machine.
//!
//! Stages form a closed set parsed at the mutation boundary; the store
//! underneath is plain row CRUD. The invariant this crate owns: one
//! `created` activity per deal, one `stage_change` activity per actual
//! stage transition, and nothing else.

mod engine;
mod error;
mod stage;

pub use engine::{DealPatch, DealWithAge, NewDeal, PipelineEngine};
pub use error::{PipelineError, Result};
pub use stage::Stage;
