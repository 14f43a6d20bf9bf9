//! OpenAI-compatible chat-completion client.
//!
//! The dashboard uses a single completion provider for two things: drafting
//! outreach emails and triaging inbound replies. Both treat the provider as
//! an optional enhancement; callers are expected to fall back to their
//! deterministic path when the client is absent or a call fails.
//!
//! # Example
//!
//! ```no_run
//! use completion_client::{CompletionClient, CompletionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), completion_client::CompletionError> {
//!     let config = CompletionConfig::builder().api_key("sk-...").build();
//!     let client = CompletionClient::new(config)?;
//!     let text = client.complete("You write short emails.", "Draft a hello.").await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;
mod error;
mod json;

pub use api_types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
pub use client::CompletionClient;
pub use config::{CompletionConfig, CompletionConfigBuilder};
pub use error::CompletionError;
pub use json::extract_json;
