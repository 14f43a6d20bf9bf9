//! Batch AI override of keyword verdicts.

use completion_client::CompletionClient;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::rules::{classify, Classification, Priority, Verdict};
use crate::InboundEmail;

/// At most this many messages go to the model in one call; anything past
/// the cutoff keeps its keyword verdict.
const BATCH_LIMIT: usize = 20;

const SYSTEM_PROMPT: &str = "You triage inbound replies to housing-relocation \
outreach emails. For each numbered message, judge the sender's intent. \
Respond with ONLY a JSON array of objects shaped like \
{\"index\": 0, \"classification\": \"interested\", \"priority\": \"high\"}. \
Valid classifications: interested, objection, not_interested, question, \
spam, system. Valid priorities: high, medium, low.";

#[derive(Debug, Deserialize)]
struct OverrideRow {
    index: usize,
    classification: String,
    priority: String,
}

/// Classify a page of messages: keyword rules first, then one completion
/// call that may override the first [`BATCH_LIMIT`] verdicts.
///
/// The AI pass is strictly best-effort. A failed call, unparseable answer,
/// out-of-range index, or unknown label leaves the keyword verdict for
/// that message untouched.
pub async fn classify_batch(
    client: Option<&CompletionClient>,
    emails: &[InboundEmail],
) -> Vec<Verdict> {
    let mut verdicts: Vec<Verdict> = emails
        .iter()
        .map(|e| classify(&e.subject, &e.body))
        .collect();

    let Some(client) = client else {
        return verdicts;
    };
    if emails.is_empty() {
        return verdicts;
    }

    let batch = &emails[..emails.len().min(BATCH_LIMIT)];
    let prompt = batch_prompt(batch);

    let response = match client.complete(SYSTEM_PROMPT, &prompt).await {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "triage completion failed, keeping keyword verdicts");
            return verdicts;
        }
    };

    let Some(rows) = parse_overrides(&response) else {
        warn!("triage completion returned no usable array, keeping keyword verdicts");
        return verdicts;
    };

    let mut applied = 0usize;
    for row in rows {
        if row.index >= batch.len() {
            continue;
        }
        let (Some(classification), Some(priority)) = (
            Classification::parse(&row.classification),
            Priority::parse(&row.priority),
        ) else {
            continue;
        };
        verdicts[row.index] = Verdict {
            classification,
            priority,
        };
        applied += 1;
    }
    debug!(applied, batch = batch.len(), "applied triage overrides");

    verdicts
}

fn batch_prompt(batch: &[InboundEmail]) -> String {
    let mut prompt = String::from("Classify these replies:\n");
    for (i, email) in batch.iter().enumerate() {
        prompt.push_str(&format!(
            "[{}] From: {}\nSubject: {}\nBody: {}\n\n",
            i, email.from, email.subject, email.body
        ));
    }
    prompt
}

/// Pull the first JSON array out of the response text. Models often wrap
/// answers in prose or code fences.
fn parse_overrides(response: &str) -> Option<Vec<OverrideRow>> {
    let trimmed = response.trim();
    if let Ok(rows) = serde_json::from_str::<Vec<OverrideRow>>(trimmed) {
        return Some(rows);
    }
    let start = trimmed.find('[')?;
    let end = trimmed.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Vec<OverrideRow>>(&trimmed[start..=end]).ok()
}
