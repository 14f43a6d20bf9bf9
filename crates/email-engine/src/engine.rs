//! The two-stage drafting engine: AI first, templates always.

use completion_client::{extract_json, CompletionClient};
use serde::Serialize;
use tracing::{debug, warn};

use classifier::{classify, Classification, InboundEmail};

use crate::lead::{LeadDetails, LeadType};
use crate::reply::{reply_body, reply_subject};
use crate::sequences::step_for;

/// A drafted email plus which stage produced it.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
    /// "ai" or "template".
    pub source: String,
}

/// Drafts outreach emails and replies.
///
/// The AI stage is optional and strictly best-effort: no client, a failed
/// call, or an unusable answer all fall through to the template stage,
/// which cannot fail. Callers therefore never see an error from the
/// generation path.
pub struct EmailEngine {
    client: Option<CompletionClient>,
}

impl EmailEngine {
    pub fn new(client: Option<CompletionClient>) -> Self {
        Self { client }
    }

    /// Whether the AI stage is configured.
    pub fn has_ai(&self) -> bool {
        self.client.is_some()
    }

    /// Draft outreach email `email_number` (1-based, clamped past 5) of the
    /// sequence for this lead type.
    pub async fn generate(
        &self,
        lead_type: LeadType,
        lead: &LeadDetails,
        email_number: usize,
    ) -> GeneratedEmail {
        let step = step_for(lead_type, email_number);

        if let Some((subject, body)) = self
            .try_ai(
                persona(lead_type),
                &outreach_prompt(lead_type, lead, email_number, step.strategy),
            )
            .await
        {
            return GeneratedEmail {
                subject,
                body,
                source: "ai".to_string(),
            };
        }

        let (subject, body) = step.render(lead);
        GeneratedEmail {
            subject,
            body,
            source: "template".to_string(),
        }
    }

    /// Draft a reply to an inbound message. Returns `None` when the message
    /// classifies as spam or system traffic, which never gets a reply.
    pub async fn generate_reply(&self, original: &InboundEmail) -> Option<GeneratedEmail> {
        let verdict = classify(&original.subject, &original.body);
        if matches!(
            verdict.classification,
            Classification::Spam | Classification::System
        ) {
            debug!(
                classification = verdict.classification.as_str(),
                "no reply generated for this classification"
            );
            return None;
        }

        if let Some((subject, body)) = self
            .try_ai(REPLY_PERSONA, &reply_prompt(original, verdict.classification))
            .await
        {
            return Some(GeneratedEmail {
                subject,
                body,
                source: "ai".to_string(),
            });
        }

        Some(GeneratedEmail {
            subject: reply_subject(&original.subject),
            body: reply_body(verdict.classification, original),
            source: "template".to_string(),
        })
    }

    /// Run the AI stage if configured, parsing a `{"subject", "body"}`
    /// object out of the response. Any failure is logged and swallowed.
    async fn try_ai(&self, system: &str, user: &str) -> Option<(String, String)> {
        let client = self.client.as_ref()?;
        match client.complete(system, user).await {
            Ok(text) => {
                let draft = parse_draft(&text);
                if draft.is_none() {
                    warn!("completion had no usable subject/body, using template");
                }
                draft
            }
            Err(err) => {
                warn!(error = %err, "draft completion failed, using template");
                None
            }
        }
    }
}

fn parse_draft(text: &str) -> Option<(String, String)> {
    let value = extract_json(text)?;
    let subject = value.get("subject")?.as_str()?.trim().to_string();
    let body = value.get("body")?.as_str()?.trim().to_string();
    if subject.is_empty() || body.is_empty() {
        return None;
    }
    Some((subject, body))
}

const REPLY_PERSONA: &str = "You write replies on behalf of the partnerships \
team at Relo, a relocation housing platform. Be brief, warm, and concrete. \
Respond with ONLY a JSON object: {\"subject\": \"...\", \"body\": \"...\"}.";

fn persona(lead_type: LeadType) -> &'static str {
    match lead_type {
        LeadType::Landlord => {
            "You write cold outreach for Relo, a relocation housing platform, \
addressed to independent landlords and property managers. Plain text, under \
120 words, no bullet lists. Respond with ONLY a JSON object: \
{\"subject\": \"...\", \"body\": \"...\"}."
        }
        LeadType::Employer => {
            "You write cold outreach for Relo, a relocation housing platform, \
addressed to HR and people-ops leaders handling employee relocation. Plain \
text, under 120 words, no bullet lists. Respond with ONLY a JSON object: \
{\"subject\": \"...\", \"body\": \"...\"}."
        }
        LeadType::University => {
            "You write cold outreach for Relo, a relocation housing platform, \
addressed to university housing and student-life offices. Plain text, under \
120 words, no bullet lists. Respond with ONLY a JSON object: \
{\"subject\": \"...\", \"body\": \"...\"}."
        }
    }
}

fn outreach_prompt(
    lead_type: LeadType,
    lead: &LeadDetails,
    email_number: usize,
    strategy: &str,
) -> String {
    format!(
        "Draft email {} of 5 in the sequence, using a {} approach.\n\n\
Lead type: {}\nName: {}\nOrganization: {}\nCity: {}, {}\nVolume metric: {}\n\
Lead score: {}",
        email_number.clamp(1, 5),
        strategy,
        lead_type.as_str(),
        lead.greeting_name(),
        lead.org_name(),
        lead.city_name(),
        lead.state,
        lead.volume(),
        lead.score,
    )
}

fn reply_prompt(original: &InboundEmail, classification: Classification) -> String {
    format!(
        "Draft a reply to this inbound message, which our triage classified \
as \"{}\".\n\nFrom: {}\nSubject: {}\nBody:\n{}",
        classification.as_str(),
        original.from,
        original.subject,
        original.body,
    )
}
