//! Ordered keyword rules.

use serde::{Deserialize, Serialize};

/// What kind of reply this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Interested,
    Objection,
    NotInterested,
    Question,
    /// Never produced by the keyword rules; only the AI override assigns it.
    Spam,
    System,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Interested => "interested",
            Classification::Objection => "objection",
            Classification::NotInterested => "not_interested",
            Classification::Question => "question",
            Classification::Spam => "spam",
            Classification::System => "system",
        }
    }

    /// Parse a label, tolerating casing. Unknown labels are `None` so the
    /// AI override can discard them.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "interested" => Some(Classification::Interested),
            "objection" => Some(Classification::Objection),
            "not_interested" => Some(Classification::NotInterested),
            "question" => Some(Classification::Question),
            "spam" => Some(Classification::Spam),
            "system" => Some(Classification::System),
            _ => None,
        }
    }
}

/// How urgently a human should look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// Classification plus priority for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub classification: Classification,
    pub priority: Priority,
}

const INTERESTED: &[&str] = &[
    "interested",
    "tell me more",
    "schedule",
    "meeting",
    "call me",
    "sounds good",
];

const OBJECTION: &[&str] = &[
    "not right now",
    "maybe later",
    "too expensive",
    "already have",
    "using another",
];

const NOT_INTERESTED: &[&str] = &[
    "unsubscribe",
    "remove me",
    "stop emailing",
    "not interested",
    "no thanks",
];

const QUESTION: &[&str] = &["how does", "what is", "can you explain", "?", "more information"];

const SYSTEM_SUBJECT: &[&str] = &["delivery", "undeliverable", "auto-reply", "out of office"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Classify one reply from its subject and body.
///
/// Rules are checked in a fixed order and the first match wins. Note that
/// "not interested" wins over the "?" question rule, since the opt-out set
/// is checked first. Bounce markers only count in the subject line; bodies
/// quote them too often.
pub fn classify(subject: &str, body: &str) -> Verdict {
    let text = format!("{} {}", subject, body).to_lowercase();

    if contains_any(&text, INTERESTED) {
        return Verdict {
            classification: Classification::Interested,
            priority: Priority::High,
        };
    }
    if contains_any(&text, OBJECTION) {
        return Verdict {
            classification: Classification::Objection,
            priority: Priority::Medium,
        };
    }
    if contains_any(&text, NOT_INTERESTED) {
        return Verdict {
            classification: Classification::NotInterested,
            priority: Priority::Low,
        };
    }
    if contains_any(&text, QUESTION) {
        return Verdict {
            classification: Classification::Question,
            priority: Priority::Medium,
        };
    }
    if contains_any(&subject.to_lowercase(), SYSTEM_SUBJECT) {
        return Verdict {
            classification: Classification::System,
            priority: Priority::Low,
        };
    }

    Verdict {
        classification: Classification::Question,
        priority: Priority::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_keywords_rank_high() {
        let v = classify("Re: housing", "This sounds good, can we schedule?");
        assert_eq!(v.classification, Classification::Interested);
        assert_eq!(v.priority, Priority::High);
    }

    #[test]
    fn test_objection_beats_question_mark() {
        let v = classify("Re: housing", "Not right now, maybe Q3?");
        assert_eq!(v.classification, Classification::Objection);
        assert_eq!(v.priority, Priority::Medium);
    }

    #[test]
    fn test_opt_out_beats_question_mark() {
        let v = classify("Re: housing", "Not interested, how did you get this address?");
        assert_eq!(v.classification, Classification::NotInterested);
        assert_eq!(v.priority, Priority::Low);
    }

    #[test]
    fn test_bounce_detected_in_subject_only() {
        let v = classify("Undeliverable: your message", "");
        assert_eq!(v.classification, Classification::System);
        assert_eq!(v.priority, Priority::Low);

        // Bounce language in the body alone does not trigger the rule.
        let v = classify("hello", "the delivery was late");
        assert_eq!(v.classification, Classification::Question);
    }

    #[test]
    fn test_unmatched_text_defaults_to_question_medium() {
        let v = classify("Re: hello", "Thanks for reaching out.");
        assert_eq!(v.classification, Classification::Question);
        assert_eq!(v.priority, Priority::Medium);
    }

    #[test]
    fn test_labels_round_trip() {
        assert_eq!(Classification::parse("NOT_INTERESTED"), Some(Classification::NotInterested));
        assert_eq!(Classification::parse("mystery"), None);
        assert_eq!(Classification::NotInterested.as_str(), "not_interested");
        assert_eq!(Priority::parse("High"), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_serde_uses_snake_case_labels() {
        let json = serde_json::to_string(&Classification::NotInterested).unwrap();
        assert_eq!(json, "\"not_interested\"");
        let json = serde_json::to_string(&Priority::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
