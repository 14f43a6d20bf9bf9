//! Deterministic reply templates, keyed by inbound classification.

use classifier::{Classification, InboundEmail};

/// Reply subject: thread onto the original, without stacking "Re:" prefixes.
pub(crate) fn reply_subject(original_subject: &str) -> String {
    let trimmed = original_subject.trim();
    if trimmed.to_lowercase().starts_with("re:") {
        trimmed.to_string()
    } else if trimmed.is_empty() {
        "Re: your message".to_string()
    } else {
        format!("Re: {}", trimmed)
    }
}

/// The fallback reply body for a classification. Spam and system never get
/// a reply, so they have no template; callers filter them out first.
pub(crate) fn reply_body(classification: Classification, original: &InboundEmail) -> String {
    let name = greeting_from(&original.from);
    match classification {
        Classification::Interested => format!(
            "Hi {},\n\nGreat to hear. The easiest next step is a 15-minute call \
to walk through how the program would work on your side; I'll send over a few \
times that could work this week.\n\nLooking forward to it,\nThe Relo \
Partnerships Team",
            name
        ),
        Classification::Objection => format!(
            "Hi {},\n\nCompletely understood, and no pressure on timing. If it's \
useful I can send a one-pager you can keep on file, and I'll check back in a \
few months rather than keep emailing.\n\nBest,\nThe Relo Partnerships Team",
            name
        ),
        Classification::NotInterested => format!(
            "Hi {},\n\nUnderstood. I've removed you from this sequence and you \
won't hear from us again. Thanks for letting me know.\n\n\
Best,\nThe Relo Partnerships Team",
            name
        ),
        Classification::Question => format!(
            "Hi {},\n\nGood question. The short version: Relo matches relocating \
tenants to partnered housing before they arrive, and handles screening, leases, \
and deposits on-platform. Happy to go deeper on any part of that, or hop on a \
quick call if that's easier.\n\nBest,\nThe Relo Partnerships Team",
            name
        ),
        Classification::Spam | Classification::System => String::new(),
    }
}

/// A greeting name from a From header like `"Dana Reyes" <dana@x.com>` or a
/// bare address.
fn greeting_from(from: &str) -> String {
    let display = from.split('<').next().unwrap_or("").trim().trim_matches('"');
    let candidate = if display.is_empty() || display.contains('@') {
        from.split('<')
            .nth(1)
            .unwrap_or(from)
            .split('@')
            .next()
            .unwrap_or("")
            .trim()
    } else {
        display.split_whitespace().next().unwrap_or("")
    };
    if candidate.is_empty() {
        "there".to_string()
    } else {
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_subject_threads_without_stacking() {
        assert_eq!(reply_subject("Pricing question"), "Re: Pricing question");
        assert_eq!(reply_subject("Re: Pricing question"), "Re: Pricing question");
        assert_eq!(reply_subject("  "), "Re: your message");
    }

    #[test]
    fn test_greeting_prefers_display_name() {
        assert_eq!(greeting_from("\"Dana Reyes\" <dana@x.com>"), "Dana");
        assert_eq!(greeting_from("dana@x.com"), "dana");
        assert_eq!(greeting_from(""), "there");
    }

    #[test]
    fn test_opt_out_reply_confirms_removal() {
        let original = InboundEmail {
            from: "dana@x.com".to_string(),
            subject: "Re: housing".to_string(),
            body: "unsubscribe".to_string(),
        };
        let body = reply_body(Classification::NotInterested, &original);
        assert!(body.contains("removed you"));
    }
}
