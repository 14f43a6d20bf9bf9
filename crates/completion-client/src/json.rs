//! Extraction of JSON payloads from free-form model output.

/// Find and parse the first balanced JSON object embedded in `text`.
///
/// Models frequently wrap their JSON in prose or code fences; callers only
/// care about the object itself. Scanning is string-aware so braces inside
/// quoted values don't end the object early. Brace groups that balance but
/// fail to parse (prose like "wrap {this} in braces") are skipped and the
/// scan continues. Returns `None` when no parseable object is present.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;
        if let Some(end) = balanced_end(text, start) {
            if let Ok(value) = serde_json::from_str(&text[start..end]) {
                return Some(value);
            }
        }
        from = start + 1;
    }
    None
}

/// Exclusive end index of the brace group opening at `start`, or `None`
/// when the group never closes.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in text.as_bytes()[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}
