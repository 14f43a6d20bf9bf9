//! Placeholder substitution for subject templates.

use std::collections::HashMap;

/// Substitute `{{key}}` and `${key}` tokens in one left-to-right pass.
///
/// A single pass means a substituted value can never itself be re-expanded,
/// so the result does not depend on map iteration order. Tokens with no
/// matching key are dropped; an unterminated opener is copied through
/// literally.
pub fn substitute(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let brace = rest.find("{{").map(|i| (i, "{{", "}}"));
        let dollar = rest.find("${").map(|i| (i, "${", "}"));
        let next = match (brace, dollar) {
            (Some(b), Some(d)) => Some(if b.0 <= d.0 { b } else { d }),
            (Some(b), None) => Some(b),
            (None, Some(d)) => Some(d),
            (None, None) => None,
        };

        let Some((start, open, close)) = next else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..start]);

        let after = &rest[start + open.len()..];
        match after.find(close) {
            Some(end) => {
                if let Some(value) = values.get(after[..end].trim()) {
                    out.push_str(value);
                }
                rest = &after[end + close.len()..];
            }
            None => {
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> HashMap<&'static str, String> {
        let mut map = HashMap::new();
        map.insert("city", "Austin".to_string());
        map.insert("company", "Reyes Properties".to_string());
        map.insert("name", "Dana".to_string());
        map
    }

    #[test]
    fn test_both_token_styles_substitute_in_one_pass() {
        let out = substitute("Hi {{name}}, news from ${city} for {{company}}", &values());
        assert_eq!(out, "Hi Dana, news from Austin for Reyes Properties");
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let out = substitute("Hello {{nobody}}${missing}!", &values());
        assert_eq!(out, "Hello !");
        assert!(!out.contains("{{"));
        assert!(!out.contains("${"));
    }

    #[test]
    fn test_substituted_values_are_not_re_expanded() {
        let mut map = values();
        map.insert("company", "{{city}} Holdings".to_string());
        let out = substitute("{{company}}", &map);
        assert_eq!(out, "{{city}} Holdings");
    }

    #[test]
    fn test_unterminated_opener_is_copied_literally() {
        let out = substitute("broken {{name", &values());
        assert_eq!(out, "broken {{name");
    }
}
