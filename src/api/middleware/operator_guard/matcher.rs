use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::config::{OperatorVocabulary, SIGIL};

/// Cached pattern for the bracketed operator form `field[$op]`
static BRACKETED_OPERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\$\w+\]").expect("Invalid bracketed operator pattern"));

/// Reduced token subset checked when a sigil-bearing string fails to parse
/// as JSON (negation, comparison, existence)
const FALLBACK_TOKENS: &[&str] = &["$ne", "$gt", "$lt", "$exists"];

/// Pure predicates deciding whether a key or value looks like a
/// query-operator injection attempt.
///
/// All checks are total: malformed input degrades to substring checks and
/// never panics.
#[derive(Debug, Clone)]
pub struct OperatorMatcher {
    vocabulary: OperatorVocabulary,
}

impl OperatorMatcher {
    pub fn new(vocabulary: OperatorVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &OperatorVocabulary {
        &self.vocabulary
    }

    /// True iff the string contains any vocabulary token as a substring
    pub fn string_contains_operator(&self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        self.vocabulary.tokens().any(|token| s.contains(token))
    }

    /// True if the key is structurally operator-shaped: leading sigil,
    /// bracketed operator (`field[$op]`), or dotted-path notation combined
    /// with a sigil or bracket. A sigil embedded mid-identifier
    /// (`price$value`) is not flagged.
    pub fn key_looks_unsafe(&self, key: &str) -> bool {
        if key.starts_with(SIGIL) {
            return true;
        }
        if BRACKETED_OPERATOR.is_match(key) {
            return true;
        }
        key.contains('.') && (key.contains(SIGIL) || key.contains('[') || key.contains(']'))
    }

    /// True if a leaf value smuggles an operator.
    ///
    /// Objects get a shallow check of their own keys only; nested objects
    /// are the recursive sanitizer's concern. Strings are matched against
    /// the vocabulary, then against their JSON re-serialization when they
    /// look like embedded JSON.
    pub fn value_looks_unsafe(&self, value: &Value) -> bool {
        match value {
            Value::Object(map) => map.keys().any(|k| k.starts_with(SIGIL)),
            Value::String(s) => self.string_value_looks_unsafe(s),
            _ => false,
        }
    }

    fn string_value_looks_unsafe(&self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        if self.vocabulary.contains(s) {
            return true;
        }
        if self.string_contains_operator(s) {
            return true;
        }
        if s.contains(SIGIL) && (s.contains('{') || s.contains('[')) {
            return match serde_json::from_str::<Value>(s) {
                Ok(parsed) => match serde_json::to_string(&parsed) {
                    Ok(serialized) => serialized.contains(SIGIL),
                    Err(_) => false,
                },
                Err(_) => FALLBACK_TOKENS.iter().any(|token| s.contains(token)),
            };
        }
        false
    }
}

impl Default for OperatorMatcher {
    fn default() -> Self {
        Self::new(OperatorVocabulary::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_contains_operator() {
        let matcher = OperatorMatcher::default();

        assert!(matcher.string_contains_operator("$ne: null"));
        assert!(matcher.string_contains_operator("prefix $where suffix"));
        assert!(!matcher.string_contains_operator("plain text"));
        assert!(!matcher.string_contains_operator(""));
        assert!(!matcher.string_contains_operator("$50 discount"));
    }

    #[test]
    fn test_key_looks_unsafe_leading_sigil() {
        let matcher = OperatorMatcher::default();

        assert!(matcher.key_looks_unsafe("$where"));
        assert!(matcher.key_looks_unsafe("$unknownop"));
    }

    #[test]
    fn test_key_looks_unsafe_bracketed() {
        let matcher = OperatorMatcher::default();

        assert!(matcher.key_looks_unsafe("price[$gt]"));
        assert!(matcher.key_looks_unsafe("user[$ne]"));
    }

    #[test]
    fn test_key_looks_unsafe_dotted_path() {
        let matcher = OperatorMatcher::default();

        assert!(matcher.key_looks_unsafe("account.$balance"));
        assert!(matcher.key_looks_unsafe("items.0[1]"));
        assert!(!matcher.key_looks_unsafe("simple.path"));
    }

    #[test]
    fn test_key_with_embedded_sigil_is_safe() {
        let matcher = OperatorMatcher::default();

        assert!(!matcher.key_looks_unsafe("price$value"));
        assert!(!matcher.key_looks_unsafe("name"));
        assert!(!matcher.key_looks_unsafe(""));
    }

    #[test]
    fn test_value_looks_unsafe_object_shallow() {
        let matcher = OperatorMatcher::default();

        assert!(matcher.value_looks_unsafe(&json!({"$gt": 100})));
        // Shallow only: nested operator keys are handled by recursion
        assert!(!matcher.value_looks_unsafe(&json!({"filter": {"$gt": 100}})));
    }

    #[test]
    fn test_value_looks_unsafe_strings() {
        let matcher = OperatorMatcher::default();

        assert!(matcher.value_looks_unsafe(&json!("$ne")));
        assert!(matcher.value_looks_unsafe(&json!("$ne: null")));
        assert!(matcher.value_looks_unsafe(&json!(r#"{"$gt": ""}"#)));
        assert!(!matcher.value_looks_unsafe(&json!("John")));
        assert!(!matcher.value_looks_unsafe(&json!("")));
        assert!(!matcher.value_looks_unsafe(&json!("$50")));
    }

    #[test]
    fn test_value_looks_unsafe_malformed_json_fallback() {
        let matcher = OperatorMatcher::new(OperatorVocabulary::new(["$where"]));

        // Not valid JSON; falls back to the reduced token subset even though
        // the injected vocabulary does not list $ne
        assert!(matcher.value_looks_unsafe(&json!("{$ne: broken")));
        assert!(!matcher.value_looks_unsafe(&json!("{$regex: broken")));
    }

    #[test]
    fn test_value_looks_unsafe_non_strings() {
        let matcher = OperatorMatcher::default();

        assert!(!matcher.value_looks_unsafe(&json!(42)));
        assert!(!matcher.value_looks_unsafe(&json!(true)));
        assert!(!matcher.value_looks_unsafe(&Value::Null));
    }
}
