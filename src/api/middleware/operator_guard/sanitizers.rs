use serde_json::{Map, Value};

use super::matcher::OperatorMatcher;

/// Result of one sanitization pass.
///
/// `changes` is empty iff nothing in the input matched an unsafe predicate;
/// `sanitized` mirrors the input structure with unsafe keys omitted and
/// unsafe values blanked.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizationOutcome {
    pub sanitized: Value,
    pub changes: Vec<String>,
}

impl SanitizationOutcome {
    fn clean(sanitized: Value) -> Self {
        Self {
            sanitized,
            changes: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Operator family detected in a route parameter, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperatorFamily {
    Negation,
    Existence,
    Comparison,
    General,
}

impl std::fmt::Display for OperatorFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorFamily::Negation => write!(f, "negation"),
            OperatorFamily::Existence => write!(f, "existence"),
            OperatorFamily::Comparison => write!(f, "comparison/membership"),
            OperatorFamily::General => write!(f, "operator token"),
        }
    }
}

const COMPARISON_TOKENS: &[&str] = &["$gt", "$gte", "$lt", "$lte", "$in", "$nin"];

/// Structure-preserving sanitizer for parsed request input.
///
/// Walks arbitrary nested mappings and sequences, omitting operator-bearing
/// keys and blanking operator-bearing values. Never mutates its input and
/// never fails; malformed shapes pass through or degrade to the defensive
/// empty-object default.
#[derive(Debug, Clone)]
pub struct RequestSanitizer {
    matcher: OperatorMatcher,
}

impl RequestSanitizer {
    pub fn new(matcher: OperatorMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &OperatorMatcher {
        &self.matcher
    }

    /// Sanitize an arbitrary parsed structure (query or body)
    pub fn sanitize(&self, node: &Value) -> SanitizationOutcome {
        self.sanitize_at(node, "")
    }

    fn sanitize_at(&self, node: &Value, path: &str) -> SanitizationOutcome {
        match node {
            Value::Null => SanitizationOutcome::clean(Value::Object(Map::new())),
            Value::Object(map) => {
                let mut changes = Vec::new();
                let sanitized = self.sanitize_object(map, path, &mut changes);
                SanitizationOutcome {
                    sanitized: Value::Object(sanitized),
                    changes,
                }
            }
            Value::Array(items) => {
                let mut changes = Vec::new();
                let sanitized = self.sanitize_array(items, path, &mut changes);
                SanitizationOutcome {
                    sanitized: Value::Array(sanitized),
                    changes,
                }
            }
            scalar => {
                if self.matcher.value_looks_unsafe(scalar) {
                    SanitizationOutcome {
                        sanitized: Value::String(String::new()),
                        changes: vec![format!("sanitized value at '{}'", path)],
                    }
                } else {
                    SanitizationOutcome::clean(scalar.clone())
                }
            }
        }
    }

    fn sanitize_object(
        &self,
        map: &Map<String, Value>,
        path: &str,
        changes: &mut Vec<String>,
    ) -> Map<String, Value> {
        let mut sanitized = Map::new();

        for (key, value) in map {
            let key_path = join_path(path, key);

            if self.matcher.key_looks_unsafe(key) {
                // Unsafe key: drop it entirely, do not descend into the value
                changes.push(format!("removed key '{}'", key_path));
                continue;
            }

            match value {
                Value::Array(items) => {
                    let inner = self.sanitize_array(items, &key_path, changes);
                    sanitized.insert(key.clone(), Value::Array(inner));
                }
                Value::Object(inner_map) => {
                    let inner = self.sanitize_object(inner_map, &key_path, changes);
                    sanitized.insert(key.clone(), Value::Object(inner));
                }
                other => {
                    if self.matcher.value_looks_unsafe(other) {
                        changes.push(format!("sanitized value at '{}'", key_path));
                        sanitized.insert(key.clone(), Value::String(String::new()));
                    } else {
                        sanitized.insert(key.clone(), other.clone());
                    }
                }
            }
        }

        sanitized
    }

    fn sanitize_array(
        &self,
        items: &[Value],
        path: &str,
        changes: &mut Vec<String>,
    ) -> Vec<Value> {
        let mut sanitized = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", path, index);

            match item {
                Value::Array(inner) => {
                    sanitized.push(Value::Array(self.sanitize_array(inner, &item_path, changes)));
                }
                Value::Object(inner) => {
                    sanitized.push(Value::Object(self.sanitize_object(
                        inner,
                        &item_path,
                        changes,
                    )));
                }
                scalar => {
                    if self.matcher.value_looks_unsafe(scalar) {
                        changes.push(format!("sanitized value at '{}'", item_path));
                        sanitized.push(Value::String(String::new()));
                    } else {
                        sanitized.push(scalar.clone());
                    }
                }
            }
        }

        sanitized
    }

    /// Narrow sanitizer for route parameters: a flat string-to-string map,
    /// no recursion, no JSON parsing. Detection is by operator family in
    /// priority order.
    pub fn sanitize_params(&self, params: &Map<String, Value>) -> SanitizationOutcome {
        let mut sanitized = Map::new();
        let mut changes = Vec::new();

        for (key, value) in params {
            match value {
                Value::String(s) if s.contains('$') => match self.detect_family(s) {
                    Some(family) => {
                        changes.push(format!("sanitized route param '{}' ({})", key, family));
                        sanitized.insert(key.clone(), Value::String(String::new()));
                    }
                    None => {
                        sanitized.insert(key.clone(), value.clone());
                    }
                },
                other => {
                    sanitized.insert(key.clone(), other.clone());
                }
            }
        }

        SanitizationOutcome {
            sanitized: Value::Object(sanitized),
            changes,
        }
    }

    fn detect_family(&self, s: &str) -> Option<OperatorFamily> {
        if s.contains("$ne") {
            Some(OperatorFamily::Negation)
        } else if s.contains("$exists") {
            Some(OperatorFamily::Existence)
        } else if COMPARISON_TOKENS.iter().any(|token| s.contains(token)) {
            Some(OperatorFamily::Comparison)
        } else if self.matcher.string_contains_operator(s) {
            Some(OperatorFamily::General)
        } else {
            None
        }
    }
}

impl Default for RequestSanitizer {
    fn default() -> Self {
        Self::new(OperatorMatcher::default())
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
