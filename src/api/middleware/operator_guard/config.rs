use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Leading character marking a query-language operator token
pub const SIGIL: char = '$';

/// Closed set of recognized query-language operator tokens.
///
/// Injected into the matcher rather than read from a hidden static so tests
/// and deployments can vary it. Matching is substring-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorVocabulary {
    tokens: BTreeSet<String>,
}

impl OperatorVocabulary {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for OperatorVocabulary {
    fn default() -> Self {
        Self::new([
            "$eq",
            "$ne",
            "$gt",
            "$gte",
            "$lt",
            "$lte",
            "$in",
            "$nin",
            "$and",
            "$or",
            "$nor",
            "$not",
            "$exists",
            "$type",
            "$regex",
            "$where",
            "$text",
            "$search",
            "$mod",
            "$expr",
            "$elemMatch",
            "$size",
            "$all",
            "$slice",
            "$set",
            "$unset",
            "$inc",
            "$push",
            "$pull",
            "$rename",
        ])
    }
}

/// What to do with a request once a redaction occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizationPolicy {
    /// Rewrite the offending parts and let the request continue (default)
    RedactAndContinue,
    /// Reject the request with 400 once anything was redacted
    RedactAndReject,
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        SanitizationPolicy::RedactAndContinue
    }
}

/// Operator guard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorGuardConfig {
    pub vocabulary: OperatorVocabulary,
    pub policy: SanitizationPolicy,
    /// Upper bound for buffering a JSON body before sanitization
    pub max_body_bytes: usize,
}

impl Default for OperatorGuardConfig {
    fn default() -> Self {
        Self {
            vocabulary: OperatorVocabulary::default(),
            policy: SanitizationPolicy::default(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl OperatorGuardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(mut self, vocabulary: OperatorVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_policy(mut self, policy: SanitizationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_covers_core_operators() {
        let vocab = OperatorVocabulary::default();
        for token in ["$ne", "$gt", "$lt", "$exists", "$where", "$regex"] {
            assert!(vocab.contains(token), "missing {}", token);
        }
        assert!(!vocab.contains("$bogus"));
    }

    #[test]
    fn test_config_builder() {
        let config = OperatorGuardConfig::new()
            .with_policy(SanitizationPolicy::RedactAndReject)
            .with_vocabulary(OperatorVocabulary::new(["$ne"]))
            .with_max_body_bytes(1024);

        assert_eq!(config.policy, SanitizationPolicy::RedactAndReject);
        assert!(config.vocabulary.contains("$ne"));
        assert!(!config.vocabulary.contains("$gt"));
        assert_eq!(config.max_body_bytes, 1024);
    }
}
