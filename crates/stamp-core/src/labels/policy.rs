use serde::{Deserialize, Serialize};
use stamp_model::{DEFAULT_INVOCATION_LABEL_KEY, DEFAULT_MAX_LABEL_LEN, DEFAULT_MAX_LABELS};

use crate::labels::{PolicyError, sanitize::is_label_char};

/// Syntactic constraints of the remote label API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelPolicy {
    /// Label key carrying the invocation identifier.
    pub invocation_key: String,
    /// Maximum length of a sanitized key or value, in characters.
    pub max_len: usize,
    /// Maximum number of labels on one request.
    pub max_entries: usize,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            invocation_key: DEFAULT_INVOCATION_LABEL_KEY.to_string(),
            max_len: DEFAULT_MAX_LABEL_LEN,
            max_entries: DEFAULT_MAX_LABELS,
        }
    }
}

impl LabelPolicy {
    /// Validate the policy before use.
    ///
    /// Rules:
    /// - `max_len` and `max_entries` are at least 1;
    /// - `invocation_key` is non-empty, at most `max_len` long and already in sanitized form.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_len == 0 {
            return Err(PolicyError::ZeroLimit("maxLen"));
        }
        if self.max_entries == 0 {
            return Err(PolicyError::ZeroLimit("maxEntries"));
        }
        let key = &self.invocation_key;
        if key.is_empty() || key.len() > self.max_len || !key.chars().all(is_label_char) {
            return Err(PolicyError::InvalidInvocationKey(key.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let p = LabelPolicy::default();
        assert_eq!(p.invocation_key, "dbt_invocation_id");
        assert_eq!(p.max_len, 63);
        assert_eq!(p.max_entries, 64);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let p: LabelPolicy = serde_json::from_str(r#"{"maxEntries": 10}"#).unwrap();
        assert_eq!(p.max_entries, 10);
        assert_eq!(p.max_len, 63);
        assert_eq!(p.invocation_key, "dbt_invocation_id");
    }

    #[test]
    fn rejects_zero_limits() {
        let p = LabelPolicy {
            max_len: 0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(PolicyError::ZeroLimit("maxLen"))));

        let p = LabelPolicy {
            max_entries: 0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(PolicyError::ZeroLimit("maxEntries"))
        ));
    }

    #[test]
    fn rejects_unsanitized_invocation_key() {
        for bad in ["", "Invocation", "run id", "run.id"] {
            let p = LabelPolicy {
                invocation_key: bad.to_string(),
                ..Default::default()
            };
            assert!(
                matches!(p.validate(), Err(PolicyError::InvalidInvocationKey(_))),
                "expected {bad:?} to be rejected"
            );
        }

        let too_long = LabelPolicy {
            invocation_key: "abcdef".to_string(),
            max_len: 5,
            ..Default::default()
        };
        assert!(too_long.validate().is_err());
    }
}
