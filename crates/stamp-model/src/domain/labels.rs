use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured key–value metadata based on [`BTreeMap`].
///
/// Iteration order is the key order, which keeps every consumer deterministic.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(pub BTreeMap<String, String>);

impl Labels {
    /// Create an empty set of labels.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns `true` if no labels are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Insert or overwrite a label.
    ///
    /// Returns `self` for chaining.
    pub fn insert<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), val.into());
        self
    }

    /// Get the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    /// Iterate through all labels as `(&str, &str)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge two label sets, where entries from `other` override `self`.
    pub fn merged(&self, other: &Labels) -> Labels {
        let mut out = self.0.clone();
        out.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Labels(out)
    }
}

impl<K, V> FromIterator<(K, V)> for Labels
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Labels;

    #[test]
    fn new_is_empty() {
        let labels = Labels::new();
        assert!(labels.is_empty());
        assert_eq!(labels.len(), 0);
        assert!(labels.get("team").is_none());
    }

    #[test]
    fn insert_overwrites_and_chains() {
        let mut labels = Labels::new();
        labels.insert("team", "a").insert("env", "prod").insert("team", "b");

        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("team"), Some("b"));
        assert_eq!(labels.get("env"), Some("prod"));
    }

    #[test]
    fn iter_is_key_ordered() {
        let labels: Labels = [("zeta", "1"), ("alpha", "2"), ("mid", "3")]
            .into_iter()
            .collect();

        let keys: Vec<_> = labels.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn merged_other_overrides_base() {
        let base: Labels = [("team", "base"), ("env", "dev")].into_iter().collect();
        let other: Labels = [("team", "override"), ("owner", "me")]
            .into_iter()
            .collect();

        let merged = base.merged(&other);

        assert_eq!(merged.get("team"), Some("override"));
        assert_eq!(merged.get("env"), Some("dev"));
        assert_eq!(merged.get("owner"), Some("me"));
        assert_eq!(base.get("team"), Some("base"));
    }

    #[test]
    fn serde_transparent_object() {
        let labels: Labels = [("team", "data")].into_iter().collect();
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"team":"data"}"#);

        let back: Labels = serde_json::from_str(&json).unwrap();
        assert_eq!(back, labels);
    }
}
