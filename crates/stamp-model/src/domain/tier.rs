use std::fmt;

use serde::{Deserialize, Serialize};

/// Source of a label, ordered by precedence (lowest first).
///
/// A label from a higher tier always overrides the same key from a lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelTier {
    /// Labels declared by whoever authored the task.
    Declared,
    /// Labels attached by the invoking session or query annotation.
    Caller,
    /// The system-assigned invocation identifier.
    Invocation,
}

impl LabelTier {
    /// Returns the tier as a static string (log and metric label value).
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelTier::Declared => "declared",
            LabelTier::Caller => "caller",
            LabelTier::Invocation => "invocation",
        }
    }
}

impl fmt::Display for LabelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
