use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

const DEFAULT_LEVEL: &str = "info";

/// Validated `EnvFilter` directive string.
///
/// Validation happens on construction, so turning it into a filter later cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    /// # Examples
    /// ```
    /// use stamp_observe::LoggerLevel;
    ///
    /// let lvl = LoggerLevel::new("stamp_core=debug,info").unwrap();
    /// assert_eq!(lvl.as_str(), "stamp_core=debug,info");
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        let s = s.into();
        EnvFilter::try_new(&s).map_err(|e| LoggerError::InvalidLevel(format!("{s}: {e}")))?;
        Ok(Self(s))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.0).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self(DEFAULT_LEVEL.to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::LoggerLevel;

    #[test]
    fn accepts_plain_and_per_target_directives() {
        for lvl in ["info", "trace", "stamp_exec=trace,stamp_core=debug,warn"] {
            assert!(lvl.parse::<LoggerLevel>().is_ok(), "{lvl} should be valid");
        }
    }

    #[test]
    fn rejects_unknown_levels() {
        for lvl in ["stamp_core=loud", "a=trace,b=wat"] {
            assert!(lvl.parse::<LoggerLevel>().is_err(), "{lvl} should be invalid");
        }
    }

    #[test]
    fn deserializes_from_plain_string() {
        let lvl: LoggerLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(lvl.as_str(), "debug");
        assert_eq!(serde_json::to_string(&lvl).unwrap(), r#""debug""#);
    }

    #[test]
    fn default_is_info() {
        let lvl = LoggerLevel::default();
        assert_eq!(lvl.to_string(), "info");
        let _ = lvl.to_env_filter();
    }
}
