use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::object::{LoggerFormat, LoggerLevel};

/// Logger configuration.
///
/// Every field has a default, so partial documents deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// Filter directives (e.g. `"info"`, `"stamp_core=debug,info"`).
    pub level: LoggerLevel,
    /// Include module targets in each line.
    pub with_targets: bool,
    /// Include the thread name; blocking scopes are bound to threads.
    pub with_thread_names: bool,
    /// Colored text output; ignored unless stdout is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            with_thread_names: false,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Color is used only when requested and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LoggerConfig::default();

        assert_eq!(config.format, LoggerFormat::Text);
        assert_eq!(config.level.as_str(), "info");
        assert!(config.with_targets);
        assert!(!config.with_thread_names);
        assert!(config.use_color);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: LoggerConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.format, LoggerFormat::default());
        assert_eq!(config.level.as_str(), LoggerLevel::default().as_str());
        assert!(config.with_targets);
    }

    #[test]
    fn partial_document_overrides_named_fields() {
        let json = r#"{"format": "json", "level": "stamp_core=debug,info", "withThreadNames": true}"#;
        let config: LoggerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "stamp_core=debug,info");
        assert!(config.with_thread_names);
        assert!(config.use_color);
    }

    #[test]
    fn invalid_level_fails_deserialization() {
        let json = r#"{"level": "stamp_core=loud"}"#;
        assert!(serde_json::from_str::<LoggerConfig>(json).is_err());
    }

    #[test]
    fn color_disabled_by_config() {
        let config = LoggerConfig {
            use_color: false,
            ..Default::default()
        };
        assert!(!config.should_use_color());
    }
}
