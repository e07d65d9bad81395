mod config;
mod error;
mod install;
mod object;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use object::{LoggerFormat, LoggerLevel, LoggerRfc3339};

/// Installs the global tracing subscriber described by `cfg`.
///
/// Can be called once per process; later calls return [`LoggerError::AlreadyInitialized`].
/// Timestamps are RFC3339 in UTC.
///
/// # Examples
/// ```rust
/// use stamp_observe::{LoggerConfig, init_logger};
///
/// fn main() {
///     let config = LoggerConfig::default();
///     init_logger(&config).expect("Failed to initialize logger");
///
///     tracing::info!("Logger initialized successfully");
/// }
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => install::text(cfg),
        LoggerFormat::Json => install::json(cfg),
        LoggerFormat::Journald => install::journald(cfg),
    }
}
