mod error;
pub use error::ExecError;

mod metrics;
pub use metrics::RUNNER_TYPE_STATEMENT;
pub use metrics::task_error_to_outcome;

#[cfg(feature = "statement")]
pub mod statement;
