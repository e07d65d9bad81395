use thiserror::Error;

use crate::runner::RunnerError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("runner error: {0}")]
    Runner(#[from] RunnerError),

    #[error("supervisor error: {0}")]
    Supervisor(String),

    #[error("no runner found for task '{0}'")]
    NoRunner(String),
}
