use stamp_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid task descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),
}

impl From<ModelError> for RunnerError {
    fn from(e: ModelError) -> Self {
        RunnerError::InvalidDescriptor(e.to_string())
    }
}
