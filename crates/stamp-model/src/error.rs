use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed labels under '{key}': {reason}")]
    MalformedLabels { key: &'static str, reason: String },

    #[error("invalid field '{key}': {reason}")]
    InvalidField { key: String, reason: String },

    #[error("invocation id must not be empty")]
    EmptyInvocationId,
}

pub type ModelResult<T> = Result<T, ModelError>;
