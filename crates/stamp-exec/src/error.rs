use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid statement: {0}")]
    InvalidStatement(String),

    #[error("duplicate runner detected: runner '{name}' is already registered")]
    DuplicateRunner { name: String },
}
