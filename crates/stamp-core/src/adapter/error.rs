use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("remote rejected request: {0}")]
    Remote(String),

    #[error("internal error: {0}")]
    Internal(String),
}
