use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("label policy limit '{0}' must be at least 1")]
    ZeroLimit(&'static str),

    #[error("invocation label key '{0}' must be non-empty, within maxLen and match [a-z0-9_-]")]
    InvalidInvocationKey(String),
}
