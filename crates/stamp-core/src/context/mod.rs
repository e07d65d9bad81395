//! Task-scoped context: which task descriptor the calling execution unit is running.
mod error;
pub use error::ContextError;

mod store;
pub use store::{ContextStore, ExecutionUnit};

mod hook;
pub use hook::ExecutionHook;
