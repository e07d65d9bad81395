use thiserror::Error;

use crate::context::ExecutionUnit;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("execution unit ({unit}) already runs task '{held}'; refusing to start '{incoming}'")]
    Conflict {
        unit: ExecutionUnit,
        held: String,
        incoming: String,
    },

    /// The unit's slot cannot be reached; only happens while thread-local
    /// storage is being torn down at thread exit.
    #[error("context storage is unavailable for execution unit ({0})")]
    Unavailable(ExecutionUnit),
}
