//! Outcome classification shared by exec runners.

use stamp_core::TaskOutcome;
use taskvisor::TaskError;

/// Statement runner type identifier for metrics.
pub const RUNNER_TYPE_STATEMENT: &str = "statement";

/// Classify a task error for the `outcome` metrics label.
///
/// Scope conflicts surface as `Fatal` and count as failures.
pub fn task_error_to_outcome(error: &TaskError) -> TaskOutcome {
    match error {
        TaskError::Timeout { .. } => TaskOutcome::Timeout,
        TaskError::Canceled => TaskOutcome::Canceled,
        _ => TaskOutcome::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canceled_maps_to_canceled() {
        let err = TaskError::Canceled;
        assert_eq!(task_error_to_outcome(&err), TaskOutcome::Canceled);
    }

    #[test]
    fn fail_maps_to_failure() {
        let err = TaskError::Fail {
            reason: "test".into(),
        };
        assert_eq!(task_error_to_outcome(&err), TaskOutcome::Failure);
    }

    #[test]
    fn scope_conflict_maps_to_failure() {
        let err = TaskError::Fatal {
            reason: "execution context conflict".into(),
        };
        assert_eq!(task_error_to_outcome(&err), TaskOutcome::Failure);
    }
}
