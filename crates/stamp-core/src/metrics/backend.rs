use std::sync::Arc;

/// Task execution outcome for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Task completed sucessfully.
    Success,
    /// Task failed.
    Failure,
    /// Task canceled.
    Canceled,
    /// Task timeout.
    Timeout,
}

impl TaskOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskOutcome::Success => "success",
            TaskOutcome::Failure => "failure",
            TaskOutcome::Canceled => "canceled",
            TaskOutcome::Timeout => "timeout",
        }
    }
}

/// Kind of adjustment the sanitizer applied to a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Key or value contained upper-case or out-of-charset characters.
    Rewritten,
    /// Key or value exceeded the length limit.
    Truncated,
    /// Sanitized key collided with a lower-precedence entry.
    Collided,
    /// Entry evicted by the entry-count budget.
    Dropped,
    /// Entry skipped because its key was empty.
    EmptyKey,
}

impl Adjustment {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            Adjustment::Rewritten => "rewritten",
            Adjustment::Truncated => "truncated",
            Adjustment::Collided => "collided",
            Adjustment::Dropped => "dropped",
            Adjustment::EmptyKey => "empty_key",
        }
    }
}

/// Backend metrics collection interface.
///
/// Implementations are injected via [`crate::BuildContext`] and the label adapter.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record that a runner started one task attempt.
    fn record_task_started(&self, runner_type: &str);
    /// Record task attempt completion with outcome and duration.
    ///
    /// # Arguments
    /// - `runner_type`: Runner implementation
    /// - `outcome`: How the attempt terminated
    /// - `duration_ms`: Execution time in milliseconds
    fn record_task_completed(&self, runner_type: &str, outcome: TaskOutcome, duration_ms: u64);
    /// Record a refused scope: the execution unit already held a descriptor.
    fn record_scope_conflict(&self, unit: &str);
    /// Record a declared-labels entry that failed shape validation.
    fn record_malformed_labels(&self);
    /// Record `count` sanitizer adjustments of the given kind.
    fn record_label_adjustments(&self, kind: Adjustment, count: u64);
    /// Record the number of labels attached to one outgoing request.
    fn record_labels_attached(&self, count: usize);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
