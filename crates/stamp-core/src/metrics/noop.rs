use crate::metrics::backend::{Adjustment, MetricsBackend, TaskOutcome};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_task_started(&self, _: &str) {}

    #[inline(always)]
    fn record_task_completed(&self, _: &str, _: TaskOutcome, _: u64) {}

    #[inline(always)]
    fn record_scope_conflict(&self, _: &str) {}

    #[inline(always)]
    fn record_malformed_labels(&self) {}

    #[inline(always)]
    fn record_label_adjustments(&self, _: Adjustment, _: u64) {}

    #[inline(always)]
    fn record_labels_attached(&self, _: usize) {}
}
