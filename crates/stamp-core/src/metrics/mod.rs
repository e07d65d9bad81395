//! Metrics collection abstraction for stamp.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected via [`crate::BuildContext`].
mod backend;
pub use backend::{Adjustment, MetricsBackend, MetricsHandle, TaskOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::{Adjustment, MetricsBackend, TaskOutcome};

    /// Backend that remembers every call, for assertions in tests.
    #[derive(Default)]
    pub struct RecordingMetrics {
        pub conflicts: Mutex<Vec<String>>,
        pub malformed: Mutex<u64>,
        pub adjustments: Mutex<Vec<(Adjustment, u64)>>,
        pub attached: Mutex<Vec<usize>>,
    }

    impl RecordingMetrics {
        pub fn adjustments_of(&self, kind: Adjustment) -> u64 {
            self.adjustments
                .lock()
                .unwrap()
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, n)| n)
                .sum()
        }
    }

    impl MetricsBackend for RecordingMetrics {
        fn record_task_started(&self, _: &str) {}

        fn record_task_completed(&self, _: &str, _: TaskOutcome, _: u64) {}

        fn record_scope_conflict(&self, unit: &str) {
            self.conflicts.lock().unwrap().push(unit.to_string());
        }

        fn record_malformed_labels(&self) {
            *self.malformed.lock().unwrap() += 1;
        }

        fn record_label_adjustments(&self, kind: Adjustment, count: u64) {
            self.adjustments.lock().unwrap().push((kind, count));
        }

        fn record_labels_attached(&self, count: usize) {
            self.attached.lock().unwrap().push(count);
        }
    }
}
