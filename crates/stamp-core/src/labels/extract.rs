use stamp_model::{DECLARED_LABELS_KEY, Labels, TaskDescriptor};
use tracing::{trace, warn};

use crate::metrics::{MetricsHandle, noop_metrics};

/// Pulls the declared labels out of a descriptor's configuration.
///
/// Malformed input never aborts the task: it degrades to an empty map and a diagnostic.
#[derive(Clone)]
pub struct LabelExtractor {
    metrics: MetricsHandle,
}

impl LabelExtractor {
    pub fn new(metrics: MetricsHandle) -> Self {
        Self { metrics }
    }

    /// Declared labels of `descriptor`, verbatim (unsanitized).
    ///
    /// - no declared-labels entry: empty map;
    /// - entry of the wrong shape: empty map, `warn!` and a metrics hit;
    /// - otherwise the declared entries.
    pub fn extract(&self, descriptor: &TaskDescriptor) -> Labels {
        match descriptor.config().declared_labels() {
            Ok(Some(labels)) => {
                trace!(task = %descriptor, count = labels.len(), "declared labels extracted");
                labels
            }
            Ok(None) => Labels::new(),
            Err(e) => {
                warn!(
                    task = %descriptor,
                    key = DECLARED_LABELS_KEY,
                    error = %e,
                    "ignoring malformed declared labels",
                );
                self.metrics.record_malformed_labels();
                Labels::new()
            }
        }
    }
}

impl Default for LabelExtractor {
    fn default() -> Self {
        Self::new(noop_metrics())
    }
}
