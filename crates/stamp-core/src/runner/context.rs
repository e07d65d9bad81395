use std::fmt;

use stamp_model::Labels;

use crate::{labels::caller_labels_from_annotation, metrics::MetricsHandle};

/// Shared build context passed to all runners.
#[derive(Clone)]
pub struct BuildContext {
    caller_labels: Labels,
    metrics: MetricsHandle,
}

impl BuildContext {
    /// Create a new build context with the given params.
    pub fn new(caller_labels: Labels, metrics: MetricsHandle) -> Self {
        Self {
            caller_labels,
            metrics,
        }
    }

    /// Caller-tier labels attached to every submission of the session.
    pub fn caller_labels(&self) -> &Labels {
        &self.caller_labels
    }

    /// Get a clonable handle to the metrics backend.
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// Replace the caller labels and return updated context.
    pub fn with_caller_labels(mut self, labels: Labels) -> Self {
        self.caller_labels = labels;
        self
    }

    /// Take caller labels from a JSON query annotation.
    ///
    /// Entries of the annotation override caller labels already set.
    pub fn with_annotation(mut self, raw: &str) -> Self {
        self.caller_labels = self
            .caller_labels
            .merged(&caller_labels_from_annotation(raw));
        self
    }

    /// Replace the metrics backend and return updated context.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            caller_labels: Labels::default(),
            metrics: crate::metrics::noop_metrics(),
        }
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("caller_labels", &self.caller_labels)
            .field("metrics", &"<handle>")
            .finish()
    }
}

impl fmt::Display for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuildContext(caller_labels={})", self.caller_labels.len())
    }
}
