use std::sync::Arc;

use prometheus::{
    CounterVec, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts,
    Registry, proto::MetricFamily,
};

use stamp_core::{Adjustment, MetricsBackend, TaskOutcome};

const NAMESPACE: &str = "stamp";

/// Prometheus metrics backend for stamp.
///
/// ## Label cardinality
/// All labels are bounded (low cardinality):
/// - `runner_type`: registered runner names
/// - `outcome`: "success", "failure", "canceled", "timeout"
/// - `unit`: "task", "thread"
/// - `kind`: "rewritten", "truncated", "collided", "dropped", "empty_key"
///
/// Label keys and values themselves are never exported.
#[derive(Clone)]
pub struct PrometheusMetrics {
    tasks_started: CounterVec,
    tasks_completed: CounterVec,
    tasks_duration: HistogramVec,
    scope_conflicts: IntCounterVec,
    malformed_labels: IntCounter,
    label_adjustments: IntCounterVec,
    labels_attached: Histogram,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a new prometheus metrics backend with custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let tasks_started = CounterVec::new(
            Opts::new("tasks_started_total", "Total number of task attempts started")
                .namespace(NAMESPACE),
            &["runner_type"],
        )?;
        registry.register(Box::new(tasks_started.clone()))?;

        let tasks_completed = CounterVec::new(
            Opts::new(
                "tasks_completed_total",
                "Total number of task attempts completed",
            )
            .namespace(NAMESPACE),
            &["runner_type", "outcome"],
        )?;
        registry.register(Box::new(tasks_completed.clone()))?;

        let tasks_duration = HistogramVec::new(
            HistogramOpts::new(
                "task_duration_seconds",
                "Task attempt duration in seconds",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0]),
            &["runner_type"],
        )?;
        registry.register(Box::new(tasks_duration.clone()))?;

        let scope_conflicts = IntCounterVec::new(
            Opts::new(
                "scope_conflicts_total",
                "Scopes refused because the execution unit already held a task",
            )
            .namespace(NAMESPACE),
            &["unit"],
        )?;
        registry.register(Box::new(scope_conflicts.clone()))?;

        let malformed_labels = IntCounter::with_opts(
            Opts::new(
                "malformed_labels_total",
                "Declared label entries ignored because of their shape",
            )
            .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(malformed_labels.clone()))?;

        let label_adjustments = IntCounterVec::new(
            Opts::new(
                "label_adjustments_total",
                "Labels rewritten, truncated, collided or dropped by the sanitizer",
            )
            .namespace(NAMESPACE),
            &["kind"],
        )?;
        registry.register(Box::new(label_adjustments.clone()))?;

        let labels_attached = Histogram::with_opts(
            HistogramOpts::new(
                "labels_attached",
                "Number of labels attached to one outgoing request",
            )
            .namespace(NAMESPACE)
            .buckets(vec![1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0]),
        )?;
        registry.register(Box::new(labels_attached.clone()))?;

        Ok(Self {
            tasks_started,
            tasks_completed,
            tasks_duration,
            scope_conflicts,
            malformed_labels,
            label_adjustments,
            labels_attached,
            registry,
        })
    }

    /// Create a new prometheus metrics backend with default registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Get reference to underlying prometheus registry.
    ///
    /// Useful for registering custom metrics alongside stamp metrics.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_task_started(&self, runner_type: &str) {
        self.tasks_started.with_label_values(&[runner_type]).inc();
    }

    fn record_task_completed(&self, runner_type: &str, outcome: TaskOutcome, duration_ms: u64) {
        self.tasks_completed
            .with_label_values(&[runner_type, outcome.as_label()])
            .inc();

        let duration_seconds = duration_ms as f64 / 1000.0;
        self.tasks_duration
            .with_label_values(&[runner_type])
            .observe(duration_seconds);
    }

    fn record_scope_conflict(&self, unit: &str) {
        self.scope_conflicts.with_label_values(&[unit]).inc();
    }

    fn record_malformed_labels(&self) {
        self.malformed_labels.inc();
    }

    fn record_label_adjustments(&self, kind: Adjustment, count: u64) {
        if count == 0 {
            return;
        }
        self.label_adjustments
            .with_label_values(&[kind.as_label()])
            .inc_by(count);
    }

    fn record_labels_attached(&self, count: usize) {
        self.labels_attached.observe(count as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("metric {name} not found"))
    }

    #[test]
    fn can_create_prometheus_metrics() {
        let _metrics = PrometheusMetrics::new().expect("failed to create metrics");
    }

    #[test]
    fn record_task_started_increments_counter() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_task_started("statement");
        metrics.record_task_started("statement");
        metrics.record_task_started("script");

        let families = metrics.gather();
        let started = family(&families, "stamp_tasks_started_total");
        assert_eq!(started.get_metric().len(), 2);
        assert_eq!(
            metrics.tasks_started.with_label_values(&["statement"]).get(),
            2.0
        );
    }

    #[test]
    fn record_task_completed_increments_counter_and_histogram() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_task_completed("statement", TaskOutcome::Success, 150);
        metrics.record_task_completed("statement", TaskOutcome::Canceled, 50);

        let families = metrics.gather();
        assert_eq!(
            family(&families, "stamp_tasks_completed_total")
                .get_metric()
                .len(),
            2
        );
        assert_eq!(
            family(&families, "stamp_task_duration_seconds")
                .get_metric()
                .len(),
            1
        );
    }

    #[test]
    fn scope_conflicts_are_split_by_unit() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_scope_conflict("task");
        metrics.record_scope_conflict("task");
        metrics.record_scope_conflict("thread");

        assert_eq!(metrics.scope_conflicts.with_label_values(&["task"]).get(), 2);
        assert_eq!(
            metrics.scope_conflicts.with_label_values(&["thread"]).get(),
            1
        );
    }

    #[test]
    fn label_flow_counters() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_malformed_labels();
        metrics.record_label_adjustments(Adjustment::Dropped, 7);
        metrics.record_label_adjustments(Adjustment::Rewritten, 0);
        metrics.record_labels_attached(64);

        assert_eq!(metrics.malformed_labels.get(), 1);
        assert_eq!(
            metrics
                .label_adjustments
                .with_label_values(&["dropped"])
                .get(),
            7
        );
        assert_eq!(metrics.labels_attached.get_sample_count(), 1);

        let families = metrics.gather();
        assert_eq!(
            family(&families, "stamp_label_adjustments_total")
                .get_metric()
                .len(),
            1
        );
    }

    #[test]
    fn can_use_custom_registry() {
        let registry = Arc::new(Registry::new());
        let metrics = PrometheusMetrics::new_with_registry(registry.clone()).unwrap();

        metrics.record_task_started("test");
        assert!(!registry.gather().is_empty());
    }
}
