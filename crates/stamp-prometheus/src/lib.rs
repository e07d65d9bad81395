//! Prometheus metrics backend for stamp.
//!
//! This crate provides a [`PrometheusMetrics`] implementation of [`stamp_core::MetricsBackend`]
//! covering task attempts as well as the label flow (scope conflicts, malformed declared
//! labels, sanitizer adjustments, attached label counts).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use stamp_core::{BuildContext, LabelPipeline, LabelingAdapter, RecordingClient};
//! use stamp_model::InvocationId;
//! use stamp_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = Arc::new(PrometheusMetrics::new()?);
//!
//! // Task metrics flow through the build context...
//! let ctx = BuildContext::default().with_metrics(metrics.clone());
//!
//! // ...label metrics through the adapter.
//! let adapter = LabelingAdapter::new(
//!     Arc::new(RecordingClient::new()),
//!     LabelPipeline::with_invocation(InvocationId::generate()),
//! )
//! .with_metrics(metrics.clone());
//! # let _ = (ctx, adapter);
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `stamp_tasks_started_total{runner_type}` - Counter
//! - `stamp_tasks_completed_total{runner_type, outcome}` - Counter
//! - `stamp_task_duration_seconds{runner_type}` - Histogram
//! - `stamp_scope_conflicts_total{unit}` - Counter
//! - `stamp_malformed_labels_total` - Counter
//! - `stamp_label_adjustments_total{kind}` - Counter
//! - `stamp_labels_attached` - Histogram
//!
//! ## HTTP Server
//! This crate does NOT provide an HTTP server for the `/metrics` endpoint;
//! encode [`PrometheusMetrics::gather`] with [`TextEncoder`] from your own server.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
