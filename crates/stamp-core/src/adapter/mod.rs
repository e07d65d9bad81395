//! Submission adapter: reads the current task from the context store and stamps
//! the resolved labels onto every outgoing request.
mod error;
pub use error::AdapterError;

mod client;
pub use client::{RecordingClient, RemoteClient, RemoteRequest, RemoteResponse};

use std::{fmt, sync::Arc};

use stamp_model::Labels;
use tracing::{debug, instrument};

use crate::{
    context::ContextStore,
    labels::LabelPipeline,
    metrics::{MetricsHandle, noop_metrics},
};

/// Adapter between task bodies and a [`RemoteClient`].
///
/// The descriptor is read from [`ContextStore::current`] at submission time, so
/// `submit` must be awaited from the task body itself (not from a spawned task)
/// to see the declared labels. Outside any scope only the invocation label is
/// attached and caller labels are ignored. Label resolution never fails the
/// submission.
#[derive(Clone)]
pub struct LabelingAdapter {
    client: Arc<dyn RemoteClient>,
    pipeline: LabelPipeline,
    metrics: MetricsHandle,
}

impl LabelingAdapter {
    pub fn new(client: Arc<dyn RemoteClient>, pipeline: LabelPipeline) -> Self {
        Self {
            client,
            pipeline,
            metrics: noop_metrics(),
        }
    }

    /// Replace the metrics backend and return updated adapter.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Labels that a submission from the calling execution unit would carry.
    pub fn labels_for_current(&self, caller: &Labels) -> Labels {
        self.pipeline.resolve_current(caller)
    }

    /// Resolve labels, attach them and submit `payload`.
    #[instrument(
        level = "debug",
        skip(self, payload, caller),
        fields(client = self.client.name(), invocation = %self.pipeline.invocation())
    )]
    pub async fn submit(
        &self,
        payload: impl Into<String>,
        caller: &Labels,
    ) -> Result<RemoteResponse, AdapterError> {
        let current = ContextStore::current();
        let labels = self.pipeline.resolve(current.as_deref(), caller);
        self.metrics.record_labels_attached(labels.len());

        debug!(
            task = current.as_ref().map(|d| d.name()).unwrap_or("<none>"),
            labels = labels.len(),
            "submitting labeled request",
        );
        let request = RemoteRequest::new(payload).with_labels(&labels);
        self.client.submit(request).await
    }
}

impl fmt::Debug for LabelingAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelingAdapter")
            .field("client", &self.client.name())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}
