pub mod adapter;
pub mod context;
pub mod error;
pub mod labels;
mod map;
pub mod metrics;
pub mod policy;
pub mod router;
pub mod runner;
pub mod supervisor;

pub use adapter::{
    AdapterError, LabelingAdapter, RecordingClient, RemoteClient, RemoteRequest, RemoteResponse,
};
pub use context::{ContextError, ContextStore, ExecutionHook, ExecutionUnit};
pub use error::CoreError;
pub use labels::{
    LabelEntry, LabelExtractor, LabelPipeline, LabelPolicy, LabelSanitizer, LabelSet, PolicyError,
    SanitizeReport, caller_labels_from_annotation, merge, merge_with_invocation,
};
pub use metrics::{Adjustment, MetricsBackend, MetricsHandle, NoOpMetrics, TaskOutcome, noop_metrics};
pub use policy::{RestartMode, TaskPolicy};
pub use router::RunnerRouter;
pub use runner::{BuildContext, Runner, RunnerError, make_run_id};
pub use supervisor::SupervisorApi;

pub mod prelude {
    pub use crate::adapter::{LabelingAdapter, RemoteClient};
    pub use crate::context::{ContextStore, ExecutionHook};
    pub use crate::error::CoreError;
    pub use crate::labels::{LabelPipeline, LabelPolicy};
    pub use crate::policy::{RestartMode, TaskPolicy};
    pub use crate::router::RunnerRouter;
    pub use crate::runner::{BuildContext, Runner, RunnerError};
    pub use crate::supervisor::SupervisorApi;
}
