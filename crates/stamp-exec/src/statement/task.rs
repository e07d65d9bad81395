use std::{fmt, sync::Arc, time::Instant};

use stamp_core::{ContextError, ExecutionHook, LabelingAdapter, MetricsHandle, TaskOutcome};
use stamp_model::{Labels, TaskDescriptor};
use taskvisor::TaskError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{ExecError, task_error_to_outcome};

/// Everything one attempt of a statement task needs.
///
/// Cloned into every attempt the supervisor starts.
#[derive(Clone)]
pub(crate) struct StatementTask {
    /// End-to-End log identifier.
    pub(crate) run_id: String,
    pub(crate) runner: &'static str,
    pub(crate) descriptor: Arc<TaskDescriptor>,
    /// Compiled statement submitted to the remote service.
    pub(crate) statement: Arc<str>,
    /// Session-level labels taken from the build context.
    pub(crate) caller: Labels,
    pub(crate) adapter: LabelingAdapter,
    pub(crate) hook: ExecutionHook,
    pub(crate) metrics: MetricsHandle,
}

impl StatementTask {
    /// Validate the task before it is handed to taskvisor.
    ///
    /// Rules:
    /// - `statement` is not empty or whitespace-only.
    pub(crate) fn validate(&self) -> Result<(), ExecError> {
        if self.statement.trim().is_empty() {
            return Err(ExecError::InvalidStatement(format!(
                "task '{}' has an empty statement",
                self.descriptor.name()
            )));
        }
        Ok(())
    }

    /// Run one attempt and record its outcome.
    pub(crate) async fn run(self, cancel: CancellationToken) -> Result<(), TaskError> {
        self.metrics.record_task_started(self.runner);
        let started = Instant::now();

        let result = self.attempt(&cancel).await;

        let outcome = match &result {
            Ok(()) => TaskOutcome::Success,
            Err(e) => task_error_to_outcome(e),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.metrics
            .record_task_completed(self.runner, outcome, elapsed_ms);
        result
    }

    async fn attempt(&self, cancel: &CancellationToken) -> Result<(), TaskError> {
        trace!(task = %self.run_id, descriptor = %self.descriptor, "entering execution scope");

        let submission = async {
            tokio::select! {
                res = self.adapter.submit(&*self.statement, &self.caller) => Some(res),
                _ = cancel.cancelled() => None,
            }
        };

        match self
            .hook
            .run_scoped(Arc::clone(&self.descriptor), submission)
            .await
        {
            Err(e @ ContextError::Conflict { .. }) => Err(TaskError::Fatal {
                reason: e.to_string(),
            }),
            Err(e) => Err(TaskError::Fatal {
                reason: format!("execution scope unavailable: {e}"),
            }),
            Ok(None) => {
                debug!(task = %self.run_id, "cancellation requested; submission abandoned");
                Err(TaskError::Canceled)
            }
            Ok(Some(Err(e))) => {
                warn!(task = %self.run_id, error = %e, "statement submission failed");
                Err(TaskError::Fail {
                    reason: e.to_string(),
                })
            }
            Ok(Some(Ok(resp))) => {
                debug!(task = %self.run_id, job_id = %resp.job_id, "statement submitted");
                Ok(())
            }
        }
    }
}

impl fmt::Display for StatementTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StatementTask(run_id='{}', task='{}', statement_len={}, caller_labels={})",
            self.run_id,
            self.descriptor.name(),
            self.statement.len(),
            self.caller.len(),
        )
    }
}
