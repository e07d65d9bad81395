use std::sync::Arc;

use taskvisor::{TaskFn, TaskRef};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use stamp_core::{BuildContext, ExecutionHook, LabelingAdapter, Runner, RunnerError, make_run_id};
use stamp_model::{COMPILED_CODE_KEY, TaskDescriptor};

use crate::statement::task::StatementTask;

/// Runner that submits the compiled statement of a task through a [`LabelingAdapter`].
///
/// Every attempt of the built task runs inside [`ExecutionHook::run_scoped`], so
/// the adapter sees the descriptor of exactly the task it submits for.
pub struct StatementRunner {
    /// Runner name.
    name: &'static str,
    adapter: LabelingAdapter,
}

impl StatementRunner {
    pub fn new(name: &'static str, adapter: LabelingAdapter) -> Self {
        Self { name, adapter }
    }

    /// Build task configuration from the descriptor.
    pub(crate) fn build_statement_task(
        &self,
        descriptor: Arc<TaskDescriptor>,
        ctx: &BuildContext,
    ) -> Result<StatementTask, RunnerError> {
        let statement = descriptor
            .config()
            .compiled_code()?
            .ok_or(RunnerError::MissingField(COMPILED_CODE_KEY))?;

        let task = StatementTask {
            run_id: make_run_id(self.name, descriptor.name()),
            runner: self.name,
            statement: Arc::from(statement),
            caller: ctx.caller_labels().clone(),
            adapter: self.adapter.clone(),
            hook: ExecutionHook::new(ctx.metrics().clone()),
            metrics: ctx.metrics().clone(),
            descriptor,
        };

        task.validate()
            .map_err(|e| RunnerError::InvalidDescriptor(e.to_string()))?;
        Ok(task)
    }
}

impl Runner for StatementRunner {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, descriptor: &TaskDescriptor) -> bool {
        matches!(descriptor.config().compiled_code(), Ok(Some(_)))
    }

    fn build_task(
        &self,
        descriptor: Arc<TaskDescriptor>,
        ctx: &BuildContext,
    ) -> Result<TaskRef, RunnerError> {
        let task_cfg = self.build_statement_task(descriptor, ctx)?;
        trace!(task = %task_cfg, "building statement task");

        let task: TaskRef = TaskFn::arc(
            task_cfg.run_id.clone(),
            move |cancel: CancellationToken| task_cfg.clone().run(cancel),
        );
        Ok(task)
    }
}
