//! Runner abstraction used to build taskvisor tasks from `TaskDescriptor`s.
//!
//! A runner is the upstream side of the label flow: the tasks it builds must
//! wrap every attempt in [`crate::ExecutionHook::run_scoped`].
mod error;
pub use error::RunnerError;

mod context;
pub use context::BuildContext;

mod id;
pub use id::make_run_id;

use std::sync::Arc;

use stamp_model::TaskDescriptor;
use taskvisor::TaskRef;

/// Generic task runner.
///
/// A runner is responsible for:
/// - deciding whether it can handle a given [`TaskDescriptor`] (`supports`)
/// - building a concrete [`TaskRef`] that executes it (`build_task`)
pub trait Runner: Send + Sync {
    /// Runner name used in logs, metrics and run ids.
    fn name(&self) -> &'static str;

    /// Returns `true` if this runner can handle the given descriptor.
    fn supports(&self, descriptor: &TaskDescriptor) -> bool;

    /// Build a concrete [`TaskRef`] for the given descriptor.
    ///
    /// The provided [`BuildContext`] carries the session's caller labels and shared handles.
    fn build_task(
        &self,
        descriptor: Arc<TaskDescriptor>,
        ctx: &BuildContext,
    ) -> Result<TaskRef, RunnerError>;
}
