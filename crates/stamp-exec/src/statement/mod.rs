//! Statement runner for descriptors carrying compiled code.
//!
//! Translates descriptors into `TaskRef` instances that submit the statement
//! through a [`stamp_core::LabelingAdapter`] inside the task's execution scope.
mod runner;
mod task;

pub use runner::StatementRunner;

use std::sync::Arc;

use stamp_core::{LabelingAdapter, RunnerRouter};

use crate::ExecError;

/// Register a statement runner named `name` in the given router.
///
/// Fails if a runner with the same name is already registered.
pub fn register_statement_runner(
    router: &mut RunnerRouter,
    name: &'static str,
    adapter: LabelingAdapter,
) -> Result<(), ExecError> {
    if router.contains_runner(name) {
        return Err(ExecError::DuplicateRunner {
            name: name.to_string(),
        });
    }
    router.register(Arc::new(StatementRunner::new(name, adapter)));
    Ok(())
}
