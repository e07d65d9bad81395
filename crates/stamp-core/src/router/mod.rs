//! Runner router that selects an appropriate `Runner` implementation for a given `TaskDescriptor`.
//!
//! The router checks registered runners in order and delegates task construction
//! to the first one that reports `supports(descriptor) == true`.
use std::sync::Arc;

use stamp_model::TaskDescriptor;
use taskvisor::TaskRef;
use tracing::{debug, instrument, trace};

use crate::{
    error::CoreError,
    runner::{BuildContext, Runner},
};

/// Router that selects an appropriate [`Runner`] for a given [`TaskDescriptor`].
#[derive(Default)]
pub struct RunnerRouter {
    runners: Vec<Arc<dyn Runner>>,
    ctx: BuildContext,
}

impl RunnerRouter {
    /// Create an empty router with a default build context.
    #[inline]
    pub fn new() -> Self {
        Self {
            runners: Vec::new(),
            ctx: BuildContext::default(),
        }
    }

    /// Set a custom build context (caller labels, metrics) for all runners managed by this router.
    #[inline]
    pub fn with_context(mut self, ctx: BuildContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Build context handed to runners.
    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    /// Register a new runner.
    ///
    /// Runners are queried in the order they are registered.
    #[inline]
    pub fn register(&mut self, runner: Arc<dyn Runner>) {
        self.runners.push(runner);
    }

    /// Returns `true` if a runner with the given name is registered.
    pub fn contains_runner(&self, name: &str) -> bool {
        self.runners.iter().any(|r| r.name() == name)
    }

    /// Pick the first runner that claims to support the given descriptor.
    pub fn pick(&self, descriptor: &TaskDescriptor) -> Option<&Arc<dyn Runner>> {
        self.runners.iter().find(|r| r.supports(descriptor))
    }

    /// Build a [`TaskRef`] for the given descriptor using the selected runner.
    #[instrument(level = "debug", skip(self, descriptor), fields(task = %descriptor))]
    pub fn build(&self, descriptor: Arc<TaskDescriptor>) -> Result<TaskRef, CoreError> {
        trace!(descriptor = ?descriptor, "router received descriptor");

        let r = self
            .pick(&descriptor)
            .ok_or_else(|| CoreError::NoRunner(descriptor.name().to_string()))?;

        let task = r.build_task(Arc::clone(&descriptor), &self.ctx)?;
        debug!(runner = r.name(), "runner built task successfully");
        Ok(task)
    }
}
