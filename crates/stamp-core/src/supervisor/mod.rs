//! High-level API over taskvisor `Supervisor`.
//! - Owns a `Supervisor` instance.
//! - Uses `RunnerRouter` to build tasks from `TaskDescriptor`s.
//! - Submits tasks via the controller with mapped policies.
use std::sync::Arc;

use stamp_model::TaskDescriptor;
use taskvisor::{Config as SupervisorConfig, ControllerConfig, Subscribe, Supervisor};
use tracing::{debug, error, info, instrument};

use crate::{error::CoreError, map::to_controller_spec, policy::TaskPolicy, router::RunnerRouter};

/// Thin wrapper around taskvisor [`Supervisor`] with a runner router.
pub struct SupervisorApi {
    sup: Arc<Supervisor>,
    router: RunnerRouter,
}

impl SupervisorApi {
    /// Create a supervisor with explicit configs and start its run loop in background.
    pub async fn new(
        sup_cfg: SupervisorConfig,
        ctrl_cfg: ControllerConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
        router: RunnerRouter,
    ) -> Result<Self, CoreError> {
        let sup = Supervisor::builder(sup_cfg)
            .with_subscribers(subscribers)
            .with_controller(ctrl_cfg)
            .build();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move {
            if let Err(e) = runner.run(Vec::new()).await {
                error!(error = %e, "supervisor run loop exited");
            }
        });
        sup.wait_ready().await;
        info!("supervisor is ready to accept tasks");
        Ok(Self { sup, router })
    }

    /// Build the task for `descriptor` and submit it under `policy`.
    #[instrument(level = "debug", skip(self, descriptor, policy), fields(task = %descriptor))]
    pub async fn submit(
        &self,
        descriptor: Arc<TaskDescriptor>,
        policy: &TaskPolicy,
    ) -> Result<(), CoreError> {
        let task = self.router.build(descriptor)?;

        debug!(timeout_ms = policy.timeout_ms, restart = ?policy.restart, "submitting via controller");
        self.sup
            .submit(to_controller_spec(task, policy))
            .await
            .map_err(|e| CoreError::Supervisor(e.to_string()))
    }
}
