//! Mapping from [`TaskPolicy`] onto taskvisor specs.
use std::time::Duration;

use taskvisor::{
    BackoffPolicy, ControllerAdmission, ControllerSpec, JitterPolicy, RestartPolicy, TaskRef,
    TaskSpec,
};

use crate::policy::{RestartMode, TaskPolicy};

pub fn to_restart_policy(mode: RestartMode) -> RestartPolicy {
    match mode {
        RestartMode::Never => RestartPolicy::Never,
        RestartMode::OnFailure => RestartPolicy::OnFailure,
        RestartMode::Always => RestartPolicy::Always,
    }
}

pub fn to_backoff_policy(p: &TaskPolicy) -> BackoffPolicy {
    BackoffPolicy {
        success_delay: None,
        first: Duration::from_millis(p.backoff_first_ms),
        max: Duration::from_millis(p.backoff_max_ms),
        jitter: JitterPolicy::None,
        factor: p.backoff_factor,
    }
}

pub fn to_task_spec(task: TaskRef, p: &TaskPolicy) -> TaskSpec {
    TaskSpec::new(
        task,
        to_restart_policy(p.restart),
        to_backoff_policy(p),
        Some(Duration::from_millis(p.timeout_ms)),
    )
}

/// Run ids are unique per build, so queued admission never drops a task.
pub fn to_controller_spec(task: TaskRef, p: &TaskPolicy) -> ControllerSpec {
    ControllerSpec {
        admission: ControllerAdmission::Queue,
        task_spec: to_task_spec(task, p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_modes_map_one_to_one() {
        assert!(matches!(
            to_restart_policy(RestartMode::Never),
            RestartPolicy::Never
        ));
        assert!(matches!(
            to_restart_policy(RestartMode::OnFailure),
            RestartPolicy::OnFailure
        ));
        assert!(matches!(
            to_restart_policy(RestartMode::Always),
            RestartPolicy::Always
        ));
    }

    #[test]
    fn backoff_uses_policy_bounds() {
        let b = to_backoff_policy(&TaskPolicy::default());
        assert_eq!(b.first, Duration::from_millis(100));
        assert_eq!(b.max, Duration::from_millis(5_000));
        assert_eq!(b.factor, 2.0);
        assert!(b.success_delay.is_none());
    }
}
