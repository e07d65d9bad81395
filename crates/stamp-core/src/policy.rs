use serde::{Deserialize, Serialize};

/// Restart behaviour of a submitted task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestartMode {
    /// Run once.
    #[default]
    Never,
    /// Restart after a failed attempt.
    OnFailure,
    /// Restart after every attempt.
    Always,
}

/// Runtime policy applied to a task when it is handed to the supervisor.
///
/// Each attempt the supervisor starts re-enters the execution scope, so a
/// restarted task observes its descriptor again and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskPolicy {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    pub restart: RestartMode,
    /// First backoff delay between attempts.
    pub backoff_first_ms: u64,
    /// Upper bound for the backoff delay.
    pub backoff_max_ms: u64,
    /// Growth factor of the backoff delay.
    pub backoff_factor: f64,
}

impl TaskPolicy {
    /// Policy for a single attempt bounded by `timeout_ms`.
    pub fn once(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }

    /// Replace the restart mode and return updated policy.
    pub fn with_restart(mut self, restart: RestartMode) -> Self {
        self.restart = restart;
        self
    }
}

impl Default for TaskPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            restart: RestartMode::Never,
            backoff_first_ms: 100,
            backoff_max_ms: 5_000,
            backoff_factor: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = TaskPolicy::default();
        assert_eq!(p.timeout_ms, 30_000);
        assert_eq!(p.restart, RestartMode::Never);
        assert_eq!(p.backoff_first_ms, 100);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: TaskPolicy =
            serde_json::from_str(r#"{"timeoutMs": 500, "restart": "onFailure"}"#).unwrap();
        assert_eq!(p.timeout_ms, 500);
        assert_eq!(p.restart, RestartMode::OnFailure);
        assert_eq!(p.backoff_max_ms, 5_000);
    }

    #[test]
    fn once_with_restart() {
        let p = TaskPolicy::once(1_000).with_restart(RestartMode::Always);
        assert_eq!(p.timeout_ms, 1_000);
        assert_eq!(p.restart, RestartMode::Always);
    }
}
