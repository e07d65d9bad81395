//! Taskvisor event logging.
//!
//! Task lifecycle events become structured `tracing` records; the `task` field
//! carries the run id, so attempts can be matched with the adapter's submission logs.
use async_trait::async_trait;
use taskvisor::{Event, EventKind, Subscribe};
use tracing::{debug, error, info, trace, warn};

/// Queue capacity sized for bursts of short statement tasks.
const QUEUE_CAPACITY: usize = 1024;

/// Subscriber that logs taskvisor events.
#[derive(Debug, Default)]
pub struct TaskEventLogger;

#[async_trait]
impl Subscribe for TaskEventLogger {
    async fn on_event(&self, event: &Event) {
        log_event(event);
    }

    fn name(&self) -> &'static str {
        "task-event-logger"
    }

    fn queue_capacity(&self) -> usize {
        QUEUE_CAPACITY
    }
}

fn log_event(e: &Event) {
    let task = e.task.as_deref().unwrap_or("-");
    let reason = e.reason.as_deref().unwrap_or("-");
    let attempt = e.attempt.unwrap_or(0);

    match e.kind {
        EventKind::TaskStarting => info!(task, attempt, "attempt starting"),
        EventKind::TaskStopped => debug!(task, attempt, "attempt finished"),
        EventKind::TaskFailed => warn!(task, attempt, reason, "attempt failed"),
        EventKind::TimeoutHit => warn!(
            task,
            attempt,
            timeout_ms = e.timeout_ms.unwrap_or(0),
            "attempt timed out"
        ),
        EventKind::BackoffScheduled => debug!(
            task,
            attempt,
            delay_ms = e.delay_ms.unwrap_or(0),
            "next attempt scheduled"
        ),
        EventKind::ActorExhausted => debug!(task, reason, "restart policy exhausted"),
        EventKind::ActorDead => error!(task, reason, "task terminated permanently"),
        EventKind::ControllerRejected => warn!(task, reason, "submission rejected"),
        EventKind::SubscriberPanicked | EventKind::SubscriberOverflow => {
            error!(task, reason, kind = ?e.kind, "event delivery failed")
        }
        EventKind::GraceExceeded => warn!("grace period exceeded during shutdown"),
        other => trace!(task, kind = ?other, "supervisor event"),
    }
}
