use std::{fmt, future::Future, sync::Arc};

use stamp_model::{TaskDescriptor, TaskId};
use tracing::{debug, error};

use crate::{
    context::{ContextError, ContextStore, ExecutionUnit, store::scoped},
    metrics::{MetricsHandle, noop_metrics},
};

/// Binds the context store to the lifetime of one task execution.
///
/// The descriptor is associated with the execution unit before the body runs
/// and released by a drop guard afterwards, so the release happens on normal
/// return, on a failure carried in the body's output, on panic unwind and when
/// the future is dropped mid-flight.
///
/// Runners must call it once per attempt; nothing in the store survives across attempts.
#[derive(Clone)]
pub struct ExecutionHook {
    metrics: MetricsHandle,
}

impl ExecutionHook {
    pub fn new(metrics: MetricsHandle) -> Self {
        Self { metrics }
    }

    /// Run an async `body` with `descriptor` bound to its task scope.
    ///
    /// Returns [`ContextError::Conflict`] without polling `body` if the caller
    /// already runs inside a scope.
    pub async fn run_scoped<F, T>(
        &self,
        descriptor: Arc<TaskDescriptor>,
        body: F,
    ) -> Result<T, ContextError>
    where
        F: Future<Output = T>,
    {
        if let Some(held) = ContextStore::current() {
            return Err(self.conflict(ExecutionUnit::current(), &held, &descriptor));
        }
        scoped(async move {
            let _guard = ScopeGuard::enter(descriptor).inspect_err(|e| self.observe(e))?;
            Ok(body.await)
        })
        .await
    }

    /// Run a synchronous `body` with `descriptor` bound to the calling thread.
    pub fn run_scoped_blocking<F, T>(
        &self,
        descriptor: Arc<TaskDescriptor>,
        body: F,
    ) -> Result<T, ContextError>
    where
        F: FnOnce() -> T,
    {
        let _guard = ScopeGuard::enter(descriptor).inspect_err(|e| self.observe(e))?;
        Ok(body())
    }

    fn conflict(
        &self,
        unit: ExecutionUnit,
        held: &TaskDescriptor,
        incoming: &TaskDescriptor,
    ) -> ContextError {
        let err = ContextError::Conflict {
            unit,
            held: held.name().to_string(),
            incoming: incoming.name().to_string(),
        };
        self.observe(&err);
        err
    }

    fn observe(&self, err: &ContextError) {
        match err {
            ContextError::Conflict { unit, .. } => {
                error!(unit = %unit, "{err}");
                self.metrics.record_scope_conflict(unit.as_str());
            }
            ContextError::Unavailable(unit) => error!(unit = %unit, "{err}"),
        }
    }
}

impl Default for ExecutionHook {
    fn default() -> Self {
        Self::new(noop_metrics())
    }
}

impl fmt::Debug for ExecutionHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionHook")
            .field("metrics", &"<handle>")
            .finish()
    }
}

/// Releases the unit's association when dropped.
struct ScopeGuard {
    unit: ExecutionUnit,
    task: TaskId,
}

impl ScopeGuard {
    fn enter(descriptor: Arc<TaskDescriptor>) -> Result<Self, ContextError> {
        let task = descriptor.id();
        let name = descriptor.name().to_string();
        let unit = ContextStore::begin(descriptor)?;
        debug!(unit = %unit, task = %task, name = %name, "task scope entered");
        Ok(Self { unit, task })
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        ContextStore::end(self.unit);
        debug!(unit = %self.unit, task = %self.task, "task scope released");
    }
}

#[cfg(test)]
mod tests {
    use std::{
        panic::{AssertUnwindSafe, catch_unwind},
        sync::{
            Barrier,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    };

    use stamp_model::ConfigBag;

    use super::*;
    use crate::metrics::testing::RecordingMetrics;

    fn desc(name: &str) -> Arc<TaskDescriptor> {
        Arc::new(TaskDescriptor::new(name, ConfigBag::new()))
    }

    #[tokio::test]
    async fn body_sees_descriptor_and_store_is_clear_afterwards() {
        let hook = ExecutionHook::default();
        let d = desc("model.orders");
        let id = d.id();

        let seen = hook
            .run_scoped(d, async { ContextStore::current().map(|d| d.id()) })
            .await
            .unwrap();

        assert_eq!(seen, Some(id));
        assert!(ContextStore::current().is_none());
    }

    #[tokio::test]
    async fn body_failure_is_propagated_and_released() {
        let hook = ExecutionHook::default();

        let out: Result<Result<(), String>, ContextError> = hook
            .run_scoped(desc("model.fail"), async {
                assert!(ContextStore::is_active());
                Err("remote rejected".to_string())
            })
            .await;

        assert_eq!(out.unwrap(), Err("remote rejected".to_string()));
        assert!(ContextStore::current().is_none());
    }

    #[tokio::test]
    async fn nested_scope_is_conflict_and_outer_survives() {
        let metrics = Arc::new(RecordingMetrics::default());
        let hook = ExecutionHook::new(metrics.clone());
        let outer = desc("model.outer");
        let outer_id = outer.id();

        let inner_hook = hook.clone();
        let ran = Arc::new(AtomicBool::new(false));
        let inner_ran = Arc::clone(&ran);
        hook.run_scoped(outer, async move {
            let nested = inner_hook
                .run_scoped(desc("model.inner"), async move {
                    inner_ran.store(true, Ordering::SeqCst);
                })
                .await;
            assert!(matches!(
                nested,
                Err(ContextError::Conflict { unit: ExecutionUnit::Task, .. })
            ));
            assert_eq!(ContextStore::current().unwrap().id(), outer_id);
        })
        .await
        .unwrap();

        assert!(!ran.load(Ordering::SeqCst), "nested body must not run");
        assert_eq!(metrics.conflicts.lock().unwrap().as_slice(), ["task"]);
        assert!(ContextStore::current().is_none());
    }

    #[test]
    fn observe_counts_conflicts_only() {
        let metrics = Arc::new(RecordingMetrics::default());
        let hook = ExecutionHook::new(metrics.clone());

        hook.observe(&ContextError::Unavailable(ExecutionUnit::Thread));
        assert!(metrics.conflicts.lock().unwrap().is_empty());

        hook.observe(&ContextError::Conflict {
            unit: ExecutionUnit::Thread,
            held: "model.a".into(),
            incoming: "model.b".into(),
        });
        assert_eq!(metrics.conflicts.lock().unwrap().as_slice(), ["thread"]);
    }

    #[tokio::test]
    async fn cancelled_scope_leaves_unit_reusable() {
        let hook = ExecutionHook::default();

        let res = tokio::time::timeout(
            Duration::from_millis(20),
            hook.run_scoped(desc("model.slow"), std::future::pending::<()>()),
        )
        .await;
        assert!(res.is_err(), "pending body must time out");
        assert!(ContextStore::current().is_none());

        let next = desc("model.next");
        let next_id = next.id();
        let seen = hook
            .run_scoped(next, async { ContextStore::current().map(|d| d.id()) })
            .await
            .unwrap();
        assert_eq!(seen, Some(next_id));
    }

    #[tokio::test]
    async fn guard_releases_task_slot_on_drop() {
        scoped(async {
            let guard = ScopeGuard::enter(desc("model.guarded")).unwrap();
            assert!(ContextStore::is_active());

            drop(guard);
            assert!(ContextStore::current().is_none());

            // slot is reusable right away
            let again = ScopeGuard::enter(desc("model.again")).unwrap();
            assert_eq!(ContextStore::current().unwrap().name(), "model.again");
            drop(again);
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_tasks_observe_only_their_own_descriptor() {
        let hook = ExecutionHook::default();
        let mut handles = Vec::new();

        for i in 0..16 {
            let hook = hook.clone();
            let d = desc(&format!("model.m{i}"));
            handles.push(tokio::spawn(async move {
                let id = d.id();
                hook.run_scoped(d, async move {
                    for _ in 0..50 {
                        assert_eq!(ContextStore::current().map(|d| d.id()), Some(id));
                        tokio::task::yield_now().await;
                    }
                })
                .await
                .unwrap();
                assert!(ContextStore::current().is_none());
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
    }

    #[test]
    fn blocking_scope_binds_thread() {
        let hook = ExecutionHook::default();
        let d = desc("model.blocking");
        let id = d.id();

        let seen = hook
            .run_scoped_blocking(d, || ContextStore::current().map(|d| d.id()))
            .unwrap();

        assert_eq!(seen, Some(id));
        assert!(ContextStore::current().is_none());
    }

    #[test]
    fn blocking_scope_released_on_panic() {
        let hook = ExecutionHook::default();

        let res = catch_unwind(AssertUnwindSafe(|| {
            hook.run_scoped_blocking(desc("model.panics"), || -> u32 { panic!("boom") })
        }));

        assert!(res.is_err());
        assert!(ContextStore::current().is_none());

        let ok = hook.run_scoped_blocking(desc("model.after"), ContextStore::is_active);
        assert!(ok.unwrap());
    }

    #[test]
    fn nested_blocking_scope_is_conflict() {
        let metrics = Arc::new(RecordingMetrics::default());
        let hook = ExecutionHook::new(metrics.clone());

        hook.run_scoped_blocking(desc("model.outer"), || {
            let nested = hook.run_scoped_blocking(desc("model.inner"), || ());
            assert!(matches!(
                nested,
                Err(ContextError::Conflict { unit: ExecutionUnit::Thread, .. })
            ));
            assert_eq!(ContextStore::current().unwrap().name(), "model.outer");
        })
        .unwrap();

        assert_eq!(metrics.conflicts.lock().unwrap().as_slice(), ["thread"]);
    }

    #[test]
    fn concurrent_threads_are_isolated() {
        let hook = ExecutionHook::default();
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let hook = hook.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    let d = desc(&format!("model.t{i}"));
                    let id = d.id();
                    hook.run_scoped_blocking(d, || {
                        barrier.wait();
                        for _ in 0..100 {
                            assert_eq!(ContextStore::current().map(|d| d.id()), Some(id));
                            std::thread::yield_now();
                        }
                    })
                    .unwrap();
                    assert!(ContextStore::current().is_none());
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
    }
}
