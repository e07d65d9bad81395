use std::{cell::RefCell, fmt, future::Future, sync::Arc};

use stamp_model::TaskDescriptor;
use tracing::trace;

use crate::context::ContextError;

type Slot = RefCell<Option<Arc<TaskDescriptor>>>;

tokio::task_local! {
    /// Slot of the async execution unit. Only exists inside [`scoped`].
    static TASK_SLOT: Slot;
}

thread_local! {
    /// Slot of the OS-thread execution unit, used outside any task scope.
    static THREAD_SLOT: Slot = const { RefCell::new(None) };
}

/// Concurrency primitive a descriptor is bound to.
///
/// Inside a future driven by [`crate::ExecutionHook::run_scoped`] the unit is that
/// future's task-local scope; everywhere else it is the calling OS thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionUnit {
    /// Async task scope established by the hook.
    Task,
    /// OS thread.
    Thread,
}

impl ExecutionUnit {
    /// Unit of the caller.
    pub fn current() -> Self {
        if TASK_SLOT.try_with(|_| ()).is_ok() {
            ExecutionUnit::Task
        } else {
            ExecutionUnit::Thread
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionUnit::Task => "task",
            ExecutionUnit::Thread => "thread",
        }
    }

    /// Run `f` against this unit's slot; `None` if the slot is not reachable from here.
    fn with_slot<R>(self, f: impl FnOnce(&Slot) -> R) -> Option<R> {
        match self {
            ExecutionUnit::Task => TASK_SLOT.try_with(f).ok(),
            ExecutionUnit::Thread => THREAD_SLOT.try_with(f).ok(),
        }
    }
}

impl fmt::Display for ExecutionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-execution-unit storage of the task currently executing.
///
/// Each unit owns its own slot, so units never observe or mutate each other's
/// association and no lock is shared between them. Writes go through
/// [`crate::ExecutionHook`]; everybody else only reads via [`ContextStore::current`].
///
/// A task spawned from inside a scoped body is a new unit and starts empty.
pub struct ContextStore;

impl ContextStore {
    /// Descriptor associated with the caller's execution unit.
    pub fn current() -> Option<Arc<TaskDescriptor>> {
        ExecutionUnit::current()
            .with_slot(|slot| slot.borrow().clone())
            .flatten()
    }

    /// Returns `true` if the caller's execution unit holds a descriptor.
    pub fn is_active() -> bool {
        ExecutionUnit::current()
            .with_slot(|slot| slot.borrow().is_some())
            .unwrap_or(false)
    }

    /// Associate `descriptor` with the caller's execution unit.
    ///
    /// Fails with [`ContextError::Conflict`] if the unit already holds one;
    /// the existing association is left untouched.
    pub(crate) fn begin(descriptor: Arc<TaskDescriptor>) -> Result<ExecutionUnit, ContextError> {
        let unit = ExecutionUnit::current();
        unit.with_slot(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(held) = slot.as_ref() {
                return Err(ContextError::Conflict {
                    unit,
                    held: held.name().to_string(),
                    incoming: descriptor.name().to_string(),
                });
            }
            trace!(unit = %unit, task = %descriptor, "descriptor bound");
            *slot = Some(descriptor);
            Ok(())
        })
        .unwrap_or(Err(ContextError::Unavailable(unit)))?;
        Ok(unit)
    }

    /// Remove the association of `unit`. Clearing an empty unit is a no-op.
    pub(crate) fn end(unit: ExecutionUnit) {
        if let Some(Some(prev)) = unit.with_slot(|slot| slot.borrow_mut().take()) {
            trace!(unit = %unit, task = %prev, "descriptor released");
        }
    }
}

/// Drive `fut` inside a fresh, empty task-local slot.
pub(crate) fn scoped<F: Future>(fut: F) -> impl Future<Output = F::Output> {
    TASK_SLOT.scope(RefCell::new(None), fut)
}
