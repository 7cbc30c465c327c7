//! Cancellable delayed tasks and debouncing.
//!
//! Browser callbacks (debounced live search, the delayed scroll to the first
//! page highlight) are modelled as tasks handed to a [`Scheduler`]. A task
//! whose handle is cancelled before its delay elapses never runs.

use std::{cell::RefCell, time::Duration};

/// A task scheduled for later execution.
pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task.
///
/// Dropping a handle does not cancel the task.
pub trait TaskHandle {
    /// Cancel the task. No-op if it already ran.
    fn cancel(self);
}

/// Runs tasks after a delay on the current thread.
///
/// Implementations must never run a task from inside `schedule` itself.
pub trait Scheduler {
    /// Handle type returned by [`Scheduler::schedule`].
    type Handle: TaskHandle;

    /// Run `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;
}

/// Delays a task until triggers stop arriving for a quiet period.
///
/// Each trigger cancels the pending task and schedules the new one, so out of
/// a burst only the last task runs.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    /// Create a debouncer with the given quiet period.
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: RefCell::new(None),
        }
    }

    /// Quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending task with `task`.
    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        self.cancel();
        let handle = self.scheduler.schedule(self.delay, Box::new(task));
        *self.pending.borrow_mut() = Some(handle);
    }

    /// Cancel the pending task, if any.
    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        if let Some(handle) = previous {
            handle.cancel();
        }
    }
}

pub mod manual {
    //! Deterministic scheduler driven by a virtual clock.

    use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

    use super::{Scheduler, Task, TaskHandle};

    #[derive(Default)]
    struct State {
        now: Duration,
        next_id: u64,
        tasks: BTreeMap<(Duration, u64), Task>,
    }

    /// Scheduler whose time only moves when [`ManualScheduler::advance`] is
    /// called. Clones share the same clock and queue.
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        state: Rc<RefCell<State>>,
    }

    /// Handle to a task queued on a [`ManualScheduler`].
    pub struct ManualHandle {
        key: (Duration, u64),
        state: Rc<RefCell<State>>,
    }

    impl ManualScheduler {
        /// Create a scheduler at time zero.
        pub fn new() -> Self {
            Self::default()
        }

        /// Current virtual time.
        pub fn now(&self) -> Duration {
            self.state.borrow().now
        }

        /// Number of tasks waiting to run.
        pub fn pending(&self) -> usize {
            self.state.borrow().tasks.len()
        }

        /// Move the clock forward by `by`, running due tasks in order.
        ///
        /// Tasks scheduled by running tasks also run if they fall due.
        pub fn advance(&self, by: Duration) {
            let target = self.now() + by;

            loop {
                let next = {
                    let mut state = self.state.borrow_mut();
                    let due = match state.tasks.keys().next() {
                        Some(&key) if key.0 <= target => key,
                        _ => break,
                    };
                    state.now = due.0;
                    state.tasks.remove(&due)
                };

                if let Some(task) = next {
                    task();
                }
            }

            self.state.borrow_mut().now = target;
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay: Duration, task: Task) -> ManualHandle {
            let mut state = self.state.borrow_mut();
            let key = (state.now + delay, state.next_id);
            state.next_id += 1;
            state.tasks.insert(key, task);

            ManualHandle {
                key,
                state: Rc::clone(&self.state),
            }
        }
    }

    impl TaskHandle for ManualHandle {
        fn cancel(self) {
            self.state.borrow_mut().tasks.remove(&self.key);
        }
    }
}
