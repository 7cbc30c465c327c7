//! `setTimeout`-backed scheduler.

use std::{cell::RefCell, rc::Rc, time::Duration};

use handbook_search::{Scheduler, TaskHandle, schedule::Task};
use tracing::warn;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::Window;

/// Schedules tasks with `window.setTimeout`.
#[derive(Clone)]
pub struct TimeoutScheduler {
    window: Window,
}

/// Pending `setTimeout` callback.
pub struct TimeoutHandle {
    window: Window,
    id: Option<i32>,
    task: Rc<RefCell<Option<Task>>>,
}

impl TimeoutScheduler {
    /// Schedule on `window`.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for TimeoutScheduler {
    type Handle = TimeoutHandle;

    fn schedule(&self, delay: Duration, task: Task) -> TimeoutHandle {
        let task = Rc::new(RefCell::new(Some(task)));
        let slot = Rc::clone(&task);

        // The JS shim is freed only when it runs. A cleared timeout leaks the
        // shim and its empty slot; cancel drops the task and its captures.
        let callback = Closure::once_into_js(move || {
            let pending = slot.borrow_mut().take();
            if let Some(task) = pending {
                task();
            }
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        let id = match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = ?e, "setTimeout failed; task dropped");
                None
            }
        };

        TimeoutHandle {
            window: self.window.clone(),
            id,
            task,
        }
    }
}

impl TaskHandle for TimeoutHandle {
    fn cancel(self) {
        if let Some(id) = self.id {
            self.window.clear_timeout_with_handle(id);
        }
        self.task.borrow_mut().take();
    }
}
