use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::foundation::error::GlobeResult;

type TimerFn = Box<dyn FnOnce() -> GlobeResult<()>>;

struct Timer {
    label: &'static str,
    remaining_ms: f64,
    callback: TimerFn,
}

/// Deferred one-shot callbacks measured in frame time.
///
/// Cloning yields another handle to the same queue. A callback scheduled with
/// delay `d` runs on the first advance after at least `d` milliseconds of
/// frame time have passed since the advance following its scheduling.
#[derive(Clone, Default)]
pub struct Timers {
    inner: Rc<TimerQueues>,
}

#[derive(Default)]
struct TimerQueues {
    pending: RefCell<Vec<Timer>>,
    incoming: RefCell<Vec<Timer>>,
    epoch: Cell<u64>,
}

impl Timers {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` once after `delay_ms` of frame time.
    pub fn schedule(
        &self,
        label: &'static str,
        delay_ms: f64,
        callback: impl FnOnce() -> GlobeResult<()> + 'static,
    ) {
        tracing::trace!(timer = label, delay_ms, "timer scheduled");
        self.inner.incoming.borrow_mut().push(Timer {
            label,
            remaining_ms: delay_ms.max(0.0),
            callback: Box::new(callback),
        });
    }

    /// Number of callbacks not yet run.
    pub fn len(&self) -> usize {
        self.inner.pending.borrow().len() + self.inner.incoming.borrow().len()
    }

    /// `true` when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every scheduled callback without running it.
    pub fn clear(&self) {
        self.inner.epoch.set(self.inner.epoch.get().wrapping_add(1));
        self.inner.pending.borrow_mut().clear();
        self.inner.incoming.borrow_mut().clear();
    }

    /// Count down by `dt_ms` and run whatever came due. Returns how many ran.
    ///
    /// Timers scheduled since the previous advance join without being charged
    /// for this frame's elapsed time.
    pub(crate) fn advance(&self, dt_ms: f64) -> usize {
        let epoch = self.inner.epoch.get();
        let mut current = std::mem::take(&mut *self.inner.pending.borrow_mut());
        for timer in &mut current {
            timer.remaining_ms -= dt_ms.max(0.0);
        }
        current.append(&mut self.inner.incoming.borrow_mut());

        let (due, mut waiting): (Vec<Timer>, Vec<Timer>) =
            current.into_iter().partition(|t| t.remaining_ms <= 0.0);

        let ran = due.len();
        for timer in due {
            if let Err(err) = (timer.callback)() {
                tracing::warn!(timer = timer.label, error = %err, "deferred callback failed");
            }
        }

        if self.inner.epoch.get() == epoch {
            let mut pending = self.inner.pending.borrow_mut();
            waiting.append(&mut pending);
            *pending = waiting;
        }
        ran
    }
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timer.rs"]
mod tests;
