use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback run when a [`ReadySignal`] fires.
pub type ReadyCallback = Box<dyn FnOnce()>;

/// At-most-once readiness latch.
///
/// Clones share the same latch. Listeners registered before [`fire`] run once
/// when it is called; listeners registered afterwards run immediately.
///
/// [`fire`]: ReadySignal::fire
#[derive(Clone, Default)]
pub struct ReadySignal {
    inner: Rc<ReadyState>,
}

#[derive(Default)]
struct ReadyState {
    fired: Cell<bool>,
    listeners: RefCell<Vec<ReadyCallback>>,
}

impl ReadySignal {
    /// Create an unfired signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for the (single) ready notification.
    pub fn subscribe(&self, callback: ReadyCallback) {
        if self.inner.fired.get() {
            callback();
        } else {
            self.inner.listeners.borrow_mut().push(callback);
        }
    }

    /// Fire the signal. Returns `false` if it had already fired.
    pub fn fire(&self) -> bool {
        if self.inner.fired.replace(true) {
            return false;
        }
        let listeners = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        tracing::debug!(listeners = listeners.len(), "ready signal fired");
        for listener in listeners {
            listener();
        }
        true
    }

    /// `true` once the signal has fired.
    pub fn is_ready(&self) -> bool {
        self.inner.fired.get()
    }
}

impl fmt::Debug for ReadySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadySignal")
            .field("fired", &self.inner.fired.get())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/ready.rs"]
mod tests;
