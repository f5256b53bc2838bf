//! Time-based scalar tweens and the shared group that the frame driver advances.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::foundation::error::GlobeResult;

type UpdateFn = Box<dyn FnMut(f64) -> GlobeResult<()>>;
type CompleteFn = Box<dyn FnOnce()>;

/// Interpolates a scalar from `from` to `to` over `duration_ms`.
///
/// Tweens only move when a [`TweenGroup`] is advanced; each advance calls
/// `on_update` with the eased value. Once elapsed time reaches the duration the
/// final value is delivered, `on_complete` runs once and the tween is dropped.
pub struct Tween {
    label: &'static str,
    from: f64,
    to: f64,
    duration_ms: f64,
    elapsed_ms: f64,
    ease: Ease,
    on_update: UpdateFn,
    on_complete: Option<CompleteFn>,
}

impl Tween {
    /// Create a linear tween with no callbacks.
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            label: "tween",
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            ease: Ease::Linear,
            on_update: Box::new(|_| Ok(())),
            on_complete: None,
        }
    }

    /// Name used in log output.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Easing applied to normalized progress.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Callback receiving the eased value on every step.
    pub fn on_update(mut self, f: impl FnMut(f64) -> GlobeResult<()> + 'static) -> Self {
        self.on_update = Box::new(f);
        self
    }

    /// Callback run once after the final step.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current eased value.
    pub fn value(&self) -> f64 {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// Advance by `dt_ms` and report whether the tween reached its end.
    ///
    /// A failing update callback is logged and does not stop the tween.
    fn step(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms.max(0.0);
        let value = self.value();
        if let Err(err) = (self.on_update)(value) {
            tracing::warn!(tween = self.label, value, error = %err, "tween update failed");
        }
        self.elapsed_ms >= self.duration_ms
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("label", &self.label)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("ease", &self.ease)
            .finish()
    }
}

/// Shared set of active tweens.
///
/// Cloning yields another handle to the same group. Tweens added while the
/// group is being advanced (from inside a callback) are queued and start on the
/// next advance.
#[derive(Clone, Default)]
pub struct TweenGroup {
    inner: Rc<TweenQueues>,
}

#[derive(Default)]
struct TweenQueues {
    active: RefCell<Vec<Tween>>,
    incoming: RefCell<Vec<Tween>>,
    // Bumped by `clear` so an in-flight advance discards what it holds.
    epoch: Cell<u64>,
}

impl TweenGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a tween; it starts moving on the next advance.
    pub fn add(&self, tween: Tween) {
        tracing::trace!(tween = tween.label, "tween queued");
        self.inner.incoming.borrow_mut().push(tween);
    }

    /// Number of tweens that have not completed yet.
    pub fn len(&self) -> usize {
        self.inner.active.borrow().len() + self.inner.incoming.borrow().len()
    }

    /// `true` when no tween is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every tween without running completion callbacks.
    pub fn clear(&self) {
        self.inner.epoch.set(self.inner.epoch.get().wrapping_add(1));
        self.inner.active.borrow_mut().clear();
        self.inner.incoming.borrow_mut().clear();
    }

    /// Advance every tween by `dt_ms`, returning how many completed.
    pub(crate) fn advance(&self, dt_ms: f64) -> usize {
        let epoch = self.inner.epoch.get();
        let mut current = std::mem::take(&mut *self.inner.active.borrow_mut());
        current.append(&mut self.inner.incoming.borrow_mut());

        let mut still_running = Vec::with_capacity(current.len());
        let mut completed = 0;
        for mut tween in current {
            if tween.step(dt_ms) {
                completed += 1;
                tracing::trace!(tween = tween.label, "tween complete");
                if let Some(done) = tween.on_complete.take() {
                    done();
                }
            } else {
                still_running.push(tween);
            }
        }

        if self.inner.epoch.get() == epoch {
            let mut active = self.inner.active.borrow_mut();
            still_running.append(&mut active);
            *active = still_running;
        }
        completed
    }
}

impl fmt::Debug for TweenGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenGroup")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
