//! Perpetual frame loop.
//!
//! The host's display link calls [`FrameDriver::on_frame`] once per frame. The
//! driver asks its [`FrameClock`] for the next frame before doing any work, so
//! nothing that happens while advancing can stall the loop.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::animation::tween::TweenGroup;
use crate::runtime::timer::Timers;

/// Source of display-frame callbacks (`requestAnimationFrame`, a vsync link,
/// a test harness).
pub trait FrameClock {
    /// Ask for one more [`FrameDriver::on_frame`] call on the next frame.
    fn request_frame(&mut self);

    /// Withdraw an outstanding request, if any.
    fn cancel_frame(&mut self) {}
}

impl<C: FrameClock + ?Sized> FrameClock for Box<C> {
    fn request_frame(&mut self) {
        (**self).request_frame();
    }

    fn cancel_frame(&mut self) {
        (**self).cancel_frame();
    }
}

/// A [`FrameClock`] that only records requests; frames are delivered by
/// calling [`FrameDriver::on_frame`] by hand.
///
/// Clones share state, so a test can keep a handle after moving the clock
/// into a driver.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    state: Rc<ManualClockState>,
}

#[derive(Debug, Default)]
struct ManualClockState {
    pending: Cell<bool>,
    requests: Cell<u64>,
}

impl ManualClock {
    /// Create a clock with no outstanding request.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a frame has been requested and not yet delivered.
    pub fn is_pending(&self) -> bool {
        self.state.pending.get()
    }

    /// Total number of frame requests seen.
    pub fn request_count(&self) -> u64 {
        self.state.requests.get()
    }

    /// Consume the outstanding request, returning whether there was one.
    pub fn take_pending(&self) -> bool {
        self.state.pending.replace(false)
    }
}

impl FrameClock for ManualClock {
    fn request_frame(&mut self) {
        self.state.pending.set(true);
        self.state.requests.set(self.state.requests.get() + 1);
    }

    fn cancel_frame(&mut self) {
        self.state.pending.set(false);
    }
}

/// Advances deferred callbacks and tweens once per display frame.
pub struct FrameDriver {
    clock: Box<dyn FrameClock>,
    tweens: TweenGroup,
    timers: Timers,
    running: bool,
    last_frame_ms: Option<f64>,
    frames: u64,
}

impl FrameDriver {
    /// Create a stopped driver scheduling through `clock`.
    pub fn new(clock: impl FrameClock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            tweens: TweenGroup::new(),
            timers: Timers::new(),
            running: false,
            last_frame_ms: None,
            frames: 0,
        }
    }

    /// Start requesting frames. No-op when already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_frame_ms = None;
        self.clock.request_frame();
        tracing::debug!("frame driver started");
    }

    /// Stop requesting frames; further `on_frame` calls do nothing.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.clock.cancel_frame();
        tracing::debug!(frames = self.frames, "frame driver stopped");
    }

    /// `true` while the loop is live.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames processed since creation.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Handle to the tween group advanced by this driver.
    pub fn tweens(&self) -> &TweenGroup {
        &self.tweens
    }

    /// Handle to the deferred callbacks run by this driver.
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Drop all tweens and deferred callbacks.
    pub fn reset(&mut self) {
        self.tweens.clear();
        self.timers.clear();
        self.last_frame_ms = None;
    }

    /// Process one display frame at host timestamp `now_ms`.
    ///
    /// Reschedules first, then advances tweens, then runs due callbacks. Work
    /// queued from callbacks starts on the following frame. Timestamps that go
    /// backwards count as zero elapsed time.
    pub fn on_frame(&mut self, now_ms: f64) {
        if !self.running {
            return;
        }
        self.clock.request_frame();

        let dt_ms = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame_ms = Some(now_ms);
        self.frames += 1;

        let completed = self.tweens.advance(dt_ms);
        let ran = self.timers.advance(dt_ms);
        if completed > 0 || ran > 0 {
            tracing::trace!(frame = self.frames, dt_ms, completed, ran, "frame advanced");
        }
    }
}

impl fmt::Debug for FrameDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameDriver")
            .field("running", &self.running)
            .field("frames", &self.frames)
            .field("tweens", &self.tweens.len())
            .field("timers", &self.timers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/driver.rs"]
mod tests;
