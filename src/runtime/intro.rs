//! One-shot intro animation.
//!
//! The scene stays hidden until the globe surface reports ready, then grows in
//! from a near-zero scale while spinning down to rest around the polar axis.
//! A session plays at most once; later ready notifications only re-assert
//! visibility.

use std::cell::Cell;
use std::f64::consts::TAU;
use std::fmt;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::animation::tween::{Tween, TweenGroup};
use crate::foundation::core::Vec3;
use crate::foundation::error::GlobeResult;
use crate::globe::options::IntroTimings;
use crate::layer::ready::ReadyCallback;
use crate::runtime::timer::Timers;
use crate::scene::backend::{NodeId, SharedScene, with_scene};

/// Lifecycle of an intro session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IntroPhase {
    /// Created; for a disarmed session this is terminal.
    NotStarted,
    /// Scene hidden, waiting for the globe surface.
    WaitingForReady,
    /// Ready seen; settle delay and tweens in flight.
    Running,
    /// Rotation settled.
    Done,
}

#[derive(Debug)]
struct IntroSession {
    phase: Cell<IntroPhase>,
    armed: Cell<bool>,
    detached: Cell<bool>,
    tweens_started: Cell<bool>,
}

/// Drives the intro for one scene node.
///
/// Cheap to clone; clones share the session.
#[derive(Clone)]
pub(crate) struct IntroAnimation {
    session: Rc<IntroSession>,
    scene: SharedScene,
    node: NodeId,
    timings: IntroTimings,
    tweens: TweenGroup,
    timers: Timers,
}

impl IntroAnimation {
    pub(crate) fn new(
        armed: bool,
        scene: SharedScene,
        node: NodeId,
        timings: IntroTimings,
        tweens: TweenGroup,
        timers: Timers,
    ) -> Self {
        Self {
            session: Rc::new(IntroSession {
                phase: Cell::new(IntroPhase::NotStarted),
                armed: Cell::new(armed),
                detached: Cell::new(false),
                tweens_started: Cell::new(false),
            }),
            scene,
            node,
            timings,
            tweens,
            timers,
        }
    }

    pub(crate) fn phase(&self) -> IntroPhase {
        self.session.phase.get()
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.session.armed.get()
    }

    /// `true` once the animation has been triggered (running or finished).
    pub(crate) fn has_played(&self) -> bool {
        matches!(self.phase(), IntroPhase::Running | IntroPhase::Done)
    }

    /// Hide the scene until ready. Disarmed sessions leave it untouched.
    pub(crate) fn arm(&self) -> GlobeResult<()> {
        if !self.is_armed() {
            return Ok(());
        }
        with_scene(&self.scene, |s| s.set_visible(self.node, false))?;
        self.session.phase.set(IntroPhase::WaitingForReady);
        tracing::debug!(node = self.node.0, "intro armed, scene hidden");
        Ok(())
    }

    /// Callback to hand to the globe layer's readiness signal.
    pub(crate) fn listener(&self) -> ReadyCallback {
        let this = self.clone();
        Box::new(move || this.on_ready())
    }

    /// Stop reacting to readiness; the scene node is about to be discarded.
    pub(crate) fn detach(&self) {
        self.session.detached.set(true);
        self.session.armed.set(false);
    }

    fn on_ready(&self) {
        if self.session.detached.get() {
            return;
        }
        // Visibility is restored even when nothing will animate.
        self.reveal();

        if !self.session.armed.replace(false) {
            tracing::debug!(phase = ?self.phase(), "globe ready; intro not armed");
            return;
        }
        if self.phase() != IntroPhase::WaitingForReady {
            return;
        }

        self.collapse();
        self.session.phase.set(IntroPhase::Running);
        tracing::info!(
            settle_delay_ms = self.timings.settle_delay_ms,
            "globe ready; starting intro"
        );

        let this = self.clone();
        self.timers
            .schedule("intro-settle", self.timings.settle_delay_ms, move || {
                this.start_tweens();
                Ok(())
            });
    }

    /// Show the scene, retrying on the next frame while the scene is borrowed.
    fn reveal(&self) {
        if self.session.detached.get() {
            return;
        }
        if let Err(err) = with_scene(&self.scene, |s| s.set_visible(self.node, true)) {
            tracing::warn!(error = %err, "scene busy; reveal deferred to next frame");
            let this = self.clone();
            self.timers.schedule("intro-reveal", 0.0, move || {
                this.reveal();
                Ok(())
            });
        }
    }

    /// Shrink the scene to epsilon. A retry that lands after the tweens
    /// started is dropped.
    fn collapse(&self) {
        if self.session.detached.get() || self.session.tweens_started.get() {
            return;
        }
        let eps = Vec3::splat(self.timings.epsilon);
        if let Err(err) = with_scene(&self.scene, |s| s.set_scale(self.node, eps)) {
            tracing::warn!(error = %err, "scene busy; collapse deferred to next frame");
            let this = self.clone();
            self.timers.schedule("intro-collapse", 0.0, move || {
                this.collapse();
                Ok(())
            });
        }
    }

    fn start_tweens(&self) {
        if self.session.detached.get() {
            return;
        }
        self.session.tweens_started.set(true);
        let scene = Rc::clone(&self.scene);
        let node = self.node;
        self.tweens.add(
            Tween::new(self.timings.epsilon, 1.0, self.timings.scale_duration_ms)
                .label("intro-scale")
                .ease(Ease::OutQuad)
                .on_update(move |k| with_scene(&scene, |s| s.set_scale(node, Vec3::splat(k)))),
        );

        let scene = Rc::clone(&self.scene);
        let session = Rc::clone(&self.session);
        self.tweens.add(
            Tween::new(TAU, 0.0, self.timings.rotation_duration_ms)
                .label("intro-rotation")
                .ease(Ease::OutQuint)
                .on_update(move |rot| {
                    with_scene(&scene, |s| s.set_rotation_from_axis_angle(node, Vec3::Y, rot))
                })
                .on_complete(move || {
                    session.phase.set(IntroPhase::Done);
                    tracing::info!("intro complete");
                }),
        );
    }
}

impl fmt::Debug for IntroAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntroAnimation")
            .field("phase", &self.phase())
            .field("armed", &self.is_armed())
            .field("node", &self.node)
            .field("timings", &self.timings)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/intro.rs"]
mod tests;
