//! The composition coordinator.
//!
//! A [`Globe`] owns one slot per [`LayerKind`], the `scene` group they hang
//! under and the flat configuration surface that forwards property writes into
//! them. It also owns the frame driver and arms the intro animation.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::foundation::coords::{Cartesian, GLOBE_RADIUS, GeoCoords, to_cartesian, to_polar};
use crate::foundation::error::{GlobeError, GlobeResult};
use crate::layer::headless::HeadlessLayers;
use crate::layer::value::PropValue;
use crate::layer::{Layer, LayerContext, LayerFactory, LayerKind};
use crate::runtime::driver::{FrameClock, FrameDriver, ManualClock};
use crate::runtime::intro::{IntroAnimation, IntroPhase};
use crate::scene::backend::{NodeId, SharedScene, shared, with_scene};
use crate::scene::tree::SceneTree;
use crate::surface::binding::{Binding, ConfigSurface, HookCtx, SurfaceBuilder};
use crate::surface::props::{PROPERTY_TABLE, RENDERER_SIZE};

pub(crate) mod options;
pub(crate) mod slot;

use options::GlobeOptions;
use slot::{LayerSlot, SlotSet};

/// Builds a [`Globe`] from injected collaborators.
///
/// Anything left unset falls back to the bundled implementation: an in-memory
/// [`SceneTree`], [`HeadlessLayers`] and a [`ManualClock`].
#[derive(Default)]
pub struct GlobeBuilder {
    scene: Option<SharedScene>,
    layers: Option<Box<dyn LayerFactory>>,
    clock: Option<Box<dyn FrameClock>>,
}

impl GlobeBuilder {
    /// Start from the bundled defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render through `scene`.
    pub fn scene(mut self, scene: SharedScene) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Construct layers with `factory`.
    pub fn layers(mut self, factory: impl LayerFactory + 'static) -> Self {
        self.layers = Some(Box::new(factory));
        self
    }

    /// Schedule frames through `clock`.
    pub fn clock(mut self, clock: impl FrameClock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Assemble an uninitialized globe.
    pub fn build(self) -> Globe {
        let scene = self.scene.unwrap_or_else(|| shared(SceneTree::new()));
        let layers = self
            .layers
            .unwrap_or_else(|| Box::new(HeadlessLayers) as Box<dyn LayerFactory>);
        let driver = match self.clock {
            Some(clock) => FrameDriver::new(clock),
            None => FrameDriver::new(ManualClock::new()),
        };
        Globe {
            scene,
            layers,
            driver,
            composition: None,
            intro_spent: false,
            redraw_requested: false,
        }
    }
}

impl fmt::Debug for GlobeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobeBuilder")
            .field("scene", &self.scene.is_some())
            .field("layers", &self.layers.is_some())
            .field("clock", &self.clock.is_some())
            .finish()
    }
}

/// Everything created by one successful [`Globe::initialize`].
struct Composition {
    root: NodeId,
    scene: NodeId,
    slots: SlotSet,
    surface: ConfigSurface,
    intro: IntroAnimation,
}

/// Layers composed onto one globe, configured through one flat surface.
pub struct Globe {
    scene: SharedScene,
    layers: Box<dyn LayerFactory>,
    driver: FrameDriver,
    composition: Option<Composition>,
    // Latched once any intro of this globe has been triggered.
    intro_spent: bool,
    redraw_requested: bool,
}

impl Globe {
    /// Globe with every collaborator defaulted.
    pub fn new() -> Self {
        GlobeBuilder::new().build()
    }

    /// Start configuring collaborators.
    pub fn builder() -> GlobeBuilder {
        GlobeBuilder::new()
    }

    /// The scene backend this globe renders through.
    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    /// Create a detached group suitable as the `root` of [`Globe::initialize`].
    pub fn create_root(&self) -> GlobeResult<NodeId> {
        with_scene(&self.scene, |s| Ok(s.create_group()))
    }

    /// Build the layer slots under `root`.
    ///
    /// Anything already under `root` is released first, so calling this again
    /// rebuilds the same topology. On failure the globe is left uninitialized
    /// and `root` empty.
    #[tracing::instrument(skip_all, fields(root = root.0))]
    pub fn initialize(&mut self, root: NodeId, options: GlobeOptions) -> GlobeResult<()> {
        options.validate()?;

        if let Some(previous) = self.composition.take() {
            self.intro_spent |= previous.intro.has_played();
            previous.intro.detach();
        }
        self.driver.reset();
        self.redraw_requested = false;

        match self.compose(root, &options) {
            Ok(composition) => {
                tracing::info!(
                    slots = composition.slots.len(),
                    properties = composition.surface.len(),
                    intro = composition.intro.is_armed(),
                    "globe initialized"
                );
                self.composition = Some(composition);
                self.driver.start();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "globe initialization failed");
                self.driver.reset();
                self.driver.stop();
                if let Err(cleanup) = with_scene(&self.scene, |s| s.clear_children(root)) {
                    tracing::warn!(error = %cleanup, "could not release partial composition");
                }
                Err(err)
            }
        }
    }

    fn compose(&mut self, root: NodeId, options: &GlobeOptions) -> GlobeResult<Composition> {
        let scene = with_scene(&self.scene, |s| {
            s.clear_children(root)?;
            let scene = s.create_group();
            s.add_child(root, scene)?;
            Ok(scene)
        })?;

        let mut slots = SlotSet::default();
        for kind in LayerKind::ALL {
            let container = with_scene(&self.scene, |s| {
                let container = s.create_group();
                s.add_child(scene, container)?;
                Ok(container)
            })?;
            let ctx = LayerContext {
                kind,
                container,
                scene: Rc::clone(&self.scene),
                tweens: self.driver.tweens().clone(),
            };
            let layer = self
                .layers
                .create(ctx)
                .map_err(|err| GlobeError::layer_initialization(kind, err))?;
            if layer.kind() != kind {
                return Err(GlobeError::layer_initialization(
                    kind,
                    GlobeError::configuration(format!(
                        "factory returned a '{}' layer",
                        layer.kind()
                    )),
                ));
            }
            slots.push(LayerSlot {
                kind,
                container,
                layer,
            });
        }

        let mut surface = SurfaceBuilder::from_table(PROPERTY_TABLE)
            .bind(
                Binding::owned(RENDERER_SIZE, PropValue::Size(options.renderer_size))
                    .on_change(forward_renderer_size)
                    .triggers_redraw(false),
            )
            .build()?;
        surface.write(
            RENDERER_SIZE,
            PropValue::Size(options.renderer_size),
            &mut slots,
        )?;

        let armed = options.start_with_intro_animation && !self.intro_spent;
        if options.start_with_intro_animation && !armed {
            tracing::debug!("intro already played on this globe; not re-arming");
        }
        let intro = IntroAnimation::new(
            armed,
            Rc::clone(&self.scene),
            scene,
            options.intro,
            self.driver.tweens().clone(),
            self.driver.timers().clone(),
        );
        intro.arm()?;
        slots
            .get_mut(LayerKind::Globe)?
            .on_ready(intro.listener())
            .map_err(|err| GlobeError::layer_initialization(LayerKind::Globe, err))?;

        Ok(Composition {
            root,
            scene,
            slots,
            surface,
            intro,
        })
    }

    fn composition(&self) -> GlobeResult<&Composition> {
        self.composition
            .as_ref()
            .ok_or_else(|| GlobeError::not_initialized("globe has no layers yet"))
    }

    /// `true` once [`Globe::initialize`] has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.composition.is_some()
    }

    /// Write one property through the configuration surface.
    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) -> GlobeResult<()> {
        let composition = self
            .composition
            .as_mut()
            .ok_or_else(|| GlobeError::not_initialized(format!("cannot set '{name}'")))?;
        let redraw = composition
            .surface
            .write(name, value.into(), &mut composition.slots)?;
        tracing::debug!(property = name, redraw, "property written");
        self.redraw_requested |= redraw;
        Ok(())
    }

    /// Read one property back from the layer that owns it.
    pub fn get(&self, name: &str) -> GlobeResult<PropValue> {
        let composition = self.composition()?;
        composition.surface.read(name, &composition.slots)
    }

    /// Apply a JSON object of `name -> value` writes in order, stopping at the
    /// first failure.
    pub fn configure(&mut self, config: &Value) -> GlobeResult<()> {
        let map = config
            .as_object()
            .ok_or_else(|| GlobeError::configuration("configuration must be a JSON object"))?;
        for (name, value) in map {
            self.set(name, PropValue::Json(value.clone()))?;
        }
        Ok(())
    }

    /// Names accepted by [`Globe::set`], in declared order.
    pub fn property_names(&self) -> GlobeResult<Vec<&'static str>> {
        Ok(self.composition()?.surface.names().collect())
    }

    /// Consume the pending redraw request, if any.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Where the intro animation currently stands.
    pub fn intro_phase(&self) -> GlobeResult<IntroPhase> {
        Ok(self.composition()?.intro.phase())
    }

    /// Forward one display frame to the driver.
    pub fn frame(&mut self, now_ms: f64) {
        self.driver.on_frame(now_ms);
    }

    /// The frame driver, e.g. to stop or restart the loop.
    pub fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }

    /// The group the composition was built under.
    pub fn root_node(&self) -> GlobeResult<NodeId> {
        Ok(self.composition()?.root)
    }

    /// The group every layer container hangs under.
    pub fn scene_node(&self) -> GlobeResult<NodeId> {
        Ok(self.composition()?.scene)
    }

    /// Container owned by the `kind` slot.
    pub fn container(&self, kind: LayerKind) -> GlobeResult<NodeId> {
        self.composition()?
            .slots
            .iter()
            .find(|slot| slot.kind == kind)
            .map(|slot| slot.container)
            .ok_or_else(|| GlobeError::not_initialized(format!("layer slot '{kind}' does not exist")))
    }

    /// The layer filling the `kind` slot.
    pub fn layer(&self, kind: LayerKind) -> GlobeResult<&(dyn Layer + 'static)> {
        self.composition()?.slots.get(kind)
    }

    /// Scene-space position of a geographic coordinate on this globe.
    pub fn get_coords(&self, lat: f64, lng: f64, altitude: f64) -> Cartesian {
        to_cartesian(lat, lng, altitude, GLOBE_RADIUS)
    }

    /// Geographic coordinate of a scene-space position on this globe.
    pub fn to_geo_coords(&self, point: Cartesian) -> GeoCoords {
        to_polar(point, GLOBE_RADIUS)
    }
}

impl Default for Globe {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Globe {
    fn drop(&mut self) {
        // Queued callbacks hold handles back into the intro session.
        self.driver.reset();
    }
}

impl fmt::Debug for Globe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Globe");
        s.field("driver", &self.driver);
        match &self.composition {
            Some(c) => s
                .field("root", &c.root)
                .field("scene", &c.scene)
                .field("slots", &c.slots.len())
                .field("intro", &c.intro),
            None => s.field("initialized", &false),
        };
        s.finish()
    }
}

/// Only the paths layer sizes its strokes from the output resolution.
fn forward_renderer_size(value: &PropValue, ctx: &mut HookCtx<'_>) -> GlobeResult<()> {
    let size = value.as_size().ok_or_else(|| {
        GlobeError::configuration(format!("'{RENDERER_SIZE}' expects a width/height size"))
    })?;
    ctx.layer_mut(LayerKind::Paths)?
        .set(RENDERER_SIZE, PropValue::Size(size))
}

#[cfg(test)]
#[path = "../../tests/unit/globe/coordinator.rs"]
mod tests;
