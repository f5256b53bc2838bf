//! Layer module contract.
//!
//! A layer draws one feature set (points, arcs, ...) inside the scene container
//! the composition hands it. The composition only talks to layers through the
//! [`Layer`] trait: named property writes and reads, plus the globe surface's
//! readiness signal.

use std::fmt;

use crate::animation::tween::TweenGroup;
use crate::foundation::error::{GlobeError, GlobeResult};
use crate::scene::backend::{NodeId, SharedScene};

pub(crate) mod headless;
pub(crate) mod ready;
pub(crate) mod value;

use ready::ReadyCallback;
use value::PropValue;

/// The layers composed onto the globe, in draw order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    /// Globe surface (texture, bump map, atmosphere, graticules).
    Globe,
    /// Point markers.
    Points,
    /// Great-circle arcs.
    Arcs,
    /// Hexagonal binning of weighted points.
    HexBin,
    /// Extruded GeoJSON polygons.
    Polygons,
    /// GeoJSON polygons rendered as hexagon tilings.
    HexedPolygons,
    /// Polylines over the surface.
    Paths,
    /// Text labels.
    Labels,
    /// Host-built objects.
    Custom,
}

impl LayerKind {
    /// Every layer in the fixed order slots are created and drawn.
    pub const ALL: [Self; 9] = [
        Self::Globe,
        Self::Points,
        Self::Arcs,
        Self::HexBin,
        Self::Polygons,
        Self::HexedPolygons,
        Self::Paths,
        Self::Labels,
        Self::Custom,
    ];

    /// Stable name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Globe => "globe",
            Self::Points => "points",
            Self::Arcs => "arcs",
            Self::HexBin => "hexBin",
            Self::Polygons => "polygons",
            Self::HexedPolygons => "hexedPolygons",
            Self::Paths => "paths",
            Self::Labels => "labels",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A renderable layer instance.
///
/// The instance is the source of truth for its properties: the composition
/// forwards writes unchanged and reads them back through [`Layer::get`].
pub trait Layer {
    /// Which slot this instance fills.
    fn kind(&self) -> LayerKind;

    /// Apply a property write. Unknown names are a configuration error.
    fn set(&mut self, prop: &str, value: PropValue) -> GlobeResult<()>;

    /// Current value of a property.
    fn get(&self, prop: &str) -> GlobeResult<PropValue>;

    /// Register for the surface-ready notification.
    ///
    /// Only the globe layer has one; the signal fires at most once.
    fn on_ready(&mut self, callback: ReadyCallback) -> GlobeResult<()> {
        drop(callback);
        Err(GlobeError::configuration(format!(
            "layer '{}' has no readiness signal",
            self.kind()
        )))
    }
}

/// What a layer receives when it is constructed.
#[derive(Clone)]
pub struct LayerContext {
    /// Slot being filled.
    pub kind: LayerKind,
    /// Container the layer exclusively draws into.
    pub container: NodeId,
    /// Scene backend holding `container`.
    pub scene: SharedScene,
    /// Shared tween group, advanced once per frame.
    pub tweens: TweenGroup,
}

impl fmt::Debug for LayerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerContext")
            .field("kind", &self.kind)
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

/// Builds layer instances for the composition.
pub trait LayerFactory {
    /// Construct the layer for `ctx.kind`.
    fn create(&mut self, ctx: LayerContext) -> GlobeResult<Box<dyn Layer>>;
}

impl<F> LayerFactory for F
where
    F: FnMut(LayerContext) -> GlobeResult<Box<dyn Layer>>,
{
    fn create(&mut self, ctx: LayerContext) -> GlobeResult<Box<dyn Layer>> {
        self(ctx)
    }
}
