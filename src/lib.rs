#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! `terrella` composes independent globe layers (surface, points, arcs, hex
//! bins, polygons, hexed polygons, paths, labels, custom objects) into one
//! scene and exposes all of their properties through a single flat
//! configuration surface.
//!
//! The main entry point is [`Globe`]:
//!
//! ```
//! use terrella::{Globe, GlobeOptions, IntroPhase};
//!
//! let mut globe = Globe::new();
//! let root = globe.create_root()?;
//! globe.initialize(root, GlobeOptions::default())?;
//!
//! globe.set("pointAltitude", 0.25)?;
//! globe.set("globeImageUrl", "earth.jpg")?;
//! assert_eq!(globe.intro_phase()?, IntroPhase::Running);
//! # Ok::<(), terrella::GlobeError>(())
//! ```
//!
//! Renderers plug in through [`SceneBackend`], layer modules through
//! [`LayerFactory`], and the host's display link through [`FrameClock`].
//! Everything is single-threaded.

mod animation;
mod foundation;
mod globe;
mod layer;
mod runtime;
mod scene;
mod surface;

pub use animation::ease::Ease;
pub use animation::tween::{Tween, TweenGroup};
pub use foundation::coords::{Cartesian, GLOBE_RADIUS, GeoCoords, to_cartesian, to_polar};
pub use foundation::core::{AxisAngle, Size, Vec3};
pub use foundation::error::{GlobeError, GlobeResult};
pub use globe::options::{GlobeOptions, IntroTimings};
pub use globe::{Globe, GlobeBuilder};
pub use layer::headless::{HeadlessGlobeLayer, HeadlessLayers, PropertyLayer};
pub use layer::ready::{ReadyCallback, ReadySignal};
pub use layer::value::{Accessor, PropValue};
pub use layer::{Layer, LayerContext, LayerFactory, LayerKind};
pub use runtime::driver::{FrameClock, FrameDriver, ManualClock};
pub use runtime::intro::IntroPhase;
pub use runtime::timer::Timers;
pub use scene::backend::{NodeId, SceneBackend, SharedScene, shared};
pub use scene::tree::SceneTree;
pub use surface::props::{DefaultValue, PROPERTY_TABLE, PropertySpec, RENDERER_SIZE};
