//! Bundled layers that keep their configuration without drawing anything.
//!
//! They are the default factory when no renderer-backed layer modules are
//! injected, which makes a composition fully usable in tests and headless
//! tooling.

use std::collections::BTreeMap;

use crate::foundation::error::{GlobeError, GlobeResult};
use crate::layer::ready::{ReadyCallback, ReadySignal};
use crate::layer::value::PropValue;
use crate::layer::{Layer, LayerContext, LayerFactory, LayerKind};
use crate::scene::backend::NodeId;
use crate::surface::props::layer_defaults;

/// A layer that stores its declared properties.
#[derive(Clone, Debug)]
pub struct PropertyLayer {
    kind: LayerKind,
    container: NodeId,
    values: BTreeMap<&'static str, PropValue>,
}

impl PropertyLayer {
    /// Create a layer seeded with the declared defaults for `kind`.
    pub fn new(kind: LayerKind, container: NodeId) -> Self {
        Self {
            kind,
            container,
            values: layer_defaults(kind).into_iter().collect(),
        }
    }

    /// Container this layer draws into.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Names of the properties this layer accepts.
    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}

impl Layer for PropertyLayer {
    fn kind(&self) -> LayerKind {
        self.kind
    }

    fn set(&mut self, prop: &str, value: PropValue) -> GlobeResult<()> {
        match self.values.get_mut(prop) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(GlobeError::configuration(format!(
                "layer '{}' has no property '{prop}'",
                self.kind
            ))),
        }
    }

    fn get(&self, prop: &str) -> GlobeResult<PropValue> {
        self.values.get(prop).cloned().ok_or_else(|| {
            GlobeError::configuration(format!("layer '{}' has no property '{prop}'", self.kind))
        })
    }
}

/// Headless globe surface.
///
/// With no texture to fetch, the surface counts as ready as soon as its image
/// is assigned (any `globeImageUrl` write, including null).
#[derive(Debug)]
pub struct HeadlessGlobeLayer {
    props: PropertyLayer,
    ready: ReadySignal,
}

impl HeadlessGlobeLayer {
    /// Create an unready globe surface drawing into `container`.
    pub fn new(container: NodeId) -> Self {
        Self {
            props: PropertyLayer::new(LayerKind::Globe, container),
            ready: ReadySignal::new(),
        }
    }

    /// Handle to the readiness latch.
    pub fn ready_signal(&self) -> ReadySignal {
        self.ready.clone()
    }
}

impl Layer for HeadlessGlobeLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Globe
    }

    fn set(&mut self, prop: &str, value: PropValue) -> GlobeResult<()> {
        self.props.set(prop, value)?;
        if prop == "globeImageUrl" {
            self.ready.fire();
        }
        Ok(())
    }

    fn get(&self, prop: &str) -> GlobeResult<PropValue> {
        self.props.get(prop)
    }

    fn on_ready(&mut self, callback: ReadyCallback) -> GlobeResult<()> {
        self.ready.subscribe(callback);
        Ok(())
    }
}

/// Default [`LayerFactory`] producing headless layers.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessLayers;

impl LayerFactory for HeadlessLayers {
    fn create(&mut self, ctx: LayerContext) -> GlobeResult<Box<dyn Layer>> {
        tracing::trace!(layer = %ctx.kind, container = ctx.container.0, "creating headless layer");
        Ok(match ctx.kind {
            LayerKind::Globe => Box::new(HeadlessGlobeLayer::new(ctx.container)),
            kind => Box::new(PropertyLayer::new(kind, ctx.container)),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/headless.rs"]
mod tests;
