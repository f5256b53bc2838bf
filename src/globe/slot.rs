use std::fmt;

use crate::foundation::error::{GlobeError, GlobeResult};
use crate::layer::{Layer, LayerKind};
use crate::scene::backend::NodeId;

/// A layer instance paired with the container it exclusively owns.
pub(crate) struct LayerSlot {
    pub(crate) kind: LayerKind,
    pub(crate) container: NodeId,
    pub(crate) layer: Box<dyn Layer>,
}

impl fmt::Debug for LayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerSlot")
            .field("kind", &self.kind)
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

/// Slots in creation order.
#[derive(Debug, Default)]
pub(crate) struct SlotSet {
    slots: Vec<LayerSlot>,
}

impl SlotSet {
    pub(crate) fn push(&mut self, slot: LayerSlot) {
        self.slots.push(slot);
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &LayerSlot> {
        self.slots.iter()
    }

    pub(crate) fn get(&self, kind: LayerKind) -> GlobeResult<&(dyn Layer + 'static)> {
        self.slots
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.layer.as_ref())
            .ok_or_else(|| missing(kind))
    }

    pub(crate) fn get_mut(&mut self, kind: LayerKind) -> GlobeResult<&mut (dyn Layer + 'static)> {
        match self.slots.iter_mut().find(|s| s.kind == kind) {
            Some(slot) => Ok(slot.layer.as_mut()),
            None => Err(missing(kind)),
        }
    }
}

fn missing(kind: LayerKind) -> GlobeError {
    GlobeError::not_initialized(format!("layer slot '{kind}' does not exist"))
}
