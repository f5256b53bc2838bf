//! Property delegation: one flat name space forwarded into layer slots.

use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::error::{GlobeError, GlobeResult};
use crate::globe::slot::SlotSet;
use crate::layer::value::PropValue;
use crate::layer::{Layer, LayerKind};
use crate::surface::props::PropertySpec;

/// Side effect run after a successful write.
pub(crate) type ChangeHook = fn(&PropValue, &mut HookCtx<'_>) -> GlobeResult<()>;

/// What a hook may touch.
pub(crate) struct HookCtx<'a> {
    slots: &'a mut SlotSet,
}

impl HookCtx<'_> {
    pub(crate) fn layer_mut(&mut self, kind: LayerKind) -> GlobeResult<&mut (dyn Layer + 'static)> {
        self.slots.get_mut(kind)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum BindingTarget {
    /// Forwarded to `child` on the `layer` slot; the layer holds the value.
    Slot {
        layer: LayerKind,
        child: &'static str,
    },
    /// Held by the composition itself.
    Owned { value: PropValue },
}

#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) name: &'static str,
    pub(crate) target: BindingTarget,
    pub(crate) on_change: Option<ChangeHook>,
    pub(crate) triggers_redraw: bool,
}

impl Binding {
    pub(crate) fn delegate(spec: &PropertySpec) -> Self {
        Self {
            name: spec.name,
            target: BindingTarget::Slot {
                layer: spec.layer,
                child: spec.child,
            },
            on_change: None,
            triggers_redraw: true,
        }
    }

    pub(crate) fn owned(name: &'static str, value: PropValue) -> Self {
        Self {
            name,
            target: BindingTarget::Owned { value },
            on_change: None,
            triggers_redraw: true,
        }
    }

    pub(crate) fn on_change(mut self, hook: ChangeHook) -> Self {
        self.on_change = Some(hook);
        self
    }

    pub(crate) fn triggers_redraw(mut self, redraw: bool) -> Self {
        self.triggers_redraw = redraw;
        self
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("on_change", &self.on_change.is_some())
            .field("triggers_redraw", &self.triggers_redraw)
            .finish()
    }
}

/// Collects bindings and rejects name collisions.
#[derive(Debug, Default)]
pub(crate) struct SurfaceBuilder {
    bindings: Vec<Binding>,
}

impl SurfaceBuilder {
    pub(crate) fn from_table(table: &[PropertySpec]) -> Self {
        Self {
            bindings: table.iter().map(Binding::delegate).collect(),
        }
    }

    pub(crate) fn bind(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub(crate) fn build(self) -> GlobeResult<ConfigSurface> {
        let mut index = BTreeMap::new();
        for (i, binding) in self.bindings.iter().enumerate() {
            if index.insert(binding.name, i).is_some() {
                return Err(GlobeError::configuration(format!(
                    "property '{}' is declared more than once",
                    binding.name
                )));
            }
        }
        Ok(ConfigSurface {
            bindings: self.bindings,
            index,
        })
    }
}

/// The flat configuration surface of one composition.
#[derive(Debug)]
pub(crate) struct ConfigSurface {
    bindings: Vec<Binding>,
    index: BTreeMap<&'static str, usize>,
}

impl ConfigSurface {
    pub(crate) fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|b| b.name)
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn binding(&self, name: &str) -> GlobeResult<&Binding> {
        self.position(name).map(|i| &self.bindings[i])
    }

    fn position(&self, name: &str) -> GlobeResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GlobeError::configuration(format!("unknown property '{name}'")))
    }

    /// Forward a write and run its hook. Returns whether a redraw is due.
    ///
    /// Slot writes reach the layer before the hook runs. Owned values are
    /// stored only once the hook accepted them.
    pub(crate) fn write(
        &mut self,
        name: &str,
        value: PropValue,
        slots: &mut SlotSet,
    ) -> GlobeResult<bool> {
        let i = self.position(name)?;
        let binding = &mut self.bindings[i];
        let hook = binding.on_change;

        match &mut binding.target {
            BindingTarget::Slot { layer, child } => {
                let layer = slots.get_mut(*layer)?;
                match hook {
                    Some(hook) => {
                        layer.set(*child, value.clone())?;
                        hook(&value, &mut HookCtx { slots })?;
                    }
                    None => layer.set(*child, value)?,
                }
            }
            BindingTarget::Owned { value: held } => {
                if let Some(hook) = hook {
                    hook(&value, &mut HookCtx { slots })?;
                }
                *held = value;
            }
        }
        Ok(binding.triggers_redraw)
    }

    /// Read the current value from wherever it lives.
    pub(crate) fn read(&self, name: &str, slots: &SlotSet) -> GlobeResult<PropValue> {
        match &self.binding(name)?.target {
            BindingTarget::Slot { layer, child } => slots.get(*layer)?.get(*child),
            BindingTarget::Owned { value } => Ok(value.clone()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/binding.rs"]
mod tests;
