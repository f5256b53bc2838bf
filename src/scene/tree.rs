use std::collections::BTreeMap;

use crate::foundation::core::{AxisAngle, Vec3};
use crate::foundation::error::{GlobeError, GlobeResult};
use crate::scene::backend::{NodeId, SceneBackend};

#[derive(Clone, Debug)]
struct Group {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visible: bool,
    scale: Vec3,
    rotation: AxisAngle,
}

impl Group {
    fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            visible: true,
            scale: Vec3::ONE,
            rotation: AxisAngle::IDENTITY,
        }
    }
}

/// In-memory scene graph used when no renderer backend is supplied.
///
/// Node ids are never reused, so a stale id held after [`clear_children`]
/// reports as missing instead of aliasing a new node.
///
/// [`clear_children`]: SceneBackend::clear_children
#[derive(Clone, Debug, Default)]
pub struct SceneTree {
    nodes: BTreeMap<NodeId, Group>,
    next_id: u64,
}

impl SceneTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent of `node`, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|g| g.parent)
    }

    /// Number of nodes in the subtree under `node`, excluding `node` itself.
    pub fn descendant_count(&self, node: NodeId) -> usize {
        self.nodes.get(&node).map_or(0, |g| {
            g.children
                .iter()
                .map(|&c| 1 + self.descendant_count(c))
                .sum()
        })
    }

    fn group_mut(&mut self, node: NodeId) -> GlobeResult<&mut Group> {
        self.nodes
            .get_mut(&node)
            .ok_or_else(|| GlobeError::scene(format!("unknown node {}", node.0)))
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cur = Some(of);
        while let Some(n) = cur {
            if n == candidate {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    fn release_subtree(&mut self, node: NodeId) {
        if let Some(group) = self.nodes.remove(&node) {
            for child in group.children {
                self.release_subtree(child);
            }
        }
    }
}

impl SceneBackend for SceneTree {
    fn create_group(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Group::new());
        id
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) -> GlobeResult<()> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(GlobeError::scene(format!(
                "cannot attach node {} under node {}: node missing",
                child.0, parent.0
            )));
        }
        if self.is_ancestor(child, parent) {
            return Err(GlobeError::scene(format!(
                "attaching node {} under node {} would form a cycle",
                child.0, parent.0
            )));
        }

        if let Some(old) = self.parent(child) {
            self.group_mut(old)?.children.retain(|&c| c != child);
        }
        self.group_mut(child)?.parent = Some(parent);
        self.group_mut(parent)?.children.push(child);
        Ok(())
    }

    fn clear_children(&mut self, node: NodeId) -> GlobeResult<()> {
        let children = std::mem::take(&mut self.group_mut(node)?.children);
        for child in children {
            self.release_subtree(child);
        }
        Ok(())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|g| g.children.clone())
            .unwrap_or_default()
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) -> GlobeResult<()> {
        self.group_mut(node)?.visible = visible;
        Ok(())
    }

    fn is_visible(&self, node: NodeId) -> Option<bool> {
        self.nodes.get(&node).map(|g| g.visible)
    }

    fn set_scale(&mut self, node: NodeId, scale: Vec3) -> GlobeResult<()> {
        self.group_mut(node)?.scale = scale;
        Ok(())
    }

    fn scale(&self, node: NodeId) -> Option<Vec3> {
        self.nodes.get(&node).map(|g| g.scale)
    }

    fn set_rotation_from_axis_angle(
        &mut self,
        node: NodeId,
        axis: Vec3,
        angle: f64,
    ) -> GlobeResult<()> {
        if axis.length() == 0.0 {
            return Err(GlobeError::scene("rotation axis must be non-zero"));
        }
        self.group_mut(node)?.rotation = AxisAngle { axis, angle };
        Ok(())
    }

    fn rotation(&self, node: NodeId) -> Option<AxisAngle> {
        self.nodes.get(&node).map(|g| g.rotation)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tree.rs"]
mod tests;
