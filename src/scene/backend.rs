use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::{AxisAngle, Vec3};
use crate::foundation::error::{GlobeError, GlobeResult};

/// Opaque handle to a group node owned by a [`SceneBackend`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

/// The scene-graph capability the composition needs from a renderer.
///
/// Only hierarchical groups are modeled: create, attach, clear, toggle
/// visibility, set a uniform scale and an axis-angle rotation. Layers draw their
/// own geometry inside the containers they are handed; that geometry is outside
/// this contract.
///
/// Implementations are driven from a single thread. Operations on a node that
/// does not exist return [`crate::GlobeError::Scene`]; queries return `None`.
pub trait SceneBackend {
    /// Create a detached, visible group with identity transform.
    fn create_group(&mut self) -> NodeId;

    /// Attach `child` under `parent`, detaching it from any previous parent.
    fn add_child(&mut self, parent: NodeId, child: NodeId) -> GlobeResult<()>;

    /// Remove and release every descendant of `node`.
    fn clear_children(&mut self, node: NodeId) -> GlobeResult<()>;

    /// Direct children of `node` in attachment order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Show or hide `node` and its subtree.
    fn set_visible(&mut self, node: NodeId, visible: bool) -> GlobeResult<()>;

    /// Visibility flag of `node`.
    fn is_visible(&self, node: NodeId) -> Option<bool>;

    /// Set the per-axis scale of `node`.
    fn set_scale(&mut self, node: NodeId, scale: Vec3) -> GlobeResult<()>;

    /// Scale of `node`.
    fn scale(&self, node: NodeId) -> Option<Vec3>;

    /// Replace the rotation of `node` with `angle` radians around `axis`.
    fn set_rotation_from_axis_angle(
        &mut self,
        node: NodeId,
        axis: Vec3,
        angle: f64,
    ) -> GlobeResult<()>;

    /// Rotation of `node`.
    fn rotation(&self, node: NodeId) -> Option<AxisAngle>;

    /// `true` while `node` is alive.
    fn contains(&self, node: NodeId) -> bool;

    /// Number of live nodes.
    fn node_count(&self) -> usize;
}

/// Single-threaded shared handle to a scene backend.
pub type SharedScene = Rc<RefCell<dyn SceneBackend>>;

/// Wrap a backend into a [`SharedScene`].
pub fn shared(backend: impl SceneBackend + 'static) -> SharedScene {
    Rc::new(RefCell::new(backend))
}

/// Run `f` against the scene, failing instead of panicking when it is
/// already borrowed (e.g. a layer firing readiness mid-mutation).
pub(crate) fn with_scene<T>(
    scene: &SharedScene,
    f: impl FnOnce(&mut dyn SceneBackend) -> GlobeResult<T>,
) -> GlobeResult<T> {
    let mut guard = scene
        .try_borrow_mut()
        .map_err(|_| GlobeError::scene("scene backend is busy"))?;
    f(&mut *guard)
}
