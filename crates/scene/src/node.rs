//! Scene nodes.
//!
//! A [`SceneNode`] carries a local transform, a cached world transform and
//! optional components: a [`Drawable`] (shared mesh and material) and a
//! [`Light`]. Nodes without components are pure group or pivot nodes.
//! Nodes are owned by a [`SceneGraph`](crate::SceneGraph) and addressed by
//! [`NodeId`].

use std::rc::Rc;

use arbor_renderer::GpuMesh;
use arbor_resources::Material;

use crate::light::Light;
use crate::transform::Transform;

/// Handle to a node inside a [`SceneGraph`](crate::SceneGraph).
pub type NodeId = id_arena::Id<SceneNode>;

/// Whether a node's cached world transform reflects its current local
/// transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorldState {
    #[default]
    NotComputed,
    Current,
}

/// Mesh and material shared by every node that instances them.
#[derive(Clone, Debug)]
pub struct Drawable {
    pub mesh: Rc<GpuMesh>,
    pub material: Rc<Material>,
}

impl Drawable {
    pub fn new(mesh: Rc<GpuMesh>, material: Rc<Material>) -> Self {
        Self { mesh, material }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    name: String,
    local: Transform,
    world: Transform,
    world_state: WorldState,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    drawable: Option<Drawable>,
    light: Option<Light>,
}

impl SceneNode {
    /// A group node with an identity local transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local: Transform::IDENTITY,
            world: Transform::IDENTITY,
            world_state: WorldState::NotComputed,
            parent: None,
            children: Vec::new(),
            drawable: None,
            light: None,
        }
    }

    /// A node that draws `mesh` with `material`.
    pub fn drawable(name: impl Into<String>, mesh: Rc<GpuMesh>, material: Rc<Material>) -> Self {
        Self::new(name).with_drawable(Drawable::new(mesh, material))
    }

    pub fn with_local(mut self, local: Transform) -> Self {
        self.local = local;
        self
    }

    pub fn with_drawable(mut self, drawable: Drawable) -> Self {
        self.drawable = Some(drawable);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = Some(light);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_transform(&self) -> Transform {
        self.local
    }

    /// Replace the local transform. The world transform becomes stale.
    pub fn set_local_transform(&mut self, local: Transform) {
        self.local = local;
        self.world_state = WorldState::NotComputed;
    }

    /// Compose `delta` onto the local transform: `local = delta ∘ local`.
    ///
    /// Children are not touched; their world transforms are refreshed by
    /// the next compute pass.
    pub fn update(&mut self, delta: &Transform) {
        self.local = delta.multiply(&self.local);
        self.world_state = WorldState::NotComputed;
    }

    /// The cached world transform, whatever its state.
    pub fn cached_world(&self) -> Transform {
        self.world
    }

    pub fn world_state(&self) -> WorldState {
        self.world_state
    }

    pub(crate) fn set_world(&mut self, world: Transform) {
        self.world = world;
        self.world_state = WorldState::Current;
    }

    pub(crate) fn invalidate(&mut self) {
        self.world_state = WorldState::NotComputed;
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion (draw) order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn drawable_component(&self) -> Option<&Drawable> {
        self.drawable.as_ref()
    }

    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }
}
