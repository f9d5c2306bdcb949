use std::collections::HashSet;

use glam::Mat4;

use crate::api::types::{NodeId, RenderableId};
use crate::components::mesh::{Geometry, Material, RenderRole, Renderable};
use crate::core::error::{self, ConfigError};
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::systems::starfield::Starfield;

/// One body in the scene: an orbit frame carrying revolution and a body
/// frame carrying spin, plus the parts drawn from them.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub label: String,
    /// Rotates about Y by the orbit angle. Parent of `body_frame`.
    pub orbit_frame: NodeId,
    /// Offset along the orbit radius, tilted, rotates about Y by the spin angle.
    pub body_frame: NodeId,
    /// The single part named after `label`.
    pub surface: RenderableId,
    /// Parts attached to `body_frame`, surface first.
    pub renderables: Vec<RenderableId>,
    /// Orbit ring attached to `orbit_frame`. Absent for the central body.
    pub orbit_path: Option<RenderableId>,
    /// Signed orbit increment per reference frame.
    pub orbit_rate: f32,
    /// Signed spin increment per reference frame.
    pub spin_rate: f32,
}

/// Owner of the body hierarchy: transform frames, drawable parts and the
/// per-body records that tie them together.
pub struct SceneGraph {
    transforms: TransformGraph,
    renderables: Vec<Renderable>,
    nodes: Vec<SceneNode>,
    labels: HashSet<String>,
    root: Option<NodeId>,
    starfield: Option<Starfield>,
    next_frame: u32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            transforms: TransformGraph::new(),
            renderables: Vec::with_capacity(64),
            nodes: Vec::with_capacity(16),
            labels: HashSet::new(),
            root: None,
            starfield: None,
            next_frame: 0,
        }
    }

    // ── Frames ──────────────────────────────────────────────────────

    /// Create a transform frame, optionally parented.
    pub fn spawn_frame(&mut self, local: LocalTransform, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_frame);
        self.next_frame += 1;
        self.transforms.insert(id, parent, local);
        id
    }

    /// The system root frame. Created on first use.
    pub fn root(&mut self) -> NodeId {
        match self.root {
            Some(id) => id,
            None => {
                let id = self.spawn_frame(LocalTransform::new(), None);
                self.root = Some(id);
                id
            }
        }
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn transforms(&self) -> &TransformGraph {
        &self.transforms
    }

    pub fn transforms_mut(&mut self) -> &mut TransformGraph {
        &mut self.transforms
    }

    pub fn local(&self, frame: NodeId) -> Option<&LocalTransform> {
        self.transforms.get_local(frame)
    }

    pub fn local_mut(&mut self, frame: NodeId) -> Option<&mut LocalTransform> {
        self.transforms.get_local_mut(frame)
    }

    /// Recompute cached world matrices.
    pub fn propagate(&mut self) {
        self.transforms.propagate();
    }

    // ── Renderables ─────────────────────────────────────────────────

    /// Attach a new part to `frame` and return it for further setup.
    pub fn attach(
        &mut self,
        frame: NodeId,
        role: RenderRole,
        geometry: Geometry,
        material: Material,
    ) -> &mut Renderable {
        let id = RenderableId(self.renderables.len() as u32);
        self.renderables.push(Renderable::new(id, frame, role, geometry, material));
        let last = self.renderables.len() - 1;
        &mut self.renderables[last]
    }

    pub fn renderable(&self, id: RenderableId) -> Option<&Renderable> {
        self.renderables.get(id.index())
    }

    pub fn renderable_mut(&mut self, id: RenderableId) -> Option<&mut Renderable> {
        self.renderables.get_mut(id.index())
    }

    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    /// Frame world matrix times the part's local matrix.
    /// Valid as of the last `propagate`.
    pub fn renderable_world(&self, id: RenderableId) -> Option<Mat4> {
        let r = self.renderable(id)?;
        let frame = self.transforms.world_matrix(r.frame)?;
        Some(frame * r.local.matrix())
    }

    // ── Bodies ──────────────────────────────────────────────────────

    /// Reserve a body label. Empty or already-used labels are rejected.
    pub fn claim_label(&mut self, label: &str) -> Result<(), ConfigError> {
        error::claim_label(&mut self.labels, label)
    }

    pub fn push_node(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node(&self, label: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Current orbit angle (radians, unbounded).
    pub fn orbit_angle(&self, node: &SceneNode) -> f32 {
        self.local(node.orbit_frame).map_or(0.0, |l| l.rotation.y)
    }

    /// Current spin angle (radians, unbounded).
    pub fn spin_angle(&self, node: &SceneNode) -> f32 {
        self.local(node.body_frame).map_or(0.0, |l| l.rotation.y)
    }

    /// Body records alongside the transforms they drive, borrowed together.
    pub fn split_mut(&mut self) -> (&[SceneNode], &mut TransformGraph) {
        (&self.nodes, &mut self.transforms)
    }

    // ── Backdrop ────────────────────────────────────────────────────

    pub fn set_starfield(&mut self, starfield: Starfield) {
        self.starfield = Some(starfield);
    }

    pub fn starfield(&self) -> Option<&Starfield> {
        self.starfield.as_ref()
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all topology. Labels become available again.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.renderables.clear();
        self.nodes.clear();
        self.labels.clear();
        self.root = None;
        self.starfield = None;
        self.next_frame = 0;
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
