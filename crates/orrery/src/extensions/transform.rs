// extensions/transform.rs
//
// Frame hierarchy for the orrery: orbit frames hang off the system root,
// body frames hang off their orbit frame. Each frame keeps a local
// transform and a cached world matrix.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.insert(orbit, None, LocalTransform::new());
//   graph.insert(body, Some(orbit), LocalTransform::new().with_translation(offset));
//   graph.propagate();  // world = parent world * local, top down

use std::collections::HashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::NodeId;

/// Placement of a frame relative to its parent.
///
/// Rotation is kept as XYZ Euler angles: the animation system advances the
/// Y angle of orbit and body frames directly, and axial tilt lives on Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    /// Radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Scale first, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.translation,
        )
    }
}

#[derive(Debug, Clone)]
struct Frame {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalTransform,
    world: Mat4,
}

/// Frames keyed by id, with cached world matrices.
#[derive(Debug, Default)]
pub struct TransformGraph {
    frames: HashMap<NodeId, Frame>,
    /// Parentless frames, oldest first.
    roots: Vec<NodeId>,
    /// A local transform changed since the last propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame. `parent` must already be present, otherwise the frame
    /// becomes a root. Re-inserting an id replaces only its local transform.
    pub fn insert(&mut self, id: NodeId, parent: Option<NodeId>, local: LocalTransform) {
        self.dirty = true;
        if let Some(frame) = self.frames.get_mut(&id) {
            frame.local = local;
            return;
        }

        let parent = parent.filter(|p| self.frames.contains_key(p));
        match parent {
            Some(p) => {
                if let Some(parent_frame) = self.frames.get_mut(&p) {
                    parent_frame.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        self.frames.insert(id, Frame {
            parent,
            children: Vec::new(),
            local,
            world: Mat4::IDENTITY,
        });
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.frames.contains_key(&id)
    }

    pub fn get_local(&self, id: NodeId) -> Option<&LocalTransform> {
        self.frames.get(&id).map(|f| &f.local)
    }

    /// Mutable local transform. Marks the graph dirty.
    pub fn get_local_mut(&mut self, id: NodeId) -> Option<&mut LocalTransform> {
        let frame = self.frames.get_mut(&id)?;
        self.dirty = true;
        Some(&mut frame.local)
    }

    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.frames.get(&id)?.parent
    }

    pub fn get_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.frames.get(&id).map(|f| f.children.as_slice())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// World matrix as of the last `propagate`.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.frames.get(&id).map(|f| f.world)
    }

    /// Recompute every world matrix, parents before children.
    pub fn propagate(&mut self) {
        if !self.dirty {
            return;
        }
        let mut stack: Vec<(NodeId, Mat4)> =
            self.roots.iter().rev().map(|&id| (id, Mat4::IDENTITY)).collect();

        while let Some((id, parent_world)) = stack.pop() {
            let Some(frame) = self.frames.get_mut(&id) else { continue };
            frame.world = parent_world * frame.local.matrix();
            let world = frame.world;
            stack.extend(frame.children.iter().rev().map(|&c| (c, world)));
        }
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.roots.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn origin_of(graph: &TransformGraph, id: NodeId) -> Vec3 {
        graph.world_matrix(id).unwrap().transform_point3(Vec3::ZERO)
    }

    #[test]
    fn insert_links_parent_and_child() {
        let mut graph = TransformGraph::new();
        graph.insert(NodeId(0), None, LocalTransform::new());
        graph.insert(NodeId(1), Some(NodeId(0)), LocalTransform::new());

        assert_eq!(graph.get_parent(NodeId(1)), Some(NodeId(0)));
        assert_eq!(graph.get_children(NodeId(0)), Some([NodeId(1)].as_slice()));
        assert_eq!(graph.roots(), &[NodeId(0)]);
    }

    #[test]
    fn unknown_parent_makes_a_root() {
        let mut graph = TransformGraph::new();
        graph.insert(NodeId(4), Some(NodeId(99)), LocalTransform::new());
        assert_eq!(graph.get_parent(NodeId(4)), None);
        assert_eq!(graph.roots(), &[NodeId(4)]);
    }

    #[test]
    fn orbit_rotation_carries_body() {
        let mut graph = TransformGraph::new();
        let orbit = NodeId(1);
        let body = NodeId(2);
        graph.insert(orbit, None, LocalTransform::new().with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)));
        graph.insert(body, Some(orbit), LocalTransform::new().with_translation(Vec3::new(10.0, 0.0, 0.0)));
        graph.propagate();

        // Quarter turn about +Y carries +X onto -Z
        let pos = origin_of(&graph, body);
        assert!((pos - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5, "pos = {pos:?}");
    }

    #[test]
    fn edits_are_picked_up_on_next_propagate() {
        let mut graph = TransformGraph::new();
        let id = NodeId(7);
        graph.insert(id, None, LocalTransform::new());
        graph.propagate();
        assert!(!graph.is_dirty());

        graph.get_local_mut(id).unwrap().translation.x = 3.0;
        assert!(graph.is_dirty());
        assert_eq!(origin_of(&graph, id), Vec3::ZERO);
        graph.propagate();
        assert!((origin_of(&graph, id) - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn three_levels_compose() {
        let mut graph = TransformGraph::new();
        graph.insert(NodeId(0), None, LocalTransform::new().with_uniform_scale(2.0));
        graph.insert(NodeId(1), Some(NodeId(0)), LocalTransform::new().with_translation(Vec3::X));
        graph.insert(NodeId(2), Some(NodeId(1)), LocalTransform::new().with_translation(Vec3::Y));
        graph.propagate();
        assert!((origin_of(&graph, NodeId(2)) - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn missing_frame_has_no_local() {
        let mut graph = TransformGraph::new();
        assert!(graph.get_local_mut(NodeId(3)).is_none());
        assert!(!graph.is_dirty());
    }
}
