//! Animation system: advances each body's orbit and spin angles.

use crate::core::scene::SceneGraph;

/// Advance every body by exactly one reference frame.
///
/// Each call adds the body's signed per-frame increment regardless of how
/// much wall time has passed. Use `advance_by` for time-scaled motion.
pub fn advance(scene: &mut SceneGraph) {
    advance_by(scene, 1.0);
}

/// Advance every body by `frames` reference frames (fractional allowed).
///
/// Angles are unbounded; no wrapping is applied. Bodies are independent of
/// one another. World matrices are stale until the next `propagate`.
pub fn advance_by(scene: &mut SceneGraph, frames: f32) {
    if frames == 0.0 {
        return;
    }
    let (nodes, transforms) = scene.split_mut();
    for node in nodes {
        if node.orbit_rate != 0.0 {
            if let Some(orbit) = transforms.get_local_mut(node.orbit_frame) {
                orbit.rotation.y += node.orbit_rate * frames;
            }
        }
        if node.spin_rate != 0.0 {
            if let Some(body) = transforms.get_local_mut(node.body_frame) {
                body.rotation.y += node.spin_rate * frames;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::textures::TextureCache;
    use crate::components::body::{BodyDescriptor, Direction};
    use crate::systems::builder::spawn_body;

    fn mars() -> BodyDescriptor {
        let mut d = BodyDescriptor::new("mars");
        d.orbit.speed = 0.00024;
        d.orbit.radius = 19.0;
        d.orbit.direction = Direction::Clockwise;
        d.spin.speed = 0.01;
        d.spin.direction = Direction::Counterclockwise;
        d.spin.angle = 0.0;
        d.size = 0.3;
        d
    }

    fn scene_with(desc: &BodyDescriptor) -> SceneGraph {
        let mut scene = SceneGraph::new();
        let mut textures = TextureCache::new();
        let root = scene.root();
        spawn_body(&mut scene, &mut textures, root, desc).unwrap();
        scene
    }

    #[test]
    fn mars_after_a_thousand_frames() {
        let mut scene = scene_with(&mars());
        for _ in 0..1000 {
            advance(&mut scene);
        }
        let node = scene.node("mars").unwrap();
        let orbit = scene.orbit_angle(node);
        let spin = scene.spin_angle(node);
        assert!((orbit - -0.24).abs() < 1e-3, "orbit = {orbit}");
        assert!((spin - 10.0).abs() < 1e-3, "spin = {spin}");
    }

    #[test]
    fn n_frames_give_n_times_signed_speed() {
        let mut desc = BodyDescriptor::new("comet");
        desc.orbit.speed = 0.003;
        desc.orbit.direction = Direction::Counterclockwise;
        desc.spin.speed = 0.02;
        desc.spin.direction = Direction::Clockwise;
        let mut scene = scene_with(&desc);
        for n in 1..=250u32 {
            advance(&mut scene);
            let node = scene.node("comet").unwrap();
            let expected_orbit = n as f32 * 0.003;
            let expected_spin = -(n as f32) * 0.02;
            assert!((scene.orbit_angle(node) - expected_orbit).abs() < 1e-4);
            assert!((scene.spin_angle(node) - expected_spin).abs() < 1e-4);
        }
    }

    #[test]
    fn fractional_frames_scale_the_increment() {
        let mut scene = scene_with(&mars());
        advance_by(&mut scene, 0.5);
        let node = scene.node("mars").unwrap();
        assert!((scene.spin_angle(node) - 0.005).abs() < 1e-7);
        assert!((scene.orbit_angle(node) - -0.00012).abs() < 1e-8);
    }

    #[test]
    fn tilt_is_untouched() {
        let mut desc = mars();
        desc.spin.angle = -0.4;
        let mut scene = scene_with(&desc);
        advance_by(&mut scene, 30.0);
        let node = scene.node("mars").unwrap();
        assert_eq!(scene.local(node.body_frame).unwrap().rotation.z, -0.4);
    }

    #[test]
    fn empty_scene_is_a_noop() {
        let mut scene = SceneGraph::new();
        advance(&mut scene);
        assert!(scene.is_empty());
    }
}
