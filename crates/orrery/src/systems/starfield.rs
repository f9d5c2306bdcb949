//! Procedural starfield backdrop: deterministic points on a spherical shell
//! around the system, hung from the system root so they turn with it.

use glam::{Mat4, Vec3};

use crate::api::types::NodeId;
use crate::renderer::camera::CameraConfig;
use crate::renderer::instance::StarPoint;
use crate::systems::rng::Rng;

/// Starfield generation settings.
#[derive(Debug, Clone, Copy)]
pub struct StarfieldConfig {
    pub count: u32,
    pub seed: u64,
    /// Shell inner radius. Keep it beyond the outermost orbit.
    pub inner_radius: f32,
    /// Shell outer radius, measured from the system origin.
    pub outer_radius: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1800,
            seed: 0x5eed_57a2,
            inner_radius: 42.0,
            outer_radius: 55.0,
        }
    }
}

impl StarfieldConfig {
    /// Shrink the shell so every star is within `camera`'s far plane from
    /// the camera position, whatever the system rotation.
    pub fn fitted_to(self, camera: &CameraConfig) -> Self {
        let reach = camera.far - camera.position.length();
        if self.outer_radius <= reach {
            return self;
        }
        let outer = reach.max(0.0);
        log::warn!(
            "starfield outer radius {} exceeds camera reach {reach:.1}, clamping",
            self.outer_radius
        );
        Self {
            outer_radius: outer,
            inner_radius: self.inner_radius.min(outer),
            ..self
        }
    }
}

/// A generated point cloud attached to a frame.
#[derive(Debug, Clone)]
pub struct Starfield {
    pub frame: NodeId,
    /// Positions in the frame's local space, with brightness.
    pub points: Vec<StarPoint>,
}

impl Starfield {
    /// Generate the catalog. Deterministic for a given config.
    pub fn generate(frame: NodeId, config: &StarfieldConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let (lo, hi) = if config.inner_radius <= config.outer_radius {
            (config.inner_radius, config.outer_radius)
        } else {
            (config.outer_radius, config.inner_radius)
        };

        let mut points = Vec::with_capacity(config.count as usize);
        for _ in 0..config.count {
            let theta = rng.next_f32() * std::f32::consts::TAU;
            let phi = (1.0 - 2.0 * rng.next_f32()).acos();
            let direction = Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
            let radius = rng.range(lo, hi);
            let p = direction * radius;

            // Power-law: many dim, few bright.
            let brightness = 0.2 + 0.8 * rng.next_f32().powf(3.0);

            points.push(StarPoint { x: p.x, y: p.y, z: p.z, brightness });
        }

        Self { frame, points }
    }

    /// Points transformed into world space by the frame's world matrix.
    pub fn world_points(&self, frame_world: Mat4) -> impl Iterator<Item = StarPoint> + '_ {
        self.points.iter().map(move |s| {
            let p = frame_world.transform_point3(Vec3::new(s.x, s.y, s.z));
            StarPoint { x: p.x, y: p.y, z: p.z, brightness: s.brightness }
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
