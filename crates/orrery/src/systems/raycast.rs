//! Ray tests against scene parts.
//!
//! Globes are tested as exact spheres; the detail-12 icosphere they render as
//! deviates from the sphere by far less than a pixel at any usable zoom.

use glam::{Mat4, Vec3};

use crate::api::types::RenderableId;
use crate::components::mesh::Geometry;
use crate::core::scene::SceneGraph;
use crate::renderer::camera::Ray;

/// Nearest intersection found by `cast`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub renderable: RenderableId,
    /// Distance along the ray (world units).
    pub t: f32,
    pub point: Vec3,
}

/// Ray parameter of the first intersection with a sphere of `radius` at the
/// origin of `world`'s local space, or `None`.
///
/// The ray is taken into local space without renormalizing its direction,
/// so the returned `t` is measured in world units even under scaling.
pub fn ray_sphere(ray: &Ray, world: Mat4, radius: f32) -> Option<f32> {
    if world.determinant().abs() < 1e-12 || radius <= 0.0 {
        return None;
    }
    let inv = world.inverse();
    let o = inv.transform_point3(ray.origin);
    let d = inv.transform_vector3(ray.direction);

    let a = d.dot(d);
    if a < 1e-12 {
        return None;
    }
    let half_b = o.dot(d);
    let c = o.dot(o) - radius * radius;
    let disc = half_b * half_b - a * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = (-half_b - sqrt_disc) / a;
    let far = (-half_b + sqrt_disc) / a;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin inside the sphere
        Some(far)
    } else {
        None
    }
}

/// Intersect one part. Only globes are ray-testable.
pub fn intersect(scene: &SceneGraph, id: RenderableId, ray: &Ray) -> Option<f32> {
    let part = scene.renderable(id)?;
    if !part.visible {
        return None;
    }
    match part.geometry {
        Geometry::Icosphere { radius, .. } => {
            let world = scene.renderable_world(id)?;
            ray_sphere(ray, world, radius)
        }
        Geometry::Annulus { .. } | Geometry::Torus { .. } => None,
    }
}

/// Nearest hit among `candidates`. Ties go to the earlier candidate.
pub fn cast(
    scene: &SceneGraph,
    candidates: impl IntoIterator<Item = RenderableId>,
    ray: &Ray,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for id in candidates {
        let Some(t) = intersect(scene, id, ray) else { continue };
        if best.map_or(true, |b| t < b.t) {
            best = Some(Hit { renderable: id, t, point: ray.at(t) });
        }
    }
    best
}
