//! Scene construction: turns body descriptors into orbit/body frame pairs
//! with their drawable parts attached.
//!
//! ```text
//! root ─┬─ starfield
//!       ├─ orbit frame (central) ── body frame ── surface, glow
//!       └─ orbit frame ─┬─ orbit path
//!                       └─ body frame ── surface, ring?, glow, overlays?
//! ```

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::api::types::{NodeId, RenderableId};
use crate::assets::registry::BodyRegistry;
use crate::assets::textures::{TextureCache, TextureId};
use crate::components::body::{BodyDescriptor, CentralBodyDescriptor};
use crate::components::color::Rgb;
use crate::components::mesh::{BlendMode, FresnelParams, Geometry, Material, RenderRole, Shading};
use crate::core::error::ConfigError;
use crate::core::scene::{SceneGraph, SceneNode};
use crate::extensions::transform::LocalTransform;
use crate::systems::glow::GLOW_SCALE;
use crate::systems::starfield::{Starfield, StarfieldConfig};

/// Icosahedron subdivision used for every globe.
pub const GLOBE_DETAIL: u32 = 12;
pub const RING_SEGMENTS: u32 = 32;
pub const ORBIT_PATH_TUBE: f32 = 0.003;
pub const ORBIT_PATH_SEGMENTS: u32 = 100;
pub const ORBIT_PATH_OPACITY: f32 = 0.7;
pub const CLOUD_SCALE: f32 = 1.003;
pub const CLOUD_OPACITY: f32 = 0.8;

fn request_texture(textures: &mut TextureCache, path: &str) -> Option<TextureId> {
    if path.trim().is_empty() {
        None
    } else {
        Some(textures.request(path))
    }
}

/// Surface named after the label plus its Fresnel glow shell.
#[allow(clippy::too_many_arguments)]
fn attach_globe(
    scene: &mut SceneGraph,
    textures: &mut TextureCache,
    frame: NodeId,
    label: &str,
    size: f32,
    shading: Shading,
    texture: &str,
    rim: Rgb,
    shadow: Rgb,
) -> (RenderableId, RenderableId) {
    let geometry = Geometry::Icosphere { radius: size, detail: GLOBE_DETAIL };

    let surface_material = Material::new(shading)
        .with_color(Rgb::WHITE)
        .with_texture(request_texture(textures, texture));
    let surface = scene.attach(frame, RenderRole::Surface, geometry, surface_material);
    surface.name = Some(label.to_string());
    let surface = surface.id;

    let glow_material = Material::new(Shading::Fresnel {
        rim,
        facing: shadow,
        params: FresnelParams::default(),
    })
    .with_transparent(true)
    .with_blend(BlendMode::Additive);
    let glow = scene.attach(frame, RenderRole::Glow, geometry, glow_material);
    glow.local = LocalTransform::new().with_uniform_scale(GLOW_SCALE);

    (surface, glow.id)
}

/// Build one orbiting body under `parent`.
///
/// Empty and duplicate labels are rejected. Out-of-range numbers fall back
/// to descriptor defaults. Textures are only requested here; an unresolved
/// texture leaves the part placeholder-colored.
pub fn spawn_body<'a>(
    scene: &'a mut SceneGraph,
    textures: &mut TextureCache,
    parent: NodeId,
    desc: &BodyDescriptor,
) -> Result<&'a SceneNode, ConfigError> {
    scene.claim_label(&desc.label)?;
    let d = desc.sanitized();

    let orbit_frame = scene.spawn_frame(LocalTransform::new(), Some(parent));

    let path_material = Material::new(Shading::Basic)
        .with_color(d.orbit.color)
        .with_opacity(ORBIT_PATH_OPACITY)
        .with_double_sided(true);
    let path = scene.attach(
        orbit_frame,
        RenderRole::OrbitPath,
        Geometry::Torus {
            radius: d.orbit.radius,
            tube: ORBIT_PATH_TUBE,
            radial_segments: ORBIT_PATH_SEGMENTS,
        },
        path_material,
    );
    path.local = LocalTransform::new().with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
    let orbit_path = path.id;

    // Offset keeps the visible surface tangent to the orbit path
    let body_local = LocalTransform::new()
        .with_translation(Vec3::new(d.orbit.radius - d.size / 9.0, 0.0, 0.0))
        .with_rotation(Vec3::new(0.0, 0.0, d.spin.angle));
    let body_frame = scene.spawn_frame(body_local, Some(orbit_frame));

    let (surface, glow) = attach_globe(
        scene,
        textures,
        body_frame,
        &d.label,
        d.size,
        Shading::Phong,
        &d.surface_texture,
        d.rim_color,
        d.shadow_color,
    );
    let mut renderables = vec![surface];

    if let Some(ring) = &d.ring {
        let inner = d.size + ring.inner_offset;
        let material = Material::new(Shading::Basic)
            .with_texture(request_texture(textures, &ring.texture))
            .with_transparent(true)
            .with_double_sided(true);
        let r = scene.attach(
            body_frame,
            RenderRole::Ring,
            Geometry::Annulus { inner, outer: inner + ring.size, segments: RING_SEGMENTS },
            material,
        );
        r.local = LocalTransform::new().with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        renderables.push(r.id);
    }

    renderables.push(glow);

    let globe = Geometry::Icosphere { radius: d.size, detail: GLOBE_DETAIL };
    if let Some(lights) = &d.overlays.lights {
        let material = Material::new(Shading::Basic)
            .with_texture(request_texture(textures, lights))
            .with_blend(BlendMode::Additive);
        renderables.push(scene.attach(body_frame, RenderRole::Overlay, globe, material).id);
    }
    if let Some(clouds) = &d.overlays.clouds {
        let tex = request_texture(textures, clouds);
        let material = Material::new(Shading::Phong)
            .with_texture(tex)
            .with_alpha_texture(tex)
            .with_opacity(CLOUD_OPACITY)
            .with_blend(BlendMode::Additive);
        let r = scene.attach(body_frame, RenderRole::Overlay, globe, material);
        r.local = LocalTransform::new().with_uniform_scale(CLOUD_SCALE);
        renderables.push(r.id);
    }

    let index = scene.push_node(SceneNode {
        label: d.label.clone(),
        orbit_frame,
        body_frame,
        surface,
        renderables,
        orbit_path: Some(orbit_path),
        orbit_rate: d.orbit.direction.sign() * d.orbit.speed,
        spin_rate: d.spin.direction.sign() * d.spin.speed,
    });
    Ok(&scene.nodes()[index])
}

/// Build the central body under `parent`: no offset, no orbit, unlit surface.
pub fn spawn_central_body<'a>(
    scene: &'a mut SceneGraph,
    textures: &mut TextureCache,
    parent: NodeId,
    desc: &CentralBodyDescriptor,
) -> Result<&'a SceneNode, ConfigError> {
    scene.claim_label(&desc.label)?;
    let d = desc.sanitized();

    let orbit_frame = scene.spawn_frame(LocalTransform::new(), Some(parent));
    let body_local = LocalTransform::new().with_rotation(Vec3::new(0.0, 0.0, d.spin.angle));
    let body_frame = scene.spawn_frame(body_local, Some(orbit_frame));

    let (surface, glow) = attach_globe(
        scene,
        textures,
        body_frame,
        &d.label,
        d.size,
        Shading::Basic,
        &d.surface_texture,
        d.rim_color,
        d.shadow_color,
    );

    let index = scene.push_node(SceneNode {
        label: d.label.clone(),
        orbit_frame,
        body_frame,
        surface,
        renderables: vec![surface, glow],
        orbit_path: None,
        orbit_rate: 0.0,
        spin_rate: d.spin.direction.sign() * d.spin.speed,
    });
    Ok(&scene.nodes()[index])
}

/// Build the whole system: root rotation, optional starfield, central body,
/// then every orbiting body in registry order.
pub fn build_system(
    scene: &mut SceneGraph,
    textures: &mut TextureCache,
    registry: &BodyRegistry,
    root_rotation: Vec3,
    starfield: Option<&StarfieldConfig>,
) -> Result<(), ConfigError> {
    let root = scene.root();
    if let Some(local) = scene.local_mut(root) {
        local.rotation = root_rotation;
    }

    if let Some(config) = starfield {
        scene.set_starfield(Starfield::generate(root, config));
    }

    if let Some(central) = registry.central() {
        spawn_central_body(scene, textures, root, central)?;
    }
    for body in registry.bodies() {
        spawn_body(scene, textures, root, body)?;
    }

    scene.propagate();
    log::info!(
        "scene built: {} bodies, {} parts, {} textures requested",
        scene.len(),
        scene.renderables().len(),
        textures.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::defaults;
    use crate::components::body::{OverlayFeatures, RingDesc};

    fn named_count(scene: &SceneGraph, node: &SceneNode, label: &str) -> usize {
        node.renderables
            .iter()
            .chain(node.orbit_path.iter())
            .filter_map(|id| scene.renderable(*id))
            .filter(|r| r.name.as_deref() == Some(label))
            .count()
    }

    fn build_one(desc: &BodyDescriptor) -> (SceneGraph, TextureCache) {
        let mut scene = SceneGraph::new();
        let mut textures = TextureCache::new();
        let root = scene.root();
        spawn_body(&mut scene, &mut textures, root, desc).unwrap();
        (scene, textures)
    }

    #[test]
    fn exactly_one_part_carries_the_label() {
        for desc in defaults::planets() {
            let (scene, _) = build_one(&desc);
            let node = scene.node(&desc.label).unwrap();
            assert_eq!(named_count(&scene, node, &desc.label), 1, "{}", desc.label);
            let surface = scene.renderable(node.surface).unwrap();
            assert_eq!(surface.role, RenderRole::Surface);
            assert_eq!(surface.name.as_deref(), Some(desc.label.as_str()));
        }
    }

    #[test]
    fn only_the_surface_is_named_with_every_feature() {
        let mut desc = BodyDescriptor::new("earth");
        desc.ring = Some(RingDesc { inner_offset: 0.1, size: 0.5, texture: "r.png".into() });
        desc.overlays = OverlayFeatures {
            lights: Some("lights.jpg".into()),
            clouds: Some("clouds.jpg".into()),
        };
        let (scene, textures) = build_one(&desc);
        let node = scene.node("earth").unwrap();
        // surface, ring, glow, lights, clouds
        assert_eq!(node.renderables.len(), 5);
        assert_eq!(named_count(&scene, node, "earth"), 1);
        let roles: Vec<RenderRole> = node
            .renderables
            .iter()
            .map(|id| scene.renderable(*id).unwrap().role)
            .collect();
        assert_eq!(
            roles,
            [RenderRole::Surface, RenderRole::Ring, RenderRole::Glow, RenderRole::Overlay, RenderRole::Overlay]
        );
        // surface, ring, lights, clouds (alpha map shares the cloud texture)
        assert_eq!(textures.len(), 4);
    }

    #[test]
    fn body_frame_offset_and_tilt() {
        let mut desc = BodyDescriptor::new("mars");
        desc.orbit.radius = 19.0;
        desc.size = 0.3;
        desc.spin.angle = 0.4;
        let (scene, _) = build_one(&desc);
        let node = scene.node("mars").unwrap();
        let local = scene.local(node.body_frame).unwrap();
        assert!((local.translation.x - (19.0 - 0.3 / 9.0)).abs() < 1e-6);
        assert_eq!(local.rotation.z, 0.4);
        assert_eq!(scene.transforms().get_parent(node.body_frame), Some(node.orbit_frame));
    }

    #[test]
    fn ring_radii() {
        let mut desc = BodyDescriptor::new("saturn");
        desc.size = 0.8;
        desc.ring = Some(RingDesc { inner_offset: 0.1, size: 0.5, texture: "ring.png".into() });
        let (scene, _) = build_one(&desc);
        let node = scene.node("saturn").unwrap();
        let ring = scene.renderable(node.renderables[1]).unwrap();
        match ring.geometry {
            Geometry::Annulus { inner, outer, segments } => {
                assert!((inner - 0.9).abs() < 1e-6);
                assert!((outer - 1.4).abs() < 1e-6);
                assert_eq!(segments, RING_SEGMENTS);
            }
            other => panic!("expected annulus, got {other:?}"),
        }
        assert_eq!(ring.local.rotation.x, FRAC_PI_2);
    }

    #[test]
    fn glow_is_scaled_and_additive() {
        let (scene, _) = build_one(&BodyDescriptor::new("venus"));
        let node = scene.node("venus").unwrap();
        let glow = scene.renderable(node.renderables[1]).unwrap();
        assert_eq!(glow.role, RenderRole::Glow);
        assert_eq!(glow.local.scale, Vec3::splat(GLOW_SCALE));
        assert_eq!(glow.material.blend, BlendMode::Additive);
        assert!(glow.name.is_none());
    }

    #[test]
    fn orbit_path_hangs_from_orbit_frame() {
        let (scene, _) = build_one(&BodyDescriptor::new("neptune"));
        let node = scene.node("neptune").unwrap();
        let path = scene.renderable(node.orbit_path.unwrap()).unwrap();
        assert_eq!(path.frame, node.orbit_frame);
        assert_eq!(path.role, RenderRole::OrbitPath);
        assert!(path.material.transparent);
        assert!(path.name.is_none());
    }

    #[test]
    fn signed_rates_follow_direction() {
        let planets = defaults::planets();
        let mars = planets.iter().find(|p| p.label == "mars").unwrap();
        let (scene, _) = build_one(mars);
        let node = scene.node("mars").unwrap();
        assert_eq!(node.orbit_rate, -0.00024);
        assert_eq!(node.spin_rate, 0.01);
    }

    #[test]
    fn duplicate_and_empty_labels_rejected() {
        let mut scene = SceneGraph::new();
        let mut textures = TextureCache::new();
        let root = scene.root();
        spawn_body(&mut scene, &mut textures, root, &BodyDescriptor::new("earth")).unwrap();
        let dup = spawn_body(&mut scene, &mut textures, root, &BodyDescriptor::new("earth"));
        assert!(matches!(dup, Err(ConfigError::DuplicateLabel(_))));
        let empty = spawn_body(&mut scene, &mut textures, root, &BodyDescriptor::new(""));
        assert!(matches!(empty, Err(ConfigError::EmptyLabel)));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn malformed_numbers_do_not_fail() {
        let mut desc = BodyDescriptor::new("odd");
        desc.size = f32::NAN;
        desc.orbit.radius = -4.0;
        let (scene, _) = build_one(&desc);
        let node = scene.node("odd").unwrap();
        let local = scene.local(node.body_frame).unwrap();
        assert!(local.translation.x.is_finite());
    }

    #[test]
    fn central_body_is_unlit_and_still() {
        let mut scene = SceneGraph::new();
        let mut textures = TextureCache::new();
        let root = scene.root();
        spawn_central_body(&mut scene, &mut textures, root, &defaults::sun()).unwrap();
        let node = scene.node("sun").unwrap();
        assert_eq!(node.orbit_rate, 0.0);
        assert!(node.orbit_path.is_none());
        let surface = scene.renderable(node.surface).unwrap();
        assert_eq!(surface.material.shading, Shading::Basic);
        assert_eq!(surface.name.as_deref(), Some("sun"));
        let local = scene.local(node.body_frame).unwrap();
        assert_eq!(local.translation, Vec3::ZERO);
    }

    #[test]
    fn full_system_builds_in_order() {
        let registry = BodyRegistry::from_manifest(&defaults::solar_system()).unwrap();
        let mut scene = SceneGraph::new();
        let mut textures = TextureCache::new();
        build_system(
            &mut scene,
            &mut textures,
            &registry,
            Vec3::new(0.3, -1.1, 0.3),
            Some(&StarfieldConfig { count: 10, ..Default::default() }),
        )
        .unwrap();
        let labels: Vec<&str> = scene.nodes().iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels[0], "sun");
        assert_eq!(labels.len(), 9);
        assert_eq!(scene.starfield().map(|s| s.len()), Some(10));
        let root = scene.root_id().unwrap();
        assert_eq!(scene.local(root).unwrap().rotation, Vec3::new(0.3, -1.1, 0.3));
        assert!(!scene.transforms().is_dirty());
    }
}
