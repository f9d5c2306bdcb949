use crate::assets::textures::{TextureCache, TextureId};
use crate::components::color::Rgb;
use crate::components::mesh::{BlendMode, Renderable, Shading};
use crate::core::scene::SceneGraph;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Texture slot and base color for a part. Parts whose texture is not yet
/// ready (or failed) draw untextured in the placeholder color.
fn resolve_surface(textures: &TextureCache, texture: Option<TextureId>, color: Rgb) -> (f32, Rgb) {
    match texture {
        Some(id) if textures.is_ready(id) => (id.0 as f32, color),
        Some(_) => (RenderInstance::NO_TEXTURE, Rgb::PLACEHOLDER),
        None => (RenderInstance::NO_TEXTURE, color),
    }
}

fn alpha_slot(textures: &TextureCache, texture: Option<TextureId>) -> f32 {
    match texture {
        Some(id) if textures.is_ready(id) => id.0 as f32,
        _ => RenderInstance::NO_TEXTURE,
    }
}

fn instance_for(part: &Renderable, model: glam::Mat4, textures: &TextureCache) -> RenderInstance {
    let m = &part.material;
    let [g0, g1] = part.geometry.params();
    let (slot, color) = resolve_surface(textures, m.texture, m.color);

    let mut inst = RenderInstance {
        model: model.to_cols_array_2d(),
        color: color.with_alpha(m.opacity),
        emissive: m.emissive.with_alpha(m.emissive_intensity),
        rim: [0.0; 4],
        shape: [part.geometry.code(), m.shading.code(), g0, g1],
        extra: [slot, alpha_slot(textures, m.alpha_texture), 0.0, 0.0],
    };

    if let Shading::Fresnel { rim, facing, params } = m.shading {
        inst.color = facing.with_alpha(1.0);
        inst.rim = rim.with_alpha(params.power);
        inst.extra[2] = params.bias;
        inst.extra[3] = params.scale;
    }
    inst
}

/// Build the render buffer from the scene.
/// Groups parts by blend mode: normal first, then additive after
/// `blend_split`. Stars are written in world space.
pub fn build_render_buffer(scene: &SceneGraph, textures: &TextureCache, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut normal: Vec<RenderInstance> = Vec::new();
    let mut additive: Vec<RenderInstance> = Vec::new();

    for part in scene.renderables() {
        if !part.visible {
            continue;
        }
        let Some(model) = scene.renderable_world(part.id) else { continue };
        let instance = instance_for(part, model, textures);
        match part.material.blend {
            BlendMode::Normal => normal.push(instance),
            BlendMode::Additive => additive.push(instance),
        }
    }

    let split = normal.len() as u32;
    buffer.instances.extend(normal);
    buffer.set_blend_split(split);
    buffer.instances.extend(additive);

    if let Some(stars) = scene.starfield() {
        if let Some(frame) = scene.transforms().world_matrix(stars.frame) {
            buffer.stars.extend(stars.world_points(frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::body::{BodyDescriptor, RingDesc};
    use crate::systems::builder::spawn_body;
    use crate::systems::starfield::{Starfield, StarfieldConfig};

    fn build(desc: &BodyDescriptor) -> (SceneGraph, TextureCache) {
        let mut scene = SceneGraph::new();
        let mut textures = TextureCache::new();
        let root = scene.root();
        spawn_body(&mut scene, &mut textures, root, desc).unwrap();
        scene.propagate();
        (scene, textures)
    }

    #[test]
    fn buffer_groups_by_blend_mode() {
        let mut desc = BodyDescriptor::new("saturn");
        desc.ring = Some(RingDesc { inner_offset: 0.1, size: 0.5, texture: "ring.png".into() });
        let (scene, textures) = build(&desc);
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &textures, &mut buf);

        // orbit path, surface, ring | glow
        assert_eq!(buf.instance_count(), 4);
        assert_eq!(buf.blend_split, 3);
        let glow = &buf.instances[3];
        assert_eq!(glow.shape[1], Shading::Fresnel {
            rim: Rgb::BLACK,
            facing: Rgb::BLACK,
            params: Default::default(),
        }
        .code());
        assert_eq!(glow.rim[3], 3.0);
    }

    #[test]
    fn unresolved_texture_uses_placeholder() {
        let (scene, mut textures) = build(&BodyDescriptor::new("mercury"));
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &textures, &mut buf);
        let surface = buf.instances.iter().find(|i| i.shape[0] == 0.0 && i.shape[1] == 1.0).unwrap();
        assert_eq!(surface.extra[0], RenderInstance::NO_TEXTURE);
        assert_eq!(&surface.color[..3], &Rgb::PLACEHOLDER.to_array()[..]);

        textures.mark_loaded("/assets/map/mercurymap.jpg");
        build_render_buffer(&scene, &textures, &mut buf);
        let surface = buf.instances.iter().find(|i| i.shape[0] == 0.0 && i.shape[1] == 1.0).unwrap();
        assert_eq!(surface.extra[0], 0.0);
        assert_eq!(&surface.color[..3], &Rgb::WHITE.to_array()[..]);
    }

    #[test]
    fn failed_texture_keeps_placeholder() {
        let (scene, mut textures) = build(&BodyDescriptor::new("mercury"));
        textures.mark_failed("/assets/map/mercurymap.jpg");
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &textures, &mut buf);
        let surface = buf.instances.iter().find(|i| i.shape[0] == 0.0 && i.shape[1] == 1.0).unwrap();
        assert_eq!(surface.extra[0], RenderInstance::NO_TEXTURE);
    }

    #[test]
    fn stars_are_emitted() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        scene.set_starfield(Starfield::generate(root, &StarfieldConfig { count: 12, ..Default::default() }));
        scene.propagate();
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &TextureCache::new(), &mut buf);
        assert_eq!(buf.star_count(), 12);
        assert_eq!(buf.instance_count(), 0);
    }
}
