//! Fresnel rim glow.
//!
//! The glow shell is the surface geometry scaled up slightly, blended
//! additively. Its intensity rises toward the silhouette as seen from the
//! camera:
//!
//!   f = bias + scale * (1 + dot(normalize(P - C), N)) ^ power
//!   color = mix(facing, rim, clamp(f)), alpha = clamp(f)
//!
//! The host renderer evaluates this per vertex with `GLOW_WGSL`; the CPU
//! version below is the reference used by tests and headless renderers.

use glam::Vec3;

use crate::components::color::Rgb;
use crate::components::mesh::FresnelParams;

/// Scale of the glow shell relative to the surface.
pub const GLOW_SCALE: f32 = 1.03;

/// Unclamped reflection factor at world point `p` with unit normal `n`,
/// seen from `camera`.
pub fn reflection_factor(params: &FresnelParams, camera: Vec3, p: Vec3, n: Vec3) -> f32 {
    let incident = (p - camera).normalize_or_zero();
    params.bias + params.scale * (1.0 + incident.dot(n)).max(0.0).powf(params.power)
}

/// Glow color and alpha for a reflection factor.
pub fn glow_color(rim: Rgb, facing: Rgb, factor: f32) -> [f32; 4] {
    let f = factor.clamp(0.0, 1.0);
    facing.mix(rim, f).with_alpha(f)
}

/// WGSL for the host's glow pipeline.
///
/// Bind group 0 holds the camera uniform. Vertex buffer 0 is a unit
/// icosphere (position and normal, locations 0 and 1). Vertex buffer 1 is
/// the `RenderInstance` array stepped per instance, locations 2..=10 in
/// field order: model columns, color (facing), emissive, rim (rgb + power),
/// shape (radius in `z`), extra (Fresnel bias and scale in `z`, `w`).
pub const GLOW_WGSL: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
};
@group(0) @binding(0) var<uniform> camera: Camera;

struct GlowIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) emissive: vec4<f32>,
    @location(8) rim: vec4<f32>,
    @location(9) shape: vec4<f32>,
    @location(10) extra: vec4<f32>,
};

struct GlowOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) reflection: f32,
    @location(1) rim: vec3<f32>,
    @location(2) facing: vec3<f32>,
};

fn fresnel(world_pos: vec3<f32>, world_normal: vec3<f32>, bias: f32, scale: f32, power: f32) -> f32 {
    let incident = normalize(world_pos - camera.camera_pos.xyz);
    return bias + scale * pow(max(1.0 + dot(incident, world_normal), 0.0), power);
}

@vertex
fn vs_glow(in: GlowIn) -> GlowOut {
    let model = mat4x4<f32>(in.model_0, in.model_1, in.model_2, in.model_3);
    let world = model * vec4<f32>(in.position * in.shape.z, 1.0);
    let normal = normalize((model * vec4<f32>(in.normal, 0.0)).xyz);

    var out: GlowOut;
    out.clip = camera.view_proj * world;
    out.reflection = fresnel(world.xyz, normal, in.extra.z, in.extra.w, in.rim.w);
    out.rim = in.rim.rgb;
    out.facing = in.color.rgb;
    return out;
}

@fragment
fn fs_glow(in: GlowOut) -> @location(0) vec4<f32> {
    let f = clamp(in.reflection, 0.0, 1.0);
    return vec4<f32>(mix(in.facing, in.rim, vec3<f32>(f)), f);
}
"#;
