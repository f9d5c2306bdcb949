//! Scene lighting: one directional key light plus an ambient term.
//!
//! Phong-shaded parts (planet surfaces, clouds) respond to it; basic-shaded
//! parts (central body, rings, orbit paths, light overlays) ignore it.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::color::Rgb;

/// A directional light, shining from `position` toward the origin.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, intensity, r, g, b, _pad]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DirectionalLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    _pad: f32,
}

impl DirectionalLight {
    pub const FLOATS: usize = 8;

    pub fn new(position: Vec3, color: Rgb, intensity: f32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            intensity,
            r: color.r,
            g: color.g,
            b: color.b,
            _pad: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Unit vector from the origin toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position().normalize_or_zero()
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(51.0, 150.0, 150.0), Rgb::WHITE, 1.0)
    }
}

/// Lights and ambient color for the scene.
#[derive(Debug, Clone)]
pub struct LightState {
    lights: Vec<DirectionalLight>,
    ambient: [f32; 3],
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: [0.0, 0.0, 0.0],
        }
    }

    pub fn add(&mut self, light: DirectionalLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn lights(&self) -> &[DirectionalLight] {
        &self.lights
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient light color (default: black, lit only by the key light).
    pub fn set_ambient(&mut self, r: f32, g: f32, b: f32) {
        self.ambient = [r, g, b];
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    /// Pointer to the lights data for host-side reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_sits_above_and_in_front() {
        let light = DirectionalLight::default();
        assert_eq!(light.position(), Vec3::new(51.0, 150.0, 150.0));
        assert_eq!(light.r, 1.0);
        let d = light.direction();
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert!(d.y > 0.0 && d.z > 0.0);
    }

    #[test]
    fn light_state_add_and_clear() {
        let mut state = LightState::new();
        state.add(DirectionalLight::default());
        assert_eq!(state.count(), 1);
        state.clear();
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn directional_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<DirectionalLight>(), DirectionalLight::FLOATS * 4);
    }
}
