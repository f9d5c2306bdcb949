//! Body descriptors: immutable configuration records, one per body.
//!
//! Field defaults match what an unconfigured body looks like; only `label`
//! is mandatory.

use serde::{Deserialize, Serialize};
use crate::components::color::Rgb;

/// Rotation sense, viewed from above the orbital plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Clockwise,
    Counterclockwise,
}

impl Direction {
    /// Clockwise turns the angle negative, counterclockwise positive.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => -1.0,
            Direction::Counterclockwise => 1.0,
        }
    }
}

/// Revolution around the central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitDesc {
    /// Radians per reference frame.
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub direction: Direction,
    /// Color of the orbit path ring.
    #[serde(default = "default_orbit_color")]
    pub color: Rgb,
}

impl Default for OrbitDesc {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            radius: default_radius(),
            direction: Direction::Clockwise,
            color: default_orbit_color(),
        }
    }
}

/// Rotation about the body's own axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinDesc {
    /// Axial tilt in radians.
    #[serde(default)]
    pub angle: f32,
    /// Radians per reference frame.
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub direction: Direction,
}

impl Default for SpinDesc {
    fn default() -> Self {
        Self {
            angle: 0.0,
            speed: default_speed(),
            direction: Direction::Clockwise,
        }
    }
}

/// Flat ring around the body's equator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingDesc {
    /// Gap between the surface and the ring's inner edge.
    #[serde(default = "default_ring_offset")]
    pub inner_offset: f32,
    /// Radial width of the ring.
    pub size: f32,
    pub texture: String,
}

/// Optional texture overlays drawn on top of the surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayFeatures {
    /// Night-side lights, unlit and additively blended.
    #[serde(default)]
    pub lights: Option<String>,
    /// Cloud layer, slightly above the surface.
    #[serde(default)]
    pub clouds: Option<String>,
}

impl OverlayFeatures {
    pub fn is_empty(&self) -> bool {
        self.lights.is_none() && self.clouds.is_none()
    }
}

/// Configuration for one orbiting body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Unique identifier; names the surface and keys the content table.
    pub label: String,
    #[serde(default)]
    pub orbit: OrbitDesc,
    #[serde(default)]
    pub spin: SpinDesc,
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_surface_texture")]
    pub surface_texture: String,
    #[serde(default = "default_rim_color")]
    pub rim_color: Rgb,
    #[serde(default)]
    pub shadow_color: Rgb,
    #[serde(default)]
    pub ring: Option<RingDesc>,
    #[serde(default, skip_serializing_if = "OverlayFeatures::is_empty")]
    pub overlays: OverlayFeatures,
}

impl BodyDescriptor {
    /// Descriptor with every field at its default.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            orbit: OrbitDesc::default(),
            spin: SpinDesc::default(),
            size: default_size(),
            surface_texture: default_surface_texture(),
            rim_color: default_rim_color(),
            shadow_color: Rgb::BLACK,
            ring: None,
            overlays: OverlayFeatures::default(),
        }
    }

    /// Copy with out-of-range numeric fields replaced by their defaults.
    pub fn sanitized(&self) -> Self {
        let mut d = self.clone();
        d.size = positive_or_default(&self.label, "size", d.size, default_size());
        d.orbit.radius = positive_or_default(&self.label, "orbit.radius", d.orbit.radius, default_radius());
        d.orbit.speed = non_negative_or_default(&self.label, "orbit.speed", d.orbit.speed, default_speed());
        d.spin.speed = non_negative_or_default(&self.label, "spin.speed", d.spin.speed, default_speed());
        d.spin.angle = finite_or_default(&self.label, "spin.angle", d.spin.angle, 0.0);
        if let Some(ring) = d.ring.as_mut() {
            ring.inner_offset = non_negative_or_default(&self.label, "ring.inner_offset", ring.inner_offset, default_ring_offset());
            ring.size = positive_or_default(&self.label, "ring.size", ring.size, default_ring_size());
        }
        d
    }
}

/// Configuration for the central body. It spins but does not orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralBodyDescriptor {
    pub label: String,
    #[serde(default = "default_central_size")]
    pub size: f32,
    #[serde(default)]
    pub spin: SpinDesc,
    pub surface_texture: String,
    #[serde(default = "default_rim_color")]
    pub rim_color: Rgb,
    #[serde(default)]
    pub shadow_color: Rgb,
}

impl CentralBodyDescriptor {
    pub fn sanitized(&self) -> Self {
        let mut d = self.clone();
        d.size = positive_or_default(&self.label, "size", d.size, default_central_size());
        d.spin.speed = non_negative_or_default(&self.label, "spin.speed", d.spin.speed, default_speed());
        d.spin.angle = finite_or_default(&self.label, "spin.angle", d.spin.angle, 0.0);
        d
    }
}

fn positive_or_default(label: &str, field: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("body {label:?}: {field} = {value} is out of range, using {default}");
        default
    }
}

fn non_negative_or_default(label: &str, field: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("body {label:?}: {field} = {value} is out of range, using {default}");
        default
    }
}

fn finite_or_default(label: &str, field: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("body {label:?}: {field} is not finite, using {default}");
        default
    }
}

fn default_speed() -> f32 {
    1.0
}

fn default_radius() -> f32 {
    1.0
}

fn default_size() -> f32 {
    1.0
}

fn default_central_size() -> f32 {
    5.0
}

fn default_ring_offset() -> f32 {
    0.1
}

fn default_ring_size() -> f32 {
    0.5
}

fn default_orbit_color() -> Rgb {
    Rgb::from_hex(0xaae0f2)
}

fn default_rim_color() -> Rgb {
    Rgb::from_hex(0x0088ff)
}

fn default_surface_texture() -> String {
    "/assets/map/mercurymap.jpg".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_signs() {
        assert_eq!(Direction::Clockwise.sign(), -1.0);
        assert_eq!(Direction::Counterclockwise.sign(), 1.0);
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let d: BodyDescriptor = serde_json::from_str(r#"{ "label": "vulcan" }"#).unwrap();
        assert_eq!(d, BodyDescriptor::new("vulcan"));
        assert_eq!(d.orbit.direction, Direction::Clockwise);
        assert_eq!(d.rim_color, Rgb::from_hex(0x0088ff));
        assert!(d.ring.is_none());
    }

    #[test]
    fn label_is_required() {
        let parsed: Result<BodyDescriptor, _> = serde_json::from_str(r#"{ "size": 2.0 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn full_json_parses() {
        let json = r#"{
            "label": "saturn",
            "orbit": { "speed": 0.0001, "radius": 25, "direction": "clockwise", "color": "0xc9c230" },
            "spin": { "speed": 0.05, "direction": "counterclockwise" },
            "size": 0.8,
            "surface_texture": "/assets/map/saturnmap.jpg",
            "rim_color": 14071954,
            "ring": { "size": 0.5, "texture": "/assets/map/saturnringmap.png" }
        }"#;
        let d: BodyDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(d.spin.direction, Direction::Counterclockwise);
        assert_eq!(d.rim_color, Rgb::from_hex(0xd6b892));
        let ring = d.ring.unwrap();
        assert_eq!(ring.inner_offset, 0.1);
        assert_eq!(ring.size, 0.5);
    }

    #[test]
    fn sanitize_replaces_bad_numbers() {
        let mut d = BodyDescriptor::new("broken");
        d.size = -3.0;
        d.orbit.radius = 0.0;
        d.orbit.speed = f32::NAN;
        d.spin.speed = 0.02;
        let s = d.sanitized();
        assert_eq!(s.size, 1.0);
        assert_eq!(s.orbit.radius, 1.0);
        assert_eq!(s.orbit.speed, 1.0);
        assert_eq!(s.spin.speed, 0.02);
    }

    #[test]
    fn zero_speed_is_kept() {
        let mut d = BodyDescriptor::new("still");
        d.orbit.speed = 0.0;
        assert_eq!(d.sanitized().orbit.speed, 0.0);
    }
}
