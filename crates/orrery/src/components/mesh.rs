use crate::api::types::{NodeId, RenderableId};
use crate::assets::textures::TextureId;
use crate::components::color::Rgb;
use crate::extensions::transform::LocalTransform;

/// Blend mode for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (src-alpha, one-minus-src-alpha).
    #[default]
    Normal,
    /// Additive blending for glows and light overlays (src-alpha, one).
    Additive,
}

/// Shape of a drawable part. The renderer tessellates; the core only needs
/// enough to ray-test surfaces and size instances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Subdivided icosahedron approximating a sphere.
    Icosphere { radius: f32, detail: u32 },
    /// Flat annulus in the local XY plane.
    Annulus { inner: f32, outer: f32, segments: u32 },
    /// Thin torus in the local XY plane (orbit paths).
    Torus { radius: f32, tube: f32, radial_segments: u32 },
}

impl Geometry {
    /// Numeric tag written into render instances.
    pub fn code(&self) -> f32 {
        match self {
            Geometry::Icosphere { .. } => 0.0,
            Geometry::Annulus { .. } => 1.0,
            Geometry::Torus { .. } => 2.0,
        }
    }

    /// The two size parameters written into render instances.
    pub fn params(&self) -> [f32; 2] {
        match *self {
            Geometry::Icosphere { radius, detail } => [radius, detail as f32],
            Geometry::Annulus { inner, outer, .. } => [inner, outer],
            Geometry::Torus { radius, tube, .. } => [radius, tube],
        }
    }
}

/// View-dependent edge glow coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FresnelParams {
    pub bias: f32,
    pub scale: f32,
    pub power: f32,
}

impl Default for FresnelParams {
    fn default() -> Self {
        Self { bias: 0.1, scale: 1.3, power: 3.0 }
    }
}

/// How a material is shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Unlit color/texture.
    Basic,
    /// Lit (diffuse + specular).
    Phong,
    /// Fresnel rim glow: `rim` at the silhouette, `facing` toward the camera.
    Fresnel { rim: Rgb, facing: Rgb, params: FresnelParams },
}

impl Shading {
    pub fn code(&self) -> f32 {
        match self {
            Shading::Basic => 0.0,
            Shading::Phong => 1.0,
            Shading::Fresnel { .. } => 2.0,
        }
    }
}

/// Emissive term applied while a surface is hovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    pub color: Rgb,
    pub intensity: f32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: Rgb::from_hex(0x3366ff),
            intensity: 0.45,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub shading: Shading,
    /// Base color; also the fallback when the texture is not ready.
    pub color: Rgb,
    pub texture: Option<TextureId>,
    /// Alpha-map texture (cloud layers).
    pub alpha_texture: Option<TextureId>,
    pub opacity: f32,
    pub transparent: bool,
    pub double_sided: bool,
    pub blend: BlendMode,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    /// Emissive values restored when a highlight is cleared.
    base_emissive: (Rgb, f32),
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shading: Shading::Phong,
            color: Rgb::WHITE,
            texture: None,
            alpha_texture: None,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
            blend: BlendMode::Normal,
            emissive: Rgb::BLACK,
            emissive_intensity: 0.0,
            base_emissive: (Rgb::BLACK, 0.0),
        }
    }
}

impl Material {
    pub fn new(shading: Shading) -> Self {
        Self {
            shading,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_alpha_texture(mut self, texture: Option<TextureId>) -> Self {
        self.alpha_texture = texture;
        self
    }

    /// Set opacity; anything below 1.0 also marks the material transparent.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = self.transparent || opacity < 1.0;
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Resting emissive term (also what highlights revert to).
    pub fn with_emissive(mut self, color: Rgb, intensity: f32) -> Self {
        self.emissive = color;
        self.emissive_intensity = intensity;
        self.base_emissive = (color, intensity);
        self
    }

    /// Apply hover emissive. Visual only.
    pub fn highlight(&mut self, style: &HighlightStyle) {
        self.emissive = style.color;
        self.emissive_intensity = style.intensity;
    }

    /// Restore the resting emissive term.
    pub fn unhighlight(&mut self) {
        let (color, intensity) = self.base_emissive;
        self.emissive = color;
        self.emissive_intensity = intensity;
    }

    pub fn is_highlighted(&self) -> bool {
        (self.emissive, self.emissive_intensity) != self.base_emissive
    }
}

/// What a renderable is for. Only `Surface` parts are pickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRole {
    Surface,
    Ring,
    Glow,
    Overlay,
    OrbitPath,
}

/// A drawable part attached to a transform frame.
#[derive(Debug, Clone)]
pub struct Renderable {
    pub id: RenderableId,
    /// Frame this part hangs from.
    pub frame: NodeId,
    /// Offset/rotation/scale within the frame.
    pub local: LocalTransform,
    /// Set on exactly one part per body: its surface, named after the label.
    pub name: Option<String>,
    pub role: RenderRole,
    pub geometry: Geometry,
    pub material: Material,
    pub visible: bool,
}

impl Renderable {
    pub fn new(id: RenderableId, frame: NodeId, role: RenderRole, geometry: Geometry, material: Material) -> Self {
        Self {
            id,
            frame,
            local: LocalTransform::default(),
            name: None,
            role,
            geometry,
            material,
            visible: true,
        }
    }

    /// Pickable parts: visible surfaces.
    pub fn is_pickable(&self) -> bool {
        self.visible && self.role == RenderRole::Surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_roundtrip_restores_base() {
        let mut m = Material::new(Shading::Phong).with_emissive(Rgb::new(0.1, 0.0, 0.0), 0.2);
        let before = m.clone();
        m.highlight(&HighlightStyle::default());
        assert!(m.is_highlighted());
        m.unhighlight();
        assert_eq!(m, before);
        assert!(!m.is_highlighted());
    }

    #[test]
    fn opacity_marks_transparent() {
        let m = Material::new(Shading::Basic).with_opacity(0.7);
        assert!(m.transparent);
        let m = Material::new(Shading::Basic).with_opacity(1.0);
        assert!(!m.transparent);
    }

    #[test]
    fn geometry_params() {
        let g = Geometry::Annulus { inner: 0.9, outer: 1.4, segments: 32 };
        assert_eq!(g.params(), [0.9, 1.4]);
        assert_eq!(g.code(), 1.0);
    }
}
