use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the host renderer.
/// Must match the host protocol: 36 floats = 144 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Base color (rgb) and opacity. For glows this is the facing color.
    pub color: [f32; 4],
    /// Emissive color (rgb) and intensity.
    pub emissive: [f32; 4],
    /// Rim color (rgb) and Fresnel power.
    pub rim: [f32; 4],
    /// Geometry code, shading code, then two geometry parameters.
    pub shape: [f32; 4],
    /// Texture slot, alpha texture slot (-1 = none), Fresnel bias, Fresnel scale.
    pub extra: [f32; 4],
}

impl RenderInstance {
    pub const FLOATS: usize = 36;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    /// Texture slot value meaning "no texture bound".
    pub const NO_TEXTURE: f32 = -1.0;
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0, 1.0, 1.0, 1.0],
            emissive: [0.0; 4],
            rim: [0.0; 4],
            shape: [0.0; 4],
            extra: [Self::NO_TEXTURE, Self::NO_TEXTURE, 0.0, 0.0],
        }
    }
}

/// A single backdrop star: position and brightness.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub brightness: f32,
}

impl StarPoint {
    pub const FLOATS: usize = 4;
}

/// Everything the host draws for one frame.
pub struct RenderBuffer {
    /// Instances ordered by blend mode: normal-blended first, then additive
    /// after `blend_split`.
    pub instances: Vec<RenderInstance>,
    /// Index where additive blending starts.
    pub blend_split: u32,
    /// Starfield points in world space.
    pub stars: Vec<StarPoint>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
            blend_split: 0,
            stars: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.blend_split = 0;
        self.stars.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_blend_split(&mut self, split: u32) {
        self.blend_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn star_count(&self) -> u32 {
        self.stars.len() as u32
    }

    /// Raw pointer to instance data for host-side reads from wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.stars.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
