//! Renderer trait for GPU backends.
//!
//! In the browser all drawing happens in the host page (WebGPU), which reads
//! the same buffers through the web bridge. This trait is the contract for a
//! Rust-side renderer and for headless test sinks.

use super::camera::CameraUniform;
use super::instance::{RenderInstance, StarPoint};
use crate::systems::lighting::LightState;

/// Timing information from a draw call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawTiming {
    /// Time spent submitting draw calls (microseconds)
    pub draw_us: u32,
}

/// Renderer trait for GPU backends.
///
/// ```ignore
/// struct WgpuRenderer { /* device, queue, pipelines */ }
///
/// impl Renderer for WgpuRenderer {
///     fn backend(&self) -> &'static str { "wgpu" }
///     fn draw(&mut self, frame: &FrameData) -> DrawTiming { /* ... */ }
///     fn resize(&mut self, width: u32, height: u32) { /* ... */ }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "webgpu", "wgpu", "headless")
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData) -> DrawTiming;

    /// Handle canvas resize.
    fn resize(&mut self, width: u32, height: u32);
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Instances, normal-blended first.
    pub instances: &'a [RenderInstance],
    /// Index where additive blending starts.
    pub blend_split: u32,
    /// Backdrop stars.
    pub stars: &'a [StarPoint],
    pub camera: CameraUniform,
    pub lighting: &'a LightState,
}

impl FrameData<'_> {
    /// Instances drawn with normal alpha blending.
    pub fn normal(&self) -> &[RenderInstance] {
        let split = (self.blend_split as usize).min(self.instances.len());
        &self.instances[..split]
    }

    /// Instances drawn additively (glows, light overlays, clouds).
    pub fn additive(&self) -> &[RenderInstance] {
        let split = (self.blend_split as usize).min(self.instances.len());
        &self.instances[split..]
    }
}
