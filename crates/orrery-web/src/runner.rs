use orrery::{ConfigError, InputEvent, Orrery, OrreryConfig, SystemManifest, GLOW_WGSL};
use orrery::assets::defaults;

/// Owns the orrery for the browser bridge.
///
/// The host page creates one through `orrery_init` and drives it from
/// `requestAnimationFrame`. Pointer events are queued and applied at the
/// start of the next tick; texture reports apply immediately so the loading
/// screen can follow progress.
pub struct OrreryRunner {
    orrery: Orrery,
    /// Last drained interaction events, serialized for the host.
    events_json: String,
}

impl OrreryRunner {
    /// Build from a JSON manifest, or the built-in solar system when `None`.
    pub fn new(manifest_json: Option<&str>, config: OrreryConfig) -> Result<Self, ConfigError> {
        let manifest = match manifest_json {
            Some(json) => SystemManifest::from_json(json)?,
            None => defaults::solar_system(),
        };
        Ok(Self {
            orrery: Orrery::new(&manifest, config)?,
            events_json: "[]".to_string(),
        })
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    /// Advance one display frame and collect its interaction events.
    pub fn tick(&mut self, dt: f32) {
        self.orrery.tick(dt);
        let events = self.orrery.drain_events();
        self.events_json = serde_json::to_string(&events).unwrap_or_else(|err| {
            log::warn!("failed to serialize interaction events: {err}");
            "[]".to_string()
        });
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.orrery.push_input(event);
    }

    /// Resolve a click now. Returns the selected label or an empty string.
    pub fn click(&mut self, x: f32, y: f32) -> String {
        self.orrery.pointer_click(x, y).unwrap_or_default()
    }

    pub fn texture_loaded(&mut self, path: &str) {
        self.orrery.texture_loaded(path);
    }

    pub fn texture_failed(&mut self, path: &str) {
        self.orrery.texture_failed(path);
    }

    pub fn stop(&mut self) {
        self.orrery.stop();
    }

    // ---- Data accessors for wasm memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.orrery.render_buffer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.orrery.render_buffer().instance_count()
    }

    pub fn blend_split(&self) -> u32 {
        self.orrery.render_buffer().blend_split
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.orrery.render_buffer().stars_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.orrery.render_buffer().star_count()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.orrery.lights().buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.orrery.lights().count() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.orrery.lights().ambient()
    }

    /// WGSL source for the additive glow pipeline.
    pub fn glow_shader(&self) -> &'static str {
        GLOW_WGSL
    }

    /// Column-major view-projection matrix followed by the camera position.
    pub fn camera_floats(&self) -> Vec<f32> {
        let uniform = self.orrery.camera().uniform();
        uniform_floats(&uniform)
    }

    // ---- JSON accessors ----

    pub fn pending_textures_json(&self) -> String {
        serde_json::to_string(&self.orrery.pending_textures()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn progress(&self) -> f32 {
        self.orrery.progress().fraction()
    }

    pub fn is_interactive(&self) -> bool {
        self.orrery.is_interactive()
    }

    pub fn hovered_label(&self) -> String {
        self.orrery.hovered_label().unwrap_or_default().to_string()
    }

    pub fn panel_json(&self) -> String {
        self.orrery.panel().to_json()
    }

    pub fn events_json(&self) -> &str {
        &self.events_json
    }
}

fn uniform_floats(uniform: &orrery::renderer::camera::CameraUniform) -> Vec<f32> {
    let mut out = Vec::with_capacity(20);
    for col in &uniform.view_proj {
        out.extend_from_slice(col);
    }
    out.extend_from_slice(&uniform.camera_pos);
    out
}
