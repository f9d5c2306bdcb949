use glam::Vec3;

use crate::api::types::{InteractionEvent, LoadProgress};
use crate::assets::defaults;
use crate::assets::manifest::{BodyContent, SystemManifest};
use crate::assets::registry::BodyRegistry;
use crate::assets::textures::TextureCache;
use crate::components::color::Rgb;
use crate::components::mesh::HighlightStyle;
use crate::core::error::ConfigError;
use crate::core::scene::SceneGraph;
use crate::core::time::FrameClock;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::{CameraConfig, PerspectiveCamera, Viewport};
use crate::renderer::instance::RenderBuffer;
use crate::renderer::traits::{DrawTiming, FrameData, Renderer};
use crate::systems::animation;
use crate::systems::builder;
use crate::systems::content::{ContentLookup, InfoPanel};
use crate::systems::interaction::InteractionSystem;
use crate::systems::lighting::{DirectionalLight, LightState};
use crate::systems::render::build_render_buffer;
use crate::systems::starfield::StarfieldConfig;

/// Configuration for the orrery.
#[derive(Debug, Clone)]
pub struct OrreryConfig {
    /// Duration of one reference frame in seconds (default: 1/60).
    /// Body speeds are radians per reference frame.
    pub reference_dt: f32,
    /// Upper bound on reference frames consumed by one tick (default: 10).
    pub max_frames_per_tick: f32,
    pub camera: CameraConfig,
    /// Initial canvas size in pixels.
    pub viewport: Viewport,
    /// Euler XYZ rotation of the whole system (default: 0.3, -1.1, 0.3).
    pub root_rotation: Vec3,
    /// Backdrop stars. `None` disables the starfield.
    pub starfield: Option<StarfieldConfig>,
    pub highlight: HighlightStyle,
    /// Keep bodies unpickable until every requested texture has settled.
    pub wait_for_textures: bool,
    pub light: DirectionalLight,
    /// Ambient term added to every lit surface (default: black).
    pub ambient: Rgb,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            reference_dt: 1.0 / 60.0,
            max_frames_per_tick: 10.0,
            camera: CameraConfig::default(),
            viewport: Viewport::default(),
            root_rotation: Vec3::new(0.3, -1.1, 0.3),
            starfield: Some(StarfieldConfig::default()),
            highlight: HighlightStyle::default(),
            wait_for_textures: true,
            light: DirectionalLight::default(),
            ambient: Rgb::BLACK,
        }
    }
}

/// The running system: scene, animation, interaction and presentation state
/// behind one owner. Single-threaded; the host drives it once per display
/// frame and between frames with input.
pub struct Orrery {
    config: OrreryConfig,
    scene: SceneGraph,
    textures: TextureCache,
    content: ContentLookup,
    interaction: InteractionSystem,
    panel: InfoPanel,
    camera: PerspectiveCamera,
    viewport: Viewport,
    clock: FrameClock,
    input: InputQueue,
    lights: LightState,
    render_buffer: RenderBuffer,
    events: Vec<InteractionEvent>,
    running: bool,
}

impl Orrery {
    /// Build the scene described by `manifest`.
    pub fn new(manifest: &SystemManifest, config: OrreryConfig) -> Result<Self, ConfigError> {
        let registry = BodyRegistry::from_manifest(manifest)?;

        let starfield = config.starfield.map(|s| s.fitted_to(&config.camera));
        let mut scene = SceneGraph::new();
        let mut textures = TextureCache::new();
        builder::build_system(
            &mut scene,
            &mut textures,
            &registry,
            config.root_rotation,
            starfield.as_ref(),
        )?;

        let mut lights = LightState::new();
        lights.add(config.light);
        lights.set_ambient(config.ambient.r, config.ambient.g, config.ambient.b);

        let mut orrery = Self {
            content: ContentLookup::from_registry(&registry),
            interaction: InteractionSystem::new(config.highlight),
            panel: InfoPanel::new(),
            camera: PerspectiveCamera::new(&config.camera, config.viewport),
            viewport: config.viewport,
            clock: FrameClock::new(config.reference_dt, config.max_frames_per_tick),
            input: InputQueue::new(),
            lights,
            render_buffer: RenderBuffer::new(),
            events: Vec::new(),
            running: true,
            scene,
            textures,
            config,
        };
        orrery.refresh_interaction();
        orrery.rebuild_render_buffer();
        Ok(orrery)
    }

    /// Parse a JSON manifest and build it.
    pub fn from_json(json: &str, config: OrreryConfig) -> Result<Self, ConfigError> {
        let manifest = SystemManifest::from_json(json)?;
        Self::new(&manifest, config)
    }

    /// The built-in solar system with default configuration.
    pub fn solar_system() -> Result<Self, ConfigError> {
        Self::new(&defaults::solar_system(), OrreryConfig::default())
    }

    // ── Frame loop ──────────────────────────────────────────────────

    /// Drain queued input, advance by the elapsed time `dt` (seconds) and
    /// rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        self.process_input();
        let frames = self.clock.frames_for(dt);
        self.advance(frames);
    }

    /// Drain queued input and advance exactly one reference frame.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        self.process_input();
        let frames = self.clock.single_frame();
        self.advance(frames);
    }

    fn advance(&mut self, frames: f32) {
        animation::advance_by(&mut self.scene, frames);
        self.scene.propagate();
        self.rebuild_render_buffer();
    }

    fn rebuild_render_buffer(&mut self) {
        build_render_buffer(&self.scene, &self.textures, &mut self.render_buffer);
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Queue an event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    fn process_input(&mut self) {
        for event in self.input.drain() {
            match event {
                InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
                InputEvent::PointerClick { x, y } => {
                    self.pointer_click(x, y);
                }
                InputEvent::PointerLeave => self.pointer_leave(),
                InputEvent::Resize { width, height } => self.resize(width, height),
                InputEvent::ClosePanel => self.close_panel(),
            }
        }
    }

    /// Update hover for a cursor position (pixels, origin top-left).
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.running {
            return;
        }
        let events = self
            .interaction
            .on_pointer_move(&mut self.scene, &self.camera, self.viewport, x, y);
        self.record(events);
    }

    /// Clear hover when the cursor leaves the canvas.
    pub fn pointer_leave(&mut self) {
        if !self.running {
            return;
        }
        let events = self.interaction.set_hover(&mut self.scene, None);
        self.record(events);
    }

    /// Resolve a click. A hit opens the info panel for that body and is
    /// returned; a miss changes nothing.
    pub fn pointer_click(&mut self, x: f32, y: f32) -> Option<String> {
        if !self.running {
            return None;
        }
        let label = self
            .interaction
            .on_pointer_click(&self.scene, &self.camera, self.viewport, x, y)?;
        self.panel.show(&label, &self.content);
        self.events.push(InteractionEvent::Select { label: label.clone() });
        Some(label)
    }

    fn record(&mut self, events: Vec<InteractionEvent>) {
        if !events.is_empty() {
            // Highlight changed a material
            self.rebuild_render_buffer();
        }
        self.events.extend(events);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.resize(self.viewport);
    }

    pub fn close_panel(&mut self) {
        self.panel.close();
    }

    pub fn toggle_panel(&mut self) {
        self.panel.toggle();
    }

    /// Interaction events since the last call.
    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Textures ────────────────────────────────────────────────────

    pub fn texture_loaded(&mut self, path: &str) {
        if self.textures.mark_loaded(path) {
            self.on_texture_settled();
        }
    }

    pub fn texture_failed(&mut self, path: &str) {
        if self.textures.mark_failed(path) {
            self.on_texture_settled();
        }
    }

    fn on_texture_settled(&mut self) {
        self.refresh_interaction();
        self.rebuild_render_buffer();
    }

    /// Collect pick candidates once loading allows it.
    fn refresh_interaction(&mut self) {
        if self.interaction.is_ready() || self.scene.is_empty() {
            return;
        }
        if !self.config.wait_for_textures || self.textures.is_complete() {
            let events = self.interaction.collect(&mut self.scene);
            self.events.extend(events);
        }
    }

    pub fn pending_textures(&self) -> Vec<&str> {
        self.textures.pending_paths()
    }

    pub fn progress(&self) -> LoadProgress {
        self.textures.progress()
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Halt animation and interaction. Hover is cleared; the scene stays.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.interaction.reset(&mut self.scene);
        self.input.clear();
        self.rebuild_render_buffer();
        log::info!("orrery stopped after {:.0} frames", self.clock.elapsed_frames());
    }

    /// Stop, then drop the whole scene.
    pub fn teardown(&mut self) {
        self.stop();
        self.scene.clear();
        self.textures.clear();
        self.render_buffer.clear();
        self.events.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether bodies can be hovered and clicked.
    pub fn is_interactive(&self) -> bool {
        self.running && self.interaction.is_ready()
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn lookup(&self, label: &str) -> Option<&BodyContent> {
        self.content.lookup(label)
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn hovered_label(&self) -> Option<&str> {
        self.interaction.state().hovered_label()
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn lights(&self) -> &LightState {
        &self.lights
    }

    pub fn frame_data(&self) -> FrameData<'_> {
        FrameData {
            instances: &self.render_buffer.instances,
            blend_split: self.render_buffer.blend_split,
            stars: &self.render_buffer.stars,
            camera: self.camera.uniform(),
            lighting: &self.lights,
        }
    }

    /// Hand the current frame to a renderer.
    pub fn render(&self, renderer: &mut impl Renderer) -> DrawTiming {
        renderer.draw(&self.frame_data())
    }
}
