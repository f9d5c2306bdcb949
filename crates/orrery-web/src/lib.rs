pub mod runner;

pub use runner::OrreryRunner;

use std::cell::RefCell;

use orrery::{InputEvent, OrreryConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls before `orrery_init` (or after a
/// failed init) are logged and yield `None`.
fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("orrery not initialized, call orrery_init() first");
                None
            }
        }
    })
}

/// Build the scene. `manifest_json` overrides the built-in solar system.
/// Returns false when the manifest is rejected.
#[wasm_bindgen]
pub fn orrery_init(manifest_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match OrreryRunner::new(manifest_json.as_deref(), OrreryConfig::default()) {
        Ok(runner) => {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("orrery: initialized");
            true
        }
        Err(err) => {
            log::error!("orrery: manifest rejected: {err}");
            false
        }
    }
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

/// Resolve a click immediately. Returns the selected label, or "" on a miss.
#[wasm_bindgen]
pub fn orrery_pointer_click(x: f32, y: f32) -> String {
    with_runner(|r| r.click(x, y)).unwrap_or_default()
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn orrery_close_panel() {
    with_runner(|r| r.push_input(InputEvent::ClosePanel));
}

#[wasm_bindgen]
pub fn orrery_texture_loaded(path: &str) {
    with_runner(|r| r.texture_loaded(path));
}

#[wasm_bindgen]
pub fn orrery_texture_failed(path: &str) {
    with_runner(|r| r.texture_failed(path));
}

#[wasm_bindgen]
pub fn orrery_stop() {
    with_runner(|r| r.stop());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_blend_split() -> u32 {
    with_runner(|r| r.blend_split()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_stars_ptr() -> *const f32 {
    with_runner(|r| r.stars_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_star_count() -> u32 {
    with_runner(|r| r.star_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_lights_ptr() -> *const f32 {
    with_runner(|r| r.lights_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_light_count() -> u32 {
    with_runner(|r| r.light_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_camera() -> Vec<f32> {
    with_runner(|r| r.camera_floats()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_ambient_r() -> f32 {
    with_runner(|r| r.ambient()[0]).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_ambient_g() -> f32 {
    with_runner(|r| r.ambient()[1]).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_ambient_b() -> f32 {
    with_runner(|r| r.ambient()[2]).unwrap_or(0.0)
}

/// Shader for the instances after `get_blend_split`. Needs no runner.
#[wasm_bindgen]
pub fn get_glow_shader() -> String {
    orrery::GLOW_WGSL.to_string()
}

// ---- Loading and panel state ----

#[wasm_bindgen]
pub fn get_pending_textures() -> String {
    with_runner(|r| r.pending_textures_json()).unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn get_load_progress() -> f32 {
    with_runner(|r| r.progress()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn is_interactive() -> bool {
    with_runner(|r| r.is_interactive()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_hovered_label() -> String {
    with_runner(|r| r.hovered_label()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_panel() -> String {
    with_runner(|r| r.panel_json()).unwrap_or_else(|| "{}".to_string())
}

/// Interaction events from the last tick, as a JSON array.
#[wasm_bindgen]
pub fn get_events() -> String {
    with_runner(|r| r.events_json().to_string()).unwrap_or_else(|| "[]".to_string())
}
