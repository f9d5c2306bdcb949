pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::app::{Orrery, OrreryConfig};
pub use api::types::{NodeId, RenderableId, InteractionEvent, LoadProgress};
pub use components::body::{BodyDescriptor, CentralBodyDescriptor, Direction, OrbitDesc, SpinDesc, RingDesc, OverlayFeatures};
pub use components::color::Rgb;
pub use components::mesh::{Geometry, Material, Shading, BlendMode, HighlightStyle, Renderable, RenderRole};
pub use core::error::ConfigError;
pub use core::scene::{SceneGraph, SceneNode};
pub use core::time::FrameClock;
pub use renderer::instance::{RenderInstance, RenderBuffer, StarPoint};
pub use renderer::camera::{PerspectiveCamera, CameraConfig, Viewport, Ray};
pub use renderer::{Renderer, FrameData, DrawTiming};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{SystemManifest, BodyContent};
pub use assets::registry::BodyRegistry;
pub use assets::textures::{TextureCache, TextureId, TextureStatus};
pub use systems::animation::{advance, advance_by};
pub use systems::builder::{build_system, spawn_body, spawn_central_body};
pub use systems::content::{ContentLookup, InfoPanel, PanelView};
pub use systems::interaction::{InteractionSystem, InteractionState};
pub use systems::lighting::{DirectionalLight, LightState};
pub use systems::raycast::Hit;
pub use systems::starfield::{Starfield, StarfieldConfig};
pub use systems::glow::{reflection_factor, glow_color, GLOW_WGSL};

// Extensions: scene transform hierarchy
pub use extensions::{TransformGraph, LocalTransform};
