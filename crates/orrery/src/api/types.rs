use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Identifier of a transform frame in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Identifier of a drawable part attached to a frame.
/// Doubles as the index into the scene's renderable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableId(pub u32);

impl RenderableId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Event produced by pointer interaction, forwarded to the host once per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InteractionEvent {
    /// Pointer started hovering a body surface.
    Enter { label: String },
    /// Pointer stopped hovering a body surface.
    Leave { label: String },
    /// A body was clicked.
    Select { label: String },
}

impl InteractionEvent {
    pub fn label(&self) -> &str {
        match self {
            InteractionEvent::Enter { label }
            | InteractionEvent::Leave { label }
            | InteractionEvent::Select { label } => label,
        }
    }
}

/// Texture loading progress reported to the host's loading screen.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LoadProgress {
    /// Textures that finished, successfully or not.
    pub settled: u32,
    /// Textures requested so far.
    pub total: u32,
}

impl LoadProgress {
    /// Fraction in [0, 1]. An empty request set counts as finished.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.settled as f32 / self.total as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.settled >= self.total
    }
}
