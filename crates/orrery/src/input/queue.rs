/// Input events the host forwards to the orrery.
/// Pointer coordinates are in viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A click landed at (x, y).
    PointerClick { x: f32, y: f32 },
    /// The cursor left the canvas.
    PointerLeave,
    /// The viewport changed size (pixels).
    Resize { width: f32, height: f32 },
    /// The info panel's close button was pressed.
    ClosePanel,
}

/// A queue of input events.
/// The host pushes events between frames; `Orrery::tick` drains them.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
