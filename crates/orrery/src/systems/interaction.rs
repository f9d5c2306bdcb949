//! Pointer interaction: maps cursor positions to body surfaces.
//!
//! Hover is a two-state machine over `current_hover` (none, or one surface).
//! Moving onto a new surface unhighlights the old one and highlights the new
//! one; moving onto empty space unhighlights; staying on the same surface
//! does nothing. Clicks resolve independently of hover state.

use std::collections::HashMap;

use crate::api::types::{InteractionEvent, RenderableId};
use crate::components::mesh::HighlightStyle;
use crate::core::scene::SceneGraph;
use crate::renderer::camera::{PerspectiveCamera, Ray, Viewport};
use crate::systems::raycast::{self, Hit};

/// Ray from the camera through a pixel position, or `None` when the
/// viewport is degenerate.
pub fn pointer_ray(camera: &PerspectiveCamera, viewport: Viewport, x: f32, y: f32) -> Option<Ray> {
    viewport.to_ndc(x, y).map(|ndc| camera.ray_from_ndc(ndc))
}

/// Pickable surfaces and the current hover.
#[derive(Debug, Default)]
pub struct InteractionState {
    /// (label, surface) in pick order: central body first, then orbiting
    /// bodies in registry order.
    candidates: Vec<(String, RenderableId)>,
    /// Surface to label. The only way a hit is turned back into a body.
    identity: HashMap<RenderableId, String>,
    /// Always one of `candidates` when set.
    current_hover: Option<RenderableId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every body's surface from the scene, replacing any previous
    /// candidates. Callers unhighlight the current hover first.
    fn collect(&mut self, scene: &SceneGraph) {
        self.candidates.clear();
        self.identity.clear();
        self.current_hover = None;
        for node in scene.nodes() {
            self.candidates.push((node.label.clone(), node.surface));
            self.identity.insert(node.surface, node.label.clone());
        }
    }

    pub fn candidates(&self) -> &[(String, RenderableId)] {
        &self.candidates
    }

    pub fn current_hover(&self) -> Option<RenderableId> {
        self.current_hover
    }

    pub fn label_of(&self, id: RenderableId) -> Option<&str> {
        self.identity.get(&id).map(String::as_str)
    }

    pub fn hovered_label(&self) -> Option<&str> {
        self.current_hover.and_then(|id| self.label_of(id))
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.identity.clear();
        self.current_hover = None;
    }
}

/// Resolves pointer positions against the candidate surfaces.
pub struct InteractionSystem {
    state: InteractionState,
    style: HighlightStyle,
}

impl InteractionSystem {
    pub fn new(style: HighlightStyle) -> Self {
        Self {
            state: InteractionState::new(),
            style,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Make the scene's bodies pickable. A surface hovered under the old
    /// candidates is unhighlighted first; its Leave event is returned.
    pub fn collect(&mut self, scene: &mut SceneGraph) -> Vec<InteractionEvent> {
        let events = self.set_hover(scene, None);
        self.state.collect(scene);
        log::info!("interaction ready: {} pickable bodies", self.state.candidates.len());
        events
    }

    pub fn is_ready(&self) -> bool {
        !self.state.candidates.is_empty()
    }

    /// Nearest candidate surface along `ray`.
    pub fn pick(&self, scene: &SceneGraph, ray: &Ray) -> Option<Hit> {
        raycast::cast(scene, self.state.candidates.iter().map(|(_, id)| *id), ray)
    }

    /// Update hover for a pointer move. Returns the transitions that happened
    /// (empty when the hovered surface did not change).
    pub fn on_pointer_move(
        &mut self,
        scene: &mut SceneGraph,
        camera: &PerspectiveCamera,
        viewport: Viewport,
        x: f32,
        y: f32,
    ) -> Vec<InteractionEvent> {
        let hit = pointer_ray(camera, viewport, x, y).and_then(|ray| self.pick(scene, &ray));
        self.set_hover(scene, hit.map(|h| h.renderable))
    }

    /// Move hover to `target`, applying highlight side effects.
    pub fn set_hover(&mut self, scene: &mut SceneGraph, target: Option<RenderableId>) -> Vec<InteractionEvent> {
        if target == self.state.current_hover {
            return Vec::new();
        }
        let mut events = Vec::with_capacity(2);

        if let Some(prev) = self.state.current_hover.take() {
            if let Some(part) = scene.renderable_mut(prev) {
                part.material.unhighlight();
            }
            if let Some(label) = self.state.label_of(prev) {
                events.push(InteractionEvent::Leave { label: label.to_string() });
            }
        }

        if let Some(next) = target {
            let Some(label) = self.state.label_of(next).map(str::to_string) else {
                return events;
            };
            if let Some(part) = scene.renderable_mut(next) {
                part.material.highlight(&self.style);
            }
            self.state.current_hover = Some(next);
            events.push(InteractionEvent::Enter { label });
        }

        events
    }

    /// Label of the body under the pointer, if any. Hover state is neither
    /// read nor changed.
    pub fn on_pointer_click(
        &self,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
        viewport: Viewport,
        x: f32,
        y: f32,
    ) -> Option<String> {
        let ray = pointer_ray(camera, viewport, x, y)?;
        let hit = self.pick(scene, &ray)?;
        self.state.label_of(hit.renderable).map(str::to_string)
    }

    /// Drop hover (restoring its surface) and all candidates.
    pub fn reset(&mut self, scene: &mut SceneGraph) {
        self.set_hover(scene, None);
        self.state.clear();
    }
}

impl Default for InteractionSystem {
    fn default() -> Self {
        Self::new(HighlightStyle::default())
    }
}
