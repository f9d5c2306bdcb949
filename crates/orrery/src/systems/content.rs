//! Content lookup and the info panel it feeds.

use std::collections::HashMap;

use serde::Serialize;

use crate::assets::manifest::BodyContent;
use crate::assets::registry::BodyRegistry;

/// Maps a body label to its panel content. A miss is a normal outcome.
#[derive(Debug, Clone, Default)]
pub struct ContentLookup {
    entries: HashMap<String, BodyContent>,
}

impl ContentLookup {
    pub fn new(entries: HashMap<String, BodyContent>) -> Self {
        Self { entries }
    }

    pub fn from_registry(registry: &BodyRegistry) -> Self {
        Self::new(registry.content().clone())
    }

    pub fn lookup(&self, label: &str) -> Option<&BodyContent> {
        self.entries.get(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the host shows in the panel. Serialized to JSON for the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelView {
    pub open: bool,
    /// Label of the selected body, if any.
    pub label: Option<String>,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl PanelView {
    /// The default view for a missing selection or missing content.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_content(label: &str, content: &BodyContent) -> Self {
        Self {
            open: true,
            label: Some(label.to_string()),
            title: content.title.clone(),
            description: content.description.clone(),
            image: content.image.clone(),
        }
    }
}

/// Open/closed info panel showing the last selected body.
#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
    view: PanelView,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the content for a clicked body. A content miss shows the empty
    /// view (still opened, still labelled) instead of failing.
    pub fn show(&mut self, label: &str, lookup: &ContentLookup) {
        self.view = match lookup.lookup(label) {
            Some(content) => PanelView::from_content(label, content),
            None => {
                log::debug!("no panel content for {label:?}");
                PanelView {
                    open: true,
                    label: Some(label.to_string()),
                    ..PanelView::empty()
                }
            }
        };
    }

    pub fn close(&mut self) {
        self.view.open = false;
    }

    /// Flip between open and closed, keeping the content.
    pub fn toggle(&mut self) {
        self.view.open = !self.view.open;
    }

    pub fn is_open(&self) -> bool {
        self.view.open
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn to_json(&self) -> String {
        // PanelView holds only strings and bools, serialization cannot fail
        serde_json::to_string(&self.view).unwrap_or_else(|_| "{}".to_string())
    }
}
