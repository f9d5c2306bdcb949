use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::components::body::{BodyDescriptor, CentralBodyDescriptor};
use crate::core::error::ConfigError;

/// System manifest: the bodies to build and the info-panel content for them.
/// Loaded from a JSON document at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemManifest {
    /// The body everything orbits. Optional; a system may be orbits only.
    #[serde(default)]
    pub central: Option<CentralBodyDescriptor>,
    /// Orbiting bodies, in build (and pick-priority) order.
    #[serde(default)]
    pub bodies: Vec<BodyDescriptor>,
    /// Panel content keyed by body label. Entries may be missing.
    #[serde(default)]
    pub content: HashMap<String, BodyContent>,
}

/// Display content for one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyContent {
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    /// Image path or URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl BodyContent {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl SystemManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}
