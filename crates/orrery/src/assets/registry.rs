use std::collections::{HashMap, HashSet};

use crate::assets::manifest::{BodyContent, SystemManifest};
use crate::components::body::{BodyDescriptor, CentralBodyDescriptor};
use crate::core::error::{claim_label, ConfigError};

/// Validated table of body descriptors, keyed by unique label.
/// Built from a `SystemManifest`; the builder walks it in order.
pub struct BodyRegistry {
    central: Option<CentralBodyDescriptor>,
    bodies: Vec<BodyDescriptor>,
    content: HashMap<String, BodyContent>,
    labels: HashSet<String>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            central: None,
            bodies: Vec::new(),
            content: HashMap::new(),
            labels: HashSet::new(),
        }
    }

    /// Build a registry from a parsed manifest, rejecting empty and
    /// duplicate labels.
    pub fn from_manifest(manifest: &SystemManifest) -> Result<Self, ConfigError> {
        let mut reg = Self::new();
        if let Some(central) = &manifest.central {
            reg.set_central(central.clone())?;
        }
        for body in &manifest.bodies {
            reg.push(body.clone())?;
        }
        reg.content = manifest.content.clone();
        Ok(reg)
    }

    /// Set or replace the central body. On error the previous central body
    /// and its label stay in place.
    pub fn set_central(&mut self, central: CentralBodyDescriptor) -> Result<(), ConfigError> {
        let old_label = self.central.as_ref().map(|c| c.label.clone());
        if old_label.as_deref() != Some(central.label.as_str()) {
            claim_label(&mut self.labels, &central.label)?;
            if let Some(old) = old_label {
                self.labels.remove(&old);
            }
        }
        self.central = Some(central);
        Ok(())
    }

    /// Append an orbiting body.
    pub fn push(&mut self, body: BodyDescriptor) -> Result<(), ConfigError> {
        claim_label(&mut self.labels, &body.label)?;
        self.bodies.push(body);
        Ok(())
    }

    pub fn set_content(&mut self, label: impl Into<String>, content: BodyContent) {
        self.content.insert(label.into(), content);
    }

    pub fn central(&self) -> Option<&CentralBodyDescriptor> {
        self.central.as_ref()
    }

    pub fn bodies(&self) -> &[BodyDescriptor] {
        &self.bodies
    }

    /// Look up an orbiting body by label. Returns None if not found.
    pub fn get(&self, label: &str) -> Option<&BodyDescriptor> {
        self.bodies.iter().find(|b| b.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// All labels, central body first, then orbiting bodies in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.central
            .iter()
            .map(|c| c.label.as_str())
            .chain(self.bodies.iter().map(|b| b.label.as_str()))
    }

    pub fn content(&self) -> &HashMap<String, BodyContent> {
        &self.content
    }

    /// Number of bodies, central included.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest_in_order() {
        let json = r#"{
            "central": { "label": "sun", "surface_texture": "/assets/map/sunmap.jpg" },
            "bodies": [ { "label": "mercury" }, { "label": "venus" } ]
        }"#;
        let manifest = SystemManifest::from_json(json).unwrap();
        let reg = BodyRegistry::from_manifest(&manifest).unwrap();
        let labels: Vec<&str> = reg.labels().collect();
        assert_eq!(labels, ["sun", "mercury", "venus"]);
        assert_eq!(reg.len(), 3);
        assert!(reg.get("venus").is_some());
        assert!(reg.get("sun").is_none());
    }

    #[test]
    fn duplicate_label_rejected() {
        let mut reg = BodyRegistry::new();
        reg.push(BodyDescriptor::new("earth")).unwrap();
        let err = reg.push(BodyDescriptor::new("earth")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel(l) if l == "earth"));
        assert_eq!(reg.bodies().len(), 1);
    }

    #[test]
    fn duplicate_across_central_and_bodies_rejected() {
        let json = r#"{
            "central": { "label": "sun", "surface_texture": "s.jpg" },
            "bodies": [ { "label": "sun" } ]
        }"#;
        let manifest = SystemManifest::from_json(json).unwrap();
        assert!(matches!(
            BodyRegistry::from_manifest(&manifest),
            Err(ConfigError::DuplicateLabel(_))
        ));
    }

    #[test]
    fn empty_label_rejected() {
        let mut reg = BodyRegistry::new();
        assert!(matches!(reg.push(BodyDescriptor::new("")), Err(ConfigError::EmptyLabel)));
        assert!(reg.is_empty());
    }

    fn central(label: &str) -> CentralBodyDescriptor {
        serde_json::from_value(serde_json::json!({ "label": label, "surface_texture": "s.jpg" })).unwrap()
    }

    #[test]
    fn central_clashing_with_body_keeps_previous_central() {
        let mut reg = BodyRegistry::new();
        reg.set_central(central("sun")).unwrap();
        reg.push(BodyDescriptor::new("earth")).unwrap();

        let err = reg.set_central(central("earth")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel(l) if l == "earth"));
        assert_eq!(reg.central().map(|c| c.label.as_str()), Some("sun"));
        // "sun" is still reserved
        assert!(matches!(reg.push(BodyDescriptor::new("sun")), Err(ConfigError::DuplicateLabel(_))));
    }

    #[test]
    fn replacing_central_frees_old_label() {
        let mut reg = BodyRegistry::new();
        reg.set_central(central("sun")).unwrap();
        reg.set_central(central("sun")).unwrap();
        reg.set_central(central("sol")).unwrap();
        assert_eq!(reg.central().map(|c| c.label.as_str()), Some("sol"));
        assert!(reg.push(BodyDescriptor::new("sun")).is_ok());
    }

    #[test]
    fn unknown_returns_none() {
        let reg = BodyRegistry::new();
        assert!(reg.get("nonexistent").is_none());
    }
}
