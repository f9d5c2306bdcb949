use std::collections::HashSet;

use thiserror::Error;

/// Errors raised while turning configuration into a scene.
///
/// Malformed numbers are not errors (they fall back to descriptor defaults);
/// only identity problems are, because picking resolves bodies by label.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A descriptor was given an empty (or whitespace-only) label.
    #[error("body descriptor has an empty label")]
    EmptyLabel,

    /// Two descriptors share a label.
    #[error("duplicate body label: {0}")]
    DuplicateLabel(String),

    /// The manifest JSON could not be parsed.
    #[error("manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Add `label` to `labels`. Empty (or whitespace-only) and already-present
/// labels are rejected and leave the set unchanged.
pub fn claim_label(labels: &mut HashSet<String>, label: &str) -> Result<(), ConfigError> {
    if label.trim().is_empty() {
        return Err(ConfigError::EmptyLabel);
    }
    if labels.contains(label) {
        return Err(ConfigError::DuplicateLabel(label.to_string()));
    }
    labels.insert(label.to_string());
    Ok(())
}
