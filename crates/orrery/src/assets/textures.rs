use std::collections::HashMap;

use crate::api::types::LoadProgress;

/// Handle to a texture slot. Doubles as the index the host binds it at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Load state of a requested texture, as reported by the host loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    Pending,
    Ready,
    /// Unreachable or undecodable. Parts using it keep the placeholder color.
    Failed,
}

/// Deduplicated texture requests and their load state.
///
/// The core never decodes images: it hands out ids for paths, the host
/// fetches them and reports back with `mark_loaded` / `mark_failed`.
pub struct TextureCache {
    paths: Vec<String>,
    status: Vec<TextureStatus>,
    index: HashMap<String, TextureId>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            status: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Id for `path`, registering it as pending on first request.
    pub fn request(&mut self, path: &str) -> TextureId {
        if let Some(&id) = self.index.get(path) {
            return id;
        }
        let id = TextureId(self.paths.len() as u32);
        self.paths.push(path.to_string());
        self.status.push(TextureStatus::Pending);
        self.index.insert(path.to_string(), id);
        id
    }

    /// Record a successful load. Returns false for paths never requested.
    pub fn mark_loaded(&mut self, path: &str) -> bool {
        self.settle(path, TextureStatus::Ready)
    }

    /// Record a failed load. The part falls back to its placeholder color.
    pub fn mark_failed(&mut self, path: &str) -> bool {
        let known = self.settle(path, TextureStatus::Failed);
        if known {
            log::warn!("texture failed to load: {path}");
        }
        known
    }

    fn settle(&mut self, path: &str, status: TextureStatus) -> bool {
        match self.index.get(path) {
            Some(id) => {
                self.status[id.0 as usize] = status;
                true
            }
            None => {
                log::debug!("ignoring load report for unrequested texture: {path}");
                false
            }
        }
    }

    pub fn id(&self, path: &str) -> Option<TextureId> {
        self.index.get(path).copied()
    }

    pub fn status(&self, id: TextureId) -> Option<TextureStatus> {
        self.status.get(id.0 as usize).copied()
    }

    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.paths.get(id.0 as usize).map(String::as_str)
    }

    pub fn is_ready(&self, id: TextureId) -> bool {
        self.status(id) == Some(TextureStatus::Ready)
    }

    /// Paths the host still has to fetch, in request order.
    pub fn pending_paths(&self) -> Vec<&str> {
        self.paths
            .iter()
            .zip(&self.status)
            .filter(|(_, s)| **s == TextureStatus::Pending)
            .map(|(p, _)| p.as_str())
            .collect()
    }

    pub fn progress(&self) -> LoadProgress {
        let settled = self.status.iter().filter(|s| **s != TextureStatus::Pending).count();
        LoadProgress {
            settled: settled as u32,
            total: self.paths.len() as u32,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress().is_complete()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.status.clear();
        self.index.clear();
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}
