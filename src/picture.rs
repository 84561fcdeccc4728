//! Transient profile picture handles
//!
//! A handle stands for a locally selected image for the lifetime of the
//! session. It is never uploaded or persisted. Every handle created by a
//! [`PictureStore`] stays live until it is passed back to
//! [`PictureStore::release`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::constants::PICTURE_URI_PREFIX;

/// Owned reference to a selected image. Not `Clone`: exactly one owner
/// is responsible for releasing it.
#[derive(Debug)]
pub struct PictureHandle {
    id: u64,
    uri: String,
    file_name: String,
}

impl PictureHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Cloneable copy of the display data
    pub fn summary(&self) -> PictureSummary {
        PictureSummary {
            uri: self.uri.clone(),
            file_name: self.file_name.clone(),
        }
    }
}

/// What the renderer needs to show a picture
#[derive(Clone, Debug, PartialEq)]
pub struct PictureSummary {
    pub uri: String,
    pub file_name: String,
}

/// Registry of live picture handles, shared by clones
#[derive(Clone, Debug, Default)]
pub struct PictureStore {
    live: Arc<Mutex<HashMap<u64, PathBuf>>>,
    next_id: Arc<AtomicU64>,
}

impl PictureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a handle for `path`. The file is not opened or checked.
    pub fn create(&self, path: impl Into<PathBuf>) -> PictureHandle {
        let source = path.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| source.to_string_lossy().to_string());

        tracing::debug!(id, path = %source.display(), "Picture handle created");
        self.with_live(|live| {
            live.insert(id, source);
        });

        PictureHandle {
            id,
            uri: format!("{}{}", PICTURE_URI_PREFIX, id),
            file_name,
        }
    }

    /// Release a handle; returns false if it was not live in this store
    pub fn release(&self, handle: PictureHandle) -> bool {
        let removed = self.with_live(|live| live.remove(&handle.id).is_some());
        tracing::debug!(id = handle.id, removed, "Picture handle released");
        removed
    }

    pub fn is_live(&self, id: u64) -> bool {
        self.with_live(|live| live.contains_key(&id))
    }

    pub fn live_count(&self) -> usize {
        self.with_live(|live| live.len())
    }

    fn with_live<T>(&self, f: impl FnOnce(&mut HashMap<u64, PathBuf>) -> T) -> T {
        // A poisoned map is still structurally valid
        let mut live = match self.live.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_unique_uris() {
        let store = PictureStore::new();
        let a = store.create("/tmp/a.png");
        let b = store.create("/tmp/b.jpg");
        assert_ne!(a.uri(), b.uri());
        assert!(a.uri().starts_with(PICTURE_URI_PREFIX));
        assert_eq!(a.file_name(), "a.png");
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_release_removes_handle() {
        let store = PictureStore::new();
        let handle = store.create("avatar.png");
        let id = handle.id();
        assert!(store.is_live(id));
        assert!(store.release(handle));
        assert!(!store.is_live(id));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_release_from_other_store_is_rejected() {
        let ours = PictureStore::new();
        let theirs = PictureStore::new();
        let handle = theirs.create("x.gif");
        assert!(!ours.release(handle));
        assert_eq!(theirs.live_count(), 1);
    }

    #[test]
    fn test_clones_share_registry() {
        let store = PictureStore::new();
        let clone = store.clone();
        let handle = clone.create("shared.webp");
        assert_eq!(store.live_count(), 1);
        store.release(handle);
        assert_eq!(clone.live_count(), 0);
    }
}
