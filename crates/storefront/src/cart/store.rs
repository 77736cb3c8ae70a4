//! Durable persistence for the cart identifier.
//!
//! Exactly one cart id is persisted at a time; saving overwrites any
//! previous value. The store holds nothing else - cart contents always come
//! from the platform.

use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use driftwood_core::CartId;

/// Errors from the identifier store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value persistence for the active cart identifier.
pub trait CartIdStore {
    /// The persisted id, if any.
    fn load(&self) -> Option<CartId>;

    /// Persist `id`, replacing any previous value.
    fn save(&self, id: &CartId) -> Result<(), StoreError>;

    /// Remove the persisted id. Removing an absent id is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed store: the id is the entire content of one small file.
///
/// This is the durable local store of a native client (the CLI); it survives
/// process restarts the way browser local storage survives page loads.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file (and its parent
    /// directory) is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartIdStore for FileStore {
    fn load(&self) -> Option<CartId> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(CartId::new(token))
        }
    }

    fn save(&self, id: &CartId) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, id.as_str())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and single-process sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    id: Mutex<Option<CartId>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with a persisted id.
    #[must_use]
    pub fn with_id(id: CartId) -> Self {
        Self {
            id: Mutex::new(Some(id)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CartId>> {
        self.id.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CartIdStore for MemoryStore {
    fn load(&self) -> Option<CartId> {
        self.lock().clone()
    }

    fn save(&self, id: &CartId) -> Result<(), StoreError> {
        *self.lock() = Some(id.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("driftwood-store-tests")
            .join(format!("{name}-{}", uuid::Uuid::new_v4()))
            .join("cart-id")
    }

    fn temp_store(name: &str) -> FileStore {
        FileStore::new(temp_path(name))
    }

    #[test]
    fn test_file_store_round_trip() {
        let store = temp_store("round-trip");
        assert!(store.load().is_none());

        store.save(&CartId::new("gid://shop/Cart/c1")).unwrap();
        assert_eq!(store.load(), Some(CartId::new("gid://shop/Cart/c1")));

        // Saving again overwrites the previous id
        store.save(&CartId::new("gid://shop/Cart/c2")).unwrap();
        assert_eq!(store.load(), Some(CartId::new("gid://shop/Cart/c2")));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let store = temp_store("clear");
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_surrounding_whitespace() {
        let path = temp_path("whitespace");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "  gid://shop/Cart/c1\n").unwrap();

        let store = FileStore::new(path);
        assert_eq!(store.load(), Some(CartId::new("gid://shop/Cart/c1")));
    }

    #[test]
    fn test_file_store_empty_file_is_no_id() {
        let path = temp_path("empty");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "\n").unwrap();

        let store = FileStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save(&CartId::new("c1")).unwrap();
        assert_eq!(store.load(), Some(CartId::new("c1")));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
