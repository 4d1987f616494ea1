//! Durable token sidecar: a session cookie plus a key/value slot, mirroring
//! the raw token only (session id and user claims are derived from it, not
//! persisted). Injected as a capability so the controller can be exercised
//! without a real user agent.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const COOKIE_NAME: &str = "auth";
pub const STORAGE_KEY: &str = "jwt";
/// Value left in the slot by `clear`: a reader observes "empty", not
/// "missing".
pub const CLEARED_SENTINEL: &str = "null";

/// Past-dated directive forcing the user agent to drop the cookie.
const EXPIRED_COOKIE: &str = "auth=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid storage contents: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable token storage. The cookie and the key/value slot are two
/// independent sinks; `save` updates both best effort, with no atomicity
/// across them.
pub trait PersistentStore: Send + Sync {
    /// Persist the raw token in both sinks.
    fn save(&self, token: &str) -> Result<(), StoreError>;

    /// Expire the cookie and overwrite the slot with [`CLEARED_SENTINEL`].
    fn clear(&self) -> Result<(), StoreError>;

    /// Token left behind by a previous run, if any. The sentinel reads back
    /// as `None`.
    fn load(&self) -> Result<Option<String>, StoreError>;
}

impl<T: PersistentStore + ?Sized> PersistentStore for std::sync::Arc<T> {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }
}

fn session_cookie(token: &str) -> String {
    format!("{COOKIE_NAME}={token}; path=/")
}

/// File-backed store: one cookie file and one JSON key/value file under a
/// state directory, the native stand-in for `document.cookie` and local
/// storage.
#[derive(Debug, Clone)]
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn cookie_path(&self) -> PathBuf {
        self.dir.join("cookie")
    }

    fn slot_path(&self) -> PathBuf {
        self.dir.join("storage.json")
    }

    fn read_slots(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read(self.slot_path()) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_slot(&self, value: &str) -> Result<(), StoreError> {
        let mut slots = self.read_slots()?;
        slots.insert(STORAGE_KEY.to_string(), value.to_string());
        fs::write(self.slot_path(), serde_json::to_vec_pretty(&slots)?)?;
        Ok(())
    }
}

impl PersistentStore for DiskStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.cookie_path(), session_cookie(token))?;
        self.write_slot(token)
    }

    fn clear(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.cookie_path(), EXPIRED_COOKIE)?;
        self.write_slot(CLEARED_SENTINEL)
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        let slots = self.read_slots()?;
        Ok(slots
            .get(STORAGE_KEY)
            .filter(|token| !token.is_empty() && *token != CLEARED_SENTINEL)
            .cloned())
    }
}

/// In-memory store for tests and embedders without a durable surface.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: parking_lot::Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    cookie: Option<String>,
    slots: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cookie directive written, if any.
    #[must_use]
    pub fn cookie(&self) -> Option<String> {
        self.inner.lock().cookie.clone()
    }

    /// Raw slot value, including the sentinel.
    #[must_use]
    pub fn slot(&self, key: &str) -> Option<String> {
        self.inner.lock().slots.get(key).cloned()
    }
}

impl PersistentStore for MemoryStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.cookie = Some(session_cookie(token));
        inner.slots.insert(STORAGE_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.cookie = Some(EXPIRED_COOKIE.to_string());
        inner
            .slots
            .insert(STORAGE_KEY.to_string(), CLEARED_SENTINEL.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .inner
            .lock()
            .slots
            .get(STORAGE_KEY)
            .filter(|token| !token.is_empty() && *token != CLEARED_SENTINEL)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    fn scratch_dir() -> PathBuf {
        let seq = DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("pordisto-store-{}-{seq}", std::process::id()))
    }

    struct DirGuard(PathBuf);

    impl Drop for DirGuard {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_disk_store_round_trip() {
        let dir = scratch_dir();
        let _guard = DirGuard(dir.clone());
        let store = DiskStore::new(&dir);

        store.save("h.c.s").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("h.c.s"));

        let cookie = fs::read_to_string(dir.join("cookie")).unwrap();
        assert_eq!(cookie, "auth=h.c.s; path=/");
    }

    #[test]
    fn test_disk_store_clear_leaves_sentinel() {
        let dir = scratch_dir();
        let _guard = DirGuard(dir.clone());
        let store = DiskStore::new(&dir);

        store.save("h.c.s").unwrap();
        store.clear().unwrap();

        // Cleared, not missing: the slot still holds the sentinel.
        let slots: BTreeMap<String, String> =
            serde_json::from_slice(&fs::read(dir.join("storage.json")).unwrap()).unwrap();
        assert_eq!(slots.get(STORAGE_KEY).map(String::as_str), Some("null"));
        assert_eq!(store.load().unwrap(), None);

        let cookie = fs::read_to_string(dir.join("cookie")).unwrap();
        assert!(cookie.contains("expires=Thu, 01 Jan 1970 00:00:01 GMT"));
    }

    #[test]
    fn test_disk_store_load_on_fresh_dir() {
        let dir = scratch_dir();
        let _guard = DirGuard(dir.clone());
        assert_eq!(DiskStore::new(&dir).load().unwrap(), None);
    }

    #[test]
    fn test_memory_store_mirrors_cookie_semantics() {
        let store = MemoryStore::new();
        store.save("h.c.s").unwrap();
        assert_eq!(store.cookie().as_deref(), Some("auth=h.c.s; path=/"));
        assert_eq!(store.load().unwrap().as_deref(), Some("h.c.s"));

        store.clear().unwrap();
        assert_eq!(store.cookie().as_deref(), Some(EXPIRED_COOKIE));
        assert_eq!(store.slot(STORAGE_KEY).as_deref(), Some(CLEARED_SENTINEL));
        assert_eq!(store.load().unwrap(), None);
    }
}
