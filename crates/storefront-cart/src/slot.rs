//! # Slot Stores
//!
//! A slot store is the smallest storage contract the cart needs: bytes in,
//! bytes out, keyed by a string.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Trait            Backend               Where the bytes live            │
//! │  ─────            ───────               ────────────────────            │
//! │  SlotStore        MemorySlots           HashMap in this process         │
//! │  SlotStore        FileSlots             <dir>/<key>.json                │
//! │  AsyncSlotStore   MemorySlots           HashMap in this process         │
//! │  AsyncSlotStore   CartSlotRepository    SQLite `cart_slots` table       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `set` replaces the whole value. There are no partial writes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use storefront_db::CartSlotRepository;

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Traits
// =============================================================================

/// Synchronous byte-slot storage.
pub trait SlotStore: Send + Sync {
    /// Reads the value under `key`; `None` when nothing was ever written.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;
}

/// Asynchronous byte-slot storage.
#[async_trait]
pub trait AsyncSlotStore: Send + Sync {
    /// Reads the value under `key`; `None` when nothing was ever written.
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the value under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;
}

// =============================================================================
// Memory
// =============================================================================

/// In-process slots. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.slots
            .lock()
            .map_err(|_| StorageError::Backend("memory slots lock poisoned".to_string()))
    }

    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

impl SlotStore for MemorySlots {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        self.read(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.write(key, value)
    }
}

#[async_trait]
impl AsyncSlotStore for MemorySlots {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        self.read(key)
    }

    async fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.write(key, value)
    }
}

// =============================================================================
// Files
// =============================================================================

/// One file per key under a directory.
///
/// Writes go to a temp file first and are renamed into place, so a
/// reader sees either the old blob or the new one.
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    /// Uses `dir` for slot files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlots { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    ///
    /// Characters outside `[A-Za-z0-9_-]` are replaced so a key can never
    /// escape the directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl SlotStore for FileSlots {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), bytes = value.len(), "Cart slot written");
        Ok(())
    }
}

// =============================================================================
// SQLite
// =============================================================================

#[async_trait]
impl AsyncSlotStore for CartSlotRepository {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(CartSlotRepository::get(self, key).await?)
    }

    async fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        Ok(CartSlotRepository::set(self, key, value).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_db::{Database, DbConfig};

    fn temp_dir(label: &str) -> PathBuf {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        std::env::temp_dir().join(format!(
            "storefront-cart-{label}-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ))
    }

    #[test]
    fn test_memory_slots_share_state_across_clones() {
        let slots = MemorySlots::new();
        let clone = slots.clone();

        SlotStore::set(&slots, "cart", b"abc").unwrap();
        assert_eq!(SlotStore::get(&clone, "cart").unwrap(), Some(b"abc".to_vec()));
        assert_eq!(SlotStore::get(&clone, "other").unwrap(), None);
    }

    #[test]
    fn test_file_slots_round_trip_and_overwrite() {
        let dir = temp_dir("file");
        let slots = FileSlots::new(&dir);

        assert_eq!(slots.get("cart").unwrap(), None);

        slots.set("cart", b"first").unwrap();
        slots.set("cart", b"second").unwrap();
        assert_eq!(slots.get("cart").unwrap(), Some(b"second".to_vec()));

        // No temp file left behind.
        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_slot_keys_cannot_escape_dir() {
        let slots = FileSlots::new("/var/carts");
        let path = slots.path_for("../../etc/passwd");
        assert_eq!(path.parent(), Some(Path::new("/var/carts")));
        assert_eq!(path.file_name().unwrap(), "______etc_passwd.json");
    }

    #[tokio::test]
    async fn test_sqlite_slots() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let slots = db.cart_slots();

        assert_eq!(AsyncSlotStore::get(&slots, "cart").await.unwrap(), None);
        AsyncSlotStore::set(&slots, "cart", b"{}").await.unwrap();
        assert_eq!(
            AsyncSlotStore::get(&slots, "cart").await.unwrap(),
            Some(b"{}".to_vec())
        );
    }

    #[tokio::test]
    async fn test_memory_slots_async() {
        let slots = MemorySlots::new();
        AsyncSlotStore::set(&slots, "cart", b"x").await.unwrap();
        assert_eq!(SlotStore::get(&slots, "cart").unwrap(), Some(b"x".to_vec()));
    }
}
