//! Download store for generated QR symbols.
//!
//! Each single-symbol generation deposits its PNG here under a fresh opaque
//! token, and the response hands that token back to the client. A later
//! `GET /download_qr?token=...` redeems it. Because every generation gets
//! its own token, concurrent clients can never overwrite each other's
//! pending download.
//!
//! # Eviction
//!
//! The store is a bounded LRU keyed by token. Entries survive until they
//! are evicted by newer generations, so a token may be redeemed more than
//! once. Generated PNGs are near-uniform in size, which is why the bound is
//! an entry count rather than a byte budget.

use bytes::Bytes;
use lru::LruCache;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Default maximum number of stored downloads.
pub const DEFAULT_DOWNLOAD_CAPACITY: usize = 256;

// =============================================================================
// Download Store
// =============================================================================

/// Bounded token-to-PNG store.
///
/// # Thread Safety
///
/// The store is thread-safe and can be shared across async tasks via `Arc`.
///
/// # Example
///
/// ```
/// use qr_forge::qr::DownloadStore;
/// use bytes::Bytes;
///
/// #[tokio::main]
/// async fn main() {
///     let store = DownloadStore::new();
///
///     let token = store.put(Bytes::from_static(b"\x89PNG...")).await;
///     let cached = store.get(&token).await;
///     assert!(cached.is_some());
/// }
/// ```
pub struct DownloadStore {
    /// The underlying LRU, keyed by download token
    entries: RwLock<LruCache<String, Bytes>>,

    /// Maximum number of entries
    capacity: usize,
}

impl DownloadStore {
    /// Create a store with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DOWNLOAD_CAPACITY)
    }

    /// Create a store holding at most `capacity` entries.
    ///
    /// A zero capacity is treated as one entry.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: RwLock::new(LruCache::new(
                std::num::NonZeroUsize::new(capacity).unwrap(),
            )),
            capacity,
        }
    }

    /// Store a generated PNG and return its fresh download token.
    ///
    /// The least-recently-used entry is evicted once the store is full.
    pub async fn put(&self, data: Bytes) -> String {
        let token = Uuid::new_v4().to_string();
        let mut entries = self.entries.write().await;
        entries.put(token.clone(), data);
        token
    }

    /// Redeem a token.
    ///
    /// Returns `Some(png)` while the entry is live, `None` once it was
    /// evicted or the token never existed. Redeeming marks the entry as
    /// recently used; tokens are not consumed.
    pub async fn get(&self, token: &str) -> Option<Bytes> {
        let mut entries = self.entries.write().await;
        entries.get(token).cloned()
    }

    /// Get the current number of stored downloads.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        let entries = self.entries.read().await;
        entries.is_empty()
    }

    /// Get the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for DownloadStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
