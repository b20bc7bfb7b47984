//! Session token store
//!
//! Holds the single live upstream session token. The upstream issues tokens
//! through the login endpoint and this store bounds their lifetime locally:
//! 25 minutes after `put`, `get` reports absent regardless of what the
//! server thinks, which is what makes the poll loop re-authenticate on its
//! own clock. The server can still reject a locally-live token early; the
//! loop handles that by calling [`SessionStore::clear`].

use crate::cache::{BoundedCache, Eviction};
use std::sync::RwLock;
use std::time::Duration;

/// How long a token is trusted after it was stored
///
/// Fixed by design, independent of any server-declared expiry.
pub const TOKEN_TTL: Duration = Duration::from_secs(25 * 60);

// The cache is generic over keys; the token is a singleton slot, so a unit
// key is enough.
const SLOT: () = ();

/// Store for the single live session token
///
/// Reads and writes go through an internal lock so that logging or
/// formatting code can inspect the store without racing the poll loop's
/// mutation path. There is still exactly one logical owner: the loop.
pub struct SessionStore {
    slot: RwLock<BoundedCache<(), String>>,
}

impl SessionStore {
    /// Create an empty store with the standard 25-minute TTL
    pub fn new() -> Self {
        Self::with_ttl(TOKEN_TTL)
    }

    /// Create an empty store with a custom TTL
    ///
    /// Exists for tests; production code uses [`SessionStore::new`].
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(BoundedCache::new(Eviction::Ttl(ttl))),
        }
    }

    /// Current token, if one is live
    ///
    /// Returns `None` once the TTL has elapsed since the last [`put`],
    /// even if nothing ever cleared the slot.
    ///
    /// [`put`]: SessionStore::put
    pub fn get(&self) -> Option<String> {
        match self.slot.read() {
            Ok(guard) => guard.get(&SLOT).cloned(),
            // A poisoned lock means a panic mid-write; treat the token as
            // gone and let the loop re-authenticate.
            Err(_) => None,
        }
    }

    /// Store a fresh token, replacing the previous one and resetting its TTL
    pub fn put(&self, token: String) {
        if let Ok(mut guard) = self.slot.write() {
            guard.insert(SLOT, token);
        }
    }

    /// Discard the stored token
    ///
    /// Called from exactly one place: the poll loop's handling of a
    /// server-side token rejection.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.slot.write() {
            guard.clear();
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
