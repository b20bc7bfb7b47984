//! Delivery ledger
//!
//! Tracks which result records have already been forwarded to the
//! notification channel, so a record is sent at most once per process
//! lifetime. The ledger is bounded as a memory-safety measure, not a
//! correctness one: after enough distinct records the oldest entries are
//! evicted and could in principle be re-sent, which is an accepted tradeoff.
//! Nothing is persisted; a restart starts from an empty ledger.

use crate::cache::{BoundedCache, Eviction};

/// Maximum number of delivered-record keys remembered at once
pub const LEDGER_CAPACITY: usize = 128;

/// Identity of one result record in the upstream payload
///
/// A result ID is only unique within its enclosing session, so the pair is
/// the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey {
    /// Enclosing session identifier
    pub session_id: i64,
    /// Result identifier within that session
    pub result_id: i64,
}

impl RecordKey {
    /// Build a key from session and result identifiers
    pub fn new(session_id: i64, result_id: i64) -> Self {
        Self {
            session_id,
            result_id,
        }
    }
}

/// Bounded set of already-delivered record keys
pub struct DeliveryLedger {
    seen: BoundedCache<RecordKey, ()>,
}

impl DeliveryLedger {
    /// Create an empty ledger with the standard capacity
    pub fn new() -> Self {
        Self::with_capacity(LEDGER_CAPACITY)
    }

    /// Create an empty ledger with a custom capacity
    ///
    /// Exists for tests; production code uses [`DeliveryLedger::new`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: BoundedCache::new(Eviction::Capacity(capacity)),
        }
    }

    /// Whether the record was already delivered (and not yet evicted)
    pub fn contains(&self, key: RecordKey) -> bool {
        self.seen.contains(&key)
    }

    /// Record that the record has been delivered
    pub fn mark_delivered(&mut self, key: RecordKey) {
        self.seen.insert(key, ());
    }

    /// Number of remembered record keys
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been delivered yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl Default for DeliveryLedger {
    fn default() -> Self {
        Self::new()
    }
}
