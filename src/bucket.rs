//! Bucket: a single three-state storage slot.

use core::fmt;

/// One storage slot in the table.
///
/// Only the occupied variant carries data, so a slot that is not occupied
/// structurally has no key or value to misread.
///
/// Lifecycle: `NeverUsed` → `Occupied` (via [`load`](Bucket::load)) →
/// `Tombstone` (on removal). A slot never returns to `NeverUsed`; resize
/// allocates fresh slots instead of resetting old ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Bucket {
    /// Empty since construction. Terminates probe walks.
    #[default]
    NeverUsed,
    /// Holds a live key/value pair.
    Occupied { key: String, value: i64 },
    /// Previously occupied, logically deleted. Skipped during probing but
    /// never terminates a walk.
    Tombstone,
}

impl Bucket {
    /// A fresh, never-used slot.
    pub fn new() -> Self {
        Bucket::NeverUsed
    }

    /// A slot created directly in the occupied state.
    pub fn occupied(key: String, value: i64) -> Self {
        Bucket::Occupied { key, value }
    }

    /// Overwrites the slot with `key`/`value`, forcing it occupied. Total:
    /// succeeds from any state.
    pub fn load(&mut self, key: String, value: i64) {
        *self = Bucket::Occupied { key, value };
    }

    /// True iff the slot can accept an insertion (never used or tombstoned).
    pub fn is_available(&self) -> bool {
        !matches!(self, Bucket::Occupied { .. })
    }
}

/// Prints `<key, value>` for an occupied slot and nothing otherwise.
impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Bucket::Occupied { key, value } = self {
            write!(f, "<{}, {}>", key, value)?;
        }
        Ok(())
    }
}
