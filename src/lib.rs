//! probe-map: a single-threaded hash map from `String` keys to `i64`
//! values, built on open addressing with a randomized, capacity-specific
//! probe permutation instead of linear/quadratic probing or double hashing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the probing scheme auditable — one probe-sequence
//!   primitive shared by every operation, and a bucket state machine
//!   small enough to reason about exhaustively.
//! - Layers:
//!   - Bucket: a three-state storage cell (never used / occupied /
//!     tombstone). Only the occupied variant carries data.
//!   - probe: offset-permutation generation (Fisher–Yates over
//!     `1..capacity`) and the probe-sequence iterator.
//!   - ProbeMap<S>: the table; owns the buckets, the current offset
//!     permutation, and the cached length.
//!
//! Probe order
//! - Each capacity gets one permutation of the offsets `1..capacity`,
//!   shuffled by an rng seeded once from a fixed default seed. The rng
//!   stream continues across resizes, so every capacity's permutation is
//!   reproducible across runs for a given seed.
//! - A key's probe sequence is its home index (`hash % capacity`)
//!   followed by `home + offset` for each offset, modulo capacity:
//!   every slot exactly once.
//! - The permutation is shared by all keys; two keys with the same home
//!   index walk identical sequences. This is a deliberate simplification
//!   over per-key double hashing and is kept as-designed: collision
//!   behavior under adversarial key sets is accordingly weaker than
//!   standard open addressing.
//!
//! Termination rules
//! - A never-used slot proves a key absent from its chain (insertion
//!   always fills the earliest available slot before such a boundary),
//!   so lookups and removals stop there.
//! - Tombstones are skipped but never stop a walk; insertion remembers
//!   the earliest one as its landing slot.
//!
//! Resize policy
//! - Insert checks `load_factor() >= 0.5` before probing and doubles the
//!   capacity when the check fires; rehashing re-inserts occupied
//!   buckets into fresh storage and drops tombstones.
//!
//! Constraints
//! - Single-threaded: no interior mutability, no atomics.
//! - Fixed key/value types (`String` → `i64`); the hasher is generic
//!   (`S: BuildHasher`) so tests can force collisions.
//! - Duplicate inserts fail and leave the table unchanged.
//!
//! Notes and non-goals
//! - No deletion compaction beyond tombstoning; tombstones persist until
//!   the next resize.
//! - No iteration-order guarantee beyond physical bucket order.
//! - Indexed access to an absent key is an explicit error path: `get_mut`
//!   returns `None`, `Index` panics with a documented message, and
//!   `get_or_insert` covers the insert-then-borrow use.

mod bucket;
mod probe;
mod probe_map;
mod probe_map_proptest;

// Public surface
pub use bucket::Bucket;
pub use probe_map::{InsertError, ProbeMap};
