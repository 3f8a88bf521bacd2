//! ProbeMap: the table layer over [`Bucket`] and the probe-order primitives.

use crate::bucket::Bucket;
use crate::probe;
use core::fmt;
use core::hash::BuildHasher;
use core::ops::Index;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::hash_map::RandomState;

/// Error returned by [`ProbeMap::insert`].
#[derive(Debug, PartialEq, Eq)]
pub enum InsertError {
    /// The key is already present; the table was left unchanged.
    DuplicateKey,
}

/// An open-addressing map from `String` keys to `i64` values.
///
/// Collisions are resolved by walking a randomized permutation of offsets
/// that is fixed per capacity and shared by all keys; see the crate docs for
/// the probe-order and termination rules.
pub struct ProbeMap<S = RandomState> {
    buckets: Vec<Bucket>,
    // Permutation of 1..capacity; regenerated on every capacity change.
    offsets: Vec<usize>,
    len: usize,
    hasher: S,
    // Source of each capacity's permutation. Seeded once at construction;
    // the stream continues across resizes, so layouts are reproducible for
    // a given seed and hasher.
    rng: StdRng,
}

impl ProbeMap {
    /// Capacity used by [`new`](ProbeMap::new).
    pub const DEFAULT_CAPACITY: usize = 8;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a table with `capacity` buckets.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl Default for ProbeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ProbeMap<S>
where
    S: BuildHasher,
{
    // Fixed default seed for the offset rng, for reproducibility.
    const OFFSET_SEED: u64 = 0;

    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(ProbeMap::DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::with_capacity_hasher_and_seed(capacity, hasher, Self::OFFSET_SEED)
    }

    /// Full constructor; `seed` pins the rng stream that produces the offset
    /// permutation at this and every later capacity.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity_hasher_and_seed(capacity: usize, hasher: S, seed: u64) -> Self {
        assert!(capacity > 0, "capacity must be nonzero");
        let mut rng = StdRng::seed_from_u64(seed);
        let offsets = probe::offset_permutation(capacity, &mut rng);
        Self {
            buckets: vec![Bucket::NeverUsed; capacity],
            offsets,
            len: 0,
            hasher,
            rng,
        }
    }

    /// Number of occupied buckets. O(1), cached.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of buckets. O(1).
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Occupancy fraction `len / capacity`; insertion resizes once this
    /// reaches 0.5. O(1).
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    fn home_index(&self, key: &str) -> usize {
        (self.hasher.hash_one(key) % self.capacity() as u64) as usize
    }

    fn probe_from(&self, home: usize) -> impl Iterator<Item = usize> + '_ {
        probe::probe_sequence(home, &self.offsets, self.buckets.len())
    }

    /// Shared lookup walk: the index of the occupied slot holding `key`, or
    /// `None` once a never-used slot (or sequence exhaustion) proves the key
    /// absent. Tombstones and non-matching occupied slots are walked past.
    fn find_slot(&self, key: &str) -> Option<usize> {
        for idx in self.probe_from(self.home_index(key)) {
            match &self.buckets[idx] {
                Bucket::Occupied { key: k, .. } if k == key => return Some(idx),
                Bucket::Occupied { .. } | Bucket::Tombstone => {}
                Bucket::NeverUsed => return None,
            }
        }
        None
    }

    /// Inserts `key` → `value`. Rejects duplicates, leaving the table
    /// unchanged. Doubles the capacity first whenever the load factor has
    /// reached 0.5.
    pub fn insert(&mut self, key: String, value: i64) -> Result<(), InsertError> {
        if self.load_factor() >= 0.5 {
            self.resize();
        }

        // Walk the whole sequence if needed: a tombstone is remembered as
        // the insertion candidate, but the walk continues in case the key
        // itself sits further along the chain.
        let mut candidate = None;
        let mut landing = None;
        for idx in self.probe_from(self.home_index(&key)) {
            match &self.buckets[idx] {
                Bucket::Occupied { key: k, .. } => {
                    if *k == key {
                        return Err(InsertError::DuplicateKey);
                    }
                }
                Bucket::Tombstone => {
                    if candidate.is_none() {
                        candidate = Some(idx);
                    }
                }
                Bucket::NeverUsed => {
                    // A never-used slot proves the key absent from this
                    // chain; the earliest available slot wins.
                    landing = Some(candidate.unwrap_or(idx));
                    break;
                }
            }
        }

        match landing.or(candidate) {
            Some(slot) => {
                self.buckets[slot].load(key, value);
                self.len += 1;
                Ok(())
            }
            // The 0.5 resize threshold keeps an available slot on every
            // full-coverage chain.
            None => unreachable!("probe sequence exhausted with no available slot"),
        }
    }

    /// Removes `key`, returning its value. The slot is tombstoned so that
    /// probe chains through it stay intact.
    pub fn remove(&mut self, key: &str) -> Option<i64> {
        let idx = self.find_slot(key)?;
        match core::mem::replace(&mut self.buckets[idx], Bucket::Tombstone) {
            Bucket::Occupied { value, .. } => {
                self.len -= 1;
                Some(value)
            }
            _ => unreachable!("find_slot only returns occupied slots"),
        }
    }

    /// The value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<i64> {
        match self.find_slot(key).map(|idx| &self.buckets[idx]) {
            Some(Bucket::Occupied { value, .. }) => Some(*value),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Mutable borrow of the value stored under `key`. Absent keys yield
    /// `None`; use [`get_or_insert`](ProbeMap::get_or_insert) to materialize
    /// a slot instead.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut i64> {
        let idx = self.find_slot(key)?;
        match &mut self.buckets[idx] {
            Bucket::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Mutable borrow of the value under `key`, inserting `default` first if
    /// the key is absent.
    pub fn get_or_insert(&mut self, key: String, default: i64) -> &mut i64 {
        if self.find_slot(&key).is_none() {
            // The walk above proved absence, so this cannot be a duplicate.
            let _ = self.insert(key.clone(), default);
        }
        let idx = match self.find_slot(&key) {
            Some(idx) => idx,
            None => unreachable!("key was just inserted"),
        };
        match &mut self.buckets[idx] {
            Bucket::Occupied { value, .. } => value,
            _ => unreachable!("find_slot only returns occupied slots"),
        }
    }

    /// Keys of all occupied buckets, in bucket-index order (not insertion
    /// order).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().filter_map(|b| match b {
            Bucket::Occupied { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    /// `(key, value)` pairs of all occupied buckets, in bucket-index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.buckets.iter().filter_map(|b| match b {
            Bucket::Occupied { key, value } => Some((key.as_str(), *value)),
            _ => None,
        })
    }

    /// Doubles the capacity, regenerates the offset permutation for the new
    /// capacity, and re-inserts every occupied bucket into fresh storage.
    /// Tombstones are dropped; `len` is recomputed by counting
    /// reinsertions.
    fn resize(&mut self) {
        let new_capacity = self.capacity() * 2;
        self.offsets = probe::offset_permutation(new_capacity, &mut self.rng);
        let old = core::mem::replace(&mut self.buckets, vec![Bucket::NeverUsed; new_capacity]);
        self.len = 0;

        for bucket in old {
            if let Bucket::Occupied { key, value } = bucket {
                // Fresh storage holds no tombstones, so the first available
                // slot along the new sequence is always a never-used one.
                let slot = self
                    .probe_from(self.home_index(&key))
                    .find(|&idx| self.buckets[idx].is_available());
                match slot {
                    Some(idx) => {
                        self.buckets[idx].load(key, value);
                        self.len += 1;
                    }
                    None => unreachable!("doubled capacity leaves never-used slots"),
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn probe_offsets(&self) -> &[usize] {
        &self.offsets
    }
}

/// Panicking indexed read for present keys, matching
/// `std::collections::HashMap`'s `Index`. Use [`ProbeMap::get`] or
/// [`ProbeMap::get_or_insert`] when the key may be absent.
impl<S> Index<&str> for ProbeMap<S>
where
    S: BuildHasher,
{
    type Output = i64;

    /// # Panics
    /// Panics if `key` is not present.
    fn index(&self, key: &str) -> &i64 {
        let idx = self
            .find_slot(key)
            .unwrap_or_else(|| panic!("no entry found for key {:?}", key));
        match &self.buckets[idx] {
            Bucket::Occupied { value, .. } => value,
            _ => unreachable!("find_slot only returns occupied slots"),
        }
    }
}

/// One line per occupied bucket, in index order:
/// `Bucket {i}: <key, value>`.
impl<S> fmt::Display for ProbeMap<S>
where
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bucket) in self.buckets.iter().enumerate() {
            if !bucket.is_available() {
                writeln!(f, "Bucket {}: {}", i, bucket)?;
            }
        }
        Ok(())
    }
}
