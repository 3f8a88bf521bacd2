//! Probe-order generation: a per-capacity permutation of non-home offsets.
//!
//! The table keeps one permutation of the offsets `1..capacity` and derives
//! every key's probe sequence from it; the permutation is regenerated each
//! time the capacity changes. The rng is supplied by the caller, so tests
//! can pin the exact permutation a given seed produces.

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a permutation of `1..capacity`, shuffled Fisher–Yates style by
/// `rng`. Empty for `capacity <= 1` (the probe sequence is just the home
/// slot then).
pub(crate) fn offset_permutation<R: Rng>(capacity: usize, rng: &mut R) -> Vec<usize> {
    let mut offsets: Vec<usize> = (1..capacity).collect();
    offsets.shuffle(rng);
    offsets
}

/// Indices visited when probing from `home`: the home slot first, then
/// `home + offset` modulo `capacity` for each offset in order. When
/// `offsets` is a permutation of `1..capacity`, the sequence visits every
/// slot exactly once.
pub(crate) fn probe_sequence(
    home: usize,
    offsets: &[usize],
    capacity: usize,
) -> impl Iterator<Item = usize> + '_ {
    core::iter::once(home).chain(offsets.iter().map(move |&off| (home + off) % capacity))
}

#[cfg(test)]
mod tests {
    use super::{offset_permutation, probe_sequence};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    #[test]
    fn offsets_are_a_permutation_of_non_home_values() {
        let mut rng = StdRng::seed_from_u64(0);
        for capacity in [1usize, 2, 3, 8, 16, 64] {
            let offsets = offset_permutation(capacity, &mut rng);
            assert_eq!(offsets.len(), capacity.saturating_sub(1));
            let distinct: BTreeSet<usize> = offsets.iter().copied().collect();
            let expected: BTreeSet<usize> = (1..capacity).collect();
            assert_eq!(distinct, expected, "capacity {}", capacity);
        }
    }

    #[test]
    fn same_seed_reproduces_the_exact_permutation() {
        let a = offset_permutation(16, &mut StdRng::seed_from_u64(42));
        let b = offset_permutation(16, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        // A continued stream produces the next capacity's permutation
        // deterministically as well.
        let mut r1 = StdRng::seed_from_u64(42);
        let mut r2 = StdRng::seed_from_u64(42);
        let _ = offset_permutation(16, &mut r1);
        let _ = offset_permutation(16, &mut r2);
        assert_eq!(
            offset_permutation(32, &mut r1),
            offset_permutation(32, &mut r2)
        );
    }

    #[test]
    fn probe_sequence_visits_every_slot_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        for capacity in [1usize, 2, 5, 8, 32] {
            let offsets = offset_permutation(capacity, &mut rng);
            for home in 0..capacity {
                let seq: Vec<usize> = probe_sequence(home, &offsets, capacity).collect();
                assert_eq!(seq.len(), capacity);
                assert_eq!(seq[0], home, "home slot comes first");
                let distinct: BTreeSet<usize> = seq.iter().copied().collect();
                assert_eq!(distinct.len(), capacity, "no slot repeats");
            }
        }
    }

    #[test]
    fn all_homes_share_one_global_order_of_offsets() {
        // Two homes walk the same offsets in the same order; only the base
        // index differs. This is the documented global-probe-order design.
        let offsets = offset_permutation(8, &mut StdRng::seed_from_u64(3));
        let from0: Vec<usize> = probe_sequence(0, &offsets, 8).collect();
        let from5: Vec<usize> = probe_sequence(5, &offsets, 8).collect();
        for (a, b) in from0.iter().zip(from5.iter()) {
            assert_eq!((a + 5) % 8, *b);
        }
    }
}
