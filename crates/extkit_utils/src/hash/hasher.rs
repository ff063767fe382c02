//! `FixedHasher` for general keys, `NoOpHasher` for keys that already are hashes.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_SEED: FixedState = FixedState::with_seed(0x2F6C_9A41_D3E8_B057);

/// The hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A `foldhash` state with a constant seed.
///
/// Two maps filled with the same keys iterate in the same order, in the same
/// process and across runs.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use extkit_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("key"), FixedHashState.hash_one("key"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_SEED.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// Passes a single `u64` through unchanged.
///
/// Meant for keys such as [`TypeId`](core::any::TypeId) whose `Hash` impl
/// writes one well-distributed `u64`.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // fallback for keys that do not go through `write_u64`
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use extkit_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 42_u64.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hasher};

    use super::{FixedHashState, NoOpHashState};

    #[test]
    fn fixed_state_is_deterministic() {
        assert_eq!(FixedHashState.hash_one(17_u32), FixedHashState.hash_one(17_u32));
        assert_ne!(FixedHashState.hash_one(17_u32), FixedHashState.hash_one(18_u32));
    }

    #[test]
    fn no_op_write_matches_write_u64_for_one_call() {
        let mut a = NoOpHashState.build_hasher();
        a.write_u64(1234);

        let mut b = NoOpHashState.build_hasher();
        b.write(&1234_u64.to_le_bytes());

        assert_eq!(a.finish(), b.finish());
    }
}
