//! djb2 string hash and the `Hasher`/`BuildHasher` pair that plugs it into
//! `ChainedTable`.
//!
//! The table feeds key bytes straight into `Hasher::write` (it never goes
//! through `str: Hash`, which appends a terminator byte), so any
//! `BuildHasher` sees exactly the key's UTF-8 bytes.

use core::hash::{BuildHasher, Hasher};

/// Seed of the djb2 accumulator.
pub const DJB2_SEED: u32 = 5381;

/// Multiplier applied per input byte.
pub const DJB2_MULTIPLIER: u32 = 33;

/// Classic djb2: `h = h * 33 + byte`, seeded with 5381, on 32 bits.
///
/// ```
/// assert_eq!(chain_table::djb2(b"a"), 177_670);
/// ```
#[inline]
pub fn djb2(bytes: &[u8]) -> u32 {
    bytes.iter().fold(DJB2_SEED, |h, &b| {
        // (h << 5) + h == h * 33
        (h << 5).wrapping_add(h).wrapping_add(u32::from(b))
    })
}

/// Streaming djb2 state. `finish` returns the 32-bit hash widened to `u64`.
#[derive(Debug, Copy, Clone)]
pub struct Djb2Hasher {
    hash: u32,
}

impl Djb2Hasher {
    pub const fn new() -> Self {
        Self { hash: DJB2_SEED }
    }
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Djb2Hasher {
    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.hash)
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.hash = self
                .hash
                .wrapping_mul(DJB2_MULTIPLIER)
                .wrapping_add(u32::from(b));
        }
    }
}

/// Builder for [`Djb2Hasher`]; the default hasher of `ChainedTable`.
#[derive(Debug, Copy, Clone, Default)]
pub struct Djb2State;

impl BuildHasher for Djb2State {
    type Hasher = Djb2Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Djb2Hasher::new()
    }
}
