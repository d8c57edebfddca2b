//! Benchmark inputs for the Tessera memory primitives.
//!
//! - [`hash_keys`]: deterministic pseudo-hash keys, as a hash table would
//!   feed to its bucket reduction
//! - [`TABLE_SIZES`]: the table sizes the benches sweep

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessera_mem::PowerOfTwo;

/// Table sizes swept by the bucket-reduction benches.
pub const TABLE_SIZES: [PowerOfTwo; 3] = [
    PowerOfTwo::of::<16>(),
    PowerOfTwo::of::<1024>(),
    PowerOfTwo::of::<65536>(),
];

/// Generate `n` deterministic keys from `seed`.
///
/// Steps a 64-bit LCG and keeps its high bits. Bucket reduction keeps the
/// low bits of each key, and an LCG's own low bits cycle quickly.
pub fn hash_keys(n: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as usize
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_keys_deterministic() {
        assert_eq!(hash_keys(64, 42), hash_keys(64, 42));
        assert_ne!(hash_keys(64, 42), hash_keys(64, 43));
    }

    #[test]
    fn hash_keys_spread_over_buckets() {
        let size = TABLE_SIZES[0];
        let mut seen = vec![false; size.get()];
        for key in hash_keys(1024, 7) {
            seen[size.fast_mod(key)] = true;
        }
        assert!(seen.iter().all(|&hit| hit), "every bucket should be hit");
    }
}
