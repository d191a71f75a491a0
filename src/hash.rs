//! Seeded hash functions for Bloom filters
//!
//! Every probe of a key is driven by the same hash function run with a
//! different integer seed, so `k` probes need `k` distinct seeds.

use fnv::FnvHasher;
use std::hash::Hasher;

/// FNV-1a 64-bit offset basis
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// Odd multiplier used to spread consecutive seeds across the key space
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Trait for seeded hash functions used in Bloom filters
pub trait SeededHash: Send + Sync {
    /// Hash a key under the given seed.
    ///
    /// Must be deterministic: the same key and seed always give the same value.
    fn hash(&self, key: &[u8], seed: u64) -> u64;

    /// Get a name/identifier for this hash function
    fn name(&self) -> String;
}

/// FNV-1a keyed by the seed, followed by a 64-bit avalanche finalizer.
///
/// Raw FNV leaves the low bits weakly mixed, and the filter reduces hashes
/// modulo its capacity, so the output is passed through `fmix64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FnvSeededHash;

impl FnvSeededHash {
    pub fn new() -> Self {
        FnvSeededHash
    }
}

impl SeededHash for FnvSeededHash {
    fn hash(&self, key: &[u8], seed: u64) -> u64 {
        let mut hasher = FnvHasher::with_key(FNV_OFFSET_BASIS ^ seed.wrapping_mul(SEED_SPREAD));
        hasher.write(&seed.to_le_bytes());
        hasher.write(key);
        fmix64(hasher.finish())
    }

    fn name(&self) -> String {
        "fnv1a-fmix64".to_string()
    }
}

/// MurmurHash3 64-bit finalizer
#[inline]
fn fmix64(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}
