//! Bloom filter sized from a target false positive rate
//!
//! A space-efficient probabilistic data structure for membership testing:
//! `find` answers "definitely absent" or "possibly present", never producing
//! a false negative.
//!
//! Each key is probed `num_hashes` times, once per seed `1..=num_hashes`, with
//! the position of probe `i` being `hash(key, i) mod capacity`. Bits only ever
//! go from 0 to 1, and the filter keeps a running count of set bits so the
//! live false positive estimate is O(1).
//!
//! Insertion takes `&mut self`; share a filter across threads behind a
//! `Mutex` or `RwLock`.

use crate::error::Result;
use crate::hash::{FnvSeededHash, SeededHash};
use crate::sizing;
use bit_vec::BitVec;
use std::fmt;
use tracing::debug;

/// A Bloom filter with a fixed bit array derived from its design parameters
pub struct BloomFilter<H: SeededHash = FnvSeededHash> {
    /// Bit array storing the filter data
    bits: BitVec,
    /// Seeded hash function driving every probe
    hasher: H,
    /// Probes per key
    num_hashes: usize,
    /// Design capacity, used only for sizing
    expected_keys: usize,
    /// Design false positive rate, used only for sizing
    target_fpr: f64,
    /// Number of bits currently set
    bits_set: usize,
}

impl BloomFilter {
    /// Create a new Bloom filter using the default hash function
    ///
    /// # Arguments
    /// * `expected_keys` - Number of keys the filter is sized for
    /// * `num_hashes` - Number of probes per key
    /// * `target_fpr` - False positive rate reached at `expected_keys`, in (0, 1)
    ///
    /// # Example
    /// ```
    /// use phi_bloom::BloomFilter;
    ///
    /// let mut bloom = BloomFilter::new(3, 2, 0.1).unwrap();
    /// bloom.insert("a");
    /// assert!(bloom.find("a"));
    /// ```
    pub fn new(expected_keys: usize, num_hashes: usize, target_fpr: f64) -> Result<Self> {
        Self::with_hasher(expected_keys, num_hashes, target_fpr, FnvSeededHash)
    }
}

impl<H: SeededHash> BloomFilter<H> {
    /// Create a new Bloom filter probing with the given hash function
    pub fn with_hasher(
        expected_keys: usize,
        num_hashes: usize,
        target_fpr: f64,
        hasher: H,
    ) -> Result<Self> {
        let capacity = sizing::bits_needed(expected_keys, num_hashes, target_fpr)?;

        debug!(
            expected_keys,
            num_hashes,
            target_fpr,
            capacity,
            hasher = %hasher.name(),
            "created bloom filter"
        );

        Ok(BloomFilter {
            bits: BitVec::from_elem(capacity, false),
            hasher,
            num_hashes,
            expected_keys,
            target_fpr,
            bits_set: 0,
        })
    }

    /// Bit position of the probe with the given seed
    #[inline]
    fn position(&self, key: &[u8], seed: u64) -> usize {
        // capacity >= 1, so the result is always in bounds
        (self.hasher.hash(key, seed) % self.bits.len() as u64) as usize
    }

    /// Insert a key into the filter
    pub fn insert<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        let key = key.as_ref();

        for seed in 1..=self.num_hashes as u64 {
            let pos = self.position(key, seed);
            if self.bits.get(pos) == Some(false) {
                self.bits_set += 1;
            }
            self.bits.set(pos, true);
        }
    }

    /// Insert every key of an iterator
    pub fn insert_all<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        for key in keys {
            self.insert(&key);
        }
    }

    /// Check if a key might be in the filter
    /// Returns true if the key might be present (with possible false positives)
    /// Returns false if the key is definitely not present
    pub fn find<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        let key = key.as_ref();

        for seed in 1..=self.num_hashes as u64 {
            let pos = self.position(key, seed);
            if !self.bits.get(pos).unwrap_or(false) {
                return false;
            }
        }

        true
    }

    /// Count how many keys of an iterator the filter reports as present
    pub fn count_found<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        keys.into_iter().filter(|key| self.find(key)).count()
    }

    /// Estimated false positive rate at the current fill level.
    ///
    /// Unlike `target_fpr`, this rises as keys are inserted.
    pub fn false_positive_rate(&self) -> f64 {
        sizing::estimate_fpr(self.bits.len(), self.bits_set, self.num_hashes)
    }

    /// Get the number of bits set to 1
    pub fn num_bits_set(&self) -> usize {
        self.bits_set
    }

    /// Get the current fill ratio (fraction of bits set)
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set as f64 / self.bits.len() as f64
    }

    /// Check if no key has been inserted
    pub fn is_empty(&self) -> bool {
        self.bits_set == 0
    }

    /// Get the capacity (number of bits)
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    pub fn expected_keys(&self) -> usize {
        self.expected_keys
    }

    pub fn target_fpr(&self) -> f64 {
        self.target_fpr
    }

    pub fn hasher_name(&self) -> String {
        self.hasher.name()
    }

    /// Get statistics about the filter
    pub fn stats(&self) -> BloomStats {
        BloomStats {
            capacity: self.capacity(),
            num_hashes: self.num_hashes,
            expected_keys: self.expected_keys,
            target_fpr: self.target_fpr,
            bits_set: self.bits_set,
            fill_ratio: self.fill_ratio(),
            estimated_fpr: self.false_positive_rate(),
        }
    }

    #[cfg(test)]
    fn popcount(&self) -> usize {
        self.bits.iter().filter(|&bit| bit).count()
    }
}

impl<H: SeededHash> fmt::Debug for BloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("capacity", &self.capacity())
            .field("num_hashes", &self.num_hashes)
            .field("expected_keys", &self.expected_keys)
            .field("target_fpr", &self.target_fpr)
            .field("bits_set", &self.bits_set)
            .field("hasher", &self.hasher.name())
            .finish()
    }
}

/// Statistics about a Bloom filter
#[derive(Debug, Clone, PartialEq)]
pub struct BloomStats {
    pub capacity: usize,
    pub num_hashes: usize,
    pub expected_keys: usize,
    pub target_fpr: f64,
    pub bits_set: usize,
    pub fill_ratio: f64,
    pub estimated_fpr: f64,
}

impl fmt::Display for BloomStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "BloomFilter Stats:\n\
             - Capacity: {} bits\n\
             - Hash functions: {}\n\
             - Expected keys: {}\n\
             - Target FPR: {:.6}\n\
             - Bits set: {}\n\
             - Fill ratio: {:.3}\n\
             - Estimated FPR: {:.6}",
            self.capacity,
            self.num_hashes,
            self.expected_keys,
            self.target_fpr,
            self.bits_set,
            self.fill_ratio,
            self.estimated_fpr
        )
    }
}
