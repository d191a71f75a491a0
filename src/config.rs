//! Filter configuration
//!
//! ```
//! use phi_bloom::BloomConfig;
//!
//! let mut filter = BloomConfig::default()
//!     .expected_keys(1_000)
//!     .target_fpr(0.01)
//!     .build()
//!     .unwrap();
//! filter.insert("apple");
//! assert!(filter.find("apple"));
//! ```

use crate::bloom::BloomFilter;
use crate::error::Result;
use crate::hash::{FnvSeededHash, SeededHash};
use crate::sizing;

/// Design parameters of a Bloom filter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BloomConfig {
    /// Number of keys the filter is sized for
    pub expected_keys: usize,
    /// Probes per key
    pub num_hashes: usize,
    /// False positive rate reached at `expected_keys`
    pub target_fpr: f64,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            expected_keys: 100_000,
            num_hashes: 4,
            target_fpr: 0.05,
        }
    }
}

impl BloomConfig {
    /// Create a new configuration with validation
    pub fn new(expected_keys: usize, num_hashes: usize, target_fpr: f64) -> Result<Self> {
        let config = Self {
            expected_keys,
            num_hashes,
            target_fpr,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration using the suggested hash count for the target rate
    pub fn suggested(expected_keys: usize, target_fpr: f64) -> Result<Self> {
        let params = sizing::suggest_parameters(expected_keys, target_fpr)?;
        Ok(Self {
            expected_keys,
            num_hashes: params.num_hashes,
            target_fpr,
        })
    }

    pub fn expected_keys(mut self, expected_keys: usize) -> Self {
        self.expected_keys = expected_keys;
        self
    }

    pub fn num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    pub fn target_fpr(mut self, target_fpr: f64) -> Self {
        self.target_fpr = target_fpr;
        self
    }

    /// Check the parameters, including that they size a usable bit array
    pub fn validate(&self) -> Result<()> {
        self.num_bits().map(|_| ())
    }

    /// Bit array length these parameters produce
    pub fn num_bits(&self) -> Result<usize> {
        sizing::bits_needed(self.expected_keys, self.num_hashes, self.target_fpr)
    }

    pub fn build(&self) -> Result<BloomFilter> {
        self.build_with_hasher(FnvSeededHash)
    }

    pub fn build_with_hasher<H: SeededHash>(&self, hasher: H) -> Result<BloomFilter<H>> {
        BloomFilter::with_hasher(
            self.expected_keys,
            self.num_hashes,
            self.target_fpr,
            hasher,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BloomConfig::default();
        assert!(config.validate().is_ok());

        let filter = config.build().unwrap();
        assert_eq!(filter.num_hashes(), 4);
        assert_eq!(filter.expected_keys(), 100_000);
        assert_eq!(filter.capacity(), config.num_bits().unwrap());
    }

    #[test]
    fn test_new_validates() {
        assert!(BloomConfig::new(0, 4, 0.05).is_err());
        assert!(BloomConfig::new(100, 0, 0.05).is_err());
        assert!(BloomConfig::new(100, 4, 1.0).is_err());
        assert!(BloomConfig::new(100, 4, 0.05).is_ok());
    }

    #[test]
    fn test_setters_then_validate() {
        assert!(BloomConfig::default().num_hashes(0).validate().is_err());
        assert!(BloomConfig::default().expected_keys(0).validate().is_err());
        assert!(BloomConfig::default().target_fpr(1.5).validate().is_err());
        assert!(BloomConfig::default().build().is_ok());
        assert!(BloomConfig::default().target_fpr(0.0).build().is_err());
    }

    #[test]
    fn test_suggested() {
        let config = BloomConfig::suggested(10_000, 0.01).unwrap();
        assert_eq!(config.num_hashes, 7);
        assert_eq!(config.expected_keys, 10_000);
        assert!(config.build().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = BloomConfig::default().target_fpr(0.01);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BloomConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
