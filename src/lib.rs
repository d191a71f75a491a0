//! # Phi Bloom
//!
//! A Bloom filter whose bit array is sized from the number of keys it must
//! hold, the number of probes per key and a target false positive rate.
//! Queries answer "definitely absent" or "possibly present", and the filter
//! reports its live false positive rate as it fills.

pub mod bloom;
pub mod config;
pub mod error;
pub mod hash;
pub mod sizing;

pub use bloom::{BloomFilter, BloomStats};
pub use config::BloomConfig;
pub use error::{BloomError, Result};
pub use hash::{FnvSeededHash, SeededHash};

// Python bindings
#[cfg(feature = "python")]
pub mod python_module;
