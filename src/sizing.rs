//! Sizing and false positive math for Bloom filters
//!
//! The array length is derived by solving the standard false positive
//! relation backwards from a target rate:
//!
//! - `phi = 1 - p^(1/k)`: the probability that a given bit is still clear
//!   once `n` keys have been inserted, for `(1 - phi)^k = p` to hold.
//! - `m = floor(k / (1 - phi^(1/n)))`: the array length at which `n * k`
//!   independent probes leave each bit clear with probability `phi`.
//!
//! The live estimator runs the same relation forwards with the observed
//! fraction of clear bits in place of `phi`.

use crate::error::{BloomError, Result};

/// Smallest bit array a filter may have
pub const MIN_NUM_BITS: u64 = 1;

/// Largest bit array a filter may allocate (about 16 GiB)
pub const MAX_NUM_BITS: u64 = (i32::MAX as u64) * 64;

/// Suggested Bloom filter parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BloomParameters {
    pub num_bits: usize,
    pub num_hashes: usize,
    pub expected_fpr: f64,
}

/// Check the design parameters shared by every sizing entry point.
pub fn validate_design(expected_keys: usize, num_hashes: usize, target_fpr: f64) -> Result<()> {
    if expected_keys == 0 {
        return Err(BloomError::invalid("Expected number of keys must be > 0"));
    }
    if num_hashes == 0 {
        return Err(BloomError::invalid("Number of hashes must be > 0"));
    }
    validate_fpr(target_fpr)
}

fn validate_fpr(target_fpr: f64) -> Result<()> {
    // Written so that NaN is rejected too
    if !(target_fpr > 0.0 && target_fpr < 1.0) {
        return Err(BloomError::invalid(format!(
            "Target false positive rate must be in (0, 1), got {}",
            target_fpr
        )));
    }
    Ok(())
}

/// Number of bits needed to hold `expected_keys` keys probed `num_hashes`
/// times each at `target_fpr`.
pub fn bits_needed(expected_keys: usize, num_hashes: usize, target_fpr: f64) -> Result<usize> {
    validate_design(expected_keys, num_hashes, target_fpr)?;

    let n = expected_keys as f64;
    let k = num_hashes as f64;

    let phi = 1.0 - target_fpr.powf(1.0 / k);
    let raw = (k / (1.0 - phi.powf(1.0 / n))).floor();

    if !raw.is_finite() || raw > MAX_NUM_BITS as f64 || raw > usize::MAX as f64 {
        return Err(BloomError::invalid(format!(
            "Derived bit array size exceeds {} bits (n={}, k={}, p={})",
            MAX_NUM_BITS, expected_keys, num_hashes, target_fpr
        )));
    }
    if raw < MIN_NUM_BITS as f64 {
        return Err(BloomError::invalid(format!(
            "Derived bit array size is below {} bit (n={}, k={}, p={})",
            MIN_NUM_BITS, expected_keys, num_hashes, target_fpr
        )));
    }

    Ok(raw as usize)
}

/// False positive rate implied by the current fill of a bit array.
pub fn estimate_fpr(capacity_bits: usize, set_bits: usize, num_hashes: usize) -> f64 {
    if capacity_bits == 0 {
        return 0.0;
    }
    let m = capacity_bits as f64;
    let phi = capacity_bits.saturating_sub(set_bits) as f64 / m;
    (1.0 - phi).powf(num_hashes as f64)
}

/// Suggest a hash count for the target rate and size the array for it.
///
/// The hash count is the usual optimum `round(log2(1/p))`.
pub fn suggest_parameters(expected_keys: usize, target_fpr: f64) -> Result<BloomParameters> {
    validate_fpr(target_fpr)?;
    let num_hashes = ((1.0 / target_fpr).log2().round() as usize).max(1);
    let num_bits = bits_needed(expected_keys, num_hashes, target_fpr)?;

    // Expected fill after n keys: 1 - (1 - 1/m)^(n*k)
    let m = num_bits as f64;
    let probes = expected_keys as f64 * num_hashes as f64;
    let fill = 1.0 - (probes * (-1.0 / m).ln_1p()).exp();

    Ok(BloomParameters {
        num_bits,
        num_hashes,
        expected_fpr: fill.powf(num_hashes as f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_needed_reference_point() {
        let bits = bits_needed(100_000, 4, 0.05).unwrap();

        let phi = 1.0 - 0.05f64.powf(1.0 / 4.0);
        let expected = (4.0 / (1.0 - phi.powf(1.0 / 100_000.0))).floor() as usize;
        assert_eq!(bits, expected);
        assert!(bits > 600_000 && bits < 650_000);
    }

    #[test]
    fn test_bits_needed_small() {
        // n=3, k=2, p=0.1 gives a handful of bits
        let bits = bits_needed(3, 2, 0.1).unwrap();
        assert!(bits >= 1);
        assert!(bits < 64);
    }

    #[test]
    fn test_bits_needed_rejects_invalid() {
        assert!(bits_needed(0, 4, 0.05).is_err());
        assert!(bits_needed(100, 0, 0.05).is_err());
        assert!(bits_needed(100, 4, 1.0).is_err());
        assert!(bits_needed(100, 4, 0.0).is_err());
        assert!(bits_needed(100, 4, -0.5).is_err());
        assert!(bits_needed(100, 4, f64::NAN).is_err());
    }

    #[test]
    fn test_bits_needed_rejects_oversize() {
        assert!(bits_needed(1_000_000_000, 1, 1e-12).is_err());
    }

    #[test]
    fn test_bits_needed_near_one() {
        // A rate close to 1 collapses the array to roughly k bits
        let bits = bits_needed(10, 3, 0.999_999).unwrap();
        assert!(bits >= 3);
    }

    #[test]
    fn test_estimate_fpr() {
        assert_eq!(estimate_fpr(100, 0, 4), 0.0);
        assert_eq!(estimate_fpr(100, 100, 4), 1.0);
        assert!((estimate_fpr(100, 50, 2) - 0.25).abs() < 1e-12);
        assert_eq!(estimate_fpr(0, 0, 4), 0.0);
    }

    #[test]
    fn test_estimate_fpr_monotone() {
        let mut last = 0.0;
        for set in 0..=1000 {
            let fpr = estimate_fpr(1000, set, 4);
            assert!(fpr >= last);
            last = fpr;
        }
    }

    #[test]
    fn test_suggest_parameters() {
        let params = suggest_parameters(100_000, 0.05).unwrap();
        assert_eq!(params.num_hashes, 4);
        assert_eq!(params.num_bits, bits_needed(100_000, 4, 0.05).unwrap());
        // The derived size lands the expected rate on the target
        assert!((params.expected_fpr - 0.05).abs() < 0.005);
    }

    #[test]
    fn test_suggest_parameters_high_rate() {
        let params = suggest_parameters(1000, 0.9).unwrap();
        assert_eq!(params.num_hashes, 1);
    }
}
