//! Fill a Bloom filter from a word list and measure it
//!
//! Usage: `bloom_demo [WORDLIST]`
//!
//! The first `BLOOM_KEYS` words are inserted and re-queried, and the next
//! `BLOOM_KEYS` words are used to measure false positives. Without a word
//! list, synthetic keys are generated instead.

use phi_bloom::BloomConfig;
use std::error::Error;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn env_or<T>(name: &str, default: T) -> Result<T, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error + 'static,
{
    match std::env::var(name) {
        Ok(value) => Ok(value.trim().parse()?),
        Err(_) => Ok(default),
    }
}

fn load_words(path: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let defaults = BloomConfig::default();
    let config = BloomConfig::new(
        env_or("BLOOM_KEYS", defaults.expected_keys)?,
        env_or("BLOOM_HASHES", defaults.num_hashes)?,
        env_or("BLOOM_FPR", defaults.target_fpr)?,
    )?;
    let num_keys = config.expected_keys;

    let words = match std::env::args().nth(1) {
        Some(path) => {
            let words = load_words(&path)?;
            info!(path = %path, words = words.len(), "loaded word list");
            words
        }
        None => (0..2 * num_keys).map(|i| format!("word-{}", i)).collect(),
    };

    let inserted = &words[..num_keys.min(words.len())];
    let probes = &words[inserted.len()..(2 * num_keys).min(words.len())];
    if inserted.len() < num_keys {
        warn!(
            available = inserted.len(),
            wanted = num_keys,
            "word list shorter than expected key count"
        );
    }

    let mut bloom = config.build()?;

    let start = Instant::now();
    bloom.insert_all(inserted);
    info!(keys = inserted.len(), elapsed = ?start.elapsed(), "inserted keys");

    println!("Projected false positive rate: {}", bloom.false_positive_rate());

    let missing = inserted.len() - bloom.count_found(inserted);
    println!("There are {} words missing from the Bloom Filter", missing);

    if probes.is_empty() {
        warn!("no words left over to probe for false positives");
    } else {
        let found = bloom.count_found(probes);
        println!(
            "Percentage of false positives: {}",
            found as f64 / probes.len() as f64
        );
    }

    println!("{}", bloom.stats());

    Ok(())
}
