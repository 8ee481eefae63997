//! Benchmark utilities.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric value of `len` characters.
pub fn random_value(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a compressible value: a short phrase repeated up to `len` bytes.
pub fn repetitive_value(len: usize) -> String {
    "the quick brown fox ".chars().cycle().take(len).collect()
}

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key-{i:06}")).collect()
}
