//! Shared helpers for integration tests
#![allow(dead_code)]

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lodekv::datafile::DataFileWriter;

const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_!@#$%^&*()-";

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_string(rng: &mut StdRng, length: usize) -> String {
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Generate `count` distinct key/value pairs with sizes in the default
/// 1..=1024 bounds (kept small so suites stay fast)
pub fn generate_pairs(rng: &mut StdRng, count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| {
            // unique suffix keeps keys distinct regardless of the rng
            let key_len = rng.gen_range(4..32);
            let key = format!("{}_{:05}", random_string(rng, key_len), i);
            let value_len = rng.gen_range(1..64);
            let value = random_string(rng, value_len);
            (key, value)
        })
        .collect()
}

/// Write pairs to a fresh data file, returning each record's offset
pub fn write_data_file(path: &Path, pairs: &[(String, String)]) -> Vec<u64> {
    let mut writer = DataFileWriter::create(path).unwrap();
    let offsets = pairs
        .iter()
        .map(|(key, value)| writer.append(key.as_bytes(), value.as_bytes()).unwrap())
        .collect();
    writer.sync().unwrap();
    offsets
}
