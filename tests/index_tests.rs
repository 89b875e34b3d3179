//! End-to-end tests for the index orchestrator
//!
//! These tests verify:
//! - Build + query round-trips across all four directory/cache configurations
//! - Batch independence: one bad key never disturbs its siblings
//! - Hash collisions resolved by exact-key verification
//! - Duplicate keys resolved by scan order
//! - The recency cache short-circuits the disk pipeline

mod common;

use lodekv::hash::key_hash;
use lodekv::{Config, Index};
use tempfile::TempDir;

fn build_config(tmp: &TempDir, tag: &str, chunk_num: u32) -> Config {
    Config::builder()
        .data_file(tmp.path().join("alldata"))
        .chunk_dir(tmp.path().join(format!("chunks_{}", tag)))
        .chunk_num(chunk_num)
        .cache_size(100)
        .max_concurrency(8)
        .build()
}

#[test]
fn test_end_to_end_minimal() {
    let tmp = TempDir::new().unwrap();
    common::write_data_file(
        &tmp.path().join("alldata"),
        &[
            ("abc".to_string(), "123".to_string()),
            ("xyz".to_string(), "789".to_string()),
        ],
    );

    let index = Index::build(build_config(&tmp, "minimal", 4), true, true).unwrap();
    index.query(
        &[
            "abc".to_string(),
            "xyz".to_string(),
            "missing".to_string(),
        ],
        0,
    );

    assert_eq!(index.answer(0).as_deref(), Some("123"));
    assert_eq!(index.answer(1).as_deref(), Some("789"));
    assert_eq!(index.answer(2).as_deref(), Some(""));
    assert_eq!(index.answer(3), None);
}

#[test]
fn test_all_configurations_resolve() {
    let tmp = TempDir::new().unwrap();
    let mut rng = common::seeded_rng(99);
    let pairs = common::generate_pairs(&mut rng, 300);
    common::write_data_file(&tmp.path().join("alldata"), &pairs);

    for (use_cache, use_tree) in [(false, false), (false, true), (true, false), (true, true)] {
        let tag = format!("c{}t{}", use_cache as u8, use_tree as u8);
        let config = build_config(&tmp, &tag, 16);
        let index = Index::build(config, use_cache, use_tree).unwrap();

        let keys: Vec<String> = pairs.iter().take(50).map(|(k, _)| k.clone()).collect();
        index.query(&keys, 0);
        for (i, (_, value)) in pairs.iter().take(50).enumerate() {
            assert_eq!(
                index.answer(i).as_deref(),
                Some(value.as_str()),
                "config cache={} tree={} position {}",
                use_cache,
                use_tree,
                i
            );
        }
    }
}

#[test]
fn test_batch_independence() {
    let tmp = TempDir::new().unwrap();
    common::write_data_file(
        &tmp.path().join("alldata"),
        &[
            ("alpha".to_string(), "1".to_string()),
            ("beta".to_string(), "2".to_string()),
        ],
    );

    let index = Index::build(build_config(&tmp, "batch", 4), false, true).unwrap();
    index.query(
        &[
            "alpha".to_string(),
            "no-such-key".to_string(),
            "beta".to_string(),
        ],
        0,
    );

    assert_eq!(index.answer(0).as_deref(), Some("1"));
    assert_eq!(index.answer(1).as_deref(), Some(""));
    assert_eq!(index.answer(2).as_deref(), Some("2"));
}

#[test]
fn test_start_index_offsets_positions() {
    let tmp = TempDir::new().unwrap();
    common::write_data_file(
        &tmp.path().join("alldata"),
        &[("k".to_string(), "v".to_string())],
    );

    let index = Index::build(build_config(&tmp, "start", 4), false, false).unwrap();
    index.query(&["k".to_string()], 100);

    assert_eq!(index.answer(100).as_deref(), Some("v"));
    assert_eq!(index.answer(0), None);
}

#[test]
fn test_hash_collision_resolved_by_key_compare() {
    // classic 31-polynomial collision
    assert_eq!(key_hash(b"Aa"), key_hash(b"BB"));

    let tmp = TempDir::new().unwrap();
    common::write_data_file(
        &tmp.path().join("alldata"),
        &[
            ("Aa".to_string(), "first".to_string()),
            ("BB".to_string(), "second".to_string()),
        ],
    );

    let index = Index::build(build_config(&tmp, "collide", 4), false, true).unwrap();
    index.query(&["Aa".to_string(), "BB".to_string()], 0);

    assert_eq!(index.answer(0).as_deref(), Some("first"));
    assert_eq!(index.answer(1).as_deref(), Some("second"));
}

#[test]
fn test_duplicate_key_resolves_to_first_record() {
    let tmp = TempDir::new().unwrap();
    common::write_data_file(
        &tmp.path().join("alldata"),
        &[
            ("dup".to_string(), "old".to_string()),
            ("other".to_string(), "x".to_string()),
            ("dup".to_string(), "new".to_string()),
        ],
    );

    let index = Index::build(build_config(&tmp, "dup", 4), false, false).unwrap();
    index.query(&["dup".to_string()], 0);

    // chunk records keep data file order; the earliest match wins
    assert_eq!(index.answer(0).as_deref(), Some("old"));
}

#[test]
fn test_cache_short_circuits_disk() {
    let tmp = TempDir::new().unwrap();
    let data_file = tmp.path().join("alldata");
    common::write_data_file(
        &data_file,
        &[("hot".to_string(), "cached-value".to_string())],
    );

    let index = Index::build(build_config(&tmp, "cache", 4), true, false).unwrap();
    index.query(&["hot".to_string()], 0);
    assert_eq!(index.answer(0).as_deref(), Some("cached-value"));
    assert_eq!(index.cache_len(), Some(1));

    // wreck the data file: only the cache can answer now
    std::fs::write(&data_file, b"").unwrap();
    index.query(&["hot".to_string(), "cold".to_string()], 0);
    assert_eq!(index.answer(0).as_deref(), Some("cached-value"));
    assert_eq!(index.answer(1).as_deref(), Some(""));
}

#[test]
fn test_empty_data_file_builds_empty_index() {
    let tmp = TempDir::new().unwrap();
    common::write_data_file(&tmp.path().join("alldata"), &[]);

    let index = Index::build(build_config(&tmp, "empty", 4), false, true).unwrap();
    assert_eq!(index.shard_count(), 0);

    index.query(&["anything".to_string()], 0);
    assert_eq!(index.answer(0).as_deref(), Some(""));
}

#[test]
fn test_map_and_tree_directories_agree() {
    let tmp = TempDir::new().unwrap();
    let mut rng = common::seeded_rng(5);
    let pairs = common::generate_pairs(&mut rng, 120);
    common::write_data_file(&tmp.path().join("alldata"), &pairs);

    let map_index = Index::build(build_config(&tmp, "map", 8), false, false).unwrap();
    let tree_index = Index::build(build_config(&tmp, "tree", 8), false, true).unwrap();
    assert_eq!(map_index.shard_count(), tree_index.shard_count());

    let mut keys: Vec<String> = pairs.iter().map(|(k, _)| k.clone()).collect();
    keys.push("absent-key".to_string());
    map_index.query(&keys, 0);
    tree_index.query(&keys, 0);
    for position in 0..keys.len() {
        assert_eq!(map_index.answer(position), tree_index.answer(position));
    }
}

#[test]
fn test_corrupt_size_bounds_isolated_per_key() {
    let tmp = TempDir::new().unwrap();
    // value of 3000 bytes violates the configured 1..=1024 bound
    let oversized = "v".repeat(3000);
    common::write_data_file(
        &tmp.path().join("alldata"),
        &[
            ("good".to_string(), "fine".to_string()),
            ("bad".to_string(), oversized),
        ],
    );

    let index = Index::build(build_config(&tmp, "bounds", 4), false, true).unwrap();
    index.query(&["good".to_string(), "bad".to_string()], 0);

    assert_eq!(index.answer(0).as_deref(), Some("fine"));
    assert_eq!(index.answer(1).as_deref(), Some(""));
}
