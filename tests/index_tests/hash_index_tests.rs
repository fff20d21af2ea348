//! HashIndex Tests
//!
//! Tests verify:
//! - Bucket selection for integer and string keys
//! - Most-recent-first chain order
//! - Targeted removal of a single entry
//! - Chaining of colliding and duplicate keys

use hoteldb::index::{djb2, Handle, HashIndex, IndexKey, RecordArena};

// =============================================================================
// Helper Functions
// =============================================================================

fn handles(n: usize) -> Vec<Handle> {
    let mut arena = RecordArena::new();
    (0..n).map(|i| arena.insert(i)).collect()
}

// =============================================================================
// Bucket Selection Tests
// =============================================================================

#[test]
fn test_integer_bucket_is_key_mod_count() {
    assert_eq!(0i32.bucket(100), 0);
    assert_eq!(42i32.bucket(100), 42);
    assert_eq!(142i32.bucket(100), 42);
    assert_eq!(7i32.bucket(1), 0);
}

#[test]
fn test_negative_integer_bucket_in_range() {
    assert_eq!((-1i32).bucket(100), 99);
    assert_eq!((-100i32).bucket(100), 0);
    assert!(i32::MIN.bucket(100) < 100);
}

#[test]
fn test_djb2_known_values() {
    assert_eq!(djb2(""), 5381);
    // 5381 * 33 + 'a'
    assert_eq!(djb2("a"), 177_670);
    assert_eq!(djb2("ab"), 177_670 * 33 + 98);
}

#[test]
fn test_string_bucket_matches_djb2() {
    let name = "Alice";
    assert_eq!(name.bucket(100), (djb2(name) % 100) as usize);
    assert_eq!(name.to_string().bucket(100), name.bucket(100));
}

#[test]
fn test_long_string_hash_does_not_overflow() {
    let long = "x".repeat(10_000);
    assert!(long.as_str().bucket(100) < 100);
}

// =============================================================================
// Insert / Find Tests
// =============================================================================

#[test]
fn test_new_index_is_empty() {
    let index: HashIndex<i32> = HashIndex::new(100);
    assert!(index.is_empty());
    assert_eq!(index.bucket_count(), 100);
    assert_eq!(index.find(&1), None);
}

#[test]
fn test_zero_bucket_count_is_clamped() {
    let index: HashIndex<i32> = HashIndex::new(0);
    assert_eq!(index.bucket_count(), 1);
}

#[test]
fn test_insert_and_find() {
    let h = handles(2);
    let mut index = HashIndex::new(100);

    index.insert(1, h[0]);
    index.insert(2, h[1]);

    assert_eq!(index.len(), 2);
    assert_eq!(index.find(&1), Some(h[0]));
    assert_eq!(index.find(&2), Some(h[1]));
    assert_eq!(index.find(&3), None);
}

#[test]
fn test_find_by_str_on_string_index() {
    let h = handles(1);
    let mut index: HashIndex<String> = HashIndex::new(100);

    index.insert("Alice".to_string(), h[0]);

    assert_eq!(index.find("Alice"), Some(h[0]));
    assert_eq!(index.find("alice"), None);
}

#[test]
fn test_colliding_keys_share_bucket_but_resolve_separately() {
    let h = handles(2);
    let mut index = HashIndex::new(10);

    index.insert(3, h[0]);
    index.insert(13, h[1]);

    assert_eq!(index.bucket_entries(&3).count(), 2);
    assert_eq!(index.find(&3), Some(h[0]));
    assert_eq!(index.find(&13), Some(h[1]));
    assert_eq!(index.max_chain_len(), 2);
}

#[test]
fn test_duplicate_key_most_recent_wins() {
    let h = handles(2);
    let mut index: HashIndex<String> = HashIndex::new(100);

    index.insert("Suite".to_string(), h[0]);
    index.insert("Suite".to_string(), h[1]);

    assert_eq!(index.find("Suite"), Some(h[1]));
    let chain: Vec<Handle> = index.bucket_entries("Suite").map(|e| e.handle).collect();
    assert_eq!(chain, vec![h[1], h[0]]);
}

// =============================================================================
// Removal Tests
// =============================================================================

#[test]
fn test_remove_specific_entry() {
    let h = handles(2);
    let mut index: HashIndex<String> = HashIndex::new(100);

    index.insert("Suite".to_string(), h[0]);
    index.insert("Suite".to_string(), h[1]);

    assert!(index.remove("Suite", h[1]));
    assert_eq!(index.find("Suite"), Some(h[0]));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_remove_missing_entry_is_noop() {
    let h = handles(2);
    let mut index = HashIndex::new(100);

    index.insert(1, h[0]);

    assert!(!index.remove(&1, h[1]));
    assert!(!index.remove(&2, h[0]));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_remove_from_middle_of_chain() {
    let h = handles(3);
    let mut index = HashIndex::new(10);

    index.insert(1, h[0]);
    index.insert(11, h[1]);
    index.insert(21, h[2]);

    assert!(index.remove(&11, h[1]));

    let keys: Vec<i32> = index.bucket_entries(&1).map(|e| e.key).collect();
    assert_eq!(keys, vec![21, 1]);
}

#[test]
fn test_remove_handle_under_any_key() {
    let h = handles(2);
    let mut index: HashIndex<String> = HashIndex::new(100);

    index.insert("Old".to_string(), h[0]);
    index.insert("New".to_string(), h[0]);
    index.insert("Other".to_string(), h[1]);

    assert_eq!(index.remove_handle(h[0]), 2);
    assert_eq!(index.len(), 1);
    assert_eq!(index.find("Other"), Some(h[1]));
}

#[test]
fn test_iter_visits_every_entry() {
    let h = handles(5);
    let mut index = HashIndex::new(3);

    for (i, handle) in h.iter().enumerate() {
        index.insert(i as i32, *handle);
    }

    let mut keys: Vec<i32> = index.iter().map(|e| e.key).collect();
    keys.sort();
    assert_eq!(keys, vec![0, 1, 2, 3, 4]);
}
