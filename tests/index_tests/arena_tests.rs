//! RecordArena Tests
//!
//! Tests verify:
//! - Handles resolve to the stored record
//! - Removed handles stop resolving, even after slot reuse
//! - In-place mutation keeps the handle valid

use hoteldb::index::RecordArena;

#[test]
fn test_new_arena_is_empty() {
    let arena: RecordArena<String> = RecordArena::new();
    assert!(arena.is_empty());
    assert_eq!(arena.len(), 0);
}

#[test]
fn test_insert_and_get() {
    let mut arena = RecordArena::new();

    let a = arena.insert("a".to_string());
    let b = arena.insert("b".to_string());

    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(a).map(String::as_str), Some("a"));
    assert_eq!(arena.get(b).map(String::as_str), Some("b"));
}

#[test]
fn test_remove_returns_record() {
    let mut arena = RecordArena::new();
    let a = arena.insert(10);

    assert_eq!(arena.remove(a), Some(10));
    assert!(!arena.contains(a));
    assert_eq!(arena.get(a), None);
    assert!(arena.is_empty());
}

#[test]
fn test_double_remove_is_none() {
    let mut arena = RecordArena::new();
    let a = arena.insert(10);

    arena.remove(a);
    assert_eq!(arena.remove(a), None);
    assert_eq!(arena.len(), 0);
}

#[test]
fn test_reused_slot_does_not_resolve_old_handle() {
    let mut arena = RecordArena::new();

    let old = arena.insert(1);
    arena.remove(old);
    let new = arena.insert(2);

    assert_eq!(old.index(), new.index());
    assert_ne!(old.generation(), new.generation());
    assert_eq!(arena.get(old), None);
    assert_eq!(arena.get(new), Some(&2));
}

#[test]
fn test_get_mut_updates_in_place() {
    let mut arena = RecordArena::new();
    let a = arena.insert(1);

    if let Some(value) = arena.get_mut(a) {
        *value = 99;
    }

    assert_eq!(arena.get(a), Some(&99));
}

#[test]
fn test_iter_skips_vacant_slots() {
    let mut arena = RecordArena::new();
    let a = arena.insert(1);
    let b = arena.insert(2);
    let c = arena.insert(3);
    arena.remove(b);

    let live: Vec<_> = arena.iter().map(|(h, v)| (h, *v)).collect();
    assert_eq!(live, vec![(a, 1), (c, 3)]);
}

#[test]
fn test_try_reserve_succeeds() {
    let mut arena: RecordArena<u64> = RecordArena::new();
    assert!(arena.try_reserve().is_ok());
    arena.insert(1);
    assert_eq!(arena.len(), 1);
}
