//! RecordSequence Tests
//!
//! Tests verify:
//! - Prepend-on-insert ordering
//! - Tail append for file-order loading
//! - Removal from head, middle and tail

use hoteldb::index::{Handle, RecordArena, RecordSequence};

fn handles(n: usize) -> Vec<Handle> {
    let mut arena = RecordArena::new();
    (0..n).map(|i| arena.insert(i)).collect()
}

#[test]
fn test_new_sequence_is_empty() {
    let seq = RecordSequence::new();
    assert!(seq.is_empty());
    assert_eq!(seq.iter().count(), 0);
}

#[test]
fn test_push_front_orders_newest_first() {
    let h = handles(3);
    let mut seq = RecordSequence::new();

    for handle in &h {
        seq.push_front(*handle);
    }

    let order: Vec<Handle> = seq.iter().collect();
    assert_eq!(order, vec![h[2], h[1], h[0]]);
}

#[test]
fn test_push_back_keeps_order() {
    let h = handles(3);
    let mut seq = RecordSequence::new();

    for handle in &h {
        seq.push_back(*handle);
    }

    let order: Vec<Handle> = seq.iter().collect();
    assert_eq!(order, h);
}

#[test]
fn test_remove_head_middle_tail() {
    let h = handles(4);
    let mut seq = RecordSequence::new();
    for handle in &h {
        seq.push_back(*handle);
    }

    assert!(seq.remove(h[0]));
    assert!(seq.remove(h[2]));
    assert!(seq.remove(h[3]));

    let order: Vec<Handle> = seq.iter().collect();
    assert_eq!(order, vec![h[1]]);
    assert_eq!(seq.len(), 1);
}

#[test]
fn test_remove_missing_handle() {
    let h = handles(2);
    let mut seq = RecordSequence::new();
    seq.push_front(h[0]);

    assert!(!seq.remove(h[1]));
    assert_eq!(seq.len(), 1);
}
