//! Snapshot File Tests
//!
//! Tests verify:
//! - Missing file loads as empty
//! - Snapshot then load preserves records and order
//! - Trailing partial records are dropped silently
//! - Snapshots are full rewrites, not appends
//! - Failed writes leave no temp file behind

use std::fs;
use std::path::PathBuf;

use hoteldb::persistence::{load, read_blocks, snapshot, write_image};
use hoteldb::record::{AmenityType, Customer};
use hoteldb::{HotelError, Record};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    (temp_dir, path)
}

fn amenity_type(id: i32, name: &str) -> AmenityType {
    AmenityType {
        amenity_id: id,
        amenity_name: name.to_string(),
    }
}

fn customer(id: i32, name: &str) -> Customer {
    Customer {
        customer_id: id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555".to_string(),
        address: "Somewhere".to_string(),
    }
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_empty() {
    let (_temp, path) = setup_temp_file("missing.dat");

    let records: Vec<Customer> = load(&path).unwrap();

    assert!(records.is_empty());
    assert!(!path.exists());
}

#[test]
fn test_load_empty_file_is_empty() {
    let (_temp, path) = setup_temp_file("empty.dat");
    fs::write(&path, b"").unwrap();

    let records: Vec<Customer> = load(&path).unwrap();

    assert!(records.is_empty());
}

#[test]
fn test_load_ignores_trailing_partial_record() {
    let (_temp, path) = setup_temp_file("partial.dat");

    let records = vec![
        amenity_type(1, "Wifi"),
        amenity_type(2, "Minibar"),
        amenity_type(3, "Balcony"),
    ];
    snapshot(&path, &records).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes.extend_from_slice(&[0xAB; 10]);
    fs::write(&path, &bytes).unwrap();

    let loaded: Vec<AmenityType> = load(&path).unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn test_load_file_shorter_than_one_record() {
    let (_temp, path) = setup_temp_file("short.dat");
    fs::write(&path, [1u8, 2, 3]).unwrap();

    let loaded: Vec<AmenityType> = load(&path).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_read_blocks_splits_on_record_size() {
    let (_temp, path) = setup_temp_file("raw.dat");
    fs::write(&path, (0u8..25).collect::<Vec<_>>()).unwrap();

    let blocks = read_blocks(&path, 8).unwrap();

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[1], (8u8..16).collect::<Vec<_>>());
}

#[test]
fn test_read_blocks_rejects_zero_size() {
    let (_temp, path) = setup_temp_file("raw.dat");
    let err = read_blocks(&path, 0).unwrap_err();
    assert!(matches!(err, HotelError::Persistence(_)));
}

// =============================================================================
// Snapshot Tests
// =============================================================================

#[test]
fn test_snapshot_then_load_preserves_order() {
    let (_temp, path) = setup_temp_file("customer.dat");

    let records = vec![customer(3, "Carol"), customer(1, "Alice"), customer(2, "Bob")];
    snapshot(&path, &records).unwrap();

    let loaded: Vec<Customer> = load(&path).unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn test_snapshot_file_size_is_count_times_record_size() {
    let (_temp, path) = setup_temp_file("customer.dat");

    snapshot(&path, &[customer(1, "Alice"), customer(2, "Bob")]).unwrap();

    let len = fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(len, 2 * Customer::SIZE);
}

#[test]
fn test_snapshot_of_zero_records_truncates() {
    let (_temp, path) = setup_temp_file("customer.dat");

    snapshot(&path, &[customer(1, "Alice")]).unwrap();
    snapshot::<Customer, _>(&path, &[]).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    let loaded: Vec<Customer> = load(&path).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_snapshot_rewrites_rather_than_appends() {
    let (_temp, path) = setup_temp_file("customer.dat");

    snapshot(&path, &[customer(1, "Alice"), customer(2, "Bob")]).unwrap();
    snapshot(&path, &[customer(9, "Zed")]).unwrap();

    let loaded: Vec<Customer> = load(&path).unwrap();
    assert_eq!(loaded, vec![customer(9, "Zed")]);
}

#[test]
fn test_write_image_leaves_no_temp_file() {
    let (temp, path) = setup_temp_file("room.dat");

    write_image(&path, &[0u8; 66]).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["room.dat".to_string()]);
}

#[test]
fn test_write_image_into_missing_directory_fails() {
    let (_temp, dir) = setup_temp_file("does/not/exist");
    let path = dir.join("room.dat");

    assert!(write_image(&path, &[1, 2, 3]).is_err());
}

#[test]
fn test_failed_rename_removes_temp_file() {
    let (temp, path) = setup_temp_file("room.dat");

    // A non-empty directory where the file should go makes the rename fail
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), b"x").unwrap();

    assert!(write_image(&path, &[0u8; 66]).is_err());
    assert!(!temp.path().join("room.dat.tmp").exists());
    assert!(path.join("keep").exists());
}
