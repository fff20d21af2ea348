//! Registry Tests
//!
//! Tests verify:
//! - Opening creates the data directory and one table per shape
//! - Table addressing by id, position and name
//! - The shape-independent `TableOps` surface
//! - Close drains pending snapshots

use std::fs;

use hoteldb::record::{Booking, Customer, Room};
use hoteldb::{Config, HotelError, Listing, Record, Registry, TableId};
use tempfile::TempDir;

fn open(temp: &TempDir) -> Registry {
    Registry::open(Config::builder().data_dir(temp.path().join("data")).build()).unwrap()
}

// =============================================================================
// TableId Tests
// =============================================================================

#[test]
fn test_table_id_order() {
    let names: Vec<&str> = TableId::ALL.iter().map(|id| id.name()).collect();
    assert_eq!(
        names,
        vec!["Customer", "Room", "Reservation", "Amenity", "Amenity_Type", "Booking"]
    );

    for (i, id) in TableId::ALL.iter().enumerate() {
        assert_eq!(id.index(), i);
        assert_eq!(TableId::from_index(i), Some(*id));
    }
    assert_eq!(TableId::from_index(6), None);
}

#[test]
fn test_table_id_parsing() {
    assert_eq!("customer".parse::<TableId>().unwrap(), TableId::Customer);
    assert_eq!("Rooms".parse::<TableId>().unwrap(), TableId::Room);
    assert_eq!("amenity_type".parse::<TableId>().unwrap(), TableId::AmenityType);
    assert_eq!("Amenity-Types".parse::<TableId>().unwrap(), TableId::AmenityType);
    assert_eq!("AMENITIES".parse::<TableId>().unwrap(), TableId::Amenity);
    assert_eq!(
        "customer places room".parse::<TableId>().unwrap(),
        TableId::Booking
    );
}

#[test]
fn test_table_id_rejects_unknown() {
    let err = "guests".parse::<TableId>().unwrap_err();
    assert!(matches!(err, HotelError::UnknownTable(name) if name == "guests"));
}

#[test]
fn test_table_id_display() {
    assert_eq!(TableId::AmenityType.to_string(), "Amenity_Type");
}

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_open_creates_data_dir() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);

    assert!(temp.path().join("data").is_dir());
    assert_eq!(registry.config().data_dir, temp.path().join("data"));
    assert_eq!(registry.iter().count(), 6);
    assert!(registry.iter().all(|(_, table)| table.is_empty()));
}

#[test]
fn test_open_rejects_invalid_config() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp.path())
        .bucket_count(0)
        .build();

    assert!(matches!(Registry::open(config), Err(HotelError::Config(_))));
}

#[test]
fn test_lookup_by_name_and_index() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);

    assert_eq!(registry.by_name("room").unwrap().name(), "Room");
    assert_eq!(registry.by_index(5).unwrap().name(), "Booking");
    assert_eq!(registry.table(TableId::Amenity).name(), "Amenity");

    assert!(matches!(
        registry.by_name("lobby"),
        Err(HotelError::UnknownTable(_))
    ));
    assert!(matches!(
        registry.by_index(6),
        Err(HotelError::UnknownTable(_))
    ));
}

#[test]
fn test_table_ops_metadata() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);

    let customers = registry.table(TableId::Customer);
    assert_eq!(customers.fields(), Customer::FIELDS);
    assert_eq!(customers.secondary_key(), Customer::SECONDARY_KEY);

    let bookings = registry.table(TableId::Booking);
    assert_eq!(bookings.fields(), Booking::FIELDS);
    assert_eq!(bookings.secondary_key(), None);
}

#[test]
fn test_table_ops_round_trip() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);
    let rooms = registry.by_name("room").unwrap();

    rooms.insert_fields(&["101", "Suite", "250", "1"]).unwrap();
    rooms.insert_fields(&["102", "Single", "80", "0"]).unwrap();

    assert_eq!(rooms.len(), 2);
    assert_eq!(
        rooms.render_by_id(101).unwrap(),
        "Room ID: 101, Room Type: Suite, Price: 250.00, Availability: Available"
    );
    assert!(rooms.render_by_name("Single").unwrap().contains("Room ID: 102"));
    assert_eq!(rooms.render_all().len(), 2);

    rooms.update_fields(102, &["102", "Single", "95", "1"]).unwrap();
    assert!(rooms.render_by_id(102).unwrap().contains("Price: 95.00"));

    rooms.delete(101).unwrap();
    assert_eq!(rooms.render_by_id(101), None);
    assert!(rooms.index_report().id_index_consistent());

    // Typed and erased views share the same table
    assert_eq!(registry.rooms().len(), 1);
}

#[test]
fn test_table_ops_errors() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);
    let amenities = registry.table(TableId::Amenity);

    amenities.insert_fields(&["101", "1"]).unwrap();

    assert!(matches!(
        amenities.insert_fields(&["101", "2"]),
        Err(HotelError::DuplicateKey(101))
    ));
    assert!(matches!(
        amenities.insert_fields(&["x", "2"]),
        Err(HotelError::InvalidInput(_))
    ));
    assert!(matches!(amenities.delete(7), Err(HotelError::NotFound(7))));
    assert!(matches!(
        amenities.update_fields(7, &["7", "1"]),
        Err(HotelError::NotFound(7))
    ));
}

#[test]
fn test_table_ops_display() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);
    let types = registry.table(TableId::AmenityType);

    let mut out = Vec::new();
    assert_eq!(types.display(&mut out).unwrap(), Listing::Empty);

    types.insert_fields(&["1", "Wifi"]).unwrap();
    let mut out = Vec::new();
    assert_eq!(types.display(&mut out).unwrap(), Listing::Rows(1));
    assert!(String::from_utf8(out).unwrap().contains("Wifi"));
}

#[test]
fn test_tables_are_independent() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);

    let customers = registry.by_name("customer").unwrap();
    let bookings = registry.by_name("booking").unwrap();

    customers
        .insert_fields(&["1", "Alice", "a@x", "555", "addr"])
        .unwrap();
    bookings.insert_fields(&["1", "101", "555"]).unwrap();

    assert_eq!(registry.customers().len(), 1);
    assert_eq!(registry.bookings().len(), 1);
    assert!(registry.rooms().is_empty());
    assert_eq!(registry.bookings().find_by_id(101).unwrap().customer_id, 1);
}

#[test]
fn test_close_flushes_every_table() {
    let temp = TempDir::new().unwrap();
    let registry = open(&temp);

    registry
        .customers()
        .insert(Customer::from_fields(&["1", "Alice", "a@x", "555", "addr"]).unwrap())
        .unwrap();
    registry
        .rooms()
        .insert(Room::from_fields(&["101", "Suite", "250", "1"]).unwrap())
        .unwrap();
    registry.close().unwrap();

    let data = temp.path().join("data");
    assert_eq!(
        fs::metadata(data.join("customer.dat")).unwrap().len(),
        Customer::SIZE as u64
    );
    assert_eq!(
        fs::metadata(data.join("room.dat")).unwrap().len(),
        Room::SIZE as u64
    );
}
