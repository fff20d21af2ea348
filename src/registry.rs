//! Registry Module
//!
//! The fixed set of hotel tables, opened once at startup.
//!
//! ## Responsibilities
//! - Create the data directory and open every table from its file
//! - Address tables by typed accessor, `TableId`, position or name
//! - Expose a shape-independent operation surface (`TableOps`) for the
//!   console and CLI, which only deal in raw field values and rendered text
//! - Drain every table's pending snapshots on close

use std::fmt;
use std::fs;
use std::io::Write;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{HotelError, Result};
use crate::record::{Amenity, AmenityType, Booking, Customer, Record, Reservation, Room};
use crate::table::{IndexReport, Listing, Table};

// =============================================================================
// Table Identifiers
// =============================================================================

/// One of the six configured tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    Customer,
    Room,
    Reservation,
    Amenity,
    AmenityType,
    Booking,
}

impl TableId {
    /// All tables, in registry order
    pub const ALL: [TableId; 6] = [
        TableId::Customer,
        TableId::Room,
        TableId::Reservation,
        TableId::Amenity,
        TableId::AmenityType,
        TableId::Booking,
    ];

    /// Table at `index` in registry order
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in registry order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name of the table
    pub fn name(self) -> &'static str {
        match self {
            TableId::Customer => Customer::TABLE_NAME,
            TableId::Room => Room::TABLE_NAME,
            TableId::Reservation => Reservation::TABLE_NAME,
            TableId::Amenity => Amenity::TABLE_NAME,
            TableId::AmenityType => AmenityType::TABLE_NAME,
            TableId::Booking => Booking::TABLE_NAME,
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableId {
    type Err = HotelError;

    /// Case-insensitive; `_`, `-` and spaces are ignored
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "customer" | "customers" => Ok(TableId::Customer),
            "room" | "rooms" => Ok(TableId::Room),
            "reservation" | "reservations" => Ok(TableId::Reservation),
            "amenity" | "amenities" => Ok(TableId::Amenity),
            "amenitytype" | "amenitytypes" => Ok(TableId::AmenityType),
            "booking" | "bookings" | "customerplacesroom" => Ok(TableId::Booking),
            _ => Err(HotelError::UnknownTable(s.to_string())),
        }
    }
}

// =============================================================================
// Shape-Independent Operations
// =============================================================================

/// Operation surface of a table, independent of its record shape
pub trait TableOps: Send + Sync {
    /// Display name
    fn name(&self) -> &'static str;

    /// Field prompts, in input order
    fn fields(&self) -> &'static [&'static str];

    /// Label of the secondary key, if the table supports name lookup
    fn secondary_key(&self) -> Option<&'static str>;

    fn insert_fields(&self, fields: &[&str]) -> Result<()>;

    fn update_fields(&self, key: i32, fields: &[&str]) -> Result<()>;

    fn delete(&self, key: i32) -> Result<()>;

    /// Rendered record with primary key `key`
    fn render_by_id(&self, key: i32) -> Option<String>;

    /// Rendered record with secondary key `name`
    fn render_by_name(&self, name: &str) -> Option<String>;

    /// Every record rendered, newest insert first
    fn render_all(&self) -> Vec<String>;

    fn display(&self, out: &mut dyn Write) -> Result<Listing>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn index_report(&self) -> IndexReport;

    fn sync(&self) -> Result<()>;
}

impl<R: Record> TableOps for Table<R> {
    fn name(&self) -> &'static str {
        R::TABLE_NAME
    }

    fn fields(&self) -> &'static [&'static str] {
        R::FIELDS
    }

    fn secondary_key(&self) -> Option<&'static str> {
        R::SECONDARY_KEY
    }

    fn insert_fields(&self, fields: &[&str]) -> Result<()> {
        Table::insert_fields(self, fields)
    }

    fn update_fields(&self, key: i32, fields: &[&str]) -> Result<()> {
        Table::update_fields(self, key, fields)
    }

    fn delete(&self, key: i32) -> Result<()> {
        Table::delete(self, key)
    }

    fn render_by_id(&self, key: i32) -> Option<String> {
        self.find_by_id(key).map(|record| record.render())
    }

    fn render_by_name(&self, name: &str) -> Option<String> {
        self.find_by_name(name).map(|record| record.render())
    }

    fn render_all(&self) -> Vec<String> {
        self.list().iter().map(Record::render).collect()
    }

    fn display(&self, out: &mut dyn Write) -> Result<Listing> {
        Table::display(self, out)
    }

    fn len(&self) -> usize {
        Table::len(self)
    }

    fn index_report(&self) -> IndexReport {
        Table::index_report(self)
    }

    fn sync(&self) -> Result<()> {
        Table::sync(self)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Every table of the hotel database
pub struct Registry {
    config: Config,
    customers: Table<Customer>,
    rooms: Table<Room>,
    reservations: Table<Reservation>,
    amenities: Table<Amenity>,
    amenity_types: Table<AmenityType>,
    bookings: Table<Booking>,
}

impl Registry {
    /// Open every table under `config.data_dir`
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        let registry = Self {
            customers: Table::open(&config)?,
            rooms: Table::open(&config)?,
            reservations: Table::open(&config)?,
            amenities: Table::open(&config)?,
            amenity_types: Table::open(&config)?,
            bookings: Table::open(&config)?,
            config,
        };

        tracing::info!(
            "Registry opened at {} ({} tables)",
            registry.config.data_dir.display(),
            TableId::ALL.len()
        );

        Ok(registry)
    }

    /// Table by identifier
    pub fn table(&self, id: TableId) -> &dyn TableOps {
        match id {
            TableId::Customer => &self.customers,
            TableId::Room => &self.rooms,
            TableId::Reservation => &self.reservations,
            TableId::Amenity => &self.amenities,
            TableId::AmenityType => &self.amenity_types,
            TableId::Booking => &self.bookings,
        }
    }

    /// Table by name (see `TableId::from_str`)
    pub fn by_name(&self, name: &str) -> Result<&dyn TableOps> {
        Ok(self.table(name.parse()?))
    }

    /// Table by registry position
    pub fn by_index(&self, index: usize) -> Result<&dyn TableOps> {
        TableId::from_index(index)
            .map(|id| self.table(id))
            .ok_or_else(|| HotelError::UnknownTable(format!("#{}", index)))
    }

    /// All tables, in registry order
    pub fn iter(&self) -> impl Iterator<Item = (TableId, &dyn TableOps)> {
        TableId::ALL.into_iter().map(move |id| (id, self.table(id)))
    }

    pub fn customers(&self) -> &Table<Customer> {
        &self.customers
    }

    pub fn rooms(&self) -> &Table<Room> {
        &self.rooms
    }

    pub fn reservations(&self) -> &Table<Reservation> {
        &self.reservations
    }

    pub fn amenities(&self) -> &Table<Amenity> {
        &self.amenities
    }

    pub fn amenity_types(&self) -> &Table<AmenityType> {
        &self.amenity_types
    }

    pub fn bookings(&self) -> &Table<Booking> {
        &self.bookings
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Wait for every table's pending snapshots, then shut down
    ///
    /// Every table is synced even if an earlier one fails; the first
    /// failure is returned.
    pub fn close(self) -> Result<()> {
        let mut first_error = None;

        for (id, table) in self.iter() {
            if let Err(e) = table.sync() {
                tracing::warn!("Failed to sync table {}: {}", id, e);
                first_error.get_or_insert(e);
            }
        }

        tracing::info!("Registry closed");

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
