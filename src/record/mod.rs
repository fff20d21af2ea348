//! Record Module
//!
//! The capability set a record shape plugs into a table.
//!
//! ## Responsibilities
//! - Fixed-size binary layout (`encode` / `decode`, exactly `SIZE` bytes)
//! - Primary (integer) and optional secondary (string) key extraction
//! - Parsing raw field values typed by a user (`from_fields`)
//! - One-line rendering for listings
//!
//! ## Layout Conventions
//! ```text
//! ┌──────────┬──────────────────────┬──────────┬─────┐
//! │ i32 (LE) │ text[N] NUL-padded   │ f64 (LE) │ ... │   fields in declaration order,
//! └──────────┴──────────────────────┴──────────┴─────┘   no padding, no header
//! ```

mod codec;
mod shapes;

use bytes::BufMut;

use crate::error::Result;

pub use codec::{check_text, get_text, put_text, Fields};
pub use shapes::{Amenity, AmenityType, Booking, Customer, Reservation, Room};

/// A fixed-shape record stored in a table
pub trait Record: Clone + Send + Sync + 'static {
    /// Display name of the table holding this shape
    const TABLE_NAME: &'static str;

    /// Backing file name inside the data directory
    const FILE_NAME: &'static str;

    /// Encoded size in bytes; every block in the backing file has this size
    const SIZE: usize;

    /// Prompt labels, in the order `from_fields` expects values
    const FIELDS: &'static [&'static str];

    /// Label of the secondary key field, if the shape has one
    const SECONDARY_KEY: Option<&'static str> = None;

    /// Unique integer key
    fn primary_key(&self) -> i32;

    /// Name-like key used by the secondary index
    fn secondary_key(&self) -> Option<&str> {
        None
    }

    /// Check that every field fits its slot
    ///
    /// Tables call this before storing a record, so what is kept in memory
    /// is exactly what a snapshot writes back.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Write exactly `SIZE` bytes
    fn encode<B: BufMut>(&self, buf: &mut B);

    /// Read one record from a block of exactly `SIZE` bytes
    fn decode(block: &[u8]) -> Self;

    /// Render as a single human readable line
    fn render(&self) -> String;

    /// Build a record from raw field values (one per entry of `FIELDS`)
    fn from_fields(fields: &[&str]) -> Result<Self>;
}

/// Encode many records back to back (a table image)
pub fn encode_all<'a, R, I>(records: I) -> Vec<u8>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    let mut buf = Vec::new();
    for record in records {
        record.encode(&mut buf);
    }
    buf
}
