//! Concrete hotel record shapes.

use bytes::{Buf, BufMut};

use crate::error::{HotelError, Result};

use super::codec::{check_text, get_text, put_text, Fields};
use super::Record;

// =============================================================================
// Customer
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    const NAME_WIDTH: usize = 100;
    const EMAIL_WIDTH: usize = 100;
    const PHONE_WIDTH: usize = 20;
    const ADDRESS_WIDTH: usize = 200;
}

impl Record for Customer {
    const TABLE_NAME: &'static str = "Customer";
    const FILE_NAME: &'static str = "customer.dat";
    const SIZE: usize =
        4 + Self::NAME_WIDTH + Self::EMAIL_WIDTH + Self::PHONE_WIDTH + Self::ADDRESS_WIDTH;
    const FIELDS: &'static [&'static str] = &["Customer ID", "Name", "Email", "Phone", "Address"];
    const SECONDARY_KEY: Option<&'static str> = Some("Name");

    fn primary_key(&self) -> i32 {
        self.customer_id
    }

    fn secondary_key(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn validate(&self) -> Result<()> {
        check_text("Name", &self.name, Self::NAME_WIDTH)?;
        check_text("Email", &self.email, Self::EMAIL_WIDTH)?;
        check_text("Phone", &self.phone, Self::PHONE_WIDTH)?;
        check_text("Address", &self.address, Self::ADDRESS_WIDTH)
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32_le(self.customer_id);
        put_text(buf, &self.name, Self::NAME_WIDTH);
        put_text(buf, &self.email, Self::EMAIL_WIDTH);
        put_text(buf, &self.phone, Self::PHONE_WIDTH);
        put_text(buf, &self.address, Self::ADDRESS_WIDTH);
    }

    fn decode(mut block: &[u8]) -> Self {
        Self {
            customer_id: block.get_i32_le(),
            name: get_text(&mut block, Self::NAME_WIDTH),
            email: get_text(&mut block, Self::EMAIL_WIDTH),
            phone: get_text(&mut block, Self::PHONE_WIDTH),
            address: get_text(&mut block, Self::ADDRESS_WIDTH),
        }
    }

    fn render(&self) -> String {
        format!(
            "ID: {}, Name: {}, Email: {}, Phone: {}, Address: {}",
            self.customer_id, self.name, self.email, self.phone, self.address
        )
    }

    fn from_fields(values: &[&str]) -> Result<Self> {
        let mut f = Fields::new(values, Self::FIELDS.len())?;
        Ok(Self {
            customer_id: f.int("Customer ID")?,
            name: f.text("Name", Self::NAME_WIDTH)?,
            email: f.text("Email", Self::EMAIL_WIDTH)?,
            phone: f.text("Phone", Self::PHONE_WIDTH)?,
            address: f.text("Address", Self::ADDRESS_WIDTH)?,
        })
    }
}

// =============================================================================
// Room
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub room_id: i32,
    pub room_type: String,
    pub price: f64,
    pub available: bool,
}

impl Room {
    const TYPE_WIDTH: usize = 50;
}

impl Record for Room {
    const TABLE_NAME: &'static str = "Room";
    const FILE_NAME: &'static str = "room.dat";
    const SIZE: usize = 4 + Self::TYPE_WIDTH + 8 + 4;
    const FIELDS: &'static [&'static str] = &[
        "Room ID",
        "Room Type",
        "Room Price",
        "Availability (1 for available, 0 for unavailable)",
    ];
    const SECONDARY_KEY: Option<&'static str> = Some("Room Type");

    fn primary_key(&self) -> i32 {
        self.room_id
    }

    fn secondary_key(&self) -> Option<&str> {
        Some(&self.room_type)
    }

    fn validate(&self) -> Result<()> {
        check_text("Room Type", &self.room_type, Self::TYPE_WIDTH)?;
        if !self.price.is_finite() {
            return Err(HotelError::InvalidInput(format!(
                "Room Price: '{}' is not a number",
                self.price
            )));
        }
        Ok(())
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32_le(self.room_id);
        put_text(buf, &self.room_type, Self::TYPE_WIDTH);
        buf.put_f64_le(self.price);
        buf.put_i32_le(self.available as i32);
    }

    fn decode(mut block: &[u8]) -> Self {
        Self {
            room_id: block.get_i32_le(),
            room_type: get_text(&mut block, Self::TYPE_WIDTH),
            price: block.get_f64_le(),
            available: block.get_i32_le() != 0,
        }
    }

    fn render(&self) -> String {
        format!(
            "Room ID: {}, Room Type: {}, Price: {:.2}, Availability: {}",
            self.room_id,
            self.room_type,
            self.price,
            if self.available { "Available" } else { "Not Available" }
        )
    }

    fn from_fields(values: &[&str]) -> Result<Self> {
        let mut f = Fields::new(values, Self::FIELDS.len())?;
        Ok(Self {
            room_id: f.int("Room ID")?,
            room_type: f.text("Room Type", Self::TYPE_WIDTH)?,
            price: f.float("Room Price")?,
            available: f.int("Availability")? != 0,
        })
    }
}

// =============================================================================
// Reservation
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub reservation_id: i32,
    pub check_in: String,
    pub check_out: String,
    pub customer_id: i32,
    pub room_id: i32,
}

impl Reservation {
    const DATE_WIDTH: usize = 20;
}

impl Record for Reservation {
    const TABLE_NAME: &'static str = "Reservation";
    const FILE_NAME: &'static str = "reservation.dat";
    const SIZE: usize = 4 + 2 * Self::DATE_WIDTH + 4 + 4;
    const FIELDS: &'static [&'static str] = &[
        "Reservation ID",
        "Check-in Date (YYYY-MM-DD)",
        "Check-out Date (YYYY-MM-DD)",
        "Customer ID",
        "Room ID",
    ];

    fn primary_key(&self) -> i32 {
        self.reservation_id
    }

    fn validate(&self) -> Result<()> {
        check_text("Check-in Date", &self.check_in, Self::DATE_WIDTH)?;
        check_text("Check-out Date", &self.check_out, Self::DATE_WIDTH)
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32_le(self.reservation_id);
        put_text(buf, &self.check_in, Self::DATE_WIDTH);
        put_text(buf, &self.check_out, Self::DATE_WIDTH);
        buf.put_i32_le(self.customer_id);
        buf.put_i32_le(self.room_id);
    }

    fn decode(mut block: &[u8]) -> Self {
        Self {
            reservation_id: block.get_i32_le(),
            check_in: get_text(&mut block, Self::DATE_WIDTH),
            check_out: get_text(&mut block, Self::DATE_WIDTH),
            customer_id: block.get_i32_le(),
            room_id: block.get_i32_le(),
        }
    }

    fn render(&self) -> String {
        format!(
            "Reservation ID: {}, Check-in: {}, Check-out: {}, Customer ID: {}, Room ID: {}",
            self.reservation_id, self.check_in, self.check_out, self.customer_id, self.room_id
        )
    }

    fn from_fields(values: &[&str]) -> Result<Self> {
        let mut f = Fields::new(values, Self::FIELDS.len())?;
        Ok(Self {
            reservation_id: f.int("Reservation ID")?,
            check_in: f.text("Check-in Date", Self::DATE_WIDTH)?,
            check_out: f.text("Check-out Date", Self::DATE_WIDTH)?,
            customer_id: f.int("Customer ID")?,
            room_id: f.int("Room ID")?,
        })
    }
}

// =============================================================================
// Amenity
// =============================================================================

/// Links a room to an amenity type; keyed by room
#[derive(Debug, Clone, PartialEq)]
pub struct Amenity {
    pub room_id: i32,
    pub amenity_id: i32,
}

impl Record for Amenity {
    const TABLE_NAME: &'static str = "Amenity";
    const FILE_NAME: &'static str = "amenity.dat";
    const SIZE: usize = 8;
    const FIELDS: &'static [&'static str] = &["Room ID", "Amenity ID"];

    fn primary_key(&self) -> i32 {
        self.room_id
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32_le(self.room_id);
        buf.put_i32_le(self.amenity_id);
    }

    fn decode(mut block: &[u8]) -> Self {
        Self {
            room_id: block.get_i32_le(),
            amenity_id: block.get_i32_le(),
        }
    }

    fn render(&self) -> String {
        format!("Room ID: {}, Amenity ID: {}", self.room_id, self.amenity_id)
    }

    fn from_fields(values: &[&str]) -> Result<Self> {
        let mut f = Fields::new(values, Self::FIELDS.len())?;
        Ok(Self {
            room_id: f.int("Room ID")?,
            amenity_id: f.int("Amenity ID")?,
        })
    }
}

// =============================================================================
// Amenity Type
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AmenityType {
    pub amenity_id: i32,
    pub amenity_name: String,
}

impl AmenityType {
    const NAME_WIDTH: usize = 100;
}

impl Record for AmenityType {
    const TABLE_NAME: &'static str = "Amenity_Type";
    const FILE_NAME: &'static str = "amenity_type.dat";
    const SIZE: usize = 4 + Self::NAME_WIDTH;
    const FIELDS: &'static [&'static str] = &["Amenity ID", "Amenity Name"];
    const SECONDARY_KEY: Option<&'static str> = Some("Amenity Name");

    fn primary_key(&self) -> i32 {
        self.amenity_id
    }

    fn secondary_key(&self) -> Option<&str> {
        Some(&self.amenity_name)
    }

    fn validate(&self) -> Result<()> {
        check_text("Amenity Name", &self.amenity_name, Self::NAME_WIDTH)
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32_le(self.amenity_id);
        put_text(buf, &self.amenity_name, Self::NAME_WIDTH);
    }

    fn decode(mut block: &[u8]) -> Self {
        Self {
            amenity_id: block.get_i32_le(),
            amenity_name: get_text(&mut block, Self::NAME_WIDTH),
        }
    }

    fn render(&self) -> String {
        format!(
            "Amenity ID: {}, Amenity Name: {}",
            self.amenity_id, self.amenity_name
        )
    }

    fn from_fields(values: &[&str]) -> Result<Self> {
        let mut f = Fields::new(values, Self::FIELDS.len())?;
        Ok(Self {
            amenity_id: f.int("Amenity ID")?,
            amenity_name: f.text("Amenity Name", Self::NAME_WIDTH)?,
        })
    }
}

// =============================================================================
// Booking (customer places room)
// =============================================================================

/// A customer holding a room; keyed by room
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub customer_id: i32,
    pub room_id: i32,
    pub phone: String,
}

impl Booking {
    const PHONE_WIDTH: usize = 20;
}

impl Record for Booking {
    const TABLE_NAME: &'static str = "Booking";
    const FILE_NAME: &'static str = "booking.dat";
    const SIZE: usize = 4 + 4 + Self::PHONE_WIDTH;
    const FIELDS: &'static [&'static str] = &["Customer ID", "Room ID", "Phone Number"];

    fn primary_key(&self) -> i32 {
        self.room_id
    }

    fn validate(&self) -> Result<()> {
        check_text("Phone Number", &self.phone, Self::PHONE_WIDTH)
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32_le(self.customer_id);
        buf.put_i32_le(self.room_id);
        put_text(buf, &self.phone, Self::PHONE_WIDTH);
    }

    fn decode(mut block: &[u8]) -> Self {
        Self {
            customer_id: block.get_i32_le(),
            room_id: block.get_i32_le(),
            phone: get_text(&mut block, Self::PHONE_WIDTH),
        }
    }

    fn render(&self) -> String {
        format!(
            "Customer ID: {}, Room ID: {}, Phone: {}",
            self.customer_id, self.room_id, self.phone
        )
    }

    fn from_fields(values: &[&str]) -> Result<Self> {
        let mut f = Fields::new(values, Self::FIELDS.len())?;
        Ok(Self {
            customer_id: f.int("Customer ID")?,
            room_id: f.int("Room ID")?,
            phone: f.text("Phone Number", Self::PHONE_WIDTH)?,
        })
    }
}
