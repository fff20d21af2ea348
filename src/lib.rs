//! # HotelDB
//!
//! A small embedded record store for hotel data with:
//! - Fixed-shape records addressed by an integer key and an optional name
//! - Per-table dual hash indexes over a single authoritative record sequence
//! - One exclusive guard per table (reads and writes alike)
//! - Whole-file snapshots written by a per-table background writer
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Console / CLI (presentation)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  TableOps (raw fields, rendered text)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Registry                              │
//! │        customer · room · reservation · amenity · ...         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  one per record shape
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Table<R>  (Mutex)                      │
//! │   RecordSequence ── RecordArena ── HashIndex<i32>/<String>   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  full image per mutation (channel)
//!                       ▼
//!               ┌──────────────────┐
//!               │  SnapshotWriter  │ ──► <data_dir>/<table>.dat
//!               └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod index;
pub mod record;
pub mod persistence;
pub mod table;
pub mod registry;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{HotelError, Result};
pub use config::{Config, NameIndexPolicy, SnapshotMode};
pub use record::Record;
pub use registry::{Registry, TableId, TableOps};
pub use table::{IndexReport, Listing, Table};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of HotelDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
