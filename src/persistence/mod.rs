//! Persistence Module
//!
//! Whole-file snapshots of a table's records.
//!
//! ## Responsibilities
//! - Load a table file into records at startup (missing file = empty table)
//! - Rewrite a table file from the full record set
//! - Run one background writer per table that applies snapshots in order
//!
//! ## File Format
//! ```text
//! ┌──────────────┬──────────────┬─────┬──────────────┐
//! │ record 0     │ record 1     │ ... │ record n-1   │   offset = i * SIZE
//! │ (SIZE bytes) │ (SIZE bytes) │     │ (SIZE bytes) │   no header, no count
//! └──────────────┴──────────────┴─────┴──────────────┘
//! ```
//! A trailing block shorter than `SIZE` is ignored on load.

mod file;
mod writer;

pub use file::{load, read_blocks, snapshot, write_image};
pub use writer::{SnapshotAck, SnapshotWriter};
