//! Table Module
//!
//! The table engine: one record shape, one guard, one backing file.
//!
//! ## Responsibilities
//! - Insert / find / update / delete / list over a single record shape
//! - Keep the record sequence and the ID index in step on every mutation
//! - Serialize every operation (reads included) behind one guard
//! - Hand a full snapshot to the table's writer after each mutation
//!
//! ## Name Index Staleness
//! Under `NameIndexPolicy::Legacy` the name index is only written on
//! insert: update leaves the entry under the old name and delete leaves a
//! dead entry behind. `Table::index_report` counts both so callers can see
//! them; `NameIndexPolicy::Maintained` keeps the index exact.

mod engine;
mod guard;
mod state;

pub use engine::Table;

/// Outcome of rendering a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// The table has no records
    Empty,

    /// This many records were rendered
    Rows(usize),
}

/// Cross-check of the sequence against both indexes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Records in the sequence
    pub records: usize,
    /// Entries in the ID index
    pub id_entries: usize,
    /// Entries in the name index
    pub name_entries: usize,
    /// Sequence records that `find_by_id` on their own key does not return
    pub unreachable_records: usize,
    /// ID entries whose record is gone or now reports another key
    pub orphan_id_entries: usize,
    /// Records with a name that has no name-index entry under that name
    pub unindexed_names: usize,
    /// Name entries filed under a name the record no longer has
    pub stale_name_entries: usize,
    /// Name entries pointing at deleted records
    pub dangling_name_entries: usize,
}

impl IndexReport {
    /// Sequence and ID index reach exactly the same records
    pub fn id_index_consistent(&self) -> bool {
        self.unreachable_records == 0
            && self.orphan_id_entries == 0
            && self.id_entries == self.records
    }

    /// Name index matches the records exactly
    pub fn name_index_consistent(&self) -> bool {
        self.unindexed_names == 0 && self.stale_name_entries == 0 && self.dangling_name_entries == 0
    }
}
