//! Table implementation
//!
//! Guarded operations over `TableState` plus snapshot scheduling.

use std::io::Write;
use std::path::{Path, PathBuf};

use crossbeam::channel::Receiver;
use parking_lot::Mutex;

use crate::config::{Config, SnapshotMode};
use crate::error::Result;
use crate::persistence::{self, SnapshotAck, SnapshotWriter};
use crate::record::Record;

use super::guard::TableGuard;
use super::state::TableState;
use super::{IndexReport, Listing};

/// A table of records of shape `R`
///
/// ## Concurrency Model
///
/// - Every public operation, lookups included, takes the table guard
/// - Mutations queue a full snapshot image before the guard is released,
///   so the writer sees images in mutation order
/// - Insert and update return once the image is queued (unless
///   `SnapshotMode::Synchronous`); delete waits until it is written
pub struct Table<R: Record> {
    /// Backing file
    path: PathBuf,

    /// Records and indexes behind the exclusive guard
    state: Mutex<TableState<R>>,

    /// Background writer owning `path`
    writer: SnapshotWriter,

    snapshot_mode: SnapshotMode,
}

impl<R: Record> Table<R> {
    /// Open the table's file inside `config.data_dir`
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_path(&config.data_dir.join(R::FILE_NAME), config)
    }

    /// Open a table backed by an explicit file
    ///
    /// On startup:
    /// 1. Load every complete record from `path` (missing file = empty)
    /// 2. Rebuild the sequence and both indexes in file order
    /// 3. Start the snapshot writer
    pub fn open_path(path: &Path, config: &Config) -> Result<Self> {
        config.validate()?;

        let records = persistence::load::<R>(path)?;
        let loaded = records.len();
        let state = TableState::from_records(records, config.bucket_count, config.name_index_policy)?;

        tracing::info!(
            "Table {} opened from {} ({} records)",
            R::TABLE_NAME,
            path.display(),
            loaded
        );

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(state),
            writer: SnapshotWriter::spawn(R::TABLE_NAME, path)?,
            snapshot_mode: config.snapshot_mode,
        })
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Insert a new record
    ///
    /// Fails with `DuplicateKey` if a record with the same primary key exists,
    /// or `InvalidInput` if a field does not fit its slot.
    pub fn insert(&self, record: R) -> Result<()> {
        record.validate()?;
        let ack = {
            let mut state = self.lock();
            let key = record.primary_key();
            state.insert(record)?;
            tracing::debug!("{}: inserted record {}", R::TABLE_NAME, key);
            self.schedule_snapshot(&state, self.snapshot_mode == SnapshotMode::Synchronous)
        };
        self.await_snapshot(ack);
        Ok(())
    }

    /// Parse raw field values and insert the result
    pub fn insert_fields(&self, fields: &[&str]) -> Result<()> {
        self.insert(R::from_fields(fields)?)
    }

    /// Look up a record by primary key
    pub fn find_by_id(&self, key: i32) -> Option<R> {
        let state = self.lock();
        state
            .find_by_id(key)
            .and_then(|handle| state.get(handle))
            .cloned()
    }

    /// Look up a record by secondary key (always `None` for shapes without one)
    pub fn find_by_name(&self, name: &str) -> Option<R> {
        if R::SECONDARY_KEY.is_none() {
            return None;
        }
        let state = self.lock();
        state
            .find_by_name(name)
            .and_then(|handle| state.get(handle))
            .cloned()
    }

    /// Overwrite the record with primary key `key`
    ///
    /// The new record may carry a different key, as long as no other
    /// record already uses it.
    pub fn update(&self, key: i32, record: R) -> Result<()> {
        record.validate()?;
        let ack = {
            let mut state = self.lock();
            let new_key = record.primary_key();
            state.update(key, record)?;
            tracing::debug!("{}: updated record {} (now {})", R::TABLE_NAME, key, new_key);
            self.schedule_snapshot(&state, self.snapshot_mode == SnapshotMode::Synchronous)
        };
        self.await_snapshot(ack);
        Ok(())
    }

    /// Parse raw field values and update the record with key `key`
    pub fn update_fields(&self, key: i32, fields: &[&str]) -> Result<()> {
        self.update(key, R::from_fields(fields)?)
    }

    /// Remove the record with primary key `key`
    ///
    /// Returns once the backing file no longer holds the record (or the
    /// write failed, which is logged).
    pub fn delete(&self, key: i32) -> Result<()> {
        let ack = {
            let mut state = self.lock();
            state.delete(key)?;
            tracing::debug!("{}: deleted record {}", R::TABLE_NAME, key);
            self.schedule_snapshot(&state, true)
        };
        self.await_snapshot(ack);
        Ok(())
    }

    /// Copy of every record, newest insert first
    pub fn list(&self) -> Vec<R> {
        self.lock().records().cloned().collect()
    }

    /// Render every record to `out`, one per line
    pub fn display<W: Write + ?Sized>(&self, out: &mut W) -> Result<Listing> {
        let state = self.lock();

        writeln!(out, "\n{} List:", R::TABLE_NAME)?;

        if state.len() == 0 {
            writeln!(out, "No records found!")?;
            return Ok(Listing::Empty);
        }

        let mut rows = 0;
        for record in state.records() {
            writeln!(out, "{}", record.render())?;
            rows += 1;
        }
        Ok(Listing::Rows(rows))
    }

    /// Block until every queued snapshot is written
    pub fn sync(&self) -> Result<()> {
        self.writer.sync()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Table display name
    pub fn name(&self) -> &'static str {
        R::TABLE_NAME
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the table has no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cross-check the sequence against both indexes
    pub fn index_report(&self) -> IndexReport {
        self.lock().report()
    }

    /// Number of snapshots the writer has completed
    pub fn snapshots_written(&self) -> u64 {
        self.writer.snapshots_written()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn lock(&self) -> TableGuard<'_, TableState<R>> {
        TableGuard::new(R::TABLE_NAME, self.state.lock())
    }

    /// Queue the current image; optionally queue a barrier to wait on
    ///
    /// Called with the guard held so images reach the writer in order.
    fn schedule_snapshot(
        &self,
        state: &TableState<R>,
        wait: bool,
    ) -> Option<Receiver<SnapshotAck>> {
        if let Err(e) = self.writer.submit(state.image()) {
            tracing::warn!("{}: could not schedule backup: {}", R::TABLE_NAME, e);
            return None;
        }

        if !wait {
            return None;
        }

        match self.writer.barrier() {
            Ok(ack) => Some(ack),
            Err(e) => {
                tracing::warn!("{}: could not schedule backup: {}", R::TABLE_NAME, e);
                None
            }
        }
    }

    /// Wait for a barrier outside the guard; failures are only logged
    fn await_snapshot(&self, ack: Option<Receiver<SnapshotAck>>) {
        if let Some(ack) = ack {
            if let Err(e) = SnapshotWriter::wait(&ack) {
                tracing::warn!("{}: backup failed: {}", R::TABLE_NAME, e);
            }
        }
    }
}

impl<R: Record> std::fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &R::TABLE_NAME)
            .field("path", &self.path)
            .finish()
    }
}
