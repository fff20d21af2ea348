//! Configuration for HotelDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{HotelError, Result};

/// Main configuration for a HotelDB instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all table files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── customer.dat
    ///     ├── room.dat
    ///     └── ...          (one file per table)
    pub data_dir: PathBuf,

    /// When inserts and updates wait for their snapshot to hit disk
    pub snapshot_mode: SnapshotMode,

    // -------------------------------------------------------------------------
    // Index Configuration
    // -------------------------------------------------------------------------
    /// Number of buckets in each hash index (fixed for the table's lifetime)
    pub bucket_count: usize,

    /// How the secondary-key index reacts to update and delete
    pub name_index_policy: NameIndexPolicy,
}

/// Snapshot scheduling for insert/update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMode {
    /// Enqueue the snapshot and return immediately
    Background,

    /// Enqueue the snapshot and wait until it is written
    Synchronous,
}

/// Secondary-key index maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameIndexPolicy {
    /// The name index is only written on insert: update leaves the entry
    /// under the old name and delete leaves a dead entry behind. Lookups
    /// skip both, so a renamed record is not found by name until reload.
    Legacy,

    /// Update and delete keep the name index in step with the records
    Maintained,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./hoteldb_data"),
            snapshot_mode: SnapshotMode::Background,
            bucket_count: 100,
            name_index_policy: NameIndexPolicy::Legacy,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the settings that cannot be expressed in the types
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(HotelError::Config(
                "bucket_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all table files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the snapshot mode
    pub fn snapshot_mode(mut self, mode: SnapshotMode) -> Self {
        self.config.snapshot_mode = mode;
        self
    }

    /// Set the hash index bucket count
    pub fn bucket_count(mut self, count: usize) -> Self {
        self.config.bucket_count = count;
        self
    }

    /// Set the name index policy
    pub fn name_index_policy(mut self, policy: NameIndexPolicy) -> Self {
        self.config.name_index_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
