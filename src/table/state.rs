//! Unguarded table state
//!
//! Record storage plus the structures derived from it. Every method here
//! assumes the caller holds the table guard.

use crate::config::NameIndexPolicy;
use crate::error::{HotelError, Result};
use crate::index::{Handle, HashIndex, RecordArena, RecordSequence};
use crate::record::{encode_all, Record};

use super::IndexReport;

/// Sequence, arena and both indexes of one table
pub(crate) struct TableState<R> {
    arena: RecordArena<R>,
    /// Authoritative order: newest insert first
    sequence: RecordSequence,
    id_index: HashIndex<i32>,
    /// Best-effort; duplicates chain
    name_index: HashIndex<String>,
    policy: NameIndexPolicy,
}

impl<R: Record> TableState<R> {
    pub(crate) fn new(bucket_count: usize, policy: NameIndexPolicy) -> Self {
        Self {
            arena: RecordArena::new(),
            sequence: RecordSequence::new(),
            id_index: HashIndex::new(bucket_count),
            name_index: HashIndex::new(bucket_count),
            policy,
        }
    }

    /// Rebuild from loaded records, keeping file order
    ///
    /// A record whose key already appeared earlier in the file is dropped.
    pub(crate) fn from_records(
        records: Vec<R>,
        bucket_count: usize,
        policy: NameIndexPolicy,
    ) -> Result<Self> {
        let mut state = Self::new(bucket_count, policy);

        for record in records {
            let key = record.primary_key();
            if state.find_by_id(key).is_some() {
                tracing::warn!(
                    "{}: skipping duplicate record with ID {} in snapshot",
                    R::TABLE_NAME,
                    key
                );
                continue;
            }
            let handle = state.link(record)?;
            // link() prepends; loading wants file order
            state.sequence.remove(handle);
            state.sequence.push_back(handle);
        }

        Ok(state)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Handle of the record whose current primary key is `key`
    pub(crate) fn find_by_id(&self, key: i32) -> Option<Handle> {
        self.id_index
            .bucket_entries(&key)
            .map(|entry| entry.handle)
            .find(|&handle| {
                self.arena
                    .get(handle)
                    .map_or(false, |record| record.primary_key() == key)
            })
    }

    /// Handle of the newest record whose current secondary key is `name`
    pub(crate) fn find_by_name(&self, name: &str) -> Option<Handle> {
        self.name_index
            .bucket_entries(name)
            .map(|entry| entry.handle)
            .find(|&handle| {
                self.arena
                    .get(handle)
                    .and_then(|record| record.secondary_key())
                    .map_or(false, |current| current == name)
            })
    }

    pub(crate) fn get(&self, handle: Handle) -> Option<&R> {
        self.arena.get(handle)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub(crate) fn insert(&mut self, record: R) -> Result<Handle> {
        let key = record.primary_key();
        if self.find_by_id(key).is_some() {
            return Err(HotelError::DuplicateKey(key));
        }
        self.link(record)
    }

    /// Overwrite the record with key `key` in place
    pub(crate) fn update(&mut self, key: i32, record: R) -> Result<Handle> {
        let handle = self.find_by_id(key).ok_or(HotelError::NotFound(key))?;

        let new_key = record.primary_key();
        if new_key != key && self.find_by_id(new_key).is_some() {
            return Err(HotelError::DuplicateKey(new_key));
        }

        let new_name = record.secondary_key().map(str::to_owned);

        // Reserve before touching anything so a failure leaves no trace
        self.id_index.try_reserve(&new_key)?;
        if self.policy == NameIndexPolicy::Maintained {
            if let Some(name) = &new_name {
                self.name_index.try_reserve(name.as_str())?;
            }
        }

        self.id_index.remove(&key, handle);

        match self.arena.get_mut(handle) {
            Some(slot) => *slot = record,
            None => return Err(HotelError::NotFound(key)),
        }

        self.id_index.insert(new_key, handle);

        if self.policy == NameIndexPolicy::Maintained {
            self.name_index.remove_handle(handle);
            if let Some(name) = new_name {
                self.name_index.insert(name, handle);
            }
        }

        Ok(handle)
    }

    /// Remove the first record in sequence order whose key is `key`
    pub(crate) fn delete(&mut self, key: i32) -> Result<R> {
        let handle = self
            .sequence
            .iter()
            .find(|&handle| {
                self.arena
                    .get(handle)
                    .map_or(false, |record| record.primary_key() == key)
            })
            .ok_or(HotelError::NotFound(key))?;

        self.id_index.remove(&key, handle);
        if self.policy == NameIndexPolicy::Maintained {
            self.name_index.remove_handle(handle);
        }
        self.sequence.remove(handle);

        self.arena.remove(handle).ok_or(HotelError::NotFound(key))
    }

    /// Store a record and add it to the sequence and both indexes
    fn link(&mut self, record: R) -> Result<Handle> {
        let key = record.primary_key();
        let name = record.secondary_key().map(str::to_owned);

        self.arena.try_reserve()?;
        self.sequence.try_reserve()?;
        self.id_index.try_reserve(&key)?;
        if let Some(name) = &name {
            self.name_index.try_reserve(name.as_str())?;
        }

        let handle = self.arena.insert(record);
        self.sequence.push_front(handle);
        self.id_index.insert(key, handle);
        if let Some(name) = name {
            self.name_index.insert(name, handle);
        }

        Ok(handle)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Records in sequence order
    pub(crate) fn records(&self) -> impl Iterator<Item = &R> {
        self.sequence
            .iter()
            .filter_map(move |handle| self.arena.get(handle))
    }

    /// Encoded image of the whole table, in sequence order
    pub(crate) fn image(&self) -> Vec<u8> {
        encode_all(self.records())
    }

    pub(crate) fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Compare the sequence against both indexes
    pub(crate) fn report(&self) -> IndexReport {
        let mut report = IndexReport {
            records: self.sequence.len(),
            id_entries: self.id_index.len(),
            name_entries: self.name_index.len(),
            ..IndexReport::default()
        };

        for handle in self.sequence.iter() {
            let Some(record) = self.arena.get(handle) else {
                report.unreachable_records += 1;
                continue;
            };

            if self.find_by_id(record.primary_key()) != Some(handle) {
                report.unreachable_records += 1;
            }

            if let Some(name) = record.secondary_key() {
                let indexed = self
                    .name_index
                    .bucket_entries(name)
                    .any(|entry| entry.handle == handle && entry.key == name);
                if !indexed {
                    report.unindexed_names += 1;
                }
            }
        }

        for entry in self.id_index.iter() {
            let live = self
                .arena
                .get(entry.handle)
                .map_or(false, |record| record.primary_key() == entry.key);
            if !live {
                report.orphan_id_entries += 1;
            }
        }

        for entry in self.name_index.iter() {
            let current = self
                .arena
                .get(entry.handle)
                .and_then(|record| record.secondary_key());
            match current {
                None => report.dangling_name_entries += 1,
                Some(name) if name != entry.key => report.stale_name_entries += 1,
                Some(_) => {}
            }
        }

        report
    }
}
