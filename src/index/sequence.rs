//! Record sequence
//!
//! Authoritative ordered list of live records (newest insert first).

use std::collections::VecDeque;

use crate::error::Result;

use super::Handle;

/// Insertion-ordered list of record handles
#[derive(Debug, Default)]
pub struct RecordSequence {
    handles: VecDeque<Handle>,
}

impl RecordSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the next push will not allocate
    pub fn try_reserve(&mut self) -> Result<()> {
        self.handles.try_reserve(1)?;
        Ok(())
    }

    /// Add a newly inserted record at the head
    pub fn push_front(&mut self, handle: Handle) {
        self.handles.push_front(handle);
    }

    /// Add a record at the tail (used when loading in file order)
    pub fn push_back(&mut self, handle: Handle) {
        self.handles.push_back(handle);
    }

    /// Remove the first occurrence of `handle`
    pub fn remove(&mut self, handle: Handle) -> bool {
        match self.handles.iter().position(|h| *h == handle) {
            Some(pos) => {
                self.handles.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Traverse head to tail
    pub fn iter(&self) -> impl Iterator<Item = Handle> + '_ {
        self.handles.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
