//! Record arena
//!
//! Slot storage with generational handles. A record never moves once
//! stored, and a handle to a removed record never aliases a newer one.

use crate::error::Result;

/// Stable reference to a record slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// Slot position inside the arena
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation the slot had when this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

enum Slot<R> {
    Occupied { generation: u32, record: R },
    Vacant { generation: u32, next_free: Option<u32> },
}

/// Owns every record of one table
pub struct RecordArena<R> {
    slots: Vec<Slot<R>>,
    /// Head of the vacant-slot free list
    free_head: Option<u32>,
    len: usize,
}

impl<R> RecordArena<R> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Make sure the next `insert` will not allocate
    pub fn try_reserve(&mut self) -> Result<()> {
        if self.free_head.is_none() {
            self.slots.try_reserve(1)?;
        }
        Ok(())
    }

    /// Store a record and return its handle
    ///
    /// Reuses a vacant slot when one exists (with a bumped generation).
    pub fn insert(&mut self, record: R) -> Handle {
        self.len += 1;

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            let (generation, next_free) = match slot {
                Slot::Vacant { generation, next_free } => (*generation, *next_free),
                Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
            };
            *slot = Slot::Occupied { generation, record };
            self.free_head = next_free;
            return Handle { index, generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied { generation: 0, record });
        Handle { index, generation: 0 }
    }

    /// Resolve a handle
    pub fn get(&self, handle: Handle) -> Option<&R> {
        match self.slots.get(handle.index as usize) {
            Some(Slot::Occupied { generation, record }) if *generation == handle.generation => {
                Some(record)
            }
            _ => None,
        }
    }

    /// Resolve a handle for in-place mutation
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut R> {
        match self.slots.get_mut(handle.index as usize) {
            Some(Slot::Occupied { generation, record }) if *generation == handle.generation => {
                Some(record)
            }
            _ => None,
        }
    }

    /// Whether the handle still refers to a live record
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Free a slot, returning the record it held
    pub fn remove(&mut self, handle: Handle) -> Option<R> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == handle.generation => {}
            _ => return None,
        }

        let vacant = Slot::Vacant {
            generation: handle.generation.wrapping_add(1),
            next_free: self.free_head,
        };
        let old = std::mem::replace(slot, vacant);
        self.free_head = Some(handle.index);
        self.len -= 1;

        match old {
            Slot::Occupied { record, .. } => Some(record),
            Slot::Vacant { .. } => None,
        }
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no records are stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over every live record with its handle (slot order)
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &R)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Occupied { generation, record } => Some((
                Handle {
                    index: index as u32,
                    generation: *generation,
                },
                record,
            )),
            Slot::Vacant { .. } => None,
        })
    }
}

impl<R> Default for RecordArena<R> {
    fn default() -> Self {
        Self::new()
    }
}
