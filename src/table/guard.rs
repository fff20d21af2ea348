//! Exclusive-access guard
//!
//! Wraps the parking_lot guard so lock hand-off shows up in traces.

use std::ops::{Deref, DerefMut};

use parking_lot::MutexGuard;

/// Held for the duration of one table operation
pub struct TableGuard<'a, T> {
    table: &'static str,
    inner: MutexGuard<'a, T>,
}

impl<'a, T> TableGuard<'a, T> {
    pub(crate) fn new(table: &'static str, inner: MutexGuard<'a, T>) -> Self {
        tracing::trace!("Table {} is now locked", table);
        Self { table, inner }
    }
}

impl<T> Deref for TableGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for TableGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T> Drop for TableGuard<'_, T> {
    fn drop(&mut self) {
        tracing::trace!("Table {} is now unlocked", self.table);
    }
}
