//! Fixed-bucket hash index
//!
//! Chained buckets of `(key, handle)` entries. New entries go to the front
//! of their chain, so a forward walk sees the most recent entry first.

use std::borrow::Borrow;

use crate::error::Result;

use super::Handle;

/// Keys that can pick a bucket
pub trait IndexKey {
    /// Bucket position in `0..bucket_count`
    fn bucket(&self, bucket_count: usize) -> usize;
}

impl IndexKey for i32 {
    fn bucket(&self, bucket_count: usize) -> usize {
        // Euclidean so negative ids still land in range
        (*self as i64).rem_euclid(bucket_count as i64) as usize
    }
}

impl IndexKey for str {
    fn bucket(&self, bucket_count: usize) -> usize {
        (djb2(self) % bucket_count as u64) as usize
    }
}

impl IndexKey for String {
    fn bucket(&self, bucket_count: usize) -> usize {
        self.as_str().bucket(bucket_count)
    }
}

/// djb2 string hash: `h = h * 33 + byte`, seeded with 5381
pub fn djb2(key: &str) -> u64 {
    key.bytes()
        .fold(5381u64, |hash, c| hash.wrapping_shl(5).wrapping_add(hash).wrapping_add(c as u64))
}

/// One link of a bucket chain
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry<K> {
    /// Key the entry was filed under
    pub key: K,
    /// Record the entry points at
    pub handle: Handle,
}

/// Hash index from `K` to record handles
pub struct HashIndex<K> {
    /// Each chain is stored oldest → newest; walks run in reverse
    buckets: Vec<Vec<IndexEntry<K>>>,
    len: usize,
}

impl<K: IndexKey + PartialEq> HashIndex<K> {
    /// Create an index with a fixed number of buckets (at least 1)
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        Self {
            buckets: (0..bucket_count).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Make sure inserting under `key` will not allocate
    pub fn try_reserve<Q>(&mut self, key: &Q) -> Result<()>
    where
        Q: IndexKey + ?Sized,
    {
        let bucket = key.bucket(self.buckets.len());
        self.buckets[bucket].try_reserve(1)?;
        Ok(())
    }

    /// Prepend an entry to the chain for `key`
    pub fn insert(&mut self, key: K, handle: Handle) {
        let bucket = key.bucket(self.buckets.len());
        self.buckets[bucket].push(IndexEntry { key, handle });
        self.len += 1;
    }

    /// Walk the whole bucket `key` hashes to, most recent entry first
    ///
    /// Yields entries filed under any key that shares the bucket; callers
    /// decide what counts as a match.
    pub fn bucket_entries<Q>(&self, key: &Q) -> impl Iterator<Item = &IndexEntry<K>>
    where
        Q: IndexKey + ?Sized,
    {
        let bucket = key.bucket(self.buckets.len());
        self.buckets[bucket].iter().rev()
    }

    /// First handle filed under exactly `key`
    pub fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: IndexKey + PartialEq + ?Sized,
    {
        self.bucket_entries(key)
            .find(|entry| Borrow::<Q>::borrow(&entry.key) == key)
            .map(|entry| entry.handle)
    }

    /// Remove the most recent entry filed under `key` that points at `handle`
    pub fn remove<Q>(&mut self, key: &Q, handle: Handle) -> bool
    where
        K: Borrow<Q>,
        Q: IndexKey + PartialEq + ?Sized,
    {
        let bucket = key.bucket(self.buckets.len());
        let chain = &mut self.buckets[bucket];

        match chain
            .iter()
            .rposition(|entry| entry.handle == handle && Borrow::<Q>::borrow(&entry.key) == key)
        {
            Some(pos) => {
                chain.remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Remove every entry pointing at `handle`, whatever key it is filed under
    pub fn remove_handle(&mut self, handle: Handle) -> usize {
        let mut removed = 0;
        for chain in &mut self.buckets {
            let before = chain.len();
            chain.retain(|entry| entry.handle != handle);
            removed += before - chain.len();
        }
        self.len -= removed;
        removed
    }

    /// Iterate over all entries, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry<K>> {
        self.buckets.iter().flat_map(|chain| chain.iter().rev())
    }

    /// Length of the longest chain
    pub fn max_chain_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index has no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
