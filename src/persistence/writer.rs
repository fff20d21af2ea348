//! Snapshot Writer
//!
//! One background thread per table that owns the table's backing file.
//!
//! Images are queued while the table guard is held, so the queue order is
//! the mutation order. When several images are waiting only the newest is
//! written; older ones describe states that are already superseded.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use bytes::Bytes;
use crossbeam::channel::{self, Receiver, Sender};

use crate::error::{HotelError, Result};

use super::write_image;

/// Acknowledgement for a barrier: the outcome of the last write before it
pub type SnapshotAck = std::result::Result<(), String>;

enum Request {
    /// Full table image to write
    Image(Bytes),
    /// Reply once every earlier image has been written
    Barrier(Sender<SnapshotAck>),
}

/// Handle to a table's background snapshot thread
pub struct SnapshotWriter {
    path: PathBuf,
    sender: Option<Sender<Request>>,
    handle: Option<JoinHandle<()>>,
    /// Number of images actually written to disk
    written: Arc<AtomicU64>,
}

impl SnapshotWriter {
    /// Start the writer thread for `path`
    pub fn spawn(table_name: &str, path: &Path) -> Result<Self> {
        let (sender, receiver) = channel::unbounded();
        let written = Arc::new(AtomicU64::new(0));

        let thread_path = path.to_path_buf();
        let thread_written = Arc::clone(&written);
        let thread_table = table_name.to_string();

        let handle = thread::Builder::new()
            .name(format!("snapshot-{}", table_name.to_lowercase()))
            .spawn(move || run(&thread_table, &thread_path, receiver, &thread_written))?;

        Ok(Self {
            path: path.to_path_buf(),
            sender: Some(sender),
            handle: Some(handle),
            written,
        })
    }

    /// Queue an image; returns without waiting for the write
    pub fn submit(&self, image: Vec<u8>) -> Result<()> {
        self.send(Request::Image(Bytes::from(image)))
    }

    /// Queue a barrier; the receiver fires once all earlier images are written
    pub fn barrier(&self) -> Result<Receiver<SnapshotAck>> {
        let (ack_tx, ack_rx) = channel::bounded(1);
        self.send(Request::Barrier(ack_tx))?;
        Ok(ack_rx)
    }

    /// Block until everything queued so far is on disk
    pub fn sync(&self) -> Result<()> {
        let ack = self.barrier()?;
        Self::wait(&ack)
    }

    /// Wait on a receiver returned by `barrier`
    pub fn wait(ack: &Receiver<SnapshotAck>) -> Result<()> {
        match ack.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(msg)) => Err(HotelError::Persistence(msg)),
            Err(_) => Err(HotelError::WriterClosed),
        }
    }

    /// Backing file this writer owns
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of images written so far
    pub fn snapshots_written(&self) -> u64 {
        self.written.load(Ordering::SeqCst)
    }

    fn send(&self, request: Request) -> Result<()> {
        match &self.sender {
            Some(sender) => sender.send(request).map_err(|_| HotelError::WriterClosed),
            None => Err(HotelError::WriterClosed),
        }
    }
}

impl Drop for SnapshotWriter {
    /// Close the queue and wait for pending images to land
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Snapshot thread for {} panicked", self.path.display());
            }
        }
    }
}

fn run(table: &str, path: &Path, receiver: Receiver<Request>, written: &AtomicU64) {
    tracing::debug!("Snapshot writer started for {}", table);

    // Outcome of the most recent write; barriers report it
    let mut last: SnapshotAck = Ok(());

    while let Ok(first) = receiver.recv() {
        let mut latest: Option<Bytes> = None;
        let mut waiters: Vec<Sender<SnapshotAck>> = Vec::new();
        let mut superseded = 0usize;

        let mut absorb = |request: Request| match request {
            Request::Image(image) => {
                if latest.replace(image).is_some() {
                    superseded += 1;
                }
            }
            Request::Barrier(ack) => waiters.push(ack),
        };

        absorb(first);
        while let Ok(next) = receiver.try_recv() {
            absorb(next);
        }

        if superseded > 0 {
            tracing::trace!("{}: coalesced {} superseded snapshots", table, superseded);
        }

        if let Some(image) = latest {
            last = match write_image(path, &image) {
                Ok(()) => {
                    written.fetch_add(1, Ordering::SeqCst);
                    tracing::debug!("Backup completed for {}", table);
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!("Backup failed for {}: {}", table, e);
                    Err(e.to_string())
                }
            };
        }

        for waiter in waiters {
            let _ = waiter.send(last.clone());
        }
    }

    tracing::debug!("Snapshot writer stopped for {}", table);
}
