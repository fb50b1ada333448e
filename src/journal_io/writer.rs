//! Single background writer for store snapshots.
//!
//! Mutations hand their serialized snapshot to the writer and return at once.
//! The writer thread keeps one write in flight; snapshots that queue up behind
//! it are collapsed so only the newest one per key reaches storage. Failures
//! are logged and dropped, leaving the in-memory state authoritative.

use super::KeyValueStorage;
use crate::errors::AppResult;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

enum WriteCommand {
    Save { key: String, bytes: Vec<u8> },
    Flush(Sender<()>),
    Shutdown,
}

/// Handle to the writer thread.
///
/// Dropping the handle drains everything already submitted and joins the
/// thread, so a process that drops its store before exiting loses no writes.
pub struct PersistenceWriter {
    sender: Sender<WriteCommand>,
    handle: Option<JoinHandle<()>>,
}

impl PersistenceWriter {
    /// Starts the writer thread over `storage`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the thread cannot be spawned.
    pub fn spawn(storage: Arc<dyn KeyValueStorage>) -> AppResult<Self> {
        let (sender, receiver) = unbounded();
        let handle = thread::Builder::new()
            .name("moodlog-writer".to_string())
            .spawn(move || run(storage, receiver))?;

        Ok(PersistenceWriter {
            sender,
            handle: Some(handle),
        })
    }

    /// Queues `bytes` for `key` without waiting for the write.
    pub fn submit(&self, key: &str, bytes: Vec<u8>) {
        let command = WriteCommand::Save {
            key: key.to_string(),
            bytes,
        };
        if self.sender.send(command).is_err() {
            warn!("Persistence writer has stopped; snapshot for '{}' dropped", key);
        }
    }

    /// Blocks until every snapshot submitted so far has been written or has failed.
    pub fn flush(&self) {
        let (ack, done) = bounded(1);
        if self.sender.send(WriteCommand::Flush(ack)).is_err() {
            warn!("Persistence writer has stopped; nothing to flush");
            return;
        }
        let _ = done.recv();
    }
}

impl Drop for PersistenceWriter {
    fn drop(&mut self) {
        let _ = self.sender.send(WriteCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Persistence writer thread panicked");
            }
        }
    }
}

fn run(storage: Arc<dyn KeyValueStorage>, receiver: Receiver<WriteCommand>) {
    while let Ok(first) = receiver.recv() {
        let mut pending: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        let mut waiters = Vec::new();
        let mut shutdown = false;
        let mut superseded = 0usize;

        for command in std::iter::once(first).chain(receiver.try_iter()) {
            match command {
                WriteCommand::Save { key, bytes } => {
                    if pending.insert(key, bytes).is_some() {
                        superseded += 1;
                    }
                }
                WriteCommand::Flush(ack) => waiters.push(ack),
                WriteCommand::Shutdown => shutdown = true,
            }
        }

        if superseded > 0 {
            debug!("Skipped {} superseded snapshot(s)", superseded);
        }

        for (key, bytes) in pending {
            if let Err(e) = storage.save(&key, &bytes) {
                warn!(error = %e, "Snapshot write failed; state kept in memory only");
            }
        }

        for waiter in waiters {
            let _ = waiter.send(());
        }

        if shutdown {
            debug!("Persistence writer shutting down");
            return;
        }
    }
}
