//! # Background Save Queue
//!
//! Writes cart blobs to an async slot store without making the caller wait.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore (sync)                     Writer task (tokio)               │
//! │  ────────────────                     ───────────────────               │
//! │  apply(Add)    ──► Save(blob v1) ──┐                                    │
//! │  apply(Add)    ──► Save(blob v2) ──┤   recv v1                          │
//! │  apply(Remove) ──► Save(blob v3) ──┤   drain: v2, v3 already queued     │
//! │                                    │   write v3 only                    │
//! │  flush().await ──► Flush(ack)   ───┤   ack once v3 is written           │
//! │                                    │                                    │
//! │  shutdown()    ──► Shutdown(ack) ──┘   write pending, ack, exit         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blobs are always whole-cart snapshots, so skipping a superseded one loses
//! nothing. Control messages are never reordered around the saves queued
//! before them.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use storefront_core::CartState;

use crate::error::{StorageError, StorageResult};
use crate::persistence::{encode, load_async, Loaded};
use crate::slot::AsyncSlotStore;

enum Command {
    Save(Vec<u8>),
    Flush(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

/// Handle to a background cart writer. Clones share the same writer.
#[derive(Clone)]
pub struct SaveQueue {
    tx: mpsc::UnboundedSender<Command>,
    store: Arc<dyn AsyncSlotStore>,
    key: Arc<str>,
}

impl SaveQueue {
    /// Starts the writer task for `key` on the current Tokio runtime.
    pub fn spawn<S>(store: Arc<S>, key: impl Into<String>) -> Self
    where
        S: AsyncSlotStore + 'static,
    {
        let key: Arc<str> = Arc::from(key.into());
        let store: Arc<dyn AsyncSlotStore> = store;
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(run_writer(Arc::clone(&store), Arc::clone(&key), rx));

        SaveQueue { tx, store, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Queues a snapshot of `state`. Never blocks.
    pub fn enqueue(&self, state: &CartState) -> StorageResult<()> {
        let bytes = encode(state)?;
        self.tx
            .send(Command::Save(bytes))
            .map_err(|_| StorageError::QueueClosed)
    }

    /// Waits until every snapshot queued before this call is written.
    pub async fn flush(&self) -> StorageResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Command::Flush(ack_tx))
            .map_err(|_| StorageError::QueueClosed)?;
        ack_rx.await.map_err(|_| StorageError::QueueClosed)
    }

    /// Writes what is pending and stops the writer.
    pub async fn shutdown(&self) -> StorageResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Command::Shutdown(ack_tx))
            .map_err(|_| StorageError::QueueClosed)?;
        ack_rx.await.map_err(|_| StorageError::QueueClosed)
    }

    /// Flushes, then reads back and restores the stored cart.
    ///
    /// If the writer has already stopped, the store is read as-is.
    pub async fn load(&self) -> Loaded {
        if let Err(e) = self.flush().await {
            debug!(key = %self.key, error = %e, "Loading without flush");
        }
        load_async(self.store.as_ref(), &self.key).await
    }
}

async fn run_writer(
    store: Arc<dyn AsyncSlotStore>,
    key: Arc<str>,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    info!(key = %key, "Cart save queue started");

    while let Some(command) = rx.recv().await {
        let control = match command {
            Command::Save(bytes) => {
                let (latest, skipped, control) = drain_saves(bytes, &mut rx);
                if skipped > 0 {
                    debug!(key = %key, skipped = skipped, "Superseded cart snapshots skipped");
                }
                write(store.as_ref(), &key, &latest).await;
                control
            }
            other => Some(other),
        };

        match control {
            Some(Command::Flush(ack)) => {
                let _ = ack.send(());
            }
            Some(Command::Shutdown(ack)) => {
                let _ = ack.send(());
                break;
            }
            Some(Command::Save(_)) | None => {}
        }
    }

    info!(key = %key, "Cart save queue stopped");
}

/// Collects saves that are already waiting, keeping only the newest.
///
/// Stops at the first control message, which is returned so it runs after
/// the write.
fn drain_saves(
    first: Vec<u8>,
    rx: &mut mpsc::UnboundedReceiver<Command>,
) -> (Vec<u8>, usize, Option<Command>) {
    let mut latest = first;
    let mut skipped = 0;

    while let Ok(command) = rx.try_recv() {
        match command {
            Command::Save(bytes) => {
                latest = bytes;
                skipped += 1;
            }
            control => return (latest, skipped, Some(control)),
        }
    }

    (latest, skipped, None)
}

async fn write(store: &dyn AsyncSlotStore, key: &str, bytes: &[u8]) {
    match store.set(key, bytes).await {
        Ok(()) => debug!(key = %key, bytes = bytes.len(), "Cart saved"),
        Err(e) => warn!(key = %key, error = %e, "Failed to save cart"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
