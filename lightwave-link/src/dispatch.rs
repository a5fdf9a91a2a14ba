//! Bounded FIFO command queue with paced submission.
//!
//! The bridge appliance drops commands that arrive back-to-back, so the
//! pacing loop sends one command, then waits the pacing interval before
//! popping the next. This throttles the send cadence only; replies may
//! still complete out of order while several transactions are in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::LinkConfig;
use crate::registry::{Outcome, TransactionRegistry};
use crate::transmitter::Transmitter;

/// A command waiting in the dispatch queue.
#[derive(Debug)]
pub struct QueuedCommand {
    /// Protocol command text, without the transaction id prefix
    pub command: String,
    /// Completion channel; `None` for fire-and-forget submissions
    pub completion: Option<oneshot::Sender<Outcome>>,
}

/// Serializes outgoing commands and paces their transmission.
pub struct DispatchQueue {
    queue: mpsc::Sender<QueuedCommand>,
    dropped: Arc<AtomicU64>,
    worker: JoinHandle<()>,
}

impl DispatchQueue {
    /// Start the pacing loop over a bounded queue.
    pub fn start(
        transmitter: Arc<Transmitter>,
        registry: Arc<TransactionRegistry>,
        config: &LinkConfig,
    ) -> Self {
        let (queue, rx) = mpsc::channel(config.queue_capacity);
        let worker = tokio::spawn(pacing_loop(
            rx,
            transmitter,
            registry,
            config.pacing_interval,
            config.response_timeout,
        ));

        Self {
            queue,
            dropped: Arc::new(AtomicU64::new(0)),
            worker,
        }
    }

    /// Enqueue a command in FIFO order.
    ///
    /// When the queue is at capacity the newest submission is dropped:
    /// callers outpacing the bridge lose the excess rather than growing
    /// the queue without bound. Drops are counted and logged. Returns
    /// whether the command was accepted.
    pub fn submit(&self, command: QueuedCommand) -> bool {
        match self.queue.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Dispatch queue full, dropping newest command");
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!("Dispatch queue closed, dropping command");
                false
            }
        }
    }

    /// Number of commands dropped due to queue overflow.
    pub fn dropped_commands(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Close the queue and wait for the pacing loop to drain.
    pub async fn shutdown(self) {
        drop(self.queue);
        let _ = self.worker.await;
    }
}

/// Single active pacing cycle: pop, register, transmit, wait, repeat.
async fn pacing_loop(
    mut rx: mpsc::Receiver<QueuedCommand>,
    transmitter: Arc<Transmitter>,
    registry: Arc<TransactionRegistry>,
    pacing_interval: Duration,
    response_timeout: Duration,
) {
    while let Some(queued) = rx.recv().await {
        let id = transmitter.next_id();

        // Register before transmitting: if the send fails the pending
        // timeout still delivers a terminal outcome to the caller.
        if let Some(completion) = queued.completion {
            if let Err(e) = registry.register(id, completion, response_timeout).await {
                tracing::warn!(transaction = id, "Skipping command: {e}");
                continue;
            }
        }

        if let Err(e) = transmitter.transmit(id, &queued.command).await {
            tracing::warn!(transaction = id, "Failed to transmit command: {e}");
        }

        tokio::time::sleep(pacing_interval).await;
    }
    tracing::debug!("Dispatch queue closed, pacing loop ending");
}
