//! Transaction correlation with exactly-once outcome delivery.
//!
//! Every command awaiting a reply has a pending entry here, keyed by its
//! transaction id. A reply resolves the entry, a timer expires it;
//! whichever happens first takes the completion sender out of the map
//! under the lock, so exactly one of the two ever delivers a terminal
//! outcome and the other becomes a no-op.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::RegistryError;

/// Terminal outcome of a submitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The bridge acknowledged the command; `content` carries any
    /// payload (energy reports arrive this way)
    Acknowledged { transaction: u32, content: String },
    /// The bridge explicitly rejected the command
    Rejected { transaction: u32, detail: String },
    /// No reply arrived within the per-request timeout
    TimedOut { transaction: u32 },
}

impl Outcome {
    /// The transaction this outcome belongs to.
    pub fn transaction(&self) -> u32 {
        match self {
            Self::Acknowledged { transaction, .. }
            | Self::Rejected { transaction, .. }
            | Self::TimedOut { transaction } => *transaction,
        }
    }
}

/// A command waiting for its reply.
struct PendingTransaction {
    /// Single-use completion channel back to the original caller
    completion: oneshot::Sender<Outcome>,
    /// Timeout task, aborted when the reply arrives first
    timeout: JoinHandle<()>,
    submitted_at: Instant,
}

/// The single shared map of pending transactions.
///
/// All mutation (`register`, `resolve`, `expire`) is serialized through
/// one mutex; the transmitter's receive path and the timeout tasks are
/// the only writers.
pub struct TransactionRegistry {
    pending: Mutex<HashMap<u32, PendingTransaction>>,
}

impl TransactionRegistry {
    /// Create an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pending: Mutex::new(HashMap::new()),
        })
    }

    /// Register a pending transaction and schedule its timeout.
    ///
    /// Fails if `id` still has a pending entry; the allocator must never
    /// reuse an id that has not yet resolved or expired.
    pub async fn register(
        self: &Arc<Self>,
        id: u32,
        completion: oneshot::Sender<Outcome>,
        timeout: Duration,
    ) -> Result<(), RegistryError> {
        let mut pending = self.pending.lock().await;
        if pending.contains_key(&id) {
            return Err(RegistryError::DuplicateTransaction(id));
        }

        let registry = Arc::clone(self);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            registry.expire(id).await;
        });

        pending.insert(
            id,
            PendingTransaction {
                completion,
                timeout: timer,
                submitted_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Deliver a reply to the pending transaction `id`.
    ///
    /// Returns `false` when no entry exists (late, duplicate or unknown
    /// reply); such replies are logged by the caller and discarded.
    /// On success the pending timeout is canceled, so the completion is
    /// invoked exactly once.
    pub async fn resolve(&self, id: u32, outcome: Outcome) -> bool {
        let entry = self.pending.lock().await.remove(&id);
        match entry {
            Some(entry) => {
                entry.timeout.abort();
                // The caller may have stopped listening; that is their
                // prerogative and not an error here.
                let _ = entry.completion.send(outcome);
                true
            }
            None => false,
        }
    }

    /// Expire the pending transaction `id`, delivering a timeout outcome.
    ///
    /// No-op when the entry was already resolved.
    pub async fn expire(&self, id: u32) {
        let entry = self.pending.lock().await.remove(&id);
        if let Some(entry) = entry {
            tracing::debug!(
                transaction = id,
                elapsed_ms = entry.submitted_at.elapsed().as_millis() as u64,
                "No response within timeout, expiring transaction"
            );
            let _ = entry.completion.send(Outcome::TimedOut { transaction: id });
        }
    }

    /// Number of transactions currently awaiting a reply.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}
