//! The assembled link: registry, transmitter and dispatch queue wired
//! together behind a small async API.

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::address::BridgeAddress;
use crate::config::LinkConfig;
use crate::dispatch::{DispatchQueue, QueuedCommand};
use crate::error::{LinkError, Result};
use crate::registry::{Outcome, TransactionRegistry};
use crate::transmitter::Transmitter;

/// An open link to a LightwaveRF bridge.
///
/// Commands return immediately into the dispatch queue; the eventual
/// resolution (acknowledged, rejected or timed out) is delivered
/// asynchronously, never by blocking.
///
/// # Example
///
/// ```rust,ignore
/// use lightwave_link::{Link, LinkConfig, Outcome};
///
/// let link = Link::connect(LinkConfig::default()).await?;
/// match link.command("!R1D2F1|").await? {
///     Outcome::Acknowledged { .. } => {}
///     Outcome::Rejected { detail, .. } => eprintln!("bridge said: {detail}"),
///     Outcome::TimedOut { .. } => eprintln!("no reply"),
/// }
/// link.shutdown().await;
/// ```
pub struct Link {
    dispatch: DispatchQueue,
    transmitter: Arc<Transmitter>,
    registry: Arc<TransactionRegistry>,
    receive_task: JoinHandle<()>,
}

impl Link {
    /// Bind the sockets and start the dispatch and receive loops.
    pub async fn connect(config: LinkConfig) -> Result<Self> {
        let registry = TransactionRegistry::new();
        let (transmitter, receive_task) =
            Transmitter::bind(&config, Arc::clone(&registry)).await?;
        let dispatch = DispatchQueue::start(
            Arc::clone(&transmitter),
            Arc::clone(&registry),
            &config,
        );

        Ok(Self {
            dispatch,
            transmitter,
            registry,
            receive_task,
        })
    }

    /// Submit a command and await its terminal outcome.
    ///
    /// Returns [`LinkError::QueueFull`] when the dispatch queue is at
    /// capacity, rather than leaving the caller pending forever.
    pub async fn command(&self, command: impl Into<String>) -> Result<Outcome> {
        let (completion, outcome) = oneshot::channel();
        let accepted = self.dispatch.submit(QueuedCommand {
            command: command.into(),
            completion: Some(completion),
        });
        if !accepted {
            return Err(LinkError::QueueFull);
        }
        outcome.await.map_err(|_| LinkError::Closed)
    }

    /// Submit a command without waiting for a reply.
    ///
    /// Returns whether the command was accepted by the queue.
    pub fn submit(&self, command: impl Into<String>) -> bool {
        self.dispatch.submit(QueuedCommand {
            command: command.into(),
            completion: None,
        })
    }

    /// Snapshot of the current bridge address and discovery state.
    pub async fn bridge_address(&self) -> BridgeAddress {
        self.transmitter.bridge_address().await
    }

    /// Number of transactions currently awaiting a reply.
    pub async fn pending_count(&self) -> usize {
        self.registry.pending_count().await
    }

    /// Number of commands dropped due to queue overflow.
    pub fn dropped_commands(&self) -> u64 {
        self.dispatch.dropped_commands()
    }

    /// Actual port the receive socket is bound to.
    pub fn listen_port(&self) -> u16 {
        self.transmitter.listen_port()
    }

    /// Stop the receive loop and drain the dispatch queue.
    pub async fn shutdown(self) {
        self.receive_task.abort();
        self.dispatch.shutdown().await;
    }
}
