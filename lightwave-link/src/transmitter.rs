//! UDP socket ownership, transaction allocation and the inbound path.
//!
//! The transmitter owns both sockets: a send socket on an ephemeral port
//! and a receive socket on the bridge's fixed reply port. While the
//! bridge address is still unknown the send socket has broadcast
//! capability; the first reply locks the address and broadcast is
//! disabled, which rejects further cross-talk from other responders in
//! the broadcast domain rather than merely saving traffic.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use lightwave_protocol::{Response, ResponseBody};

use crate::address::{AddressMode, BridgeAddress};
use crate::config::LinkConfig;
use crate::error::Result;
use crate::registry::{Outcome, TransactionRegistry};

/// Owns the UDP sockets and bridges inbound datagrams to the registry.
pub struct Transmitter {
    /// Send socket; broadcast-capable only during discovery
    socket: UdpSocket,
    /// Bridge address and the discovery state machine
    bridge: Mutex<BridgeAddress>,
    /// Monotonic transaction allocator, process-lifetime scope
    next_transaction: AtomicU32,
    command_port: u16,
    listen_port: u16,
    registry: Arc<TransactionRegistry>,
}

impl Transmitter {
    /// Bind both sockets and spawn the receive loop.
    ///
    /// Returns the transmitter and the receive task handle, which the
    /// owning [`Link`](crate::Link) aborts on shutdown.
    pub async fn bind(
        config: &LinkConfig,
        registry: Arc<TransactionRegistry>,
    ) -> Result<(Arc<Self>, JoinHandle<()>)> {
        let bridge = BridgeAddress::new(config.bridge_host);

        let socket = UdpSocket::bind(("0.0.0.0", 0)).await?;
        if bridge.mode() == AddressMode::BroadcastDiscovery {
            socket.set_broadcast(true)?;
        }

        let receive_socket = UdpSocket::bind(("0.0.0.0", config.listen_port)).await?;
        let listen_port = receive_socket.local_addr()?.port();
        tracing::debug!(listen_port, "Receive socket listening");

        let transmitter = Arc::new(Self {
            socket,
            bridge: Mutex::new(bridge),
            next_transaction: AtomicU32::new(1),
            command_port: config.command_port,
            listen_port,
            registry,
        });

        let receiver = Arc::clone(&transmitter);
        let receive_task = tokio::spawn(async move {
            receive_loop(receive_socket, receiver).await;
        });

        Ok((transmitter, receive_task))
    }

    /// Allocate the next transaction id.
    pub fn next_id(&self) -> u32 {
        self.next_transaction.fetch_add(1, Ordering::Relaxed)
    }

    /// Transmit a command as a single `"<id>,<command>"` datagram to the
    /// current bridge address.
    pub async fn transmit(&self, id: u32, command: &str) -> Result<()> {
        let host = self.bridge.lock().await.host();
        let wire = format!("{id},{command}");
        tracing::debug!(%host, %wire, "Sending command datagram");
        self.socket
            .send_to(wire.as_bytes(), (host, self.command_port))
            .await?;
        Ok(())
    }

    /// Snapshot of the current bridge address and mode.
    pub async fn bridge_address(&self) -> BridgeAddress {
        self.bridge.lock().await.clone()
    }

    /// Actual port the receive socket is bound to.
    pub fn listen_port(&self) -> u16 {
        self.listen_port
    }

    /// Inbound path, invoked for every received datagram.
    pub(crate) async fn handle_datagram(&self, payload: &[u8], sender: SocketAddr) {
        {
            let mut bridge = self.bridge.lock().await;
            if bridge.lock_to(sender.ip()) {
                tracing::info!(bridge = %sender.ip(), "Discovered Link bridge address, locking to unicast");
                if let Err(e) = self.socket.set_broadcast(false) {
                    tracing::warn!("Failed to disable broadcast on send socket: {e}");
                }
            }
            if !bridge.accepts(sender.ip()) {
                tracing::warn!(
                    sender = %sender.ip(),
                    expected = %bridge.host(),
                    "Discarding datagram from unexpected sender"
                );
                return;
            }
        }

        let response = match Response::decode(payload) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Discarding malformed datagram: {e}");
                return;
            }
        };

        if matches!(response.body, ResponseBody::Structured(_)) {
            // The structured shape echoes the bridge's running sequence
            // counter; keep the allocator ahead of it so client-assigned
            // ids never collide with bridge numbering.
            self.next_transaction
                .fetch_max(response.transaction.saturating_add(1), Ordering::Relaxed);
        }

        let outcome = match response.error() {
            Some(detail) => Outcome::Rejected {
                transaction: response.transaction,
                detail: detail.to_string(),
            },
            None => Outcome::Acknowledged {
                transaction: response.transaction,
                content: response.content().to_string(),
            },
        };

        if !self.registry.resolve(response.transaction, outcome).await {
            tracing::debug!(
                transaction = response.transaction,
                "No pending transaction for response, ignoring"
            );
        }
    }
}

/// Receive loop bridging the socket to the inbound path.
async fn receive_loop(socket: UdpSocket, transmitter: Arc<Transmitter>) {
    let mut buffer = [0u8; 2048];
    loop {
        match socket.recv_from(&mut buffer).await {
            Ok((size, sender)) => {
                transmitter.handle_datagram(&buffer[..size], sender).await;
            }
            Err(e) => {
                tracing::warn!("Receive socket error: {e}");
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
    }
}
