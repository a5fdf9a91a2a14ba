//! # lightwave-link
//!
//! Command dispatch and transaction correlation for the LightwaveRF Link
//! bridge.
//!
//! The bridge speaks a fire-and-forget UDP protocol: commands go out as
//! `"<transactionId>,<command>"` datagrams and replies come back, in no
//! particular order, tagged with the same transaction id. This crate
//! turns that into ordered request/response semantics:
//!
//! - [`TransactionRegistry`] correlates replies to pending commands and
//!   guarantees each caller exactly one terminal [`Outcome`].
//! - [`Transmitter`] owns both sockets, learns the bridge's unicast
//!   address from the first reply to a broadcast, and feeds inbound
//!   datagrams through the decoder into the registry.
//! - [`DispatchQueue`] paces outgoing commands, because the bridge
//!   cannot process back-to-back datagrams reliably.
//! - [`Link`] wires the three together behind a small async API.

mod address;
mod config;
mod dispatch;
mod error;
mod link;
mod registry;
mod transmitter;

pub use address::{AddressMode, BridgeAddress};
pub use config::LinkConfig;
pub use dispatch::{DispatchQueue, QueuedCommand};
pub use error::{LinkError, RegistryError, Result};
pub use link::Link;
pub use registry::{Outcome, TransactionRegistry};
pub use transmitter::Transmitter;
