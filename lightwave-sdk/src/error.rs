//! Error type for the SDK façade.

use lightwave_inventory::InventoryError;
use lightwave_link::LinkError;
use lightwave_protocol::{CommandError, DecodeError};

/// Errors surfaced to SDK callers.
///
/// Only two outcomes of a submitted command are terminal failures: the
/// bridge explicitly rejecting it, or no reply within the timeout.
/// Decode and correlation problems are handled inside the link and never
/// reach this type.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The bridge explicitly rejected the command
    #[error("Bridge rejected command: {0}")]
    Bridge(String),

    /// No response from the bridge within the per-request timeout
    #[error("No response from the bridge within the timeout")]
    Timeout,

    /// The command could not be built (invalid addressing)
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The link failed (socket, queue or shutdown)
    #[error(transparent)]
    Link(#[from] LinkError),

    /// Device inventory resolution failed
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// A reply payload could not be parsed
    #[error("Malformed reply payload: {0}")]
    Payload(#[from] DecodeError),
}
