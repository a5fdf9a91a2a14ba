//! # lightwave-protocol
//!
//! Wire grammar for the LightwaveRF Link UDP protocol.
//!
//! This crate is the stateless half of the SDK: it builds the command
//! strings the Link bridge understands and decodes the datagrams it sends
//! back. Everything that involves sockets, pacing or transaction tracking
//! lives in `lightwave-link`; this crate never performs I/O.

mod command;
mod error;
mod response;

pub use command::{Command, MAX_DIM_LEVEL};
pub use error::{CommandError, DecodeError};
pub use response::{EnergyReading, Response, ResponseBody, STRUCTURED_MARKER};
