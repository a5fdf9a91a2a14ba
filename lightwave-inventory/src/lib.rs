//! # lightwave-inventory
//!
//! Device inventory resolution for the LightwaveRF SDK.
//!
//! The bridge itself has no notion of named devices; room and device ids
//! are all it understands. This crate resolves human-maintained
//! inventories into [`DeviceDescriptor`] lists from three sources:
//!
//! - a local YAML file in the lightwaverf gem format ([`file`]),
//! - the LightwaveRF cloud topology API ([`cloud`]),
//! - the legacy flattened room/device/type string lists ([`flat`]).
//!
//! All three are stateless transformations; the dispatch core consumes
//! the resulting descriptors purely as addressing input.

pub mod cloud;
mod device;
mod error;
pub mod file;
pub mod flat;

pub use cloud::CloudConfig;
pub use device::{DeviceDescriptor, DeviceType};
pub use error::{InventoryError, Result};
