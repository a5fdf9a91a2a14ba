//! # lightwave-sdk
//!
//! Async SDK for controlling LightwaveRF switches, dimmers and motorized
//! covers through the Link bridge appliance.
//!
//! The bridge speaks a best-effort UDP protocol; the SDK turns it into
//! typed operations with ordered submission, transaction correlation and
//! timeout-based failure. Device inventories can be resolved from a
//! local YAML file or the cloud account API.
//!
//! ```rust,ignore
//! use lightwave_sdk::{ClientConfig, LightwaveClient};
//!
//! let client = LightwaveClient::connect(ClientConfig::default()).await?;
//! client.turn_device_on(1, 2).await?;
//! client.set_device_dim(1, 3, 50).await?;
//! let energy = client.request_energy().await?;
//! println!("current draw: {} W", energy.current);
//! ```

mod client;
mod error;
pub mod logging;

pub use client::{ClientConfig, InventorySource, LightwaveClient};
pub use error::SdkError;

pub use lightwave_inventory::{CloudConfig, DeviceDescriptor, DeviceType};
pub use lightwave_link::{AddressMode, LinkConfig, Outcome};
pub use lightwave_protocol::{Command, EnergyReading};
