//! The public client: typed device operations over an open link.

use std::path::PathBuf;

use lightwave_inventory::{cloud, file, CloudConfig, DeviceDescriptor};
use lightwave_link::{BridgeAddress, Link, LinkConfig, Outcome};
use lightwave_protocol::{Command, EnergyReading};

use crate::error::SdkError;

/// Where to resolve the device inventory from, if anywhere.
#[derive(Debug, Clone)]
pub enum InventorySource {
    /// A local YAML file in the lightwaverf gem format
    File(PathBuf),
    /// The cloud account API
    Cloud(CloudConfig),
}

/// Configuration for [`LightwaveClient::connect`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Link transport configuration
    pub link: LinkConfig,
    /// Optional device inventory source
    pub inventory: Option<InventorySource>,
}

/// A connected client for a LightwaveRF Link bridge.
///
/// Operations submit to the link's paced dispatch queue and await the
/// command's terminal outcome; only a bridge rejection or a timeout is
/// surfaced as an error.
pub struct LightwaveClient {
    link: Link,
    devices: Vec<DeviceDescriptor>,
}

impl LightwaveClient {
    /// Open the link, perform the registration handshake and resolve the
    /// configured inventory.
    ///
    /// A failed handshake is logged but tolerated: the bridge may simply
    /// not be powered up yet, and the first real command will go through
    /// the same discovery path.
    pub async fn connect(config: ClientConfig) -> Result<Self, SdkError> {
        let link = Link::connect(config.link).await?;

        match link.command(Command::register().to_wire()).await {
            Ok(Outcome::Acknowledged { .. }) => {
                tracing::info!("Registered with the Link bridge");
            }
            Ok(Outcome::Rejected { detail, .. }) => {
                tracing::warn!("Bridge rejected registration: {detail}");
            }
            Ok(Outcome::TimedOut { .. }) => {
                tracing::warn!("No bridge answered the registration handshake");
            }
            Err(e) => {
                tracing::warn!("Registration handshake failed: {e}");
            }
        }

        let devices = match config.inventory {
            Some(InventorySource::File(path)) => file::load(&path)?,
            Some(InventorySource::Cloud(cloud_config)) => {
                cloud::fetch_devices(&cloud_config).await?
            }
            None => Vec::new(),
        };
        if !devices.is_empty() {
            tracing::info!(count = devices.len(), "Resolved device inventory");
        }

        Ok(Self { link, devices })
    }

    /// Turn a device on.
    pub async fn turn_device_on(&self, room: u32, device: u32) -> Result<(), SdkError> {
        self.execute(Command::device_on(room, device)?).await.map(drop)
    }

    /// Turn a device off.
    pub async fn turn_device_off(&self, room: u32, device: u32) -> Result<(), SdkError> {
        self.execute(Command::device_off(room, device)?).await.map(drop)
    }

    /// Open a motorized cover.
    pub async fn open_device(&self, room: u32, device: u32) -> Result<(), SdkError> {
        self.execute(Command::open(room, device)?).await.map(drop)
    }

    /// Close a motorized cover.
    pub async fn close_device(&self, room: u32, device: u32) -> Result<(), SdkError> {
        self.execute(Command::close(room, device)?).await.map(drop)
    }

    /// Stop a moving cover.
    pub async fn stop_device(&self, room: u32, device: u32) -> Result<(), SdkError> {
        self.execute(Command::stop(room, device)?).await.map(drop)
    }

    /// Turn every device in a room off.
    pub async fn turn_room_off(&self, room: u32) -> Result<(), SdkError> {
        self.execute(Command::room_off(room)?).await.map(drop)
    }

    /// Dim a device to a percentage of full brightness.
    ///
    /// A percentage that scales to dim level 0 turns the device off
    /// instead of sending a dim-to-zero command.
    pub async fn set_device_dim(&self, room: u32, device: u32, percent: u8) -> Result<(), SdkError> {
        self.execute(Command::dim(room, device, percent)?).await.map(drop)
    }

    /// Re-run the registration handshake with the bridge.
    pub async fn register(&self) -> Result<(), SdkError> {
        self.execute(Command::register()).await.map(drop)
    }

    /// Query the energy monitor.
    pub async fn request_energy(&self) -> Result<EnergyReading, SdkError> {
        let content = self.execute(Command::energy_query()).await?;
        Ok(EnergyReading::parse(&content)?)
    }

    /// The resolved device inventory, empty when none was configured.
    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    /// Snapshot of the bridge address and discovery state.
    pub async fn bridge_address(&self) -> BridgeAddress {
        self.link.bridge_address().await
    }

    /// Number of commands dropped due to dispatch queue overflow.
    pub fn dropped_commands(&self) -> u64 {
        self.link.dropped_commands()
    }

    /// Shut the link down.
    pub async fn shutdown(self) {
        self.link.shutdown().await;
    }

    async fn execute(&self, command: Command) -> Result<String, SdkError> {
        match self.link.command(command.to_wire()).await? {
            Outcome::Acknowledged { content, .. } => Ok(content),
            Outcome::Rejected { detail, .. } => Err(SdkError::Bridge(detail)),
            Outcome::TimedOut { .. } => Err(SdkError::Timeout),
        }
    }
}

impl LightwaveClient {
    /// Build a client from an already-open link, without the handshake.
    ///
    /// Mostly useful for tests and for callers that manage registration
    /// themselves.
    pub fn from_link(link: Link, devices: Vec<DeviceDescriptor>) -> Self {
        Self { link, devices }
    }

    /// The underlying link, for advanced use.
    pub fn link(&self) -> &Link {
        &self.link
    }
}
