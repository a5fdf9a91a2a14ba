//! Local YAML inventory files.
//!
//! Reads the lightwaverf gem file format: a `room:` list, each room
//! carrying a `device:` list. Ids are written as `R1`/`D2`; when absent,
//! list position determines the id. Only switches and dimmers are
//! protocol targets here; other entries are skipped.

use std::path::Path;

use serde::Deserialize;

use crate::device::{DeviceDescriptor, DeviceType};
use crate::error::{InventoryError, Result};

#[derive(Debug, Deserialize)]
struct Inventory {
    room: Vec<RoomRecord>,
}

#[derive(Debug, Deserialize)]
struct RoomRecord {
    id: Option<String>,
    name: String,
    #[serde(default)]
    device: Vec<DeviceRecord>,
}

#[derive(Debug, Deserialize)]
struct DeviceRecord {
    id: Option<String>,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Load a device inventory from a YAML file.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<DeviceDescriptor>> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Parse a device inventory from YAML text.
pub fn parse(text: &str) -> Result<Vec<DeviceDescriptor>> {
    let inventory: Inventory = serde_yaml::from_str(text)?;

    let mut devices = Vec::new();
    for (room_index, room) in inventory.room.iter().enumerate() {
        let room_id = numeric_id(room.id.as_deref(), room_index)?;

        for (device_index, record) in room.device.iter().enumerate() {
            let device_type = match record.kind.chars().next().and_then(DeviceType::from_code) {
                Some(kind @ (DeviceType::Switch | DeviceType::Dimmer)) => kind,
                _ => {
                    tracing::debug!(
                        device = %record.name,
                        kind = %record.kind,
                        "Skipping non-addressable inventory entry"
                    );
                    continue;
                }
            };

            devices.push(DeviceDescriptor {
                room_id,
                room_name: room.name.clone(),
                device_id: numeric_id(record.id.as_deref(), device_index)?,
                device_name: record.name.clone(),
                device_type,
            });
        }
    }
    Ok(devices)
}

/// Parse an `R1`/`D2` style identifier, or fall back to list position.
fn numeric_id(id: Option<&str>, index: usize) -> Result<u32> {
    match id {
        Some(id) => id
            .get(1..)
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| InventoryError::InvalidIdentifier(id.to_string())),
        None => Ok(index as u32 + 1),
    }
}
