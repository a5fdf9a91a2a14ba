//! Legacy flattened room/device/type string lists.
//!
//! Older firmware and the account web UI export the topology as three
//! parallel strings of double-quoted values: 8 room names, then 10
//! device names and 10 type codes per room, in room order. Devices that
//! are not switches or dimmers (radiators, moods, inactive slots) are
//! skipped.

use crate::device::{DeviceDescriptor, DeviceType};

/// Rooms in the legacy naming scheme.
const ROOM_COUNT: usize = 8;
/// Device slots per room in the legacy naming scheme.
const DEVICES_PER_ROOM: usize = 10;

/// Parse the flattened room/device/type lists into descriptors.
///
/// Truncated input yields the descriptors resolved so far; the legacy
/// exports were frequently short a trailing quote or two, and dropping
/// the tail matches how they were consumed historically.
pub fn parse(rooms: &str, devices: &str, types: &str) -> Vec<DeviceDescriptor> {
    let mut device_names = quoted_values(devices);
    let mut type_codes = quoted_values(types);

    let mut descriptors = Vec::new();
    for (room_index, room_name) in quoted_values(rooms).take(ROOM_COUNT).enumerate() {
        let room_id = room_index as u32 + 1;

        for device_index in 0..DEVICES_PER_ROOM {
            let (Some(device_name), Some(code)) = (device_names.next(), type_codes.next())
            else {
                return descriptors;
            };

            let device_type = match code.chars().next().and_then(DeviceType::from_code) {
                Some(kind @ (DeviceType::Switch | DeviceType::Dimmer)) => kind,
                _ => continue,
            };

            descriptors.push(DeviceDescriptor {
                room_id,
                room_name: room_name.to_string(),
                device_id: device_index as u32 + 1,
                device_name: device_name.to_string(),
                device_type,
            });
        }
    }
    descriptors
}

/// Iterate the contents of double-quoted fields in order.
fn quoted_values(text: &str) -> impl Iterator<Item = &str> {
    text.split('"').skip(1).step_by(2)
}
