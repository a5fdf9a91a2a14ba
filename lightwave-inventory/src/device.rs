//! Device descriptors shared by every inventory source.

use serde::{Deserialize, Serialize};

/// Kind of protocol-addressable device.
///
/// The inventory formats also list radiators, moods and inactive slots;
/// those are not protocol-addressable targets and are filtered out
/// before descriptors reach the dispatch core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// On/off switch (legacy code `O`)
    Switch,
    /// Dimmer (legacy code `D`)
    Dimmer,
    /// Motorized open/close cover (legacy code `P`)
    OpenClose,
}

impl DeviceType {
    /// Map a legacy single-letter type code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'O' => Some(Self::Switch),
            'D' => Some(Self::Dimmer),
            'P' => Some(Self::OpenClose),
            _ => None,
        }
    }

    /// Map a cloud API numeric device type id.
    pub fn from_cloud_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Switch),
            2 => Some(Self::Dimmer),
            3 => Some(Self::OpenClose),
            _ => None,
        }
    }
}

/// A single addressable device resolved from an inventory source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub room_id: u32,
    pub room_name: String,
    pub device_id: u32,
    pub device_name: String,
    pub device_type: DeviceType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('O', Some(DeviceType::Switch))]
    #[case('D', Some(DeviceType::Dimmer))]
    #[case('P', Some(DeviceType::OpenClose))]
    #[case('R', None)] // radiators are not addressable here
    #[case('I', None)] // inactive slot
    #[case('M', None)] // mood
    fn legacy_code_mapping(#[case] code: char, #[case] expected: Option<DeviceType>) {
        assert_eq!(DeviceType::from_code(code), expected);
    }

    #[rstest]
    #[case(1, Some(DeviceType::Switch))]
    #[case(2, Some(DeviceType::Dimmer))]
    #[case(3, Some(DeviceType::OpenClose))]
    #[case(0, None)]
    #[case(9, None)]
    fn cloud_id_mapping(#[case] id: u8, #[case] expected: Option<DeviceType>) {
        assert_eq!(DeviceType::from_cloud_id(id), expected);
    }
}
