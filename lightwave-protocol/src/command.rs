//! Command construction for the Link bridge device grammar.
//!
//! Commands address devices as `!R<room>D<device>` followed by a function
//! code. Room and device ids are validated as positive integers; the
//! legacy naming scheme only used rooms 1-8, but modern identifiers may
//! exceed that and are accepted.

use crate::error::CommandError;

/// Dim levels on the wire run from 1 to 32.
pub const MAX_DIM_LEVEL: u8 = 32;

/// A single protocol command, ready to be serialized for transmission.
///
/// Constructors validate addressing and apply the protocol's edge-case
/// policies (notably the dim-to-zero redirection), so a `Command` value
/// always serializes to a well-formed wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Turn a device on (`F1`)
    DeviceOn { room: u32, device: u32 },
    /// Turn a device off (`F0`)
    DeviceOff { room: u32, device: u32 },
    /// Open a motorized cover (`F>`)
    Open { room: u32, device: u32 },
    /// Close a motorized cover (`F<`)
    Close { room: u32, device: u32 },
    /// Stop a moving cover (`F^`)
    Stop { room: u32, device: u32 },
    /// Turn every device in a room off (`Fa`)
    RoomOff { room: u32 },
    /// Dim a device to a level between 1 and 32 (`FdP<level>`)
    Dim { room: u32, device: u32, level: u8 },
    /// Query the energy monitor (`@?`)
    EnergyQuery,
    /// Register this client with the Link (`!R1Fa`)
    Register,
    /// Link handshake probe (`@H`)
    Hello,
}

impl Command {
    /// Turn a device on.
    pub fn device_on(room: u32, device: u32) -> Result<Self, CommandError> {
        validate(room, device)?;
        Ok(Self::DeviceOn { room, device })
    }

    /// Turn a device off.
    pub fn device_off(room: u32, device: u32) -> Result<Self, CommandError> {
        validate(room, device)?;
        Ok(Self::DeviceOff { room, device })
    }

    /// Open a motorized cover.
    pub fn open(room: u32, device: u32) -> Result<Self, CommandError> {
        validate(room, device)?;
        Ok(Self::Open { room, device })
    }

    /// Close a motorized cover.
    pub fn close(room: u32, device: u32) -> Result<Self, CommandError> {
        validate(room, device)?;
        Ok(Self::Close { room, device })
    }

    /// Stop a moving cover.
    pub fn stop(room: u32, device: u32) -> Result<Self, CommandError> {
        validate(room, device)?;
        Ok(Self::Stop { room, device })
    }

    /// Turn every device in a room off.
    pub fn room_off(room: u32) -> Result<Self, CommandError> {
        if room == 0 {
            return Err(CommandError::InvalidRoomId(room));
        }
        Ok(Self::RoomOff { room })
    }

    /// Dim a device to a percentage of full brightness.
    ///
    /// The percentage is scaled to the protocol's 0-32 level range and
    /// truncated. A computed level of 0 is redirected to the off command
    /// rather than sent as a dim-to-zero, which the bridge does not
    /// handle sensibly.
    pub fn dim(room: u32, device: u32, percent: u8) -> Result<Self, CommandError> {
        validate(room, device)?;
        if percent > 100 {
            return Err(CommandError::InvalidDimPercent(percent));
        }

        let level = (f32::from(percent) * 0.32) as u8;
        if level == 0 {
            Ok(Self::DeviceOff { room, device })
        } else {
            Ok(Self::Dim { room, device, level })
        }
    }

    /// Query the energy monitor for current/max/today/yesterday readings.
    pub fn energy_query() -> Self {
        Self::EnergyQuery
    }

    /// Register this client with the Link bridge.
    pub fn register() -> Self {
        Self::Register
    }

    /// Handshake probe sent once the receive socket is listening.
    pub fn hello() -> Self {
        Self::Hello
    }

    /// Serialize the command to its wire form, without the transaction
    /// id prefix (the transmitter prepends `"<id>,"`).
    pub fn to_wire(&self) -> String {
        match self {
            Self::DeviceOn { room, device } => format!("!R{room}D{device}F1|"),
            Self::DeviceOff { room, device } => format!("!R{room}D{device}F0|"),
            Self::Open { room, device } => format!("!R{room}D{device}F>|"),
            Self::Close { room, device } => format!("!R{room}D{device}F<|"),
            Self::Stop { room, device } => format!("!R{room}D{device}F^|"),
            Self::RoomOff { room } => format!("!R{room}Fa"),
            Self::Dim { room, device, level } => format!("!R{room}D{device}FdP{level}|"),
            Self::EnergyQuery => "@?".to_string(),
            Self::Register => "!R1Fa".to_string(),
            Self::Hello => "@H".to_string(),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

fn validate(room: u32, device: u32) -> Result<(), CommandError> {
    if room == 0 {
        return Err(CommandError::InvalidRoomId(room));
    }
    if device == 0 {
        return Err(CommandError::InvalidDeviceId(device));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(Command::device_on(3, 2).unwrap(), "!R3D2F1|")]
    #[case(Command::device_off(3, 2).unwrap(), "!R3D2F0|")]
    #[case(Command::open(1, 4).unwrap(), "!R1D4F>|")]
    #[case(Command::close(1, 4).unwrap(), "!R1D4F<|")]
    #[case(Command::stop(1, 4).unwrap(), "!R1D4F^|")]
    #[case(Command::room_off(5).unwrap(), "!R5Fa")]
    #[case(Command::energy_query(), "@?")]
    #[case(Command::register(), "!R1Fa")]
    #[case(Command::hello(), "@H")]
    fn wire_strings(#[case] command: Command, #[case] expected: &str) {
        assert_eq!(command.to_wire(), expected);
        assert_eq!(command.to_string(), expected);
    }

    #[test]
    fn modern_ids_exceed_legacy_room_range() {
        let command = Command::device_on(12, 30).unwrap();
        assert_eq!(command.to_wire(), "!R12D30F1|");
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    fn zero_ids_are_rejected(#[case] room: u32, #[case] device: u32) {
        let err = Command::device_on(room, device).unwrap_err();
        match err {
            CommandError::InvalidRoomId(0) => assert_eq!(room, 0),
            CommandError::InvalidDeviceId(0) => assert_eq!(device, 0),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn dim_fifty_percent_truncates_to_sixteen() {
        let command = Command::dim(2, 3, 50).unwrap();
        assert_eq!(command, Command::Dim { room: 2, device: 3, level: 16 });
        assert_eq!(command.to_wire(), "!R2D3FdP16|");
    }

    #[test]
    fn dim_zero_percent_redirects_to_off() {
        let command = Command::dim(2, 3, 0).unwrap();
        assert_eq!(command, Command::DeviceOff { room: 2, device: 3 });
        assert_eq!(command.to_wire(), "!R2D3F0|");
    }

    #[test]
    fn dim_below_scaling_threshold_redirects_to_off() {
        // 3% scales to 0.96, which truncates to level 0
        let command = Command::dim(2, 3, 3).unwrap();
        assert_eq!(command, Command::DeviceOff { room: 2, device: 3 });
    }

    #[test]
    fn dim_full_brightness_is_level_thirty_two() {
        let command = Command::dim(1, 1, 100).unwrap();
        assert_eq!(command, Command::Dim { room: 1, device: 1, level: 32 });
    }

    #[test]
    fn dim_above_one_hundred_percent_is_rejected() {
        assert_eq!(
            Command::dim(1, 1, 101).unwrap_err(),
            CommandError::InvalidDimPercent(101)
        );
    }

    proptest! {
        #[test]
        fn dim_levels_stay_in_protocol_range(percent in 0u8..=100) {
            match Command::dim(1, 1, percent).unwrap() {
                Command::Dim { level, .. } => {
                    prop_assert!(level >= 1);
                    prop_assert!(level <= MAX_DIM_LEVEL);
                }
                Command::DeviceOff { .. } => {
                    // Only percentages that truncate to level 0 may redirect
                    prop_assert!((f32::from(percent) * 0.32) as u8 == 0);
                }
                other => prop_assert!(false, "unexpected command: {other:?}"),
            }
        }
    }
}
