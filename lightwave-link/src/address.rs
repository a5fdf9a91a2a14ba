//! Bridge address learning.
//!
//! The bridge is usually a DHCP-assigned LAN appliance whose address is
//! unknown at startup, so the first commands go to the broadcast
//! address. The first reply reveals the bridge's real address; from then
//! on the link sends unicast and rejects datagrams from any other
//! sender, which keeps cross-talk from other broadcast-domain peers out
//! of transaction matching.

use std::net::IpAddr;

/// Addressing mode of the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Sending to the broadcast address, bridge address not yet known
    BroadcastDiscovery,
    /// Locked to the learned (or configured) unicast address
    UnicastLocked,
}

/// The bridge's address together with how much we trust it.
///
/// The transition from discovery to locked is one-way and happens at
/// most once per process lifetime, on receipt of the first accepted
/// datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeAddress {
    host: IpAddr,
    mode: AddressMode,
}

impl BridgeAddress {
    /// Build from a configured host: a broadcast address starts in
    /// discovery mode, a concrete address starts locked.
    pub fn new(host: IpAddr) -> Self {
        let mode = if is_broadcast(host) {
            AddressMode::BroadcastDiscovery
        } else {
            AddressMode::UnicastLocked
        };
        Self { host, mode }
    }

    /// The address commands are currently sent to.
    pub fn host(&self) -> IpAddr {
        self.host
    }

    /// Current addressing mode.
    pub fn mode(&self) -> AddressMode {
        self.mode
    }

    /// Adopt `sender` as the authoritative bridge address.
    ///
    /// Returns `true` if this call performed the discovery-to-locked
    /// transition, `false` if the address was already locked.
    pub fn lock_to(&mut self, sender: IpAddr) -> bool {
        if self.mode == AddressMode::UnicastLocked {
            return false;
        }
        self.host = sender;
        self.mode = AddressMode::UnicastLocked;
        true
    }

    /// Whether a datagram from `sender` should be accepted.
    ///
    /// In discovery mode any sender is accepted (and becomes the
    /// bridge); once locked, only the locked address is.
    pub fn accepts(&self, sender: IpAddr) -> bool {
        match self.mode {
            AddressMode::BroadcastDiscovery => true,
            AddressMode::UnicastLocked => sender == self.host,
        }
    }
}

fn is_broadcast(host: IpAddr) -> bool {
    match host {
        IpAddr::V4(v4) => v4.is_broadcast(),
        IpAddr::V6(_) => false,
    }
}
