//! Configuration for the link.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Configuration for a [`Link`](crate::Link).
///
/// The defaults match the bridge's fixed ports and the conservative
/// timing the appliance needs: it drops commands that arrive
/// back-to-back, so successive sends are spaced by `pacing_interval`.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Bridge address; the wildcard broadcast address until learned
    pub bridge_host: IpAddr,
    /// Port the bridge accepts commands on
    pub command_port: u16,
    /// Local port the bridge sends replies to
    pub listen_port: u16,
    /// Minimum spacing between successive outbound commands
    pub pacing_interval: Duration,
    /// Per-request timeout before a pending command fails
    pub response_timeout: Duration,
    /// Dispatch queue capacity; submissions beyond this are dropped
    pub queue_capacity: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            bridge_host: IpAddr::V4(Ipv4Addr::BROADCAST),
            command_port: 9760,
            listen_port: 9761,
            pacing_interval: Duration::from_millis(1000),
            response_timeout: Duration::from_millis(1000),
            queue_capacity: 100,
        }
    }
}

impl LinkConfig {
    /// Configuration targeting a known bridge address, skipping
    /// broadcast discovery.
    pub fn with_bridge_host(host: IpAddr) -> Self {
        Self {
            bridge_host: host,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LinkConfig::default();
        assert_eq!(config.bridge_host, IpAddr::V4(Ipv4Addr::new(255, 255, 255, 255)));
        assert_eq!(config.command_port, 9760);
        assert_eq!(config.listen_port, 9761);
        assert_eq!(config.pacing_interval, Duration::from_millis(1000));
        assert_eq!(config.response_timeout, Duration::from_millis(1000));
        assert_eq!(config.queue_capacity, 100);
    }

    #[test]
    fn test_with_bridge_host() {
        let host: IpAddr = "192.168.1.50".parse().unwrap();
        let config = LinkConfig::with_bridge_host(host);
        assert_eq!(config.bridge_host, host);
        assert_eq!(config.command_port, 9760);
    }
}
