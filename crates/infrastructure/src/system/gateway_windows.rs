#![cfg(windows)]

use async_trait::async_trait;
use pyrewall_application::ports::GatewayDetector;
use std::net::Ipv4Addr;
use windows::Win32::NetworkManagement::IpHelper::{GetBestRoute, MIB_IPFORWARDROW};
use windows::Win32::Networking::WinSock::IN_ADDR;
use tracing::warn;

/// Detects the default IPv4 gateway by asking the IP Helper API for the
/// best route to a public address (`8.8.8.8`) and reading its next hop.
pub struct WindowsGatewayDetector;

impl WindowsGatewayDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsGatewayDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayDetector for WindowsGatewayDetector {
    async fn detect_gateway(&self) -> Option<Ipv4Addr> {
        tokio::task::spawn_blocking(detect).await.ok().flatten()
    }
}

fn detect() -> Option<Ipv4Addr> {
    unsafe {
        let dest = u32::from(Ipv4Addr::new(8, 8, 8, 8)).to_be();
        let mut row = MIB_IPFORWARDROW::default();
        let status = GetBestRoute(dest, 0, &mut row);
        if status != 0 {
            warn!(status, "GetBestRoute failed, no gateway detected");
            return None;
        }

        let addr: IN_ADDR = std::mem::transmute(row.dwForwardNextHop);
        let gateway = Ipv4Addr::from(u32::from_be(addr.S_un.S_addr));
        if gateway.is_unspecified() {
            None
        } else {
            Some(gateway)
        }
    }
}
