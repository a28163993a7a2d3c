#![cfg(not(windows))]

use async_trait::async_trait;
use pyrewall_application::ports::GatewayDetector;
use std::net::Ipv4Addr;

/// Stand-in for non-Windows development and test builds, where the IP
/// Helper API backing `WindowsGatewayDetector` is unavailable.
pub struct NullGatewayDetector;

#[async_trait]
impl GatewayDetector for NullGatewayDetector {
    async fn detect_gateway(&self) -> Option<Ipv4Addr> {
        None
    }
}
