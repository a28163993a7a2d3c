use pyrewall_application::ports::{ArpReader, DeviceEnrichment, GatewayDetector};
use pyrewall_domain::config::DnsConfig;
use std::sync::Arc;

#[cfg(windows)]
pub fn arp_reader() -> Arc<dyn ArpReader> {
    Arc::new(pyrewall_infrastructure::system::WindowsArpReader::new())
}

#[cfg(not(windows))]
pub fn arp_reader() -> Arc<dyn ArpReader> {
    Arc::new(pyrewall_infrastructure::system::LinuxArpReader::new())
}

#[cfg(windows)]
pub fn gateway_detector() -> Arc<dyn GatewayDetector> {
    Arc::new(pyrewall_infrastructure::system::WindowsGatewayDetector::new())
}

#[cfg(not(windows))]
pub fn gateway_detector() -> Arc<dyn GatewayDetector> {
    Arc::new(pyrewall_infrastructure::system::NullGatewayDetector)
}

pub fn device_enrichment(dns: &DnsConfig) -> Arc<dyn DeviceEnrichment> {
    Arc::new(pyrewall_infrastructure::system::SystemDeviceEnrichment::new(dns))
}
