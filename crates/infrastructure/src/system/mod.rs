pub mod arp_linux;
pub mod oui;

#[cfg(windows)]
pub mod arp_windows;
#[cfg(windows)]
pub mod gateway_windows;
#[cfg(not(windows))]
pub mod gateway_null;

pub use arp_linux::LinuxArpReader;
pub use oui::SystemDeviceEnrichment;

#[cfg(windows)]
pub use arp_windows::WindowsArpReader;
#[cfg(windows)]
pub use gateway_windows::WindowsGatewayDetector;
#[cfg(not(windows))]
pub use gateway_null::NullGatewayDetector;
