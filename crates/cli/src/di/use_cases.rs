use super::devices;
use super::repositories::Repositories;
use pyrewall_application::use_cases::{ArchiveOldHistoryUseCase, ScanDevicesUseCase};
use pyrewall_domain::config::DnsConfig;
use std::sync::Arc;

/// Use cases consumed by the background job runner. The remaining
/// application-layer use cases (blocklist and device admin CRUD) are
/// consumed by the administration surface, which is out of scope here.
pub struct BackgroundUseCases {
    pub scan_devices: Arc<ScanDevicesUseCase>,
    pub archive_old_history: Arc<ArchiveOldHistoryUseCase>,
}

impl BackgroundUseCases {
    pub fn build(repos: &Repositories, dns: &DnsConfig) -> Self {
        let scan_devices = Arc::new(ScanDevicesUseCase::new(
            devices::arp_reader(),
            devices::device_enrichment(dns),
            repos.device.clone(),
        ));
        let archive_old_history = Arc::new(ArchiveOldHistoryUseCase::new(repos.history.clone()));

        Self {
            scan_devices,
            archive_old_history,
        }
    }
}
