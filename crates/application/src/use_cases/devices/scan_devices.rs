use std::sync::Arc;

use chrono::Utc;
use pyrewall_domain::{DomainError, LiveDevice};
use tracing::debug;

use crate::ports::{ArpReader, DeviceEnrichment, DeviceRepository};

/// Walks the OS ARP table, enriches each peer with vendor and best-effort
/// hostname, and replaces the `LiveDeviceSnapshot` table wholesale. Run on
/// a periodic cadence independent of the filter thread; has no bearing on
/// packet-filter correctness.
pub struct ScanDevicesUseCase {
    arp_reader: Arc<dyn ArpReader>,
    enrichment: Arc<dyn DeviceEnrichment>,
    device_repo: Arc<dyn DeviceRepository>,
}

impl ScanDevicesUseCase {
    pub fn new(
        arp_reader: Arc<dyn ArpReader>,
        enrichment: Arc<dyn DeviceEnrichment>,
        device_repo: Arc<dyn DeviceRepository>,
    ) -> Self {
        Self {
            arp_reader,
            enrichment,
            device_repo,
        }
    }

    pub async fn execute(&self) -> Result<usize, DomainError> {
        let entries = self.arp_reader.read_arp_table().await?;
        let mut snapshot = Vec::with_capacity(entries.len());

        for entry in entries {
            let vendor = self.enrichment.lookup_vendor(&entry.mac);
            let hostname = self.enrichment.reverse_hostname(entry.ip).await;

            snapshot.push(LiveDevice {
                ip: entry.ip,
                mac: Arc::from(entry.mac.as_str()),
                vendor: vendor.map(|v| Arc::from(v.as_str())),
                dev_type: hostname.map(|h| Arc::from(h.as_str())),
                last_seen: Utc::now().to_rfc3339(),
            });
        }

        let count = snapshot.len();
        self.device_repo.replace_live_snapshot(snapshot).await?;
        debug!(devices = count, "live device snapshot refreshed");
        Ok(count)
    }
}
