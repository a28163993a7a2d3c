use pyrewall_application::use_cases::ScanDevicesUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Refreshes the live ARP-derived device snapshot on a periodic cadence
/// (default 30 s), independent of the packet-filter thread.
pub struct DeviceScanJob {
    scan: Arc<ScanDevicesUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl DeviceScanJob {
    pub fn new(scan: Arc<ScanDevicesUseCase>) -> Self {
        Self {
            scan,
            interval_secs: 30,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "starting device scan job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("DeviceScanJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.scan.execute().await {
                            Ok(count) => info!(devices = count, "device scan complete"),
                            Err(e) => error!(error = %e, "device scan failed"),
                        }
                    }
                }
            }
        });
    }
}
