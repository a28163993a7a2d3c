use crate::{DeviceScanJob, HistoryRetentionJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs not owned by the packet
/// filter engine's own maintenance loop (blocklist sync, signature reload,
/// and IP-sweep cadences live inside the engine itself; see
/// `pyrewall_infrastructure::packet::engine`).
///
/// Use the builder pattern to register jobs, then call `.start()` once.
pub struct JobRunner {
    device_scan: Option<DeviceScanJob>,
    history_retention: Option<HistoryRetentionJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            device_scan: None,
            history_retention: None,
        }
    }

    pub fn with_device_scan(mut self, job: DeviceScanJob) -> Self {
        self.device_scan = Some(job);
        self
    }

    pub fn with_history_retention(mut self, job: HistoryRetentionJob) -> Self {
        self.history_retention = Some(job);
        self
    }

    pub async fn start(self) {
        info!("starting background job runner");

        if let Some(job) = self.device_scan {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.history_retention {
            Arc::new(job).start().await;
        }

        info!("all background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
