use pyrewall_application::use_cases::ArchiveOldHistoryUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Archives history entries older than `retention_days` on a daily cadence.
pub struct HistoryRetentionJob {
    archive: Arc<ArchiveOldHistoryUseCase>,
    retention_days: i64,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl HistoryRetentionJob {
    pub fn new(archive: Arc<ArchiveOldHistoryUseCase>, retention_days: i64) -> Self {
        Self {
            archive,
            retention_days,
            interval_secs: 86_400,
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
        info!(
            retention_days = self.retention_days,
            "starting history retention job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("HistoryRetentionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.archive.execute(self.retention_days).await {
                            Ok(archived) => info!(archived, "history retention pass complete"),
                            Err(e) => error!(error = %e, "history retention pass failed"),
                        }
                    }
                }
            }
        });
    }
}
