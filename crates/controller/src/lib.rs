//! Pyrewall Controller
//!
//! The single point through which the composition root starts, stops, and
//! reloads the packet filter engine and DNS proxy together. Exposes
//! `start()`, `stop(wait, timeout)`, `is_running()`, `is_ready()`, and
//! `notify_reload()`.

use pyrewall_application::ports::{DnsProxyPort, PacketFilterEnginePort};
use pyrewall_domain::DomainError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct Controller {
    filter: Arc<dyn PacketFilterEnginePort>,
    dns_proxy: Arc<dyn DnsProxyPort>,
    running: AtomicBool,
}

impl Controller {
    pub fn new(filter: Arc<dyn PacketFilterEnginePort>, dns_proxy: Arc<dyn DnsProxyPort>) -> Self {
        Self {
            filter,
            dns_proxy,
            running: AtomicBool::new(false),
        }
    }

    /// Idempotent: if already running, returns immediately without
    /// constructing anything new. Spawns a helper task so opening the
    /// kernel capture handle (which may be slow) never blocks the caller.
    pub async fn start(&self) -> Result<(), DomainError> {
        if self.running.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let filter = self.filter.clone();
        let dns_proxy = self.dns_proxy.clone();
        tokio::spawn(async move {
            if let Err(e) = filter.start().await {
                error!(error = %e, "packet filter engine failed to start");
            }
            if let Err(e) = dns_proxy.start().await {
                error!(error = %e, "DNS proxy failed to start");
            }
        });

        info!("controller start requested");
        Ok(())
    }

    /// Signals both components to stop, the DNS proxy last. Polls
    /// `is_ready()` at 100 ms granularity until the filter thread exits or
    /// `timeout` elapses. Returns `true` iff the thread exited in time.
    pub async fn stop(&self, wait: bool, timeout: Duration) -> bool {
        let filter = self.filter.clone();
        tokio::spawn(async move {
            if let Err(e) = filter.stop().await {
                error!(error = %e, "packet filter engine failed to stop cleanly");
            }
        });

        let exited = if wait {
            let deadline = tokio::time::Instant::now() + timeout;
            loop {
                if !self.filter.is_ready() {
                    break true;
                }
                if tokio::time::Instant::now() >= deadline {
                    break false;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        } else {
            true
        };

        if let Err(e) = self.dns_proxy.stop().await {
            error!(error = %e, "DNS proxy failed to stop cleanly");
        }

        self.running.store(false, Ordering::Release);
        info!(exited, "controller stop completed");
        exited
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn is_ready(&self) -> bool {
        self.filter.is_ready()
    }

    /// Sets the filter's reload event and refreshes the DNS proxy's
    /// blocklist cache. Safe to call from any thread.
    pub fn notify_reload(self: &Arc<Self>) {
        self.filter.notify_reload();
        let dns_proxy = self.dns_proxy.clone();
        tokio::spawn(async move {
            if let Err(e) = dns_proxy.refresh_from_db().await {
                error!(error = %e, "DNS proxy refresh_from_db failed after reload notification");
            }
        });
    }
}
