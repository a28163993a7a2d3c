use super::backoff::ReinjectBackoff;
use super::capture::{self, CaptureError, PacketCapture};
use super::counters::DropCounters;
use super::pipeline::{self, Decision};
use super::state::FilterState;

use async_trait::async_trait;
use pyrewall_application::ports::{
    AppSignatureRepository, BlockedIpRepository, BlocklistRepository, DeviceRepository,
    DomainResolver, PacketFilterEnginePort,
};
use pyrewall_application::use_cases::blocklist::{AddTemporaryBlockIpUseCase, CleanupExpiredUseCase};
use pyrewall_domain::config::{BlockingConfig, PacketFilterConfig};
use pyrewall_domain::{BlockedIp, CriticalProtectionSet, DomainError};
use arc_swap::ArcSwap;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

/// Cadences and backoff parameters for the maintenance loop, taken from
/// `BlockingConfig`/`PacketFilterConfig` at construction time.
struct EngineTuning {
    domain_ip_reload: Duration,
    signature_reload: Duration,
    resync: Duration,
    sweep: Duration,
    counter_flush: Duration,
    recv_poll_timeout: Duration,
    temp_block_ttl_secs: i64,
    capture_filter: String,
    packet_filter_config: PacketFilterConfig,
}

impl EngineTuning {
    fn new(blocking: &BlockingConfig, packet_filter: &PacketFilterConfig) -> Self {
        Self {
            domain_ip_reload: Duration::from_secs(blocking.reload_interval_secs),
            signature_reload: Duration::from_secs(blocking.signature_reload_interval_secs),
            resync: Duration::from_secs(blocking.resync_interval_secs),
            sweep: Duration::from_secs(blocking.cleanup_interval_secs),
            counter_flush: Duration::from_millis(packet_filter.counter_flush_interval_ms),
            recv_poll_timeout: Duration::from_millis(packet_filter.receive_timeout_ms),
            temp_block_ttl_secs: blocking.temp_block_ttl_secs,
            capture_filter: packet_filter.capture_filter.clone(),
            packet_filter_config: packet_filter.clone(),
        }
    }
}

/// Shared state handed to the dedicated capture thread. Cheap to clone:
/// every field is an `Arc` or a `Copy` handle.
#[derive(Clone)]
struct EngineShared {
    state: Arc<ArcSwap<FilterState>>,
    ready: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    reload: Arc<AtomicBool>,
    counters: Arc<DropCounters>,
    critical: Arc<CriticalProtectionSet>,
    logs_pool: SqlitePool,
    blocklist_repo: Arc<dyn BlocklistRepository>,
    blocked_ip_repo: Arc<dyn BlockedIpRepository>,
    app_signature_repo: Arc<dyn AppSignatureRepository>,
    device_repo: Arc<dyn DeviceRepository>,
    resolver: Arc<dyn DomainResolver>,
    temp_block: Arc<AddTemporaryBlockIpUseCase>,
    cleanup_expired: Arc<CleanupExpiredUseCase>,
    tuning: Arc<EngineTuning>,
}

impl EngineShared {
    async fn reload_domains_and_ips(&self) {
        let domains = match self.blocklist_repo.get_all().await {
            Ok(d) => d,
            Err(e) => {
                error!(error = %e, "failed to reload blocked domains");
                return;
            }
        };
        let ips = match self.blocked_ip_repo.get_all().await {
            Ok(i) => i,
            Err(e) => {
                error!(error = %e, "failed to reload blocked ips");
                return;
            }
        };
        let devices = match self.device_repo.get_blocked_devices().await {
            Ok(d) => d,
            Err(e) => {
                error!(error = %e, "failed to reload blocked devices");
                return;
            }
        };

        let now = chrono::Utc::now();
        let blocked_ips: HashSet<_> = ips
            .into_iter()
            .filter(|ip| !ip.is_expired_at(now))
            .map(|ip| ip.ip)
            .collect();
        let blocked_domains: Arc<[Arc<str>]> =
            Arc::from(domains.into_iter().map(|d| d.domain).collect::<Vec<_>>());
        let blocked_devices: HashSet<_> = devices.into_iter().map(|d| d.ip).collect();

        let previous = self.state.load();
        self.state.store(Arc::new(FilterState {
            blocked_domains,
            blocked_ips: Arc::new(blocked_ips),
            app_signatures: previous.app_signatures.clone(),
            blocked_devices: Arc::new(blocked_devices),
            critical: self.critical.clone(),
        }));
    }

    async fn reload_signatures(&self) {
        let signatures = match self.app_signature_repo.get_all().await {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "failed to reload application signatures");
                return;
            }
        };

        let previous = self.state.load();
        self.state.store(Arc::new(FilterState {
            blocked_domains: previous.blocked_domains.clone(),
            blocked_ips: previous.blocked_ips.clone(),
            app_signatures: Arc::from(signatures),
            blocked_devices: previous.blocked_devices.clone(),
            critical: self.critical.clone(),
        }));
    }

    /// Re-resolves every blocked domain and refreshes derived `BlockedIP`
    /// rows. Unlike the `SyncBlockedIpsUseCase` entry point used by the
    /// admin surface, this inline pass skips the `notify_reload()` signal:
    /// the very next 3 s cadence already reloads the freshly-written rows.
    async fn resync_domains(&self) {
        let domains = match self.blocklist_repo.get_all().await {
            Ok(d) => d,
            Err(e) => {
                error!(error = %e, "resync: failed to read blocked domains");
                return;
            }
        };

        let mut resolved: HashSet<(std::net::Ipv4Addr, Arc<str>)> = HashSet::new();
        for d in &domains {
            match self.resolver.resolve(&d.domain).await {
                Ok(ips) => {
                    for ip in ips {
                        resolved.insert((ip, d.domain.clone()));
                    }
                }
                Err(e) => {
                    warn!(domain = %d.domain, error = %e, "resync: failed to resolve domain");
                }
            }
        }

        let rows: Vec<BlockedIp> = resolved
            .into_iter()
            .filter(|(ip, _)| !self.critical.contains(ip))
            .map(|(ip, domain)| BlockedIp::authoritative(ip, domain))
            .collect();

        let count = rows.len();
        if let Err(e) = self.blocked_ip_repo.replace_authoritative(rows).await {
            error!(error = %e, "resync: failed to replace authoritative blocked ips");
            return;
        }
        debug!(derived_ips = count, "periodic blocked-ip resync complete");
    }

    async fn sweep_expired(&self) {
        match self.cleanup_expired.execute().await {
            Ok(removed) if removed > 0 => debug!(removed, "swept expired blocked ips"),
            Ok(_) => {}
            Err(e) => error!(error = %e, "failed to sweep expired blocked ips"),
        }
    }

    async fn insert_temp_block(&self, ip: std::net::Ipv4Addr, domain: Option<Arc<str>>, ttl: Duration) {
        if let Err(e) = self
            .temp_block
            .execute(ip, domain, ttl.as_secs() as i64, &self.critical)
            .await
        {
            error!(error = %e, %ip, "failed to insert temporary block");
        }
    }

    fn run(self, rt: Handle) {
        let mut capture = match capture::open(&self.tuning.capture_filter) {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "failed to open packet capture handle");
                return;
            }
        };

        rt.block_on(self.reload_domains_and_ips());
        rt.block_on(self.reload_signatures());
        self.ready.store(true, Ordering::SeqCst);
        info!("packet filter engine ready");

        let mut last_domain_ip_reload = Instant::now();
        let mut last_sig_reload = Instant::now();
        let mut last_resync = Instant::now();
        let mut last_sweep = Instant::now();
        let mut last_counter_flush = Instant::now();
        let mut backoff = ReinjectBackoff::from_config(&self.tuning.packet_filter_config);

        while !self.stop.load(Ordering::SeqCst) {
            let now = Instant::now();

            if self.reload.swap(false, Ordering::AcqRel)
                || now.duration_since(last_domain_ip_reload) >= self.tuning.domain_ip_reload
            {
                rt.block_on(self.reload_domains_and_ips());
                last_domain_ip_reload = now;
            }
            if now.duration_since(last_sig_reload) >= self.tuning.signature_reload {
                rt.block_on(self.reload_signatures());
                last_sig_reload = now;
            }
            if now.duration_since(last_resync) >= self.tuning.resync {
                rt.block_on(self.resync_domains());
                last_resync = now;
            }
            if now.duration_since(last_sweep) >= self.tuning.sweep {
                rt.block_on(self.sweep_expired());
                last_sweep = now;
            }
            if now.duration_since(last_counter_flush) >= self.tuning.counter_flush {
                rt.block_on(self.counters.flush(&self.logs_pool));
                last_counter_flush = now;
            }

            let temp_block_ttl = Duration::from_secs(self.tuning.temp_block_ttl_secs.max(0) as u64);
            match capture.recv_timeout(self.tuning.recv_poll_timeout) {
                Ok(Some(packet)) => {
                    let state = self.state.load();
                    match pipeline::decide(&state, &packet, temp_block_ttl) {
                        Decision::Reinject => {
                            if let Err(e) = capture.reinject(&packet) {
                                self.handle_reinject_failure(&mut backoff, e);
                            } else {
                                backoff.reset();
                            }
                        }
                        Decision::Drop => {}
                        Decision::DropIpDeny(ip) => {
                            self.counters.increment(ip);
                        }
                        Decision::DropAndTempBlock { ip, domain, ttl } => {
                            self.counters.increment(ip);
                            rt.block_on(self.insert_temp_block(ip, domain, ttl));
                        }
                    }
                }
                Ok(None) => {}
                Err(CaptureError::Closed(msg)) => {
                    debug!(%msg, "capture handle closed, stopping filter thread");
                    break;
                }
                Err(CaptureError::PrivilegeDenied(msg)) => {
                    error!(%msg, "capture privilege denied, stopping filter thread");
                    break;
                }
                Err(CaptureError::ReinjectFailed(msg)) => {
                    warn!(%msg, "unexpected error from capture receive");
                }
            }
        }

        capture.close();
        rt.block_on(self.counters.flush(&self.logs_pool));
        self.ready.store(false, Ordering::SeqCst);
        info!("packet filter engine stopped");
    }

    fn handle_reinject_failure(&self, backoff: &mut ReinjectBackoff, err: CaptureError) {
        let delay = backoff.fail();
        warn!(error = %err, delay_ms = delay.as_millis(), "reinject failed, backing off");
        std::thread::sleep(delay);
    }
}

/// Implements the single-dedicated-thread packet filter: one OS thread
/// performs both packet capture and all periodic maintenance (domain/IP
/// reload, signature reload, resync, expiry sweep, counter flush). Never
/// does per-packet async work; maintenance steps call back into the Tokio
/// runtime via `Handle::block_on`.
pub struct PacketFilterEngine {
    shared: EngineShared,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl PacketFilterEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        logs_pool: SqlitePool,
        critical: CriticalProtectionSet,
        blocklist_repo: Arc<dyn BlocklistRepository>,
        blocked_ip_repo: Arc<dyn BlockedIpRepository>,
        app_signature_repo: Arc<dyn AppSignatureRepository>,
        device_repo: Arc<dyn DeviceRepository>,
        resolver: Arc<dyn DomainResolver>,
        blocking_config: &BlockingConfig,
        packet_filter_config: &PacketFilterConfig,
    ) -> Self {
        let critical = Arc::new(critical);
        let temp_block = Arc::new(AddTemporaryBlockIpUseCase::new(blocked_ip_repo.clone()));
        let cleanup_expired = Arc::new(CleanupExpiredUseCase::new(blocked_ip_repo.clone()));
        let tuning = Arc::new(EngineTuning::new(blocking_config, packet_filter_config));

        Self {
            shared: EngineShared {
                state: Arc::new(ArcSwap::from_pointee(FilterState::default())),
                ready: Arc::new(AtomicBool::new(false)),
                stop: Arc::new(AtomicBool::new(false)),
                reload: Arc::new(AtomicBool::new(false)),
                counters: Arc::new(DropCounters::new()),
                critical,
                logs_pool,
                blocklist_repo,
                blocked_ip_repo,
                app_signature_repo,
                device_repo,
                resolver,
                temp_block,
                cleanup_expired,
                tuning,
            },
            join: Mutex::new(None),
        }
    }
}

#[async_trait]
impl PacketFilterEnginePort for PacketFilterEngine {
    async fn start(&self) -> Result<(), DomainError> {
        let mut guard = self.join.lock().unwrap();
        if guard.is_some() {
            return Ok(());
        }

        self.shared.stop.store(false, Ordering::SeqCst);
        let shared = self.shared.clone();
        let rt = Handle::current();

        let handle = std::thread::Builder::new()
            .name("packet-filter".to_string())
            .spawn(move || shared.run(rt))
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        *guard = Some(handle);
        Ok(())
    }

    async fn stop(&self) -> Result<(), DomainError> {
        self.shared.stop.store(true, Ordering::SeqCst);
        let handle = self.join.lock().unwrap().take();
        if let Some(handle) = handle {
            tokio::task::spawn_blocking(move || {
                let _ = handle.join();
            })
            .await
            .map_err(|e| DomainError::IoError(e.to_string()))?;
        }
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.shared.ready.load(Ordering::SeqCst)
    }

    fn notify_reload(&self) {
        self.shared.reload.store(true, Ordering::SeqCst);
    }
}
