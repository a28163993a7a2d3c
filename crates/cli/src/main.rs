//! Pyrewall composition root.
//!
//! Loads configuration, opens the four logical databases, runs first-run
//! bootstrap, wires the concrete adapters behind every application-layer
//! port, and starts the controller plus the background job runner. Exits
//! cleanly on Ctrl+C.

mod bootstrap;
mod di;

use clap::Parser;
use pyrewall_controller::Controller;
use pyrewall_domain::config::CliOverrides;
use pyrewall_domain::CriticalProtectionSet;
use pyrewall_infrastructure::dns::{DnsProxy, HickoryDomainResolver};
use pyrewall_infrastructure::install;
use pyrewall_infrastructure::packet::PacketFilterEngine;
use pyrewall_jobs::{DeviceScanJob, HistoryRetentionJob, JobRunner};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// History entries older than this are archived on a daily cadence. Not
/// yet exposed as a configuration knob.
const HISTORY_RETENTION_DAYS: i64 = 90;
const HISTORY_RETENTION_INTERVAL_SECS: u64 = 86_400;

#[derive(Parser)]
#[command(name = "pyrewall")]
#[command(about = "Host-based next-generation firewall and ICS gateway enforcement engine")]
struct Cli {
    /// Path to pyrewall.toml. Defaults to ./pyrewall.toml if present.
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Overrides database.root.
    #[arg(long)]
    db_root: Option<String>,

    /// Overrides dns.bind_address.
    #[arg(long)]
    dns_bind_address: Option<String>,

    /// Overrides logging.level.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        db_root: cli.db_root.clone(),
        dns_bind_address: cli.dns_bind_address.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    let db_root = Path::new(&config.database.root);
    install::relocate_stray_databases(db_root)?;

    let databases = bootstrap::init_database(&config.database).await?;
    let repos = di::Repositories::build(&databases);

    if !install::is_bootstrapped(db_root) {
        install::bootstrap_default_admin(db_root, repos.user.clone()).await?;
        install::mark_bootstrapped(db_root)?;
    }

    let gateway = di::devices::gateway_detector().detect_gateway().await;
    let critical = CriticalProtectionSet::new(gateway);

    let resolver = Arc::new(HickoryDomainResolver::new());

    let filter = Arc::new(PacketFilterEngine::new(
        databases.firewall_logs.write.clone(),
        critical,
        repos.blocklist.clone(),
        repos.blocked_ip.clone(),
        repos.app_signature.clone(),
        repos.device.clone(),
        resolver,
        &config.blocking,
        &config.packet_filter,
    ));

    let dns_bind: std::net::SocketAddr = config.dns.bind_address.parse()?;
    let dns_upstream: std::net::SocketAddr = config.dns.upstream.parse()?;
    let dns_proxy = Arc::new(DnsProxy::new(
        dns_bind,
        dns_upstream,
        Duration::from_millis(config.dns.forward_timeout_ms),
        Duration::from_secs(config.dns.receive_timeout_secs),
        repos.blocklist.clone(),
    ));

    let controller = Arc::new(Controller::new(filter, dns_proxy));
    controller.start().await?;
    info!("controller started");

    let use_cases = di::BackgroundUseCases::build(&repos, &config.dns);
    let jobs = JobRunner::new()
        .with_device_scan(
            DeviceScanJob::new(use_cases.scan_devices).with_interval(config.server.device_scan_interval_secs),
        )
        .with_history_retention(
            HistoryRetentionJob::new(use_cases.archive_old_history, HISTORY_RETENTION_DAYS)
                .with_interval(HISTORY_RETENTION_INTERVAL_SECS),
        );
    jobs.start().await;
    info!("background jobs started");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    let stop_timeout = Duration::from_secs_f64(config.server.stop_timeout_secs);
    let exited = controller.stop(true, stop_timeout).await;
    if !exited {
        tracing::warn!("packet filter engine did not stop within the configured timeout");
    }

    Ok(())
}
