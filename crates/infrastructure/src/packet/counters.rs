use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use sqlx::SqlitePool;
use std::net::Ipv4Addr;
use tracing::{debug, error};

/// Per-IP drop counters accumulated by the capture loop and flushed to the
/// `firewall_logs` database on a 1 s cadence (and once more on shutdown).
#[derive(Default)]
pub struct DropCounters {
    counts: DashMap<Ipv4Addr, u64, FxBuildHasher>,
}

impl DropCounters {
    pub fn new() -> Self {
        Self {
            counts: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn increment(&self, ip: Ipv4Addr) {
        *self.counts.entry(ip).or_insert(0) += 1;
    }

    pub async fn flush(&self, pool: &SqlitePool) {
        if self.counts.is_empty() {
            return;
        }

        let snapshot: Vec<(Ipv4Addr, u64)> = self
            .counts
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        self.counts.clear();

        for (ip, count) in snapshot {
            let result = sqlx::query(
                "INSERT INTO drop_counter_flushes (ip, dropped_count) VALUES (?, ?)",
            )
            .bind(ip.to_string())
            .bind(count as i64)
            .execute(pool)
            .await;

            if let Err(e) = result {
                error!(error = %e, %ip, "failed to flush drop counter");
            }
        }

        debug!("drop counters flushed");
    }
}
