use pyrewall_domain::config::DatabaseConfig;
use pyrewall_infrastructure::database::{self, Databases};
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<Databases> {
    info!(root = %cfg.root, "initializing databases");

    let databases = database::open_all(cfg).await.map_err(|e| {
        error!(error = %e, "failed to open databases");
        anyhow::anyhow!(e)
    })?;

    info!(
        write_pool_max = cfg.write_pool_max_connections,
        read_pool_max = cfg.read_pool_max_connections,
        "databases initialized"
    );

    let warmup_pool = databases.firewall_logs.read.clone();
    tokio::spawn(async move {
        warm_page_cache(&warmup_pool).await;
    });

    Ok(databases)
}

async fn warm_page_cache(pool: &sqlx::SqlitePool) {
    let result = sqlx::query("SELECT id FROM drop_counter_flushes ORDER BY id DESC LIMIT 5000")
        .execute(pool)
        .await;
    match result {
        Ok(r) => info!(rows = r.rows_affected(), "SQLite page cache warmed"),
        Err(e) => error!(error = %e, "SQLite warmup query failed (non-critical)"),
    }
}
