use pyrewall_domain::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// The four logical SQLite databases the persistence layer opens, each with
/// its own write/read pool pair and its own versioned migration set.
pub struct Databases {
    pub firewall: DbHandle,
    pub users: DbHandle,
    pub general_history: DbHandle,
    pub firewall_logs: DbHandle,
}

#[derive(Clone)]
pub struct DbHandle {
    pub write: SqlitePool,
    pub read: SqlitePool,
}

static FIREWALL_MIGRATOR: Migrator = sqlx::migrate!("./migrations/firewall");
static USERS_MIGRATOR: Migrator = sqlx::migrate!("./migrations/users");
static GENERAL_HISTORY_MIGRATOR: Migrator = sqlx::migrate!("./migrations/general_history");
static FIREWALL_LOGS_MIGRATOR: Migrator = sqlx::migrate!("./migrations/firewall_logs");

fn base_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    SqliteConnectOptions::from_str(database_url).map(|o| {
        o.create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
    })
}

/// Opens all four logical databases under `cfg.root`, ensuring the root
/// directory exists, running pending migrations on each write pool before
/// returning.
pub async fn open_all(cfg: &DatabaseConfig) -> Result<Databases, sqlx::Error> {
    tokio::fs::create_dir_all(&cfg.root).await.map_err(|e| {
        sqlx::Error::Io(e)
    })?;

    let firewall = open_db(cfg, "firewall.db", &FIREWALL_MIGRATOR).await?;
    let users = open_db(cfg, "users.db", &USERS_MIGRATOR).await?;
    let general_history = open_db(cfg, "general_history.db", &GENERAL_HISTORY_MIGRATOR).await?;
    let firewall_logs = open_db(cfg, "firewall_logs.db", &FIREWALL_LOGS_MIGRATOR).await?;

    Ok(Databases {
        firewall,
        users,
        general_history,
        firewall_logs,
    })
}

async fn open_db(
    cfg: &DatabaseConfig,
    file_name: &str,
    migrator: &Migrator,
) -> Result<DbHandle, sqlx::Error> {
    let path = Path::new(&cfg.root).join(file_name);
    let url = format!("sqlite://{}", path.display());

    let write = create_write_pool(&url, cfg).await?;
    migrator.run(&write).await?;

    let read = create_read_pool(&url, cfg).await?;

    Ok(DbHandle { write, read })
}

/// Small pool (2-4 connections) since SQLite WAL serializes writers at the
/// file level; more connections only increase contention.
pub async fn create_write_pool(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options =
        base_options(database_url)?.busy_timeout(Duration::from_secs(cfg.busy_timeout_secs));

    SqlitePoolOptions::new()
        .max_connections(cfg.write_pool_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(cfg.busy_timeout_secs))
        .connect_with(options)
        .await
}

/// SQLite WAL allows multiple concurrent readers while a writer holds an
/// exclusive lock; a dedicated pool keeps readers from starving for
/// connection slots behind background write bursts.
pub async fn create_read_pool(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options =
        base_options(database_url)?.busy_timeout(Duration::from_secs(cfg.busy_timeout_secs));

    SqlitePoolOptions::new()
        .max_connections(cfg.read_pool_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(cfg.busy_timeout_secs))
        .connect_with(options)
        .await
}

/// Retries a write operation against a "database is locked" error, per the
/// persistence layer's bounded-retry contract (default 5 retries, 150 ms).
pub async fn with_lock_retry<T, F, Fut>(cfg: &DatabaseConfig, mut op: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(sqlx::Error::Database(ref db_err)) if is_locked(db_err.message()) && attempt < cfg.lock_retries => {
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(cfg.lock_retry_delay_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

fn is_locked(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database table is locked")
}
