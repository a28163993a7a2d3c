use async_trait::async_trait;
use pyrewall_application::ports::DeviceRepository;
use pyrewall_domain::{BlockedDevice, DomainError, LiveDevice};
use sqlx::{Row, SqlitePool};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::info;

pub struct SqliteDeviceRepository {
    write: SqlitePool,
    read: SqlitePool,
}

impl SqliteDeviceRepository {
    pub fn new(write: SqlitePool, read: SqlitePool) -> Self {
        Self { write, read }
    }
}

#[async_trait]
impl DeviceRepository for SqliteDeviceRepository {
    async fn block_device(&self, ip: Ipv4Addr, mac: String) -> Result<BlockedDevice, DomainError> {
        sqlx::query(
            "INSERT INTO blocked_devices (ip, mac) VALUES (?, ?)
             ON CONFLICT(ip) DO UPDATE SET mac = excluded.mac",
        )
        .bind(ip.to_string())
        .bind(&mac)
        .execute(&self.write)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let row = sqlx::query("SELECT ip, mac, date_blocked FROM blocked_devices WHERE ip = ?")
            .bind(ip.to_string())
            .fetch_one(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(BlockedDevice {
            ip,
            mac: Arc::from(row.get::<String, _>("mac").as_str()),
            date_blocked: row.get::<Option<String>, _>("date_blocked"),
        })
    }

    async fn unblock_device(&self, ip: Ipv4Addr) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM blocked_devices WHERE ip = ?")
            .bind(ip.to_string())
            .execute(&self.write)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("blocked device {ip} not found")));
        }
        Ok(())
    }

    async fn get_blocked_devices(&self) -> Result<Vec<BlockedDevice>, DomainError> {
        let rows = sqlx::query("SELECT ip, mac, date_blocked FROM blocked_devices")
            .fetch_all(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let ip_str: String = row.get("ip");
                Ok(BlockedDevice {
                    ip: ip_str
                        .parse()
                        .map_err(|_| DomainError::InvalidIpAddress(ip_str.clone()))?,
                    mac: Arc::from(row.get::<String, _>("mac").as_str()),
                    date_blocked: row.get::<Option<String>, _>("date_blocked"),
                })
            })
            .collect()
    }

    async fn is_blocked(&self, ip: Ipv4Addr) -> Result<bool, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blocked_devices WHERE ip = ?")
            .bind(ip.to_string())
            .fetch_one(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(count.0 > 0)
    }

    async fn replace_live_snapshot(&self, devices: Vec<LiveDevice>) -> Result<(), DomainError> {
        let mut tx = self
            .write
            .begin()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM live_device_snapshot")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        for d in &devices {
            sqlx::query(
                "INSERT INTO live_device_snapshot (ip, mac, vendor, dev_type, last_seen)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(d.ip.to_string())
            .bind(d.mac.as_ref())
            .bind(d.vendor.as_deref())
            .bind(d.dev_type.as_deref())
            .bind(&d.last_seen)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        info!(devices = devices.len(), "live device snapshot replaced");
        Ok(())
    }

    async fn get_live_snapshot(&self) -> Result<Vec<LiveDevice>, DomainError> {
        let rows = sqlx::query("SELECT ip, mac, vendor, dev_type, last_seen FROM live_device_snapshot")
            .fetch_all(&self.read)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let ip_str: String = row.get("ip");
                Ok(LiveDevice {
                    ip: ip_str
                        .parse()
                        .map_err(|_| DomainError::InvalidIpAddress(ip_str.clone()))?,
                    mac: Arc::from(row.get::<String, _>("mac").as_str()),
                    vendor: row.get::<Option<String>, _>("vendor").map(|v| Arc::from(v.as_str())),
                    dev_type: row.get::<Option<String>, _>("dev_type").map(|v| Arc::from(v.as_str())),
                    last_seen: row.get::<String, _>("last_seen"),
                })
            })
            .collect()
    }
}
