use async_trait::async_trait;
use pyrewall_application::ports::{ArpEntry, ArpReader};
use pyrewall_domain::DomainError;
use std::net::Ipv4Addr;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, warn};

fn is_valid_mac(mac: &str) -> bool {
    if mac.len() != 17 {
        return false;
    }
    let separator = if mac.contains(':') {
        ':'
    } else if mac.contains('-') {
        '-'
    } else {
        return false;
    };
    let parts: Vec<&str> = mac.split(separator).collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Reads `/proc/net/arp`. Retained for development and test builds; the
/// production Windows binary uses `WindowsArpReader` instead.
pub struct LinuxArpReader {
    arp_path: String,
}

impl LinuxArpReader {
    pub fn new() -> Self {
        Self {
            arp_path: "/proc/net/arp".to_string(),
        }
    }

    pub fn with_path(path: String) -> Self {
        Self { arp_path: path }
    }
}

impl Default for LinuxArpReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArpReader for LinuxArpReader {
    async fn read_arp_table(&self) -> Result<Vec<ArpEntry>, DomainError> {
        let content = fs::read_to_string(&self.arp_path)
            .await
            .map_err(|e| DomainError::IoError(format!("failed to read ARP cache: {e}")))?;

        let mut entries = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line_num == 0 {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                continue;
            }

            let ip_str = fields[0];
            let flags = fields[2];
            let mac = fields[3];

            if flags != "0x2" || mac == "00:00:00:00:00:00" {
                continue;
            }
            if !is_valid_mac(mac) {
                warn!(ip = ip_str, mac, "invalid MAC address format in ARP table");
                continue;
            }

            match Ipv4Addr::from_str(ip_str) {
                Ok(ip) => entries.push(ArpEntry {
                    ip,
                    mac: mac.to_string(),
                }),
                Err(e) => warn!(error = %e, ip = ip_str, "invalid IPv4 address in ARP table"),
            }
        }

        debug!(entries = entries.len(), "ARP table parsed");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_complete_entries_and_skips_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arp");
        tokio::fs::write(
            &path,
            "IP address       HW type     Flags       HW address            Mask     Device\n\
             192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0\n\
             192.168.1.2      0x1         0x0         00:00:00:00:00:00     *        eth0\n",
        )
        .await
        .unwrap();

        let reader = LinuxArpReader::with_path(path.to_string_lossy().to_string());
        let entries = reader.read_arp_table().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ip, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(entries[0].mac, "aa:bb:cc:dd:ee:ff");
    }
}
