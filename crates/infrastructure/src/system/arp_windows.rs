#![cfg(windows)]

use async_trait::async_trait;
use pyrewall_application::ports::{ArpEntry, ArpReader};
use pyrewall_domain::DomainError;
use std::net::Ipv4Addr;
use windows::Win32::Foundation::NO_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    FreeMibTable, GetIpNetTable2, MIB_IPNET_TABLE2,
};
use windows::Win32::Networking::WinSock::AF_INET;

/// Reads the IPv4 neighbor (ARP) table via the IP Helper API.
pub struct WindowsArpReader;

impl WindowsArpReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsArpReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArpReader for WindowsArpReader {
    async fn read_arp_table(&self) -> Result<Vec<ArpEntry>, DomainError> {
        // GetIpNetTable2 is a blocking FFI call; run it off the async
        // executor's worker threads.
        tokio::task::spawn_blocking(read_table)
            .await
            .map_err(|e| DomainError::IoError(e.to_string()))?
    }
}

fn read_table() -> Result<Vec<ArpEntry>, DomainError> {
    unsafe {
        let mut table_ptr: *mut MIB_IPNET_TABLE2 = std::ptr::null_mut();
        let status = GetIpNetTable2(AF_INET, &mut table_ptr);
        if status != NO_ERROR.0 as i32 || table_ptr.is_null() {
            return Err(DomainError::IoError(format!(
                "GetIpNetTable2 failed with status {status}"
            )));
        }

        let table = &*table_ptr;
        let rows = std::slice::from_raw_parts(table.Table.as_ptr(), table.NumEntries as usize);

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            if !row.IsRouter.as_bool() && row.State.0 >= 3 {
                let addr = row.Address.Ipv4.sin_addr.S_un.S_addr;
                let ip = Ipv4Addr::from(u32::from_le(addr));
                let mac_len = row.PhysicalAddressLength as usize;
                if mac_len == 6 {
                    let bytes = &row.PhysicalAddress[..mac_len];
                    let mac = bytes
                        .iter()
                        .map(|b| format!("{b:02x}"))
                        .collect::<Vec<_>>()
                        .join(":");
                    entries.push(ArpEntry { ip, mac });
                }
            }
        }

        FreeMibTable(table_ptr as *mut _);
        Ok(entries)
    }
}
