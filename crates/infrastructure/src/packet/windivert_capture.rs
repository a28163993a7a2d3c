#![cfg(windows)]

use super::capture::{CaptureError, CapturedPacket, PacketCapture, PacketProtocol};
use std::net::Ipv4Addr;
use std::time::Duration;
use windivert::address::WinDivertAddress;
use windivert::layer::NetworkLayer;
use windivert::packet::WinDivertPacket;
use windivert::{CloseAction, WinDivert};

/// Packet-diversion handle backed by WinDivert.dll. The capture filter is
/// fixed: `(inbound or outbound) and (tcp.DstPort == 80 or tcp.DstPort == 443
/// or udp.DstPort == 443)`.
pub struct WinDivertCapture {
    handle: WinDivert<NetworkLayer>,
}

impl WinDivertCapture {
    pub fn open(filter: &str) -> Result<Self, CaptureError> {
        let handle = WinDivert::network(filter, 0, Default::default()).map_err(|e| {
            let msg = e.to_string();
            if msg.to_lowercase().contains("access") || msg.to_lowercase().contains("privilege") {
                CaptureError::PrivilegeDenied(msg)
            } else {
                CaptureError::Closed(msg)
            }
        })?;

        Ok(Self { handle })
    }

    fn parse(raw: &WinDivertPacket<'_, NetworkLayer>) -> CapturedPacket {
        let data = raw.data.to_vec();
        let (src_ip, dst_ip, protocol, dst_port) = parse_ip_header(&data);

        CapturedPacket {
            data,
            src_ip,
            dst_ip,
            protocol,
            dst_port,
        }
    }
}

/// Minimal IPv4 + TCP/UDP header walk: enough to recover the 5-tuple
/// fields the decision pipeline needs. Assumes no IP options (IHL == 5),
/// which holds for the overwhelming majority of real traffic; packets with
/// options fall through with `dst_port = None` and are re-injected by the
/// default rule.
fn parse_ip_header(data: &[u8]) -> (Option<Ipv4Addr>, Option<Ipv4Addr>, PacketProtocol, Option<u16>) {
    if data.len() < 20 || (data[0] >> 4) != 4 {
        return (None, None, PacketProtocol::Other, None);
    }

    let ihl = ((data[0] & 0x0f) as usize) * 4;
    let proto_byte = data[9];
    let src_ip = Ipv4Addr::new(data[12], data[13], data[14], data[15]);
    let dst_ip = Ipv4Addr::new(data[16], data[17], data[18], data[19]);

    let (protocol, dst_port) = match proto_byte {
        6 if data.len() >= ihl + 4 => (
            PacketProtocol::Tcp,
            Some(u16::from_be_bytes([data[ihl + 2], data[ihl + 3]])),
        ),
        17 if data.len() >= ihl + 4 => (
            PacketProtocol::Udp,
            Some(u16::from_be_bytes([data[ihl + 2], data[ihl + 3]])),
        ),
        6 => (PacketProtocol::Tcp, None),
        17 => (PacketProtocol::Udp, None),
        _ => (PacketProtocol::Other, None),
    };

    (Some(src_ip), Some(dst_ip), protocol, dst_port)
}

impl PacketCapture for WinDivertCapture {
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<CapturedPacket>, CaptureError> {
        match self.handle.recv_ex(None, timeout) {
            Ok(Some(packet)) => Ok(Some(Self::parse(&packet))),
            Ok(None) => Ok(None),
            Err(e) => {
                let msg = e.to_string();
                let lower = msg.to_lowercase();
                if lower.contains("closed") || lower.contains("invalid") || lower.contains("aborted") {
                    Err(CaptureError::Closed(msg))
                } else {
                    Err(CaptureError::ReinjectFailed(msg))
                }
            }
        }
    }

    fn reinject(&mut self, packet: &CapturedPacket) -> Result<(), CaptureError> {
        let address = WinDivertAddress::<NetworkLayer>::default();
        let to_send = WinDivertPacket {
            address,
            data: std::borrow::Cow::Borrowed(&packet.data),
        };

        self.handle
            .send(&to_send)
            .map(|_| ())
            .map_err(|e| CaptureError::ReinjectFailed(e.to_string()))
    }

    fn close(&self) {
        let _ = self.handle.close(CloseAction::Nothing);
    }
}
