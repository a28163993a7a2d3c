use std::net::Ipv4Addr;
use std::time::Duration;

/// A captured packet's parsed 5-tuple plus raw bytes, as delivered whole by
/// the kernel packet-diversion interface.
#[derive(Debug, Clone)]
pub struct CapturedPacket {
    pub data: Vec<u8>,
    pub src_ip: Option<Ipv4Addr>,
    pub dst_ip: Option<Ipv4Addr>,
    pub protocol: PacketProtocol,
    pub dst_port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketProtocol {
    Tcp,
    Udp,
    Other,
}

/// Blocking packet-diversion handle. `recv` is a blocking system call and
/// must run on a dedicated OS thread, never on the async runtime. The
/// engine re-injects unmodified any packet it does not choose to drop.
pub trait PacketCapture: Send {
    /// Blocks for up to `timeout`, returning `None` on timeout so the
    /// caller can service periodic maintenance.
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<CapturedPacket>, CaptureError>;

    fn reinject(&mut self, packet: &CapturedPacket) -> Result<(), CaptureError>;

    /// Closes the handle so a blocked `recv_timeout` unblocks. Safe to call
    /// from a different thread than the one blocked in `recv_timeout`.
    fn close(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("capture privilege denied: {0}")]
    PrivilegeDenied(String),
    #[error("capture handle closed or aborted: {0}")]
    Closed(String),
    #[error("reinject failed: {0}")]
    ReinjectFailed(String),
}

/// The fixed capture filter: inbound or outbound traffic on TCP/80,
/// TCP/443, or UDP/443.
pub const CAPTURE_FILTER: &str =
    "(inbound or outbound) and (tcp.DstPort == 80 or tcp.DstPort == 443 or udp.DstPort == 443)";

/// Opens the platform capture handle. Real WinDivert on Windows; a no-op
/// stub everywhere else, kept so the engine builds and its tests run on
/// development machines that never see live traffic.
pub fn open(filter: &str) -> Result<Box<dyn PacketCapture>, CaptureError> {
    #[cfg(windows)]
    {
        super::windivert_capture::WinDivertCapture::open(filter).map(|c| Box::new(c) as Box<dyn PacketCapture>)
    }
    #[cfg(not(windows))]
    {
        let _ = filter;
        Ok(Box::new(NullCapture) as Box<dyn PacketCapture>)
    }
}

#[cfg(not(windows))]
struct NullCapture;

#[cfg(not(windows))]
impl PacketCapture for NullCapture {
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<CapturedPacket>, CaptureError> {
        std::thread::sleep(timeout);
        Ok(None)
    }

    fn reinject(&mut self, _packet: &CapturedPacket) -> Result<(), CaptureError> {
        Ok(())
    }

    fn close(&self) {}
}
