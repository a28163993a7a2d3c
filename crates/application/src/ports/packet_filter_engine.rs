use async_trait::async_trait;
use pyrewall_domain::DomainError;

/// Application-layer port for the packet filter engine.
///
/// The concrete implementation lives in the infrastructure layer, owns the
/// kernel packet-diversion handle, and runs its capture loop on a dedicated
/// blocking OS thread. The controller only ever talks to this port.
#[async_trait]
pub trait PacketFilterEnginePort: Send + Sync {
    /// Spawns the capture loop. Returns once the helper task has been
    /// handed off — does not wait for the kernel handle to open.
    async fn start(&self) -> Result<(), DomainError>;

    /// Signals the capture loop to stop and closes the capture handle so
    /// the blocking receive unblocks.
    async fn stop(&self) -> Result<(), DomainError>;

    /// True once the kernel packet-diversion handle is open and the loop
    /// is actively capturing.
    fn is_ready(&self) -> bool;

    /// Sets the reload event consulted by the background maintenance loop.
    fn notify_reload(&self);
}
