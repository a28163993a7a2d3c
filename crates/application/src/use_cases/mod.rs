pub mod blocklist;
pub mod devices;
pub mod history;

pub use blocklist::{
    AddBlockedDomainUseCase, AddTemporaryBlockIpUseCase, CleanupExpiredUseCase,
    RemoveBlockedDomainUseCase, SyncBlockedIpsUseCase,
};
pub use devices::{BlockDeviceUseCase, ScanDevicesUseCase, UnblockDeviceUseCase};
pub use history::{ArchiveOldHistoryUseCase, GetRecentHistoryUseCase, RecordHistoryUseCase};
