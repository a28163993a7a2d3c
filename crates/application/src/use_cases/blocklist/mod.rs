pub mod add_domain;
pub mod add_temporary_block_ip;
pub mod cleanup_expired;
pub mod remove_domain;
pub mod sync_blocked_ips;

pub use add_domain::AddBlockedDomainUseCase;
pub use add_temporary_block_ip::AddTemporaryBlockIpUseCase;
pub use cleanup_expired::CleanupExpiredUseCase;
pub use remove_domain::RemoveBlockedDomainUseCase;
pub use sync_blocked_ips::SyncBlockedIpsUseCase;
