//! Pyrewall background job runner.
//!
//! Hosts the periodic work that runs independent of the packet filter
//! thread: device scanning and history retention.

pub mod device_scan;
pub mod history_retention;
pub mod runner;

pub use device_scan::DeviceScanJob;
pub use history_retention::HistoryRetentionJob;
pub use runner::JobRunner;
