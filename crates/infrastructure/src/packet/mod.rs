pub mod backoff;
pub mod capture;
pub mod counters;
pub mod engine;
pub mod pipeline;
pub mod sni;
pub mod state;

#[cfg(windows)]
pub mod windivert_capture;

pub use capture::{CaptureError, CapturedPacket, PacketCapture, PacketProtocol};
pub use engine::PacketFilterEngine;
pub use state::FilterState;
