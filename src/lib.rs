//! modes-decode: Pure decode library for Mode S / ADS-B frames.
//!
//! No async, no I/O, just algorithms. Takes one ASCII-framed hex line
//! (`*8D4840D6...;`) per call, validates it, checks the CRC-24, and extracts
//! the fields the downlink format carries. Acquiring data and splitting it
//! into lines is the caller's job.

pub mod crc;
pub mod decode;
pub mod frame;
pub mod stats;
pub mod types;

// Re-export commonly used items at crate root
pub use decode::decode_frame;
pub use frame::validate_frame;
pub use stats::DecodeStats;
pub use types::*;
