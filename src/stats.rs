//! Decode statistics counters.
//!
//! An explicit counters object rather than process-global state: each caller
//! owns its own scope and passes it into `decode_frame`. No internal locking;
//! concurrent decoding against one `DecodeStats` needs external
//! synchronization.

use serde::Serialize;

/// Counters updated as a side effect of each decode call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    /// Frames handed to the decoder, valid or not.
    pub frames_seen: u64,
    /// Frames rejected by frame-level validation.
    pub invalid_frames: u64,
    /// Frames whose computed checksum did not match the transmitted one.
    pub crc_failures: u64,
}

impl DecodeStats {
    pub fn new() -> Self {
        DecodeStats::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = DecodeStats::default();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
