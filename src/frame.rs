//! Validate raw ASCII frames and convert them to bytes.
//!
//! Wire format: `*` + 1-14 hex byte pairs + `;`, one frame per call. Sources
//! that batch several newline-separated frames into one read must split them
//! before handing each line to the decoder.

use crate::types::{hex_decode, FrameError, MAX_FRAME_BYTES};

/// Validate a single frame line and decode its payload into bytes.
///
/// - [`FrameError::Invalid`]: missing delimiters, or a payload that is not
///   whole hex pairs.
/// - [`FrameError::TooShort`]: delimiters with no payload.
/// - [`FrameError::TooLong`]: payload beyond the 112-bit envelope.
pub fn validate_frame(line: &str) -> Result<Vec<u8>, FrameError> {
    if line.is_empty() || !line.starts_with('*') || !line.ends_with(';') {
        return Err(FrameError::Invalid);
    }

    if line.len() <= 2 {
        return Err(FrameError::TooShort);
    }

    let payload = &line[1..line.len() - 1];
    if payload.len() > MAX_FRAME_BYTES * 2 {
        return Err(FrameError::TooLong);
    }

    hex_decode(payload).ok_or(FrameError::Invalid)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
