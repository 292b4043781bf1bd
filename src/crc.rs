//! CRC-24 checking for Mode S messages, table-driven.
//!
//! One 24-bit parity constant per message bit position. A message's checksum
//! is the XOR of the constants at every set bit, MSB-first, byte-major. The
//! full 112-entry table serves long messages; short (56-bit) messages use
//! the sub-table starting at offset 56. The last 24 entries are zero so the
//! trailing checksum field cannot perturb the computation.
//!
//! Direct comparison against the transmitted trailing 3 bytes only proves
//! integrity for DF11/17/18; reply formats carry the CRC XOR'd with the
//! interrogator's address, which cannot be split off without correlation.

use crate::types::{LONG_MSG_BITS, SHORT_MSG_BITS};

/// Parity table for Mode S messages, one entry per bit of a 112-bit frame.
pub const CHECKSUM_TABLE: [u32; LONG_MSG_BITS] = [
    0x3935ea, 0x1c9af5, 0xf1b77e, 0x78dbbf, 0xc397db, 0x9e31e9, 0xb0e2f0, 0x587178,
    0x2c38bc, 0x161c5e, 0x0b0e2f, 0xfa7d13, 0x82c48d, 0xbe9842, 0x5f4c21, 0xd05c14,
    0x682e0a, 0x341705, 0xe5f186, 0x72f8c3, 0xc68665, 0x9cb936, 0x4e5c9b, 0xd8d449,
    0x939020, 0x49c810, 0x24e408, 0x127204, 0x093902, 0x049c81, 0xfdb444, 0x7eda22,
    0x3f6d11, 0xe04c8c, 0x702646, 0x381323, 0xe3f395, 0x8e03ce, 0x4701e7, 0xdc7af7,
    0x91c77f, 0xb719bb, 0xa476d9, 0xadc168, 0x56e0b4, 0x2b705a, 0x15b82d, 0xf52612,
    0x7a9309, 0xc2b380, 0x6159c0, 0x30ace0, 0x185670, 0x0c2b38, 0x06159c, 0x030ace,
    0x018567, 0xff38b7, 0x80665f, 0xbfc92b, 0xa01e91, 0xaff54c, 0x57faa6, 0x2bfd53,
    0xea04ad, 0x8af852, 0x457c29, 0xdd4410, 0x6ea208, 0x375104, 0x1ba882, 0x0dd441,
    0xf91024, 0x7c8812, 0x3e4409, 0xe0d800, 0x706c00, 0x383600, 0x1c1b00, 0x0e0d80,
    0x0706c0, 0x038360, 0x01c1b0, 0x00e0d8, 0x00706c, 0x003836, 0x001c1b, 0xfff409,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
];

/// Compute the 24-bit checksum of a message.
///
/// `bits` must be 56 or 112 and `bytes` must hold at least `bits / 8` bytes;
/// any trailing bytes are ignored.
pub fn modes_checksum(bytes: &[u8], bits: usize) -> u32 {
    debug_assert!(bits == SHORT_MSG_BITS || bits == LONG_MSG_BITS);
    debug_assert!(bytes.len() >= bits / 8);

    let offset = if bits == LONG_MSG_BITS {
        0
    } else {
        LONG_MSG_BITS - SHORT_MSG_BITS
    };

    let mut crc = 0u32;
    for j in 0..bits {
        let bitmask = 1u8 << (7 - (j % 8));
        if bytes[j / 8] & bitmask != 0 {
            crc ^= CHECKSUM_TABLE[j + offset];
        }
    }
    crc
}

/// Read the transmitted checksum: the last 3 bytes of a `bits`-long envelope.
pub fn transmitted_checksum(bytes: &[u8], bits: usize) -> u32 {
    let n = bits / 8;
    ((bytes[n - 3] as u32) << 16) | ((bytes[n - 2] as u32) << 8) | bytes[n - 1] as u32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
