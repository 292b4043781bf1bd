//! Decode validated frames into typed Mode S messages.
//!
//! Handles all Downlink Formats and the extended-squitter payloads:
//! - DF17/18 metype 1-4:  Aircraft identification (callsign)
//! - DF17/18 metype 9-18: Airborne position (baro alt + CPR-encoded lat/lon)
//! - DF17/18 metype 19:   Airborne velocity (ground speed or airspeed/heading)
//! - DF0/16:              Air-air surveillance altitude
//! - DF4/5/20/21:         Surveillance/Comm-B replies (FS/DR/UM, altitude)
//! - DF11:                All-call reply (capability)

use crate::crc;
use crate::frame::validate_frame;
use crate::stats::DecodeStats;
use crate::types::*;

/// Message length in bits implied by the downlink format.
pub fn df_bits(df: u8) -> usize {
    match df {
        16 | 17 | 19 | 20 | 21 => LONG_MSG_BITS,
        _ => SHORT_MSG_BITS,
    }
}

/// Decode one frame line, updating `stats` as a side effect.
///
/// A CRC mismatch is not an error: the message is returned with
/// `crc_ok = false` and every field still extracted, so consumers can
/// inspect unverified frames and track failure rates. Only frame-level
/// validation rejects a frame outright.
pub fn decode_frame(line: &str, stats: &mut DecodeStats) -> Result<DecodedMessage, FrameError> {
    stats.frames_seen += 1;

    let raw = match validate_frame(line) {
        Ok(raw) => raw,
        Err(err) => {
            stats.invalid_frames += 1;
            return Err(err);
        }
    };

    let df = raw[0] >> 3;
    let bits = df_bits(df);
    let num_bytes = bits / 8;

    // A frame shorter than its format's envelope has nothing to checksum.
    if raw.len() < num_bytes {
        stats.invalid_frames += 1;
        return Err(FrameError::TooShort);
    }

    // Bytes past the envelope stay in `raw` but take no part in decoding.
    let body = &raw[..num_bytes];

    let transmitted = crc::transmitted_checksum(body, bits);
    let crc_ok = transmitted == crc::modes_checksum(body, bits);
    if !crc_ok {
        stats.crc_failures += 1;
    }

    let address: Icao = [body[1], body[2], body[3]];
    let kind = decode_kind(df, body);

    Ok(DecodedMessage {
        df,
        bits,
        crc: transmitted,
        crc_ok,
        address,
        kind,
        raw,
    })
}

fn decode_kind(df: u8, bytes: &[u8]) -> MessageKind {
    match df {
        0 | 16 => MessageKind::AirAirSurveillance {
            altitude: decode_ac13(bytes),
        },
        4 | 5 | 20 | 21 => MessageKind::SurveillanceReply {
            flight_status: bytes[0] & 0x07,
            downlink_request: (bytes[1] >> 3) & 0x1F,
            utility_message: ((bytes[1] & 0x07) << 3) | (bytes[2] >> 5),
            altitude: if df == 4 || df == 20 {
                decode_ac13(bytes)
            } else {
                None
            },
        },
        11 => MessageKind::AllCallReply {
            capability: bytes[0] & 0x07,
        },
        17 | 18 => {
            let metype = bytes[4] >> 3;
            let mesub = bytes[4] & 0x07;
            MessageKind::ExtendedSquitter {
                metype,
                mesub,
                message: decode_es(metype, mesub, bytes),
            }
        }
        _ => MessageKind::Other,
    }
}

// ---------------------------------------------------------------------------
// Altitude fields
// ---------------------------------------------------------------------------

/// Decode the 13-bit AC altitude field of DF0/4/16/20 (bytes 2-3).
///
/// M=0, Q=1 selects 25-ft increments; the metric (M=1) and 100-ft Gillham
/// (Q=0) encodings are not decoded, the altitude is reported absent instead.
fn decode_ac13(bytes: &[u8]) -> Option<Altitude> {
    let m_bit = bytes[3] & (1 << 6) != 0;
    let q_bit = bytes[3] & (1 << 4) != 0;

    if m_bit || !q_bit {
        return None;
    }

    // N is the 11-bit integer left after removing the Q and M bits.
    let n = (((bytes[2] & 0x1F) as u32) << 6)
        | (((bytes[3] & 0x80) as u32) >> 2)
        | (((bytes[3] & 0x20) as u32) >> 1)
        | (bytes[3] & 0x0F) as u32;

    Some(Altitude::feet(n as i32 * 25 - 1000))
}

/// Decode the 12-bit AC altitude field of DF17 airborne position (bytes 5-6).
fn decode_ac12(bytes: &[u8]) -> Option<Altitude> {
    if bytes[5] & 1 == 0 {
        return None;
    }

    // N is the 11-bit integer left after removing the Q bit.
    let n = (((bytes[5] >> 1) as u32) << 4) | (((bytes[6] & 0xF0) as u32) >> 4);

    Some(Altitude::feet(n as i32 * 25 - 1000))
}

// ---------------------------------------------------------------------------
// Extended-squitter sub-decoders
// ---------------------------------------------------------------------------

fn decode_es(metype: u8, mesub: u8, bytes: &[u8]) -> Option<EsMessage> {
    // DF18 frames use the short envelope; without a full ME field there is
    // nothing to decode.
    if bytes.len() < 11 {
        return None;
    }

    match (metype, mesub) {
        (1..=4, _) => Some(decode_identification(metype, bytes)),
        (9..=18, _) => Some(decode_airborne_position(bytes)),
        (19, 1 | 2) => Some(decode_ground_velocity(bytes)),
        (19, 3 | 4) => Some(decode_airspeed_heading(bytes)),
        _ => None,
    }
}

fn decode_identification(metype: u8, bytes: &[u8]) -> EsMessage {
    // Eight 6-bit character indexes packed into bytes 5-10.
    let indexes = [
        bytes[5] >> 2,
        ((bytes[5] & 0x03) << 4) | (bytes[6] >> 4),
        ((bytes[6] & 0x0F) << 2) | (bytes[7] >> 6),
        bytes[7] & 0x3F,
        bytes[8] >> 2,
        ((bytes[8] & 0x03) << 4) | (bytes[9] >> 4),
        ((bytes[9] & 0x0F) << 2) | (bytes[10] >> 6),
        bytes[10] & 0x3F,
    ];

    let callsign = indexes
        .iter()
        .map(|&i| CALLSIGN_CHARSET[i as usize] as char)
        .collect();

    EsMessage::Identification {
        aircraft_type: metype - 1,
        callsign,
    }
}

fn decode_airborne_position(bytes: &[u8]) -> EsMessage {
    EsMessage::AirbornePosition {
        altitude: decode_ac12(bytes),
        cpr_odd: bytes[6] & (1 << 2) != 0,
        utc_sync: bytes[6] & (1 << 3) != 0,
        cpr_lat: (((bytes[6] & 0x03) as u32) << 15)
            | ((bytes[7] as u32) << 7)
            | ((bytes[8] as u32) >> 1),
        cpr_lon: (((bytes[8] & 0x01) as u32) << 16) | ((bytes[9] as u32) << 8) | bytes[10] as u32,
    }
}

fn decode_ground_velocity(bytes: &[u8]) -> EsMessage {
    let ew_west = bytes[5] & 0x04 != 0;
    let ew_speed = (((bytes[5] & 0x03) as u32) << 8) | bytes[6] as u32;
    let ns_south = bytes[7] & 0x80 != 0;
    let ns_speed = (((bytes[7] & 0x7F) as u32) << 3) | (((bytes[8] & 0xE0) as u32) >> 5);
    let vertical_rate_source = (bytes[8] & 0x10) >> 4;
    let vertical_rate_down = bytes[8] & 0x08 != 0;
    let vertical_rate = (((bytes[8] & 0x07) as u32) << 6) | (((bytes[9] & 0xFC) as u32) >> 2);

    let ground_speed = ((ns_speed * ns_speed + ew_speed * ew_speed) as f64).sqrt();
    let heading = if ground_speed > 0.0 {
        let ewv = if ew_west { -(ew_speed as f64) } else { ew_speed as f64 };
        let nsv = if ns_south { -(ns_speed as f64) } else { ns_speed as f64 };
        let mut heading = ewv.atan2(nsv).to_degrees();
        if heading < 0.0 {
            heading += 360.0;
        }
        heading
    } else {
        0.0
    };

    EsMessage::GroundVelocity {
        ew_west,
        ew_speed,
        ns_south,
        ns_speed,
        vertical_rate_source,
        vertical_rate_down,
        vertical_rate,
        ground_speed,
        heading,
    }
}

fn decode_airspeed_heading(bytes: &[u8]) -> EsMessage {
    EsMessage::AirspeedHeading {
        heading_valid: bytes[5] & (1 << 2) != 0,
        heading: (360.0 / 128.0)
            * ((((bytes[5] & 0x03) as u32) << 5) | ((bytes[6] >> 3) as u32)) as f64,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
