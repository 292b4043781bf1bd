//! Shared types, error enum, and decoded message types for modes-decode.

use serde::Serialize;
use thiserror::Error;

/// Long (extended) message length in bits.
pub const LONG_MSG_BITS: usize = 112;
/// Short message length in bits.
pub const SHORT_MSG_BITS: usize = 56;
/// Largest frame payload the long-message envelope allows.
pub const MAX_FRAME_BYTES: usize = LONG_MSG_BITS / 8;

/// Frame-level validation failures. All are recoverable: a bad frame is
/// reported and the next one decodes normally.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameError {
    /// Missing `*`/`;` delimiters, or a payload that is not whole hex pairs.
    #[error("invalid frame: bad delimiters or non-hex payload")]
    Invalid,
    /// No payload between the delimiters, or fewer bytes than the downlink
    /// format's envelope requires.
    #[error("frame too short")]
    TooShort,
    /// Payload exceeds the 112-bit long-message envelope (14 bytes).
    #[error("frame exceeds 112-bit envelope")]
    TooLong,
}

// ---------------------------------------------------------------------------
// ICAO address helpers
// ---------------------------------------------------------------------------

/// 3-byte ICAO address. Stored as raw bytes to avoid per-frame String
/// allocation. Only a usable aircraft address for DF11/17/18; reply formats
/// carry these bytes XOR'd with the interrogation checksum.
pub type Icao = [u8; 3];

/// Format ICAO address as 6-char uppercase hex string.
pub fn icao_to_string(icao: &Icao) -> String {
    format!("{:02X}{:02X}{:02X}", icao[0], icao[1], icao[2])
}

// ---------------------------------------------------------------------------
// Hex utilities
// ---------------------------------------------------------------------------

/// Decode a hex string into bytes. Case-insensitive, must be even length.
pub fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for chunk in hex.as_bytes().chunks(2) {
        let high = hex_digit(chunk[0])?;
        let low = hex_digit(chunk[1])?;
        bytes.push((high << 4) | low);
    }
    Some(bytes)
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// ADS-B callsign character set
// ---------------------------------------------------------------------------

/// ADS-B character set for callsign encoding (6 bits per character).
pub const CALLSIGN_CHARSET: &[u8; 64] =
    b"#ABCDEFGHIJKLMNOPQRSTUVWXYZ##### ###############0123456789######";

// ---------------------------------------------------------------------------
// Altitude
// ---------------------------------------------------------------------------

/// Altitude unit selected by the M bit of the AC field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AltitudeUnit {
    Feet,
    /// Metric altitude (M=1). Never produced: the metric encoding is not
    /// decoded, so such frames report an absent altitude instead.
    Meters,
}

/// A decoded altitude with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Altitude {
    pub value: i32,
    pub unit: AltitudeUnit,
}

impl Altitude {
    pub fn feet(value: i32) -> Self {
        Altitude {
            value,
            unit: AltitudeUnit::Feet,
        }
    }
}

// ---------------------------------------------------------------------------
// Decoded message model
// ---------------------------------------------------------------------------

/// A successfully decoded frame: the envelope common to every downlink
/// format, plus format-specific fields in `kind`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedMessage {
    /// Full frame bytes, as received.
    pub raw: Vec<u8>,
    /// Downlink Format (0-31), first 5 bits of byte 0.
    pub df: u8,
    /// Message length in bits (56 or 112), implied by `df`.
    pub bits: usize,
    /// CRC transmitted in the trailing 3 bytes of the envelope.
    pub crc: u32,
    /// True if the computed checksum matches `crc`.
    pub crc_ok: bool,
    /// Address bytes 1-3. See [`Icao`] for which formats it is valid in.
    pub address: Icao,
    /// Format-specific fields.
    pub kind: MessageKind,
}

impl DecodedMessage {
    /// Human-readable Downlink Format name.
    pub fn df_name(&self) -> &'static str {
        df_name(self.df)
    }

    /// True if this is an ADS-B extended squitter (DF17).
    pub fn is_adsb(&self) -> bool {
        self.df == 17
    }

    /// True if this is a 112-bit (long) message.
    pub fn is_long(&self) -> bool {
        self.bits == LONG_MSG_BITS
    }
}

/// Format-specific message fields, keyed by downlink format.
///
/// Fields that a format does not carry simply do not exist in its variant,
/// so an unset value can never be mistaken for a decoded zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MessageKind {
    /// DF0/16: air-air surveillance with a 13-bit altitude field.
    AirAirSurveillance { altitude: Option<Altitude> },
    /// DF4/5/20/21: replies to ground interrogation.
    SurveillanceReply {
        /// FS field, low 3 bits of byte 0.
        flight_status: u8,
        /// DR field, bits 3-7 of byte 1.
        downlink_request: u8,
        /// UM field, low 3 bits of byte 1 and top 3 bits of byte 2.
        utility_message: u8,
        /// 13-bit altitude, DF4/20 only.
        altitude: Option<Altitude>,
    },
    /// DF11: all-call reply used for ICAO address acquisition.
    AllCallReply {
        /// CA field, low 3 bits of byte 0.
        capability: u8,
    },
    /// DF17/18: extended squitter carrying an ADS-B payload.
    ExtendedSquitter {
        /// Message type, top 5 bits of byte 4.
        metype: u8,
        /// Message subtype, low 3 bits of byte 4.
        mesub: u8,
        /// Decoded payload; `None` for metype/mesub combinations outside
        /// the decoded ranges.
        message: Option<EsMessage>,
    },
    /// Any other downlink format: only the common envelope applies.
    Other,
}

/// Decoded extended-squitter payloads (DF17/18).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum EsMessage {
    /// Metype 1-4: aircraft identification and category.
    Identification {
        /// metype - 1.
        aircraft_type: u8,
        /// 8 characters, space-padded.
        callsign: String,
    },
    /// Metype 9-18: airborne position with barometric altitude.
    AirbornePosition {
        altitude: Option<Altitude>,
        /// CPR frame parity: true = odd, false = even.
        cpr_odd: bool,
        /// UTC-synchronized timing flag.
        utc_sync: bool,
        /// Raw 17-bit CPR latitude, not resolved to degrees.
        cpr_lat: u32,
        /// Raw 17-bit CPR longitude, not resolved to degrees.
        cpr_lon: u32,
    },
    /// Metype 19, mesub 1-2: velocity over ground.
    GroundVelocity {
        /// True = West component.
        ew_west: bool,
        /// 10-bit E/W speed.
        ew_speed: u32,
        /// True = South component.
        ns_south: bool,
        /// 10-bit N/S speed.
        ns_speed: u32,
        /// 0 = GNSS, 1 = barometric.
        vertical_rate_source: u8,
        /// True = descending.
        vertical_rate_down: bool,
        /// 9-bit vertical rate magnitude.
        vertical_rate: u32,
        /// sqrt(ns² + ew²), in the speed field's units.
        ground_speed: f64,
        /// Track angle in degrees, [0, 360). 0 when ground_speed is 0.
        heading: f64,
    },
    /// Metype 19, mesub 3-4: airspeed with magnetic heading.
    AirspeedHeading {
        heading_valid: bool,
        /// Heading in degrees, 360/128 resolution.
        heading: f64,
    },
}

// ---------------------------------------------------------------------------
// Enum-to-string helpers
// ---------------------------------------------------------------------------

/// Human-readable Downlink Format name.
pub fn df_name(df: u8) -> &'static str {
    match df {
        0 => "Short Air-Air Surveillance",
        4 => "Surveillance, Altitude Reply",
        5 => "Surveillance, Identity Reply",
        11 => "All Call Reply",
        16 => "Long Air-Air Surveillance",
        17 => "ADS-B Extended Squitter",
        18 => "TIS-B / ADS-R",
        20 => "Comm-B, Altitude Reply",
        21 => "Comm-B, Identity Reply",
        _ => "Unknown",
    }
}

/// Describe the CA (responder capabilities) field of a DF11 reply.
pub fn capability_name(ca: u8) -> &'static str {
    match ca {
        0 => "Level 1 (Surveillance Only)",
        1 => "Level 2 (DF0,4,5,11)",
        2 => "Level 3 (DF0,4,5,11,20,21)",
        3 => "Level 4 (DF0,4,5,11,20,21,24)",
        4 => "Level 2+3+4 (on ground)",
        5 => "Level 2+3+4 (airborne)",
        6 => "Level 2+3+4",
        7 => "Level 7",
        _ => "Unknown",
    }
}

/// Describe the FS (flight status) field of a DF4/5/20/21 reply.
pub fn flight_status_name(fs: u8) -> &'static str {
    match fs {
        0 => "Normal, Airborne",
        1 => "Normal, On the ground",
        2 => "Alert, Airborne",
        3 => "Alert, On the ground",
        4 => "Alert, Special Position Identification",
        5 => "Special Position Identification",
        _ => "Unknown",
    }
}

/// Describe an extended-squitter metype/mesub combination.
pub fn es_type_name(metype: u8, mesub: u8) -> &'static str {
    match (metype, mesub) {
        (1..=4, _) => "Aircraft Identification and Category",
        (5..=8, _) => "Surface Position",
        (9..=18, _) => "Airborne Position (Baro Altitude)",
        (19, 1..=4) => "Airborne Velocity",
        (20..=22, _) => "Airborne Position (GNSS Height)",
        (23, 0) => "Test Message",
        (24, 1) => "Surface System Status",
        (28, 1) => "Aircraft Status (Emergency)",
        (28, 2) => "Aircraft Status (TCAS RA)",
        (29, 0 | 1) => "Target State and Status",
        (31, 0 | 1) => "Aircraft Operational Status",
        _ => "Unknown",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
