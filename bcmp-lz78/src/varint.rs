//! Three-tier bit-level varint.
//!
//! | Tier | Prefix | Payload | Range            |
//! |------|--------|---------|------------------|
//! | 1    | `0`    | 7 bits  | 0 - 127          |
//! | 2    | `10`   | 14 bits | 128 - 16383      |
//! | 3    | `110`  | 21 bits | 16384 - 2097151  |
//!
//! Codes are 8, 16 or 24 bits long, so a payload made of codes alone never
//! needs tail padding. Decoding still works bit by bit and treats a short
//! tail as end of stream.

use crate::config::MAX_INDEX;
use bcmp_core::{BcmpError, BitReader, BitWriter, Result};
use std::io::{Read, Write};

const TIER1_MAX: u32 = (1 << 7) - 1;
const TIER2_MIN: u32 = TIER1_MAX + 1;
const TIER2_MAX: u32 = (1 << 14) - 1;
const TIER3_MIN: u32 = TIER2_MAX + 1;

/// Total encoded length in bits, or `None` if `value` is out of range.
pub fn encoded_len(value: u32) -> Option<u8> {
    match value {
        0..=TIER1_MAX => Some(8),
        TIER2_MIN..=TIER2_MAX => Some(16),
        TIER3_MIN..=MAX_INDEX => Some(24),
        _ => None,
    }
}

/// Encode `value` with the smallest tier that holds it.
///
/// Values above 2097151 are rejected before anything is written.
pub fn encode<W: Write>(writer: &mut BitWriter<W>, value: u32) -> Result<()> {
    match value {
        0..=TIER1_MAX => {
            writer.write_bits(0b0, 1)?;
            writer.write_bits(value, 7)
        }
        TIER2_MIN..=TIER2_MAX => {
            writer.write_bits(0b10, 2)?;
            writer.write_bits(value, 14)
        }
        TIER3_MIN..=MAX_INDEX => {
            writer.write_bits(0b110, 3)?;
            writer.write_bits(value, 21)
        }
        _ => Err(BcmpError::ValueOutOfRange {
            value: u64::from(value),
        }),
    }
}

/// Decode one value, or `None` if the stream ends mid-code.
///
/// After a `11` prefix the third prefix bit is consumed but not examined;
/// there is no fourth tier for it to select.
pub fn decode<R: Read>(reader: &mut BitReader<R>) -> Result<Option<u32>> {
    let Some(first) = reader.read_bit()? else {
        return Ok(None);
    };
    if !first {
        return reader.read_bits(7);
    }

    let Some(second) = reader.read_bit()? else {
        return Ok(None);
    };
    if !second {
        return reader.read_bits(14);
    }

    if reader.read_bit()?.is_none() {
        return Ok(None);
    }
    reader.read_bits(21)
}
