//! Symbolic address parsing
//!
//! Converts operator-style address strings into the binary descriptor the
//! frame builder consumes. Supported forms:
//!
//! | Text          | Area         | Resulting offset                  |
//! |---------------|--------------|-----------------------------------|
//! | `M100.0`      | flags        | byte 100, bit 0 (offset 800)      |
//! | `MW100`       | flags        | byte 100 (offset 800)             |
//! | `I0.1`, `QB2` | digital I/O  | byte*8 + bit                      |
//! | `AIW2`        | analog in    | byte*8                            |
//! | `DB1.DBX2.3`  | data block 1 | byte 2, bit 3 (offset 19)         |
//! | `DB1.70`      | data block 1 | byte 70 (offset 560)              |
//! | `VB10`        | V memory     | data block 1, byte 10 (offset 80) |
//! | `T5` / `C12`  | timer/counter| raw index, no scaling             |
//!
//! Offsets are kept bit-granular (byte offset times eight) so one field
//! addresses bits and bytes uniformly; timers and counters use their raw
//! index instead. An optional size letter (X/B/W/D) after the area prefix is
//! accepted and stripped; the access width itself comes from the requested
//! length, not from the letter.

use crate::constants::{
    AREA_ANALOG_INPUT, AREA_ANALOG_OUTPUT, AREA_COUNTER, AREA_DATA_BLOCK, AREA_FLAG, AREA_INPUT,
    AREA_OUTPUT, AREA_TIMER,
};
use crate::error::{S7Error, S7Result};

/// Parsed S7 memory address
///
/// Produced fresh per call by [`S7Address::parse`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S7Address {
    /// Memory area identifier, one of the `AREA_*` constants
    pub area_code: u8,
    /// Data block number; 0 unless the area is D/DB, pinned to 1 for V
    pub db_block: u16,
    /// Bit-granular offset (byte*8 + bit), or the raw timer/counter index
    pub bit_offset: u32,
    /// Requested access length in bytes (bit operations request 1)
    pub requested_length: u32,
}

/// How the text after an area prefix is interpreted
#[derive(Clone, Copy)]
enum AreaForm {
    /// Byte/bit addressed: optional size letter, then `byte` or `byte.bit`
    BitAddressable,
    /// Data block: `block[.DBx-offset[.bit]]`
    DataBlock,
    /// V memory: parses like `BitAddressable` but pins data block 1
    VMemory,
    /// Timer/counter: bare index, no scaling, no dot
    RawIndex,
}

/// Prefix table in match priority order. Two-letter prefixes come before the
/// single letters that shadow them ("AI" before "I", "DB" before "D").
const AREA_PREFIXES: &[(&str, u8, AreaForm)] = &[
    ("AI", AREA_ANALOG_INPUT, AreaForm::BitAddressable),
    ("AQ", AREA_ANALOG_OUTPUT, AreaForm::BitAddressable),
    ("I", AREA_INPUT, AreaForm::BitAddressable),
    ("Q", AREA_OUTPUT, AreaForm::BitAddressable),
    ("M", AREA_FLAG, AreaForm::BitAddressable),
    ("DB", AREA_DATA_BLOCK, AreaForm::DataBlock),
    ("D", AREA_DATA_BLOCK, AreaForm::DataBlock),
    ("T", AREA_TIMER, AreaForm::RawIndex),
    ("C", AREA_COUNTER, AreaForm::RawIndex),
    ("V", AREA_DATA_BLOCK, AreaForm::VMemory),
];

impl S7Address {
    /// Parse a symbolic address
    ///
    /// `requested_length` is the byte count of the access the caller intends
    /// (1 for bit operations) and is carried through to the frame builder.
    pub fn parse(text: &str, requested_length: u32) -> S7Result<Self> {
        if text.is_empty() {
            return Err(S7Error::parse(text, "empty address"));
        }
        if requested_length == 0 {
            return Err(S7Error::parse(text, "requested length must be non-zero"));
        }

        let upper = text.to_ascii_uppercase();
        for (prefix, area_code, form) in AREA_PREFIXES {
            if let Some(rest) = upper.strip_prefix(prefix) {
                let (db_block, bit_offset) = match form {
                    AreaForm::BitAddressable => (0, parse_scaled_offset(text, rest)?),
                    AreaForm::VMemory => (1, parse_scaled_offset(text, rest)?),
                    AreaForm::DataBlock => parse_db_offset(text, rest)?,
                    AreaForm::RawIndex => (0, parse_raw_index(text, rest)?),
                };
                return Ok(S7Address {
                    area_code: *area_code,
                    db_block,
                    bit_offset,
                    requested_length,
                });
            }
        }

        Err(S7Error::parse(text, "no matching area prefix"))
    }
}

/// Strip one optional size letter, then evaluate `byte` or `byte.bit`
fn parse_scaled_offset(original: &str, rest: &str) -> S7Result<u32> {
    let rest = strip_size_letter(rest);
    scaled_offset(original, rest)
}

/// `byte` becomes byte*8, `byte.bit` becomes byte*8 + bit
fn scaled_offset(original: &str, text: &str) -> S7Result<u32> {
    let mut parts = text.split('.');
    let byte_part = parts.next().unwrap_or("");
    let byte = parse_number(original, byte_part)?;
    let scaled = byte
        .checked_mul(8)
        .ok_or_else(|| S7Error::parse(original, "byte offset out of range"))?;
    match parts.next() {
        None => Ok(scaled),
        Some(bit_part) => {
            if parts.next().is_some() {
                return Err(S7Error::parse(original, "too many '.' separators"));
            }
            let bit = parse_number(original, bit_part)?;
            scaled
                .checked_add(bit)
                .ok_or_else(|| S7Error::parse(original, "bit offset out of range"))
        }
    }
}

/// Data block form: `block`, `block.offset`, `block.DBXoffset.bit`
fn parse_db_offset(original: &str, rest: &str) -> S7Result<(u16, u32)> {
    let mut parts = rest.splitn(3, '.');
    let block_part = parts.next().unwrap_or("");
    let block = parse_number(original, block_part)?;
    let db_block = u16::try_from(block)
        .map_err(|_| S7Error::parse(original, "DB block number out of range"))?;

    let Some(offset_part) = parts.next() else {
        return Ok((db_block, 0));
    };

    // Optional DBX/DBB/DBW/DBD sub-code before the offset digits.
    let offset_part = if offset_part.starts_with("DBX")
        || offset_part.starts_with("DBB")
        || offset_part.starts_with("DBW")
        || offset_part.starts_with("DBD")
    {
        &offset_part[3..]
    } else {
        offset_part
    };

    // A trailing third segment is the bit index; rejoin it so the offset
    // math is shared with the byte.bit form.
    let offset = match parts.next() {
        Some(bit_part) => scaled_offset(original, &format!("{offset_part}.{bit_part}"))?,
        None => scaled_offset(original, offset_part)?,
    };
    Ok((db_block, offset))
}

/// Timer/counter index: plain number, no scaling, no dotted form
fn parse_raw_index(original: &str, rest: &str) -> S7Result<u32> {
    if rest.contains('.') {
        return Err(S7Error::parse(
            original,
            "timer/counter addresses take a bare index",
        ));
    }
    parse_number(original, rest)
}

fn strip_size_letter(text: &str) -> &str {
    match text.as_bytes().first() {
        Some(b'X' | b'B' | b'W' | b'D') => &text[1..],
        _ => text,
    }
}

fn parse_number(original: &str, text: &str) -> S7Result<u32> {
    text.parse::<u32>()
        .map_err(|_| S7Error::parse(original, format!("'{text}' is not a valid offset")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str, len: u32) -> S7Address {
        S7Address::parse(text, len).expect(text)
    }

    #[test]
    fn test_data_block_addresses() {
        let addr = parse("DB1.DBX2.3", 1);
        assert_eq!(addr.area_code, AREA_DATA_BLOCK);
        assert_eq!(addr.db_block, 1);
        assert_eq!(addr.bit_offset, 19);

        assert_eq!(parse("DB1.70", 4).bit_offset, 560);
        assert_eq!(parse("DB1.DBD70", 8).bit_offset, 560);
        assert_eq!(parse("DB1.DBW4", 2).bit_offset, 32);
        assert_eq!(parse("D100.20", 2).db_block, 100);
        assert_eq!(parse("D100.20", 2).bit_offset, 160);

        // A bare block resolves to offset zero.
        let addr = parse("DB5", 2);
        assert_eq!(addr.db_block, 5);
        assert_eq!(addr.bit_offset, 0);
    }

    #[test]
    fn test_flag_addresses() {
        let addr = parse("M100.0", 1);
        assert_eq!(addr.area_code, AREA_FLAG);
        assert_eq!(addr.db_block, 0);
        assert_eq!(addr.bit_offset, 800);

        // Word form addresses the same byte offset.
        assert_eq!(parse("MW100", 2).bit_offset, 800);
        assert_eq!(parse("MX100", 1).bit_offset, 800);
        assert_eq!(parse("MB100", 1).bit_offset, 800);
        assert_eq!(parse("M100.7", 1).bit_offset, 807);
    }

    #[test]
    fn test_io_and_analog_addresses() {
        assert_eq!(parse("I0.1", 1).area_code, AREA_INPUT);
        assert_eq!(parse("I0.1", 1).bit_offset, 1);
        assert_eq!(parse("Q1", 1).area_code, AREA_OUTPUT);
        assert_eq!(parse("Q1", 1).bit_offset, 8);
        assert_eq!(parse("QB2", 1).bit_offset, 16);

        let addr = parse("AIW2", 2);
        assert_eq!(addr.area_code, AREA_ANALOG_INPUT);
        assert_eq!(addr.bit_offset, 16);
        assert_eq!(parse("AQW4", 2).area_code, AREA_ANALOG_OUTPUT);
    }

    #[test]
    fn test_v_memory_pins_data_block_one() {
        let addr = parse("VB10", 1);
        assert_eq!(addr.area_code, AREA_DATA_BLOCK);
        assert_eq!(addr.db_block, 1);
        assert_eq!(addr.bit_offset, 80);

        assert_eq!(parse("VW12", 2).bit_offset, 96);
        assert_eq!(parse("V1.2", 1).bit_offset, 10);
    }

    #[test]
    fn test_timer_counter_raw_index() {
        let addr = parse("T5", 2);
        assert_eq!(addr.area_code, AREA_TIMER);
        assert_eq!(addr.bit_offset, 5);

        let addr = parse("C12", 2);
        assert_eq!(addr.area_code, AREA_COUNTER);
        assert_eq!(addr.bit_offset, 12);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse("db1.dbx2.3", 1), parse("DB1.DBX2.3", 1));
        assert_eq!(parse("mw100", 2), parse("MW100", 2));
    }

    #[test]
    fn test_requested_length_carried_through() {
        assert_eq!(parse("MW100", 2).requested_length, 2);
        assert_eq!(parse("DB1.70", 8).requested_length, 8);
    }

    #[test]
    fn test_rejects_invalid_addresses() {
        for text in [
            "",         // empty
            "Z10",      // unknown prefix
            "M",        // missing offset
            "MB",       // size letter but no digits
            "M1.2.3",   // flags take at most byte.bit
            "T5.1",     // timers take a bare index
            "CX5",      // counters take no size letter
            "M-5",      // negative
            "M1a",      // trailing garbage
            "DB70000.0" // block number above u16
        ] {
            assert!(
                matches!(
                    S7Address::parse(text, 1),
                    Err(S7Error::ParseAddressFailed { .. })
                ),
                "expected parse failure for {text:?}"
            );
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(S7Address::parse("M100", 0).is_err());
    }
}
