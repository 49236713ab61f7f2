//! Numeric byte conversions for payload data
//!
//! The codec is split into two visible halves, matching the controller-side
//! convention this client interoperates with:
//!
//! 1. a little-endian pack/unpack layer for fixed-width integers, and
//! 2. an unconditional byte-swap layer (including float/double bit
//!    reinterpretation) applied before packing and after unpacking.
//!
//! Composed, the two halves net to big-endian on the wire, which is what S7
//! controllers expect for numeric payloads. The split looks redundant from
//! the outside but is kept deliberately: frame header fields elsewhere are
//! written big-endian directly, and whether the payload path's LE+swap
//! detour is intentional upstream or a historical accident is unresolved.
//! Keeping both halves as named functions keeps the asymmetry visible and
//! testable instead of folding it away. Use the `encode_*`/`decode_*`
//! functions unless you need one half in isolation.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{S7Error, S7Result};

// ============================================================================
// Little-endian half
// ============================================================================

/// Pack a u16 little-endian
pub fn u16_to_le(value: u16) -> [u8; 2] {
    let mut out = [0u8; 2];
    LittleEndian::write_u16(&mut out, value);
    out
}

/// Unpack a little-endian u16
pub fn le_to_u16(bytes: &[u8]) -> S7Result<u16> {
    check_len(bytes, 2)?;
    Ok(LittleEndian::read_u16(bytes))
}

/// Pack a u32 little-endian
pub fn u32_to_le(value: u32) -> [u8; 4] {
    let mut out = [0u8; 4];
    LittleEndian::write_u32(&mut out, value);
    out
}

/// Unpack a little-endian u32
pub fn le_to_u32(bytes: &[u8]) -> S7Result<u32> {
    check_len(bytes, 4)?;
    Ok(LittleEndian::read_u32(bytes))
}

/// Pack a u64 little-endian
pub fn u64_to_le(value: u64) -> [u8; 8] {
    let mut out = [0u8; 8];
    LittleEndian::write_u64(&mut out, value);
    out
}

/// Unpack a little-endian u64
pub fn le_to_u64(bytes: &[u8]) -> S7Result<u64> {
    check_len(bytes, 8)?;
    Ok(LittleEndian::read_u64(bytes))
}

fn check_len(bytes: &[u8], needed: usize) -> S7Result<()> {
    if bytes.len() < needed {
        return Err(S7Error::too_short(needed, bytes.len()));
    }
    Ok(())
}

// ============================================================================
// Byte-swap half
// ============================================================================

/// Swap the two bytes of a u16
pub fn swap_u16(value: u16) -> u16 {
    value.swap_bytes()
}

/// Swap the four bytes of a u32
pub fn swap_u32(value: u32) -> u32 {
    value.swap_bytes()
}

/// Swap the eight bytes of a u64
pub fn swap_u64(value: u64) -> u64 {
    value.swap_bytes()
}

/// Reinterpret a float as its bit pattern and swap
pub fn f32_to_swapped_bits(value: f32) -> u32 {
    value.to_bits().swap_bytes()
}

/// Swap and reinterpret a bit pattern as a float
pub fn swapped_bits_to_f32(bits: u32) -> f32 {
    f32::from_bits(bits.swap_bytes())
}

/// Reinterpret a double as its bit pattern and swap
pub fn f64_to_swapped_bits(value: f64) -> u64 {
    value.to_bits().swap_bytes()
}

/// Swap and reinterpret a bit pattern as a double
pub fn swapped_bits_to_f64(bits: u64) -> f64 {
    f64::from_bits(bits.swap_bytes())
}

// ============================================================================
// Composed wire conversions
// ============================================================================

/// Encode an i16 for the wire (swap, then pack little-endian)
pub fn encode_i16(value: i16) -> [u8; 2] {
    u16_to_le(swap_u16(value as u16))
}

/// Decode an i16 from the wire (unpack little-endian, then swap)
pub fn decode_i16(bytes: &[u8]) -> S7Result<i16> {
    Ok(swap_u16(le_to_u16(bytes)?) as i16)
}

/// Encode a u16 for the wire
pub fn encode_u16(value: u16) -> [u8; 2] {
    u16_to_le(swap_u16(value))
}

/// Decode a u16 from the wire
pub fn decode_u16(bytes: &[u8]) -> S7Result<u16> {
    Ok(swap_u16(le_to_u16(bytes)?))
}

/// Encode an i32 for the wire
pub fn encode_i32(value: i32) -> [u8; 4] {
    u32_to_le(swap_u32(value as u32))
}

/// Decode an i32 from the wire
pub fn decode_i32(bytes: &[u8]) -> S7Result<i32> {
    Ok(swap_u32(le_to_u32(bytes)?) as i32)
}

/// Encode a u32 for the wire
pub fn encode_u32(value: u32) -> [u8; 4] {
    u32_to_le(swap_u32(value))
}

/// Decode a u32 from the wire
pub fn decode_u32(bytes: &[u8]) -> S7Result<u32> {
    Ok(swap_u32(le_to_u32(bytes)?))
}

/// Encode an i64 for the wire
pub fn encode_i64(value: i64) -> [u8; 8] {
    u64_to_le(swap_u64(value as u64))
}

/// Decode an i64 from the wire
pub fn decode_i64(bytes: &[u8]) -> S7Result<i64> {
    Ok(swap_u64(le_to_u64(bytes)?) as i64)
}

/// Encode a u64 for the wire
pub fn encode_u64(value: u64) -> [u8; 8] {
    u64_to_le(swap_u64(value))
}

/// Decode a u64 from the wire
pub fn decode_u64(bytes: &[u8]) -> S7Result<u64> {
    Ok(swap_u64(le_to_u64(bytes)?))
}

/// Encode an f32 for the wire (bit pattern, swapped, packed little-endian)
pub fn encode_f32(value: f32) -> [u8; 4] {
    u32_to_le(f32_to_swapped_bits(value))
}

/// Decode an f32 from the wire
pub fn decode_f32(bytes: &[u8]) -> S7Result<f32> {
    Ok(swapped_bits_to_f32(le_to_u32(bytes)?))
}

/// Encode an f64 for the wire
pub fn encode_f64(value: f64) -> [u8; 8] {
    u64_to_le(f64_to_swapped_bits(value))
}

/// Decode an f64 from the wire
pub fn decode_f64(bytes: &[u8]) -> S7Result<f64> {
    Ok(swapped_bits_to_f64(le_to_u64(bytes)?))
}
