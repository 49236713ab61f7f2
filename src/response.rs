//! Response analysis
//!
//! Decodes the S7 responses this client can receive: variable reads (bit and
//! byte granular), variable writes, the setup-communication reply that
//! carries the negotiated PDU length, and the SZL reply carrying the module
//! order number.
//!
//! Byte-granular read responses hold a sequence of item records after the
//! 21-byte common header. Rather than walking them with raw index
//! arithmetic, [`ItemRecordScanner`] iterates over tagged records so every
//! access is range-checked; the stride constants it applies are kept exactly
//! as real controllers expect them.

use bytes::{Bytes, BytesMut};
use byteorder::{BigEndian, ByteOrder};

use crate::constants::{
    ITEM_RC_OBJECT_MISSING, ITEM_RC_OUT_OF_RANGE, ITEM_RC_SUCCESS, ITEM_RC_UNSUPPORTED_TYPE,
    ITEM_TS_BIT, ITEM_TS_BYTE, ITEM_TS_OCTET, ORDER_NUMBER_LEN, ORDER_NUMBER_OFFSET,
    PDU_LENGTH_ENVELOPE, PDU_LENGTH_FLOOR, RESPONSE_BIT_VALUE_OFFSET, RESPONSE_FIRST_ITEM_OFFSET,
    RESPONSE_ITEM_COUNT_OFFSET, RESPONSE_MIN_LEN,
};
use crate::error::{S7Error, S7Result};

/// One record located by the byte-read scan
#[derive(Debug)]
enum ItemRecord {
    /// Payload bytes gathered from a success record
    Data(Vec<u8>),
    /// Fault code reported by the controller for one item
    Fault(S7Error),
}

/// Forward scanner over the variable region of a byte-read response.
///
/// Yields `Err` only for truncated records (a success marker whose declared
/// payload runs past the end of the frame); controller-reported item faults
/// come through as [`ItemRecord::Fault`] so the caller can apply its
/// fault-wins accumulation. Unrecognized bytes are skipped one at a time,
/// which keeps the scan resilient to padding between records.
struct ItemRecordScanner<'a> {
    response: &'a [u8],
    index: usize,
}

impl<'a> ItemRecordScanner<'a> {
    fn new(response: &'a [u8]) -> Self {
        ItemRecordScanner {
            response,
            index: RESPONSE_FIRST_ITEM_OFFSET,
        }
    }

    /// Gather the payload of a `(0xFF,0x04)` record: the declared length is
    /// in bits, the payload follows the length field directly.
    fn take_byte_record(&mut self) -> S7Result<ItemRecord> {
        let i = self.index;
        let count = self.declared_count(i)? / 8;
        let payload_end = i + 4 + count;
        if payload_end > self.response.len() {
            return Err(S7Error::too_short(payload_end, self.response.len()));
        }
        self.index = i + count + 4;
        Ok(ItemRecord::Data(self.response[i + 4..payload_end].to_vec()))
    }

    /// Gather the payload of a `(0xFF,0x09)` record: two-byte values at a
    /// stride of 3 or 5 depending on the declared count's divisibility.
    /// The stride selection matches observed controller behavior and is
    /// deliberately left exactly as-is. TODO: validate the stride-5 branch
    /// against a 200 Smart once bench hardware is back.
    fn take_octet_record(&mut self) -> S7Result<ItemRecord> {
        let i = self.index;
        let count = self.declared_count(i)?;
        let (first, stride, pairs) = if count % 3 == 0 {
            (i + 5, 3, count / 3)
        } else {
            (i + 7, 5, count / 5)
        };

        let mut payload = Vec::with_capacity(pairs * 2);
        for j in 0..pairs {
            let start = first + stride * j;
            if start + 2 > self.response.len() {
                return Err(S7Error::too_short(start + 2, self.response.len()));
            }
            payload.extend_from_slice(&self.response[start..start + 2]);
        }
        self.index = i + count + 5;
        Ok(ItemRecord::Data(payload))
    }

    /// Big-endian count field following a success marker
    fn declared_count(&self, i: usize) -> S7Result<usize> {
        if i + 4 > self.response.len() {
            return Err(S7Error::too_short(i + 4, self.response.len()));
        }
        Ok(BigEndian::read_u16(&self.response[i + 2..i + 4]) as usize)
    }
}

impl Iterator for ItemRecordScanner<'_> {
    type Item = S7Result<ItemRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index + 1 < self.response.len() {
            let marker = (self.response[self.index], self.response[self.index + 1]);
            match marker {
                (ITEM_RC_SUCCESS, ITEM_TS_BYTE) => return Some(self.take_byte_record()),
                (ITEM_RC_SUCCESS, ITEM_TS_OCTET) => return Some(self.take_octet_record()),
                (ITEM_RC_OUT_OF_RANGE, 0x00) => {
                    self.index += 1;
                    return Some(Ok(ItemRecord::Fault(S7Error::ReadLengthOverPlcAssign)));
                }
                (ITEM_RC_UNSUPPORTED_TYPE, 0x00) => {
                    self.index += 1;
                    return Some(Ok(ItemRecord::Fault(S7Error::UnsupportedDataType)));
                }
                (ITEM_RC_OBJECT_MISSING, 0x00) => {
                    self.index += 1;
                    return Some(Ok(ItemRecord::Fault(S7Error::DbBlockNotFound)));
                }
                _ => self.index += 1,
            }
        }
        None
    }
}

/// Decode a variable-read response into its payload bytes
///
/// `is_bit` must match the `is_bit` flag the request frame was built with.
/// Bit reads return exactly one byte (0 or 1). Byte reads return the
/// concatenation of every success record's payload; if the controller
/// reported a fault for any item the fault is returned even when other
/// items carried data.
pub fn analyze_read(response: &[u8], is_bit: bool) -> S7Result<Bytes> {
    ensure_common_header(response)?;
    if is_bit {
        analyze_bit_read(response)
    } else {
        analyze_byte_read(response)
    }
}

/// Decode a variable-write response
pub fn analyze_write(response: &[u8]) -> S7Result<()> {
    ensure_common_header(response)?;
    let status_offset = RESPONSE_FIRST_ITEM_OFFSET;
    if response.len() <= status_offset {
        return Err(S7Error::too_short(status_offset + 1, response.len()));
    }
    let code = response[status_offset];
    if code == ITEM_RC_SUCCESS {
        Ok(())
    } else {
        Err(S7Error::WriteError { code })
    }
}

/// Negotiated PDU length from a setup-communication response
///
/// The controller's grant sits big-endian in the trailing two bytes; the
/// usable payload excludes 28 bytes of envelope and is floored at 200.
pub fn negotiated_pdu_length(response: &[u8]) -> S7Result<i32> {
    if response.len() < 2 {
        return Err(S7Error::too_short(2, response.len()));
    }
    let granted = BigEndian::read_u16(&response[response.len() - 2..]) as i32;
    Ok((granted - PDU_LENGTH_ENVELOPE).max(PDU_LENGTH_FLOOR))
}

/// Module order number from an SZL 0x0011 response
///
/// The order number occupies a fixed 20-byte ASCII field; trailing NUL and
/// space padding is stripped.
pub fn extract_order_number(response: &[u8]) -> S7Result<String> {
    let end = ORDER_NUMBER_OFFSET + ORDER_NUMBER_LEN;
    if response.len() < end {
        return Err(S7Error::too_short(end, response.len()));
    }
    let raw = &response[ORDER_NUMBER_OFFSET..end];
    let text = String::from_utf8_lossy(raw);
    Ok(text.trim_matches(|c: char| c == '\0' || c == ' ').to_string())
}

fn ensure_common_header(response: &[u8]) -> S7Result<()> {
    if response.len() < RESPONSE_MIN_LEN {
        return Err(S7Error::too_short(RESPONSE_MIN_LEN, response.len()));
    }
    Ok(())
}

fn analyze_bit_read(response: &[u8]) -> S7Result<Bytes> {
    if response[RESPONSE_ITEM_COUNT_OFFSET] != 1 {
        return Err(S7Error::unknown(format!(
            "bit read answered with item count {}",
            response[RESPONSE_ITEM_COUNT_OFFSET]
        )));
    }
    let marker_end = RESPONSE_FIRST_ITEM_OFFSET + 2;
    if response.len() < marker_end {
        return Err(S7Error::too_short(marker_end, response.len()));
    }

    let marker = (
        response[RESPONSE_FIRST_ITEM_OFFSET],
        response[RESPONSE_FIRST_ITEM_OFFSET + 1],
    );
    match marker {
        (ITEM_RC_SUCCESS, ITEM_TS_BIT) => {
            if response.len() <= RESPONSE_BIT_VALUE_OFFSET {
                return Err(S7Error::too_short(
                    RESPONSE_BIT_VALUE_OFFSET + 1,
                    response.len(),
                ));
            }
            Ok(Bytes::copy_from_slice(&[response[RESPONSE_BIT_VALUE_OFFSET]]))
        }
        (ITEM_RC_OUT_OF_RANGE, 0x00) => Err(S7Error::ReadLengthOverPlcAssign),
        (ITEM_RC_UNSUPPORTED_TYPE, 0x00) => Err(S7Error::UnsupportedDataType),
        (ITEM_RC_OBJECT_MISSING, 0x00) => Err(S7Error::DbBlockNotFound),
        (rc, ts) => Err(S7Error::unknown(format!(
            "bit read answered with marker {rc:#04x},{ts:#04x}"
        ))),
    }
}

fn analyze_byte_read(response: &[u8]) -> S7Result<Bytes> {
    let mut payload = BytesMut::new();
    let mut fault: Option<S7Error> = None;

    for record in ItemRecordScanner::new(response) {
        match record? {
            ItemRecord::Data(bytes) => payload.extend_from_slice(&bytes),
            // Later faults replace earlier ones; any fault outweighs data.
            ItemRecord::Fault(error) => fault = Some(error),
        }
    }

    if let Some(error) = fault {
        return Err(error);
    }
    if payload.is_empty() {
        return Err(S7Error::unknown("read response contained no data items"));
    }
    Ok(payload.freeze())
}
