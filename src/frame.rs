//! Request frame construction
//!
//! Builds the byte-exact S7comm request frames: single-item variable reads
//! and writes, the device-control literals, and the per-family connection
//! templates the handshake sends. Layouts here interoperate with real
//! controllers; offsets and constants must match the wire format exactly.
//!
//! Every request is TPKT + COTP-DT + S7 header, then a parameter block
//! (function code, item count, one S7ANY item spec) and, for writes, a data
//! block (return code, transport size, length in bits, payload). Multi-item
//! requests exist in the protocol but this client always encodes exactly one
//! item per frame.

use bytes::{BufMut, Bytes, BytesMut};
use byteorder::{BigEndian, ByteOrder};

use crate::address::S7Address;
use crate::constants::{
    AREA_ANALOG_INPUT, AREA_ANALOG_OUTPUT, AREA_COUNTER, AREA_COUNTER_200, AREA_TIMER,
    COTP_DT_HEADER, DATA_TRANSPORT_BIT, DATA_TRANSPORT_BYTE, DATA_TRANSPORT_COUNTER_200,
    ITEM_SPEC_LEN, ITEM_SPEC_TAG, ITEM_SYNTAX_ANY, READ_FRAME_LEN, S7_COMMON_HEADER_LEN,
    S7_FUNC_READ, S7_FUNC_WRITE, S7_PDU_TYPE_JOB, S7_PROTOCOL_ID, TPKT_RESERVED, TPKT_VERSION,
    TRANSPORT_SIZE_BIT, TRANSPORT_SIZE_BYTE, TRANSPORT_SIZE_WORD, WRITE_FRAME_OVERHEAD,
    WRITE_PARAM_LEN,
};
use crate::types::{ControlCommand, PlcFamily};

// ============================================================================
// Connection templates
// ============================================================================

/// COTP connection request sent as handshake step one (300/400/1200/1500).
/// Trailing parameters: C0 (TPDU size 1024), C1 (source TSAP 01 02),
/// C2 (destination TSAP; byte 20 doubles as the connection type, byte 21
/// carries rack*0x20+slot).
const CONNECTION_REQUEST: [u8; 22] = [
    0x03, 0x00, 0x00, 0x16, 0x11, 0xE0, 0x00, 0x00, 0x00, 0x01, 0x00, 0xC0, 0x01, 0x0A, 0xC1,
    0x02, 0x01, 0x02, 0xC2, 0x02, 0x01, 0x00,
];

/// S7 setup-communication request sent as handshake step two
/// (300/400/1200/1500). Requests one job each way and a PDU length of 480.
const SETUP_COMMUNICATION: [u8; 25] = [
    0x03, 0x00, 0x00, 0x19, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x04, 0x00, 0x00, 0x08,
    0x00, 0x00, 0xF0, 0x00, 0x00, 0x01, 0x00, 0x01, 0x01, 0xE0,
];

/// Connection request for the S7-200 Smart. The parameter order differs
/// from the default template (C1, C2, C0), which moves the TSAP offsets.
const CONNECTION_REQUEST_200SMART: [u8; 22] = [
    0x03, 0x00, 0x00, 0x16, 0x11, 0xE0, 0x00, 0x00, 0x00, 0x01, 0x00, 0xC1, 0x02, 0x10, 0x00,
    0xC2, 0x02, 0x03, 0x00, 0xC0, 0x01, 0x0A,
];

/// Setup-communication request for the S7-200 Smart (PDU length 960)
const SETUP_COMMUNICATION_200SMART: [u8; 25] = [
    0x03, 0x00, 0x00, 0x19, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0xCC, 0xC1, 0x00, 0x08,
    0x00, 0x00, 0xF0, 0x00, 0x00, 0x01, 0x00, 0x01, 0x03, 0xC0,
];

/// Connection request for the S7-200 (TSAPs spell "MW" both ways)
const CONNECTION_REQUEST_200: [u8; 22] = [
    0x03, 0x00, 0x00, 0x16, 0x11, 0xE0, 0x00, 0x00, 0x00, 0x01, 0x00, 0xC1, 0x02, 0x4D, 0x57,
    0xC2, 0x02, 0x4D, 0x57, 0xC0, 0x01, 0x09,
];

/// Setup-communication request for the S7-200
const SETUP_COMMUNICATION_200: [u8; 25] = [
    0x03, 0x00, 0x00, 0x19, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08,
    0x00, 0x00, 0xF0, 0x00, 0x00, 0x01, 0x00, 0x01, 0x03, 0xC0,
];

/// TSAP field offsets inside the connection request, by template scheme
const TSAP_LOCAL_OFFSET_200: usize = 13;
const TSAP_REMOTE_OFFSET_200: usize = 17;
const TSAP_LOCAL_OFFSET: usize = 16;
const TSAP_REMOTE_OFFSET: usize = 20;

/// Offset of the connection-type byte (shared with the remote TSAP high
/// byte) and the rack/slot byte, non-200 templates only
const CONNECTION_TYPE_OFFSET: usize = 20;
const RACK_SLOT_OFFSET: usize = 21;

/// The two handshake frames for one connection, owned per handle
///
/// Family selection happens once at construction; rack/slot, connection type
/// and TSAP values are patched into the copies held here, never into shared
/// state, so handles to controllers of different families can coexist.
#[derive(Debug, Clone)]
pub struct ConnectionTemplates {
    family: PlcFamily,
    connection_request: [u8; 22],
    setup_communication: [u8; 25],
}

impl ConnectionTemplates {
    /// Select and patch the template pair for a controller family
    pub fn for_family(family: PlcFamily) -> Self {
        let mut templates = match family {
            PlcFamily::S200 => ConnectionTemplates {
                family,
                connection_request: CONNECTION_REQUEST_200,
                setup_communication: SETUP_COMMUNICATION_200,
            },
            PlcFamily::S200Smart => ConnectionTemplates {
                family,
                connection_request: CONNECTION_REQUEST_200SMART,
                setup_communication: SETUP_COMMUNICATION_200SMART,
            },
            _ => ConnectionTemplates {
                family,
                connection_request: CONNECTION_REQUEST,
                setup_communication: SETUP_COMMUNICATION,
            },
        };

        match family {
            PlcFamily::S1200 | PlcFamily::S1500 => {
                templates.connection_request[RACK_SLOT_OFFSET] = 0
            }
            PlcFamily::S300 => templates.connection_request[RACK_SLOT_OFFSET] = 2,
            PlcFamily::S400 => {
                templates.connection_request[RACK_SLOT_OFFSET] = 3;
                templates.connection_request[TSAP_LOCAL_OFFSET + 1] = 0x00;
            }
            PlcFamily::S200 | PlcFamily::S200Smart => {}
        }
        templates
    }

    /// Handshake step one: the COTP connection request
    pub fn connection_request(&self) -> &[u8] {
        &self.connection_request
    }

    /// Handshake step two: the S7 setup-communication request
    pub fn setup_communication(&self) -> &[u8] {
        &self.setup_communication
    }

    /// The family this template pair was built for
    pub fn family(&self) -> PlcFamily {
        self.family
    }

    /// Fold rack and slot into the connection request (no effect on the 200
    /// family, whose templates carry no rack/slot byte)
    pub fn set_rack_slot(&mut self, rack: u8, slot: u8) {
        if !self.family.uses_200_templates() {
            self.connection_request[RACK_SLOT_OFFSET] = rack.wrapping_mul(0x20).wrapping_add(slot);
        }
    }

    /// Connection type byte (0x01 PG, 0x02 OP, 0x03 basic)
    pub fn connection_type(&self) -> u8 {
        self.connection_request[CONNECTION_TYPE_OFFSET]
    }

    /// Set the connection type (no effect on the 200 family)
    pub fn set_connection_type(&mut self, connection_type: u8) {
        if !self.family.uses_200_templates() {
            self.connection_request[CONNECTION_TYPE_OFFSET] = connection_type;
        }
    }

    /// Local (source) TSAP
    pub fn local_tsap(&self) -> u16 {
        let offset = if self.family.uses_200_templates() {
            TSAP_LOCAL_OFFSET_200
        } else {
            TSAP_LOCAL_OFFSET
        };
        BigEndian::read_u16(&self.connection_request[offset..offset + 2])
    }

    /// Set the local (source) TSAP
    pub fn set_local_tsap(&mut self, tsap: u16) {
        let offset = if self.family.uses_200_templates() {
            TSAP_LOCAL_OFFSET_200
        } else {
            TSAP_LOCAL_OFFSET
        };
        BigEndian::write_u16(&mut self.connection_request[offset..offset + 2], tsap);
    }

    /// Remote (destination) TSAP. On non-200 templates this overlays the
    /// connection-type and rack/slot bytes.
    pub fn remote_tsap(&self) -> u16 {
        let offset = if self.family.uses_200_templates() {
            TSAP_REMOTE_OFFSET_200
        } else {
            TSAP_REMOTE_OFFSET
        };
        BigEndian::read_u16(&self.connection_request[offset..offset + 2])
    }

    /// Set the remote (destination) TSAP
    pub fn set_remote_tsap(&mut self, tsap: u16) {
        let offset = if self.family.uses_200_templates() {
            TSAP_REMOTE_OFFSET_200
        } else {
            TSAP_REMOTE_OFFSET
        };
        BigEndian::write_u16(&mut self.connection_request[offset..offset + 2], tsap);
    }
}

// ============================================================================
// Device control and identification literals
// ============================================================================

/// PI-service "P_PROGRAM" hot start (function 0x28)
const PLC_HOT_START: [u8; 37] = [
    0x03, 0x00, 0x00, 0x25, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x0C, 0x00, 0x00, 0x14,
    0x00, 0x00, 0x28, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFD, 0x00, 0x00, 0x09, 0x50, 0x5F,
    0x50, 0x52, 0x4F, 0x47, 0x52, 0x41, 0x4D,
];

/// PI-service "P_PROGRAM" stop (function 0x29)
const PLC_STOP: [u8; 33] = [
    0x03, 0x00, 0x00, 0x21, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x0E, 0x00, 0x00, 0x10,
    0x00, 0x00, 0x29, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09, 0x50, 0x5F, 0x50, 0x52, 0x4F, 0x47,
    0x52, 0x41, 0x4D,
];

/// Reset request
const PLC_RESET: [u8; 6] = [0x06, 0x10, 0x00, 0x00, 0x01, 0x00];

/// SZL 0x0011 read requesting the module order number
const ORDER_NUMBER_REQUEST: [u8; 33] = [
    0x03, 0x00, 0x00, 0x21, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x00, 0x01, 0x00, 0x08,
    0x00, 0x08, 0x00, 0x01, 0x12, 0x04, 0x11, 0x44, 0x01, 0x00, 0xFF, 0x09, 0x00, 0x04, 0x00,
    0x11, 0x00, 0x00,
];

/// The fixed literal frame for a device-control command
pub fn build_control_frame(command: ControlCommand) -> Bytes {
    match command {
        ControlCommand::Run => Bytes::from_static(&PLC_HOT_START),
        ControlCommand::Stop => Bytes::from_static(&PLC_STOP),
        ControlCommand::Reset => Bytes::from_static(&PLC_RESET),
    }
}

/// The fixed SZL request for the module order number
pub fn order_number_request() -> Bytes {
    Bytes::from_static(&ORDER_NUMBER_REQUEST)
}

// ============================================================================
// Variable read / write frames
// ============================================================================

/// Payload of a write request
#[derive(Debug, Clone, Copy)]
pub enum WriteData<'a> {
    /// Single-bit write; always encoded as a one-byte payload
    Bit(bool),
    /// Byte-granular write of the given payload
    Bytes(&'a [u8]),
}

/// Build a single-item read request
///
/// `is_bit` selects bit access (fixed item count of one) over byte access.
/// Byte access encodes the item count per the target area's granularity:
/// timer/counter and analog areas count words, everything else counts bytes.
pub fn build_read_frame(addr: &S7Address, is_bit: bool) -> Bytes {
    let mut frame = BytesMut::with_capacity(READ_FRAME_LEN);
    put_job_header(
        &mut frame,
        READ_FRAME_LEN as u16,
        (READ_FRAME_LEN - S7_COMMON_HEADER_LEN) as u16,
        0,
    );
    frame.put_u8(S7_FUNC_READ);
    frame.put_u8(0x01); // item count, always one

    if is_bit {
        put_item_spec(&mut frame, addr, TRANSPORT_SIZE_BIT, 1);
    } else {
        let (transport, count) = byte_access_encoding(addr, addr.requested_length);
        put_item_spec(&mut frame, addr, transport, count);
    }
    frame.freeze()
}

/// Build a single-item write request
pub fn build_write_frame(addr: &S7Address, data: WriteData<'_>) -> Bytes {
    match data {
        WriteData::Bit(value) => {
            let payload = [if value { 0x01 } else { 0x00 }];
            let mut frame = write_frame_prefix(addr, payload.len(), TRANSPORT_SIZE_BIT, 1);
            // Bit payload lengths are counted in bytes, not bits.
            let transport = if addr.area_code == AREA_COUNTER_200 {
                DATA_TRANSPORT_COUNTER_200
            } else {
                DATA_TRANSPORT_BIT
            };
            frame.put_u8(0x00); // reserved return code
            frame.put_u8(transport);
            frame.put_u16(payload.len() as u16);
            frame.extend_from_slice(&payload);
            frame.freeze()
        }
        WriteData::Bytes(payload) => {
            // Writes only halve the item count for the analog areas; the
            // timer/counter special case applies to reads alone.
            let (transport, count) = match addr.area_code {
                AREA_ANALOG_INPUT | AREA_ANALOG_OUTPUT => {
                    (TRANSPORT_SIZE_WORD, (payload.len() / 2) as u16)
                }
                _ => (TRANSPORT_SIZE_BYTE, payload.len() as u16),
            };
            let mut frame = write_frame_prefix(addr, payload.len(), transport, count);
            frame.put_u8(0x00); // reserved return code
            frame.put_u8(DATA_TRANSPORT_BYTE);
            frame.put_u16((payload.len() * 8) as u16); // length in bits
            frame.extend_from_slice(payload);
            frame.freeze()
        }
    }
}

/// Transport size and item count for a byte-granular read
fn byte_access_encoding(addr: &S7Address, byte_len: u32) -> (u8, u16) {
    match addr.area_code {
        // Timers and counters are word registers and put their own area
        // code in the transport-size slot.
        AREA_TIMER | AREA_COUNTER => (addr.area_code, (byte_len / 2) as u16),
        AREA_ANALOG_INPUT | AREA_ANALOG_OUTPUT => (TRANSPORT_SIZE_WORD, (byte_len / 2) as u16),
        _ => (TRANSPORT_SIZE_BYTE, byte_len as u16),
    }
}

/// Header, function byte and item spec shared by both write forms
fn write_frame_prefix(addr: &S7Address, payload_len: usize, transport: u8, count: u16) -> BytesMut {
    let total_len = WRITE_FRAME_OVERHEAD + payload_len;
    let mut frame = BytesMut::with_capacity(total_len);
    put_job_header(
        &mut frame,
        total_len as u16,
        WRITE_PARAM_LEN,
        (4 + payload_len) as u16,
    );
    frame.put_u8(S7_FUNC_WRITE);
    frame.put_u8(0x01); // item count, always one
    put_item_spec(&mut frame, addr, transport, count);
    frame
}

/// TPKT + COTP + S7 job header (17 bytes)
fn put_job_header(frame: &mut BytesMut, total_len: u16, param_len: u16, data_len: u16) {
    frame.put_u8(TPKT_VERSION);
    frame.put_u8(TPKT_RESERVED);
    frame.put_u16(total_len);
    frame.extend_from_slice(&COTP_DT_HEADER);
    frame.put_u8(S7_PROTOCOL_ID);
    frame.put_u8(S7_PDU_TYPE_JOB);
    frame.put_u16(0x0000); // redundancy identification
    frame.put_u16(0x0001); // PDU reference
    frame.put_u16(param_len);
    frame.put_u16(data_len);
}

/// One S7ANY item specification (12 bytes)
fn put_item_spec(frame: &mut BytesMut, addr: &S7Address, transport: u8, count: u16) {
    frame.put_u8(ITEM_SPEC_TAG);
    frame.put_u8(ITEM_SPEC_LEN);
    frame.put_u8(ITEM_SYNTAX_ANY);
    frame.put_u8(transport);
    frame.put_u16(count);
    frame.put_u16(addr.db_block);
    frame.put_u8(addr.area_code);
    // 24-bit big-endian bit offset.
    frame.put_u8((addr.bit_offset >> 16) as u8);
    frame.put_u16(addr.bit_offset as u16);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(text: &str, len: u32) -> S7Address {
        S7Address::parse(text, len).unwrap()
    }

    #[test]
    fn test_read_word_frame_layout() {
        let frame = build_read_frame(&addr("MW100", 2), false);
        assert_eq!(
            frame.as_ref(),
            &[
                0x03, 0x00, 0x00, 0x1F, // TPKT, length 31
                0x02, 0xF0, 0x80, // COTP DT
                0x32, 0x01, 0x00, 0x00, 0x00, 0x01, // S7 job header
                0x00, 0x0E, 0x00, 0x00, // parameter length 14, data length 0
                0x04, 0x01, // read, one item
                0x12, 0x0A, 0x10, // item spec tag
                0x02, 0x00, 0x02, // byte transport, two items
                0x00, 0x00, 0x83, // no DB block, flag area
                0x00, 0x03, 0x20, // bit offset 800
            ][..]
        );
    }

    #[test]
    fn test_read_bit_frame_layout() {
        let frame = build_read_frame(&addr("M100.0", 1), true);
        assert_eq!(frame.len(), READ_FRAME_LEN);
        assert_eq!(frame[17], S7_FUNC_READ);
        assert_eq!(frame[22], TRANSPORT_SIZE_BIT);
        assert_eq!(&frame[23..25], &[0x00, 0x01]); // item count pinned to one
        assert_eq!(&frame[28..31], &[0x00, 0x03, 0x20]);
    }

    #[test]
    fn test_read_timer_uses_area_code_transport() {
        let frame = build_read_frame(&addr("T5", 2), false);
        assert_eq!(frame[22], AREA_TIMER);
        assert_eq!(&frame[23..25], &[0x00, 0x01]); // two bytes = one word
        assert_eq!(frame[27], AREA_TIMER);
        assert_eq!(&frame[28..31], &[0x00, 0x00, 0x05]); // raw index, no scaling
    }

    #[test]
    fn test_read_analog_halves_item_count() {
        let frame = build_read_frame(&addr("AIW2", 4), false);
        assert_eq!(frame[22], TRANSPORT_SIZE_WORD);
        assert_eq!(&frame[23..25], &[0x00, 0x02]);
    }

    #[test]
    fn test_write_bytes_frame_layout() {
        let frame = build_write_frame(&addr("MW100", 2), WriteData::Bytes(&[0x12, 0x34]));
        assert_eq!(
            frame.as_ref(),
            &[
                0x03, 0x00, 0x00, 0x25, // TPKT, length 37
                0x02, 0xF0, 0x80, // COTP DT
                0x32, 0x01, 0x00, 0x00, 0x00, 0x01, // S7 job header
                0x00, 0x0E, 0x00, 0x06, // parameter length 14, data length 6
                0x05, 0x01, // write, one item
                0x12, 0x0A, 0x10, // item spec tag
                0x02, 0x00, 0x02, // byte transport, two items
                0x00, 0x00, 0x83, // no DB block, flag area
                0x00, 0x03, 0x20, // bit offset 800
                0x00, 0x04, 0x00, 0x10, // data block: byte transport, 16 bits
                0x12, 0x34, // payload
            ][..]
        );
    }

    #[test]
    fn test_write_bit_frame_layout() {
        let frame = build_write_frame(&addr("M100.0", 1), WriteData::Bit(true));
        assert_eq!(frame.len(), WRITE_FRAME_OVERHEAD + 1);
        assert_eq!(frame[17], S7_FUNC_WRITE);
        assert_eq!(frame[22], TRANSPORT_SIZE_BIT);
        assert_eq!(frame[32], DATA_TRANSPORT_BIT);
        assert_eq!(&frame[33..35], &[0x00, 0x01]); // one byte, not bits
        assert_eq!(frame[35], 0x01);

        let frame = build_write_frame(&addr("M100.0", 1), WriteData::Bit(false));
        assert_eq!(frame[35], 0x00);
    }

    #[test]
    fn test_write_db_frame_addressing() {
        let payload = [0u8; 4];
        let frame = build_write_frame(&addr("DB1.70", 4), WriteData::Bytes(&payload));
        assert_eq!(&frame[25..27], &[0x00, 0x01]); // DB block one
        assert_eq!(frame[27], 0x84);
        assert_eq!(&frame[28..31], &[0x00, 0x02, 0x30]); // offset 560
        assert_eq!(&frame[33..35], &[0x00, 0x20]); // 32 bits
    }

    #[test]
    fn test_control_frames() {
        let run = build_control_frame(ControlCommand::Run);
        assert_eq!(run.len(), 37);
        assert_eq!(run[17], 0x28);
        assert_eq!(&run[28..], b"P_PROGRAM");

        let stop = build_control_frame(ControlCommand::Stop);
        assert_eq!(stop.len(), 33);
        assert_eq!(stop[17], 0x29);
        assert_eq!(&stop[24..], b"P_PROGRAM");

        let reset = build_control_frame(ControlCommand::Reset);
        assert_eq!(reset.as_ref(), &[0x06, 0x10, 0x00, 0x00, 0x01, 0x00][..]);
    }

    #[test]
    fn test_order_number_request_is_userdata() {
        let frame = order_number_request();
        assert_eq!(frame.len(), 33);
        assert_eq!(frame[7], S7_PROTOCOL_ID);
        assert_eq!(frame[8], 0x07); // userdata PDU
        assert_eq!(&frame[30..32], &[0x11, 0x00]); // SZL id 0x0011
    }

    #[test]
    fn test_family_template_patches() {
        assert_eq!(
            ConnectionTemplates::for_family(PlcFamily::S1200).connection_request()[21],
            0
        );
        assert_eq!(
            ConnectionTemplates::for_family(PlcFamily::S1500).connection_request()[21],
            0
        );
        assert_eq!(
            ConnectionTemplates::for_family(PlcFamily::S300).connection_request()[21],
            2
        );

        let s400 = ConnectionTemplates::for_family(PlcFamily::S400);
        assert_eq!(s400.connection_request()[21], 3);
        assert_eq!(s400.connection_request()[17], 0x00);

        let smart = ConnectionTemplates::for_family(PlcFamily::S200Smart);
        assert_eq!(smart.connection_request()[11], 0xC1);
        assert_eq!(smart.setup_communication()[23..25], [0x03, 0xC0]);

        let s200 = ConnectionTemplates::for_family(PlcFamily::S200);
        assert_eq!(&s200.connection_request()[13..15], b"MW");
    }

    #[test]
    fn test_rack_slot_patching() {
        let mut templates = ConnectionTemplates::for_family(PlcFamily::S300);
        templates.set_rack_slot(0, 2);
        assert_eq!(templates.connection_request()[21], 0x02);
        templates.set_rack_slot(1, 2);
        assert_eq!(templates.connection_request()[21], 0x22);

        // 200-family templates carry no rack/slot byte.
        let mut smart = ConnectionTemplates::for_family(PlcFamily::S200Smart);
        let before = smart.connection_request().to_vec();
        smart.set_rack_slot(1, 2);
        assert_eq!(smart.connection_request(), &before[..]);
    }

    #[test]
    fn test_tsap_accessors() {
        let mut templates = ConnectionTemplates::for_family(PlcFamily::S1200);
        assert_eq!(templates.local_tsap(), 0x0102);
        templates.set_local_tsap(0x0100);
        assert_eq!(templates.local_tsap(), 0x0100);
        assert_eq!(templates.connection_request()[16], 0x01);
        assert_eq!(templates.connection_request()[17], 0x00);

        // The remote TSAP overlays connection type and rack/slot.
        templates.set_remote_tsap(0x0203);
        assert_eq!(templates.connection_type(), 0x02);
        assert_eq!(templates.connection_request()[21], 0x03);

        let smart = ConnectionTemplates::for_family(PlcFamily::S200Smart);
        assert_eq!(smart.local_tsap(), 0x1000);
        assert_eq!(smart.remote_tsap(), 0x0300);
    }

    #[test]
    fn test_connection_type_accessor() {
        let mut templates = ConnectionTemplates::for_family(PlcFamily::S1200);
        assert_eq!(templates.connection_type(), 0x01);
        templates.set_connection_type(0x03);
        assert_eq!(templates.connection_type(), 0x03);
    }
}
