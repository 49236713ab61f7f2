//! S7 protocol constants
//!
//! Wire-format constants for S7comm over ISO-on-TCP (RFC 1006, port 102).
//! Every frame this crate builds or parses is TPKT + COTP + S7 PDU; the
//! values below are load-bearing for interoperability with real controllers
//! and must not be changed.

// ============================================================================
// ISO-on-TCP Framing (TPKT + COTP)
// ============================================================================

/// TPKT version byte, first byte of every frame
pub const TPKT_VERSION: u8 = 0x03;

/// TPKT reserved byte, always zero
pub const TPKT_RESERVED: u8 = 0x00;

/// COTP fixed part for data transfer PDUs
/// Format: Length(0x02) + DT Data marker(0xF0) + TPDU number/EOT(0x80)
pub const COTP_DT_HEADER: [u8; 3] = [0x02, 0xF0, 0x80];

/// Bytes of TPKT(4) + COTP data header(3) in front of every S7 PDU
pub const TPKT_COTP_OVERHEAD: usize = 7;

// ============================================================================
// S7 PDU Header
// ============================================================================

/// S7 protocol identifier, first byte of the S7 header
pub const S7_PROTOCOL_ID: u8 = 0x32;

/// PDU type for a job request (client -> PLC)
pub const S7_PDU_TYPE_JOB: u8 = 0x01;

/// PDU type for user-data exchange (SZL reads and similar services)
pub const S7_PDU_TYPE_USERDATA: u8 = 0x07;

/// Length of the fixed common header shared by request and response frames
/// TPKT(4) + COTP(3) + protocol id(1) + PDU type(1) + reference(4) +
/// parameter length(2) + data length(2) = 17 bytes
pub const S7_COMMON_HEADER_LEN: usize = 17;

/// Read-variable function code
pub const S7_FUNC_READ: u8 = 0x04;

/// Write-variable function code
pub const S7_FUNC_WRITE: u8 = 0x05;

// ============================================================================
// Item Specification (S7ANY addressing)
// ============================================================================

/// Variable-specification tag opening each request item
pub const ITEM_SPEC_TAG: u8 = 0x12;

/// Length of the addressing fields that follow the tag
pub const ITEM_SPEC_LEN: u8 = 0x0A;

/// S7ANY addressing syntax identifier
pub const ITEM_SYNTAX_ANY: u8 = 0x10;

/// Transport size: bit access
pub const TRANSPORT_SIZE_BIT: u8 = 0x01;

/// Transport size: byte access (one item per byte)
pub const TRANSPORT_SIZE_BYTE: u8 = 0x02;

/// Transport size: word access (one item per two bytes), used for the
/// analog areas whose registers are word-granular
pub const TRANSPORT_SIZE_WORD: u8 = 0x04;

// ============================================================================
// Memory Area Codes
// ============================================================================

/// Analog inputs (AI)
pub const AREA_ANALOG_INPUT: u8 = 0x06;

/// Analog outputs (AQ)
pub const AREA_ANALOG_OUTPUT: u8 = 0x07;

/// Digital inputs (I)
pub const AREA_INPUT: u8 = 0x81;

/// Digital outputs (Q)
pub const AREA_OUTPUT: u8 = 0x82;

/// Flag memory / merkers (M)
pub const AREA_FLAG: u8 = 0x83;

/// Data blocks (D/DB, and V on the 200 family which maps to DB1)
pub const AREA_DATA_BLOCK: u8 = 0x84;

/// Counters (C)
pub const AREA_COUNTER: u8 = 0x1E;

/// Timers (T)
pub const AREA_TIMER: u8 = 0x1F;

/// Counter area code used by some 200-family dialects. The address parser
/// never produces it, but the bit-write builder honors its transport-size
/// quirk when an address carries it.
pub const AREA_COUNTER_200: u8 = 0x1C;

// ============================================================================
// Write Data Block Transport Sizes
// ============================================================================

/// Data-part transport size for bit payloads (length counted in bits)
pub const DATA_TRANSPORT_BIT: u8 = 0x03;

/// Data-part transport size for byte payloads (length counted in bits)
pub const DATA_TRANSPORT_BYTE: u8 = 0x04;

/// Data-part transport size paired with [`AREA_COUNTER_200`] bit writes
pub const DATA_TRANSPORT_COUNTER_200: u8 = 0x09;

// ============================================================================
// Response Layout
// ============================================================================

/// Minimum length of any analyzable response (fixed header + item count)
pub const RESPONSE_MIN_LEN: usize = 21;

/// Offset of the returned item count in read responses
pub const RESPONSE_ITEM_COUNT_OFFSET: usize = 20;

/// Offset where the first item record (or write status byte) begins
pub const RESPONSE_FIRST_ITEM_OFFSET: usize = 21;

/// Offset of the value byte in a successful bit-read response
pub const RESPONSE_BIT_VALUE_OFFSET: usize = 25;

/// Item return code: success
pub const ITEM_RC_SUCCESS: u8 = 0xFF;

/// Item return code: requested range exceeds the area assigned in the PLC
pub const ITEM_RC_OUT_OF_RANGE: u8 = 0x05;

/// Item return code: data type not supported for this access (error 0006)
pub const ITEM_RC_UNSUPPORTED_TYPE: u8 = 0x06;

/// Item return code: addressed object does not exist (error 000A)
pub const ITEM_RC_OBJECT_MISSING: u8 = 0x0A;

/// Transport size tag of a successful bit-read item record
pub const ITEM_TS_BIT: u8 = 0x03;

/// Transport size tag of an item record whose length field counts bits
pub const ITEM_TS_BYTE: u8 = 0x04;

/// Transport size tag of an item record whose length field counts bytes
/// and whose payload is consumed with a count-dependent stride
pub const ITEM_TS_OCTET: u8 = 0x09;

// ============================================================================
// Request Frame Sizes
// ============================================================================

/// Total length of a single-item read request
/// Common header (17) + function/item count (2) + item spec (12) = 31 bytes
pub const READ_FRAME_LEN: usize = 31;

/// Length of a write request before its payload
/// Common header (17) + function/item count (2) + item spec (12) +
/// data block header (4) = 35 bytes
pub const WRITE_FRAME_OVERHEAD: usize = 35;

/// Parameter-block length encoded in write requests
/// Function (1) + item count (1) + item spec (12) = 14 bytes
pub const WRITE_PARAM_LEN: u16 = 0x0E;

// ============================================================================
// Handshake / PDU Negotiation
// ============================================================================

/// Smallest PDU length this client will operate with. The negotiated value
/// from the setup-communication response is clamped up to this floor.
pub const PDU_LENGTH_FLOOR: i32 = 200;

/// Envelope subtracted from the negotiated PDU length: the common header
/// plus the read parameter/item blocks consume 28 bytes of every PDU,
/// leaving the remainder for payload.
pub const PDU_LENGTH_ENVELOPE: i32 = 28;

/// Receive scratch size used before a PDU length has been negotiated
pub const HANDSHAKE_BUFFER_LEN: usize = 1024;

// ============================================================================
// Device Identification (SZL order number)
// ============================================================================

/// Offset of the order-number string in the SZL 0x0011 response
pub const ORDER_NUMBER_OFFSET: usize = 71;

/// Length of the order-number string
pub const ORDER_NUMBER_LEN: usize = 20;

// ============================================================================
// Defaults
// ============================================================================

/// Standard ISO-on-TCP port
pub const DEFAULT_PORT: u16 = 102;

/// Default rack number
pub const DEFAULT_RACK: u8 = 0;

/// Default slot number
pub const DEFAULT_SLOT: u8 = 0;
