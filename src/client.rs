//! S7 client
//!
//! [`S7Client`] owns one controller session: the transport, the handshake
//! templates patched for the configured family, the negotiated PDU length
//! and the session counters all live on the handle. Nothing is shared
//! between handles, so clients for controllers of different families can
//! run side by side in one process.
//!
//! Every operation is one blocking request/response exchange. The handle is
//! not safe for interleaved use from multiple threads; wrap it in a mutex or
//! give each worker its own connection.

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::address::S7Address;
use crate::codec;
use crate::constants::{
    DEFAULT_PORT, DEFAULT_RACK, DEFAULT_SLOT, HANDSHAKE_BUFFER_LEN, RESPONSE_MIN_LEN,
    TPKT_COTP_OVERHEAD,
};
use crate::error::{S7Error, S7Result};
use crate::frame::{self, ConnectionTemplates, WriteData};
use crate::response;
use crate::transport::{SocketOptions, TcpTransport, Transport};
use crate::types::{ControlCommand, PlcFamily};

/// Connection settings for one controller session
///
/// `rack` and `slot` default to 0/0, which keeps the family template's own
/// chassis addressing (the S7-300 template, for example, already encodes
/// slot 2). Set them explicitly when the CPU sits elsewhere.
///
/// All timeouts default to `None`: calls block until the controller answers
/// or the connection drops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct S7ClientConfig {
    pub ip: String,
    pub port: u16,
    pub family: PlcFamily,
    pub rack: u8,
    pub slot: u8,
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl Default for S7ClientConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            family: PlcFamily::default(),
            rack: DEFAULT_RACK,
            slot: DEFAULT_SLOT,
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

impl S7ClientConfig {
    /// Configuration for the given controller address with all defaults
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Self::default()
        }
    }

    /// Set the TCP port (102 by default)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the controller family
    pub fn with_family(mut self, family: PlcFamily) -> Self {
        self.family = family;
        self
    }

    /// Set the CPU rack number
    pub fn with_rack(mut self, rack: u8) -> Self {
        self.rack = rack;
        self
    }

    /// Set the CPU slot number
    pub fn with_slot(mut self, slot: u8) -> Self {
        self.slot = slot;
        self
    }

    /// Set the TCP connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the socket read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the socket write timeout
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    fn socket_options(&self) -> SocketOptions {
        SocketOptions {
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
            write_timeout: self.write_timeout,
        }
    }
}

/// Connection lifecycle of a client handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Handshake1Sent,
    Handshake2Sent,
    Ready,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Handshake1Sent => "handshake-1 sent",
            ConnectionState::Handshake2Sent => "handshake-2 sent",
            ConnectionState::Ready => "ready",
        };
        write!(f, "{name}")
    }
}

/// Session counters, reset at the start of every connect
#[derive(Debug, Clone, Default, Serialize)]
pub struct S7ClientStats {
    pub requests_sent: u64,
    pub responses_received: u64,
    pub errors: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    /// When the current connection reached ready state; `None` while
    /// disconnected
    pub connected_at: Option<DateTime<Utc>>,
}

/// One S7 controller session
pub struct S7Client {
    config: S7ClientConfig,
    templates: ConnectionTemplates,
    transport: Option<Box<dyn Transport>>,
    state: ConnectionState,
    pdu_length: i32,
    recv_buf: Vec<u8>,
    stats: S7ClientStats,
}

impl S7Client {
    /// Create a disconnected handle for the given configuration
    pub fn new(config: S7ClientConfig) -> Self {
        let mut templates = ConnectionTemplates::for_family(config.family);
        // 0/0 keeps the family template's own chassis addressing.
        if (config.rack, config.slot) != (DEFAULT_RACK, DEFAULT_SLOT) {
            templates.set_rack_slot(config.rack, config.slot);
        }
        Self {
            config,
            templates,
            transport: None,
            state: ConnectionState::Disconnected,
            pdu_length: 0,
            recv_buf: Vec::new(),
            stats: S7ClientStats::default(),
        }
    }

    /// Open a TCP connection and run the two-step handshake.
    ///
    /// An already-connected handle is disconnected first. On any handshake
    /// failure the transport is released and the handle stays disconnected.
    pub fn connect(&mut self) -> S7Result<()> {
        self.disconnect();
        self.state = ConnectionState::Connecting;
        let transport =
            TcpTransport::connect(&self.config.ip, self.config.port, self.config.socket_options())
                .map_err(|e| {
                    self.state = ConnectionState::Disconnected;
                    S7Error::handshake(format!(
                        "transport open to {}:{} failed: {e}",
                        self.config.ip, self.config.port
                    ))
                })?;
        self.connect_over(Box::new(transport))
    }

    /// Run the handshake over an already-open transport.
    ///
    /// Useful for tunneled connections and for exercising the protocol
    /// against a scripted peer.
    pub fn connect_over(&mut self, transport: Box<dyn Transport>) -> S7Result<()> {
        if self.transport.is_some() {
            self.disconnect();
        }
        self.transport = Some(transport);
        self.state = ConnectionState::Connecting;
        self.stats = S7ClientStats::default();

        match self.run_handshake() {
            Ok(pdu_length) => {
                self.pdu_length = pdu_length;
                self.recv_buf = vec![0u8; pdu_length as usize + TPKT_COTP_OVERHEAD];
                self.state = ConnectionState::Ready;
                self.stats.connected_at = Some(Utc::now());
                info!(
                    "connected to {}:{} ({}, pdu length {})",
                    self.config.ip, self.config.port, self.config.family, self.pdu_length
                );
                Ok(())
            }
            Err(error) => {
                if let Some(mut transport) = self.transport.take() {
                    let _ = transport.close();
                }
                self.state = ConnectionState::Disconnected;
                self.stats.errors += 1;
                Err(error)
            }
        }
    }

    /// Close the transport. Idempotent; typed operations fail with
    /// `NotConnected` afterwards.
    pub fn disconnect(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            if let Err(error) = transport.close() {
                warn!("transport close failed: {error}");
            }
            debug!("disconnected from {}:{}", self.config.ip, self.config.port);
        }
        self.state = ConnectionState::Disconnected;
        self.stats.connected_at = None;
    }

    /// True once the handshake has completed
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Ready
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Negotiated PDU length in bytes; 0 before the first handshake
    pub fn pdu_length(&self) -> i32 {
        self.pdu_length
    }

    /// The configuration this handle was created with
    pub fn config(&self) -> &S7ClientConfig {
        &self.config
    }

    /// Controller family of this session
    pub fn family(&self) -> PlcFamily {
        self.config.family
    }

    /// Session counters
    pub fn stats(&self) -> &S7ClientStats {
        &self.stats
    }

    // ------------------------------------------------------------------
    // Per-handle protocol settings
    //
    // These patch the handshake templates held by this handle. Changing
    // them on a ready handle does not redo the handshake; reconnect to
    // apply them to the controller.
    // ------------------------------------------------------------------

    /// Configured CPU rack number
    pub fn rack(&self) -> u8 {
        self.config.rack
    }

    /// Set the CPU rack number
    pub fn set_rack(&mut self, rack: u8) {
        self.config.rack = rack;
        self.templates.set_rack_slot(self.config.rack, self.config.slot);
    }

    /// Configured CPU slot number
    pub fn slot(&self) -> u8 {
        self.config.slot
    }

    /// Set the CPU slot number
    pub fn set_slot(&mut self, slot: u8) {
        self.config.slot = slot;
        self.templates.set_rack_slot(self.config.rack, self.config.slot);
    }

    /// Connection type byte (0x01 PG, 0x02 OP, 0x03 basic)
    pub fn connection_type(&self) -> u8 {
        self.templates.connection_type()
    }

    /// Set the connection type (no effect on the 200 family)
    pub fn set_connection_type(&mut self, connection_type: u8) {
        self.templates.set_connection_type(connection_type);
    }

    /// Local (source) TSAP
    pub fn local_tsap(&self) -> u16 {
        self.templates.local_tsap()
    }

    /// Set the local (source) TSAP
    pub fn set_local_tsap(&mut self, tsap: u16) {
        self.templates.set_local_tsap(tsap);
    }

    /// Remote (destination) TSAP
    pub fn remote_tsap(&self) -> u16 {
        self.templates.remote_tsap()
    }

    /// Set the remote (destination) TSAP
    pub fn set_remote_tsap(&mut self, tsap: u16) {
        self.templates.set_remote_tsap(tsap);
    }

    // ------------------------------------------------------------------
    // Typed reads
    // ------------------------------------------------------------------

    /// Read a single bit
    pub fn read_bool(&mut self, address: &str) -> S7Result<bool> {
        let addr = S7Address::parse(address, 1)?;
        let payload = self.read_area(&addr, true)?;
        Ok(payload[0] != 0)
    }

    /// Read one byte
    pub fn read_byte(&mut self, address: &str) -> S7Result<u8> {
        let payload = self.read_typed(address, 1)?;
        payload
            .first()
            .copied()
            .ok_or_else(|| S7Error::too_short(1, 0))
    }

    /// Read a 16-bit signed integer
    pub fn read_short(&mut self, address: &str) -> S7Result<i16> {
        let payload = self.read_typed(address, 2)?;
        codec::decode_i16(&payload)
    }

    /// Read a 16-bit unsigned integer
    pub fn read_ushort(&mut self, address: &str) -> S7Result<u16> {
        let payload = self.read_typed(address, 2)?;
        codec::decode_u16(&payload)
    }

    /// Read a 32-bit signed integer
    pub fn read_int32(&mut self, address: &str) -> S7Result<i32> {
        let payload = self.read_typed(address, 4)?;
        codec::decode_i32(&payload)
    }

    /// Read a 32-bit unsigned integer
    pub fn read_uint32(&mut self, address: &str) -> S7Result<u32> {
        let payload = self.read_typed(address, 4)?;
        codec::decode_u32(&payload)
    }

    /// Read a 64-bit signed integer
    pub fn read_int64(&mut self, address: &str) -> S7Result<i64> {
        let payload = self.read_typed(address, 8)?;
        codec::decode_i64(&payload)
    }

    /// Read a 64-bit unsigned integer
    pub fn read_uint64(&mut self, address: &str) -> S7Result<u64> {
        let payload = self.read_typed(address, 8)?;
        codec::decode_u64(&payload)
    }

    /// Read a 32-bit float
    pub fn read_float(&mut self, address: &str) -> S7Result<f32> {
        let payload = self.read_typed(address, 4)?;
        codec::decode_f32(&payload)
    }

    /// Read a 64-bit float
    pub fn read_double(&mut self, address: &str) -> S7Result<f64> {
        let payload = self.read_typed(address, 8)?;
        codec::decode_f64(&payload)
    }

    /// Read `length` raw bytes
    pub fn read_bytes(&mut self, address: &str, length: u32) -> S7Result<Bytes> {
        self.read_typed(address, length)
    }

    /// Read a character string of `length` bytes.
    ///
    /// Byte access is word-aligned, so odd lengths are padded up to the
    /// next even count on the wire; the returned text is cut back to the
    /// requested length with trailing NULs stripped.
    pub fn read_string(&mut self, address: &str, length: u32) -> S7Result<String> {
        let padded = if length % 2 == 1 {
            length.saturating_add(1)
        } else {
            length
        };
        let payload = self.read_typed(address, padded)?;
        if payload.len() < length as usize {
            return Err(S7Error::too_short(length as usize, payload.len()));
        }
        let text = String::from_utf8_lossy(&payload[..length as usize]);
        Ok(text.trim_end_matches('\0').to_string())
    }

    // ------------------------------------------------------------------
    // Typed writes
    // ------------------------------------------------------------------

    /// Write a single bit
    pub fn write_bool(&mut self, address: &str, value: bool) -> S7Result<()> {
        let addr = S7Address::parse(address, 1)?;
        self.write_area(&addr, WriteData::Bit(value))
    }

    /// Write one byte
    pub fn write_byte(&mut self, address: &str, value: u8) -> S7Result<()> {
        let addr = S7Address::parse(address, 1)?;
        self.write_area(&addr, WriteData::Bytes(&[value]))
    }

    /// Write a 16-bit signed integer
    pub fn write_short(&mut self, address: &str, value: i16) -> S7Result<()> {
        let addr = S7Address::parse(address, 2)?;
        self.write_area(&addr, WriteData::Bytes(&codec::encode_i16(value)))
    }

    /// Write a 16-bit unsigned integer
    pub fn write_ushort(&mut self, address: &str, value: u16) -> S7Result<()> {
        let addr = S7Address::parse(address, 2)?;
        self.write_area(&addr, WriteData::Bytes(&codec::encode_u16(value)))
    }

    /// Write a 32-bit signed integer
    pub fn write_int32(&mut self, address: &str, value: i32) -> S7Result<()> {
        let addr = S7Address::parse(address, 4)?;
        self.write_area(&addr, WriteData::Bytes(&codec::encode_i32(value)))
    }

    /// Write a 32-bit unsigned integer
    pub fn write_uint32(&mut self, address: &str, value: u32) -> S7Result<()> {
        let addr = S7Address::parse(address, 4)?;
        self.write_area(&addr, WriteData::Bytes(&codec::encode_u32(value)))
    }

    /// Write a 64-bit signed integer
    pub fn write_int64(&mut self, address: &str, value: i64) -> S7Result<()> {
        let addr = S7Address::parse(address, 8)?;
        self.write_area(&addr, WriteData::Bytes(&codec::encode_i64(value)))
    }

    /// Write a 64-bit unsigned integer
    pub fn write_uint64(&mut self, address: &str, value: u64) -> S7Result<()> {
        let addr = S7Address::parse(address, 8)?;
        self.write_area(&addr, WriteData::Bytes(&codec::encode_u64(value)))
    }

    /// Write a 32-bit float
    pub fn write_float(&mut self, address: &str, value: f32) -> S7Result<()> {
        let addr = S7Address::parse(address, 4)?;
        self.write_area(&addr, WriteData::Bytes(&codec::encode_f32(value)))
    }

    /// Write a 64-bit float
    pub fn write_double(&mut self, address: &str, value: f64) -> S7Result<()> {
        let addr = S7Address::parse(address, 8)?;
        self.write_area(&addr, WriteData::Bytes(&codec::encode_f64(value)))
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, address: &str, payload: &[u8]) -> S7Result<()> {
        if payload.is_empty() {
            return Err(S7Error::invalid_parameter("write payload is empty"));
        }
        let addr = S7Address::parse(address, payload.len() as u32)?;
        self.write_area(&addr, WriteData::Bytes(payload))
    }

    /// Write a character string, zero-padded to an even byte count
    pub fn write_string(&mut self, address: &str, text: &str) -> S7Result<()> {
        let mut payload = text.as_bytes().to_vec();
        if payload.len() % 2 == 1 {
            payload.push(0);
        }
        self.write_bytes(address, &payload)
    }

    // ------------------------------------------------------------------
    // Device control and identification
    // ------------------------------------------------------------------

    /// Put the CPU into RUN via a hot start
    pub fn plc_run(&mut self) -> S7Result<()> {
        self.control(ControlCommand::Run)
    }

    /// Put the CPU into STOP
    pub fn plc_stop(&mut self) -> S7Result<()> {
        self.control(ControlCommand::Stop)
    }

    /// Reset the CPU
    pub fn plc_reset(&mut self) -> S7Result<()> {
        self.control(ControlCommand::Reset)
    }

    /// Read the module order number (e.g. "6ES7 215-1AG40-0XB0")
    pub fn read_plc_type(&mut self) -> S7Result<String> {
        let frame = frame::order_number_request();
        let result = self
            .transact(&frame)
            .and_then(|response| response::extract_order_number(&response));
        self.count_result(result)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Parse, read and decode one byte-granular value
    fn read_typed(&mut self, address: &str, length: u32) -> S7Result<Bytes> {
        let addr = S7Address::parse(address, length)?;
        self.read_area(&addr, false)
    }

    fn read_area(&mut self, addr: &S7Address, is_bit: bool) -> S7Result<Bytes> {
        let frame = frame::build_read_frame(addr, is_bit);
        let result = self
            .transact(&frame)
            .and_then(|response| response::analyze_read(&response, is_bit));
        self.count_result(result)
    }

    fn write_area(&mut self, addr: &S7Address, data: WriteData<'_>) -> S7Result<()> {
        let frame = frame::build_write_frame(addr, data);
        let result = self
            .transact(&frame)
            .and_then(|response| response::analyze_write(&response));
        self.count_result(result)
    }

    fn control(&mut self, command: ControlCommand) -> S7Result<()> {
        debug!("sending {command} command");
        let frame = frame::build_control_frame(command);
        let result = self
            .transact(&frame)
            .and_then(|response| response::analyze_write(&response));
        self.count_result(result)
    }

    /// One request/response exchange on a ready handle
    fn transact(&mut self, frame: &[u8]) -> S7Result<Vec<u8>> {
        if self.state != ConnectionState::Ready {
            return Err(S7Error::NotConnected);
        }
        let transport = self.transport.as_mut().ok_or(S7Error::NotConnected)?;

        let sent = transport.send(frame)?;
        self.stats.requests_sent += 1;
        self.stats.bytes_sent += sent as u64;
        if sent != frame.len() {
            return Err(S7Error::SocketSendFailed {
                expected: frame.len(),
                sent,
            });
        }

        let received = transport.recv(&mut self.recv_buf)?;
        self.stats.responses_received += 1;
        self.stats.bytes_received += received as u64;
        Ok(self.recv_buf[..received].to_vec())
    }

    fn run_handshake(&mut self) -> S7Result<i32> {
        let request = self.templates.connection_request().to_vec();
        self.state = ConnectionState::Handshake1Sent;
        self.handshake_exchange(&request, "connection request")?;

        let setup = self.templates.setup_communication().to_vec();
        self.state = ConnectionState::Handshake2Sent;
        let response = self.handshake_exchange(&setup, "setup communication")?;

        response::negotiated_pdu_length(&response)
            .map_err(|e| S7Error::handshake(format!("setup response: {e}")))
    }

    fn handshake_exchange(&mut self, frame: &[u8], what: &str) -> S7Result<Vec<u8>> {
        let transport = self.transport.as_mut().ok_or(S7Error::NotConnected)?;

        let sent = transport
            .send(frame)
            .map_err(|e| S7Error::handshake(format!("{what} send: {e}")))?;
        self.stats.requests_sent += 1;
        self.stats.bytes_sent += sent as u64;
        if sent != frame.len() {
            return Err(S7Error::handshake(format!(
                "{what}: short send {sent} of {} bytes",
                frame.len()
            )));
        }

        let mut buf = vec![0u8; HANDSHAKE_BUFFER_LEN];
        let received = transport
            .recv(&mut buf)
            .map_err(|e| S7Error::handshake(format!("{what} response: {e}")))?;
        self.stats.responses_received += 1;
        self.stats.bytes_received += received as u64;
        if received < RESPONSE_MIN_LEN {
            return Err(S7Error::handshake(format!(
                "{what}: response truncated at {received} bytes"
            )));
        }
        buf.truncate(received);
        Ok(buf)
    }

    fn count_result<T>(&mut self, result: S7Result<T>) -> S7Result<T> {
        if let Err(error) = &result {
            self.stats.errors += 1;
            if error.is_plc_error() {
                warn!("controller reported: {error}");
            }
        }
        result
    }
}

impl Drop for S7Client {
    fn drop(&mut self) {
        self.disconnect();
    }
}
