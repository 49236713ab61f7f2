//! # Voltage S7 - Siemens S7 PLC Communication Library
//!
//! **Author:** Evan Liu <evan.liu@voltageenergy.com>
//! **Version:** 0.1.0
//! **License:** MIT
//!
//! A synchronous Siemens S7comm (ISO-on-TCP, port 102) client in pure Rust
//! for industrial automation, data acquisition and IoT gateways.
//!
//! ## Features
//!
//! - **Wide CPU coverage**: S7-200, S7-200 Smart, S7-300, S7-400, S7-1200, S7-1500
//! - **Symbolic addressing**: `"M100.0"`, `"DB1.DBX2.3"`, `"VB10"`, `"T5"` and friends
//! - **Typed access**: bool through double, strings and raw byte spans
//! - **Device control**: RUN / STOP / reset plus module order number readout
//! - **Session-scoped state**: every connection owns its templates and
//!   negotiated PDU length, so controllers of different families can be
//!   driven side by side
//! - **Memory safe**: every response offset is range-checked before use
//!
//! ## Supported memory areas
//!
//! | Prefix | Area | Code |
//! |--------|------|------|
//! | `I`  | Process inputs | 0x81 |
//! | `Q`  | Process outputs | 0x82 |
//! | `M`  | Flags (merkers) | 0x83 |
//! | `DB`/`D` | Data blocks | 0x84 |
//! | `V`  | 200-family V memory (DB 1) | 0x84 |
//! | `T`  | Timers | 0x1F |
//! | `C`  | Counters | 0x1E |
//! | `AI` | Analog inputs | 0x06 |
//! | `AQ` | Analog outputs | 0x07 |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voltage_s7::{PlcFamily, S7Client, S7ClientConfig, S7Result};
//!
//! fn main() -> S7Result<()> {
//!     let config = S7ClientConfig::new("192.168.0.10").with_family(PlcFamily::S1200);
//!     let mut client = S7Client::new(config);
//!     client.connect()?;
//!
//!     println!("module: {}", client.read_plc_type()?);
//!
//!     client.write_bool("M100.0", true)?;
//!     let flag = client.read_bool("M100.0")?;
//!     println!("M100.0 = {flag}");
//!
//!     let level = client.read_float("DB5.DBD12")?;
//!     println!("tank level = {level}");
//!
//!     client.disconnect();
//!     Ok(())
//! }
//! ```

// ============================================================================
// Core modules
// ============================================================================

/// Core error types and result handling
pub mod error;

/// S7comm protocol constants and fixed frame offsets
pub mod constants;

/// Controller families and device control commands
pub mod types;

/// Numeric byte codec for PLC register values
pub mod codec;

/// Symbolic address parser
pub mod address;

/// Request frame construction and handshake templates
pub mod frame;

/// Response analysis
pub mod response;

/// Blocking transport layer
pub mod transport;

/// S7 client and connection handling
pub mod client;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// === Core client API ===
pub use client::{ConnectionState, S7Client, S7ClientConfig, S7ClientStats};

// === Error handling ===
pub use error::{S7Error, S7Result};

// === Core types ===
pub use address::S7Address;
pub use types::{ControlCommand, PlcFamily};

// === Transport (custom tunnels, test rigs) ===
pub use transport::{SocketOptions, TcpTransport, Transport};

// === Frame building (advanced usage) ===
pub use frame::{ConnectionTemplates, WriteData};

// === Commonly needed constants ===
pub use constants::DEFAULT_PORT;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn info() -> String {
    format!("Voltage S7 v{VERSION} - Siemens S7 PLC communication library by Evan Liu")
}
