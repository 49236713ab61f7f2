//! Error types for S7 protocol operations
//!
//! Every fallible operation in this crate returns [`S7Result`], whose error
//! side is the closed [`S7Error`] taxonomy below. Protocol-level failures
//! reported by the PLC (unsupported type, missing DB block, over-length
//! read) map to their own variants so callers can match on them directly;
//! transport failures are wrapped rather than leaked as raw I/O errors.

use thiserror::Error;

/// S7 protocol error types
#[derive(Error, Debug)]
pub enum S7Error {
    /// A caller-supplied argument was rejected before any I/O happened
    #[error("Invalid parameter: {context}")]
    InvalidParameter {
        /// What was wrong with the argument
        context: String,
    },

    /// A symbolic address string could not be parsed
    #[error("Failed to parse address '{address}': {reason}")]
    ParseAddressFailed {
        /// The address text as supplied by the caller
        address: String,
        /// Why parsing rejected it
        reason: String,
    },

    /// A request frame could not be constructed
    #[error("Failed to build request frame: {context}")]
    BuildFrameFailed {
        /// What the builder was attempting
        context: String,
    },

    /// The transport accepted fewer bytes than the frame contains
    #[error("Socket send incomplete: sent {sent} of {expected} bytes")]
    SocketSendFailed {
        /// Frame length handed to the transport
        expected: usize,
        /// Bytes the transport actually took
        sent: usize,
    },

    /// Operation requires an established connection
    #[error("Client not connected")]
    NotConnected,

    /// The two-step connection handshake did not complete
    #[error("Handshake failed: {context}")]
    HandshakeFailed {
        /// Which handshake step failed and how
        context: String,
    },

    /// Response ended before the fixed header or a declared span
    #[error("Response too short: needed {needed} bytes, got {available}")]
    ResponseHeaderTooShort {
        /// Bytes the parser needed to make progress
        needed: usize,
        /// Bytes actually present
        available: usize,
    },

    /// PLC reported error 0006: data type not supported for this access
    #[error("Unsupported data type (PLC error 0006)")]
    UnsupportedDataType,

    /// PLC reported error 000A: the addressed DB block does not exist
    #[error("DB block not found (PLC error 000A)")]
    DbBlockNotFound,

    /// PLC reported that the read exceeds the configured area size
    #[error("Read length exceeds the range assigned in the PLC")]
    ReadLengthOverPlcAssign,

    /// Write response carried a non-success status byte
    #[error("Write rejected by PLC (status 0x{code:02X})")]
    WriteError {
        /// The status byte found where 0xFF was expected
        code: u8,
    },

    /// Response did not match any known success or error encoding
    #[error("Unknown protocol error: {context}")]
    UnknownError {
        /// What the parser saw
        context: String,
    },

    /// Transport-level I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl S7Error {
    /// Create an invalid-parameter error
    pub fn invalid_parameter<S: Into<String>>(context: S) -> Self {
        S7Error::InvalidParameter {
            context: context.into(),
        }
    }

    /// Create an address-parse error
    pub fn parse<A: Into<String>, R: Into<String>>(address: A, reason: R) -> Self {
        S7Error::ParseAddressFailed {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create a frame-build error
    pub fn build_frame<S: Into<String>>(context: S) -> Self {
        S7Error::BuildFrameFailed {
            context: context.into(),
        }
    }

    /// Create a handshake error
    pub fn handshake<S: Into<String>>(context: S) -> Self {
        S7Error::HandshakeFailed {
            context: context.into(),
        }
    }

    /// Create a short-response error
    pub fn too_short(needed: usize, available: usize) -> Self {
        S7Error::ResponseHeaderTooShort { needed, available }
    }

    /// Create an unknown-protocol error
    pub fn unknown<S: Into<String>>(context: S) -> Self {
        S7Error::UnknownError {
            context: context.into(),
        }
    }

    /// True for errors reported by the PLC itself rather than this client
    pub fn is_plc_error(&self) -> bool {
        matches!(
            self,
            S7Error::UnsupportedDataType
                | S7Error::DbBlockNotFound
                | S7Error::ReadLengthOverPlcAssign
                | S7Error::WriteError { .. }
        )
    }
}

/// Common result type for S7 operations
pub type S7Result<T> = Result<T, S7Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = S7Error::parse("MZ100", "no matching area prefix");
        assert_eq!(
            err.to_string(),
            "Failed to parse address 'MZ100': no matching area prefix"
        );

        let err = S7Error::SocketSendFailed {
            expected: 31,
            sent: 12,
        };
        assert_eq!(err.to_string(), "Socket send incomplete: sent 12 of 31 bytes");

        let err = S7Error::WriteError { code: 0x05 };
        assert_eq!(err.to_string(), "Write rejected by PLC (status 0x05)");
    }

    #[test]
    fn test_plc_error_classification() {
        assert!(S7Error::UnsupportedDataType.is_plc_error());
        assert!(S7Error::DbBlockNotFound.is_plc_error());
        assert!(S7Error::WriteError { code: 0 }.is_plc_error());
        assert!(!S7Error::NotConnected.is_plc_error());
        assert!(!S7Error::too_short(21, 4).is_plc_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: S7Error = io.into();
        assert!(matches!(err, S7Error::Io(_)));
    }
}
