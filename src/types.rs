//! Core S7 data types
//!
//! Controller family selection and the device-control command set. The
//! family decides which connection-request templates the handshake uses and
//! how rack/slot and TSAP values are folded into them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Siemens controller families supported by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlcFamily {
    /// S7-200, reachable through its Ethernet expansion module
    S200,
    /// S7-200 Smart
    S200Smart,
    /// S7-300
    S300,
    /// S7-400
    S400,
    /// S7-1200
    S1200,
    /// S7-1500
    S1500,
}

impl PlcFamily {
    /// The 200 family negotiates with its own template pair and keeps TSAP
    /// values at different header offsets than the 300/400/1200/1500 line.
    pub fn uses_200_templates(&self) -> bool {
        matches!(self, PlcFamily::S200 | PlcFamily::S200Smart)
    }
}

impl Default for PlcFamily {
    fn default() -> Self {
        PlcFamily::S1200
    }
}

impl fmt::Display for PlcFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlcFamily::S200 => write!(f, "S7-200"),
            PlcFamily::S200Smart => write!(f, "S7-200 Smart"),
            PlcFamily::S300 => write!(f, "S7-300"),
            PlcFamily::S400 => write!(f, "S7-400"),
            PlcFamily::S1200 => write!(f, "S7-1200"),
            PlcFamily::S1500 => write!(f, "S7-1500"),
        }
    }
}

/// Device-control operations sent as fixed literal frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Hot start: transition the CPU to RUN
    Run,
    /// Stop the CPU
    Stop,
    /// Reset request
    Reset,
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlCommand::Run => write!(f, "RUN"),
            ControlCommand::Stop => write!(f, "STOP"),
            ControlCommand::Reset => write!(f, "RESET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_template_selection() {
        assert!(PlcFamily::S200.uses_200_templates());
        assert!(PlcFamily::S200Smart.uses_200_templates());
        assert!(!PlcFamily::S300.uses_200_templates());
        assert!(!PlcFamily::S400.uses_200_templates());
        assert!(!PlcFamily::S1200.uses_200_templates());
        assert!(!PlcFamily::S1500.uses_200_templates());
    }

    #[test]
    fn test_family_display() {
        assert_eq!(PlcFamily::S1200.to_string(), "S7-1200");
        assert_eq!(PlcFamily::S200Smart.to_string(), "S7-200 Smart");
    }

    #[test]
    fn test_default_family() {
        assert_eq!(PlcFamily::default(), PlcFamily::S1200);
    }
}
