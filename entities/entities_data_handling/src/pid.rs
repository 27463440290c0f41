//! PID Module
//!
//! Remote process identifier as carried by `PID_EXT` / `NEW_PID_EXT`.

use serde::{Deserialize, Serialize};

/// PID structure
///
/// The bridge never interprets the fields; a pid is decoded from a message,
/// handed back to the caller, and re-encoded verbatim when used as a send
/// target or as a `~P` argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErlangPid {
    /// Node name
    pub node: String,
    /// Process number
    pub id: u32,
    /// Serial number
    pub serial: u32,
    /// Creation number (32 bits for NEW_PID_EXT, 2 bits for old PID_EXT)
    pub creation: u32,
}

impl ErlangPid {
    /// Create a new pid
    pub fn new(node: impl Into<String>, id: u32, serial: u32, creation: u32) -> Self {
        Self {
            node: node.into(),
            id,
            serial,
            creation,
        }
    }
}

impl std::fmt::Display for ErlangPid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}.{}.{}>", self.node, self.id, self.serial)
    }
}
