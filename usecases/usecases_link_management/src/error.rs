//! Error Module
//!
//! Failures of link lifecycle and messaging operations.

use adapters_distribution::{MessageKind, TransportError};
use entities_data_handling::LinkHandle;
use thiserror::Error;

/// Connection failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The local node context could not be created
    #[error("local node init failed: {0}")]
    Init(#[source] TransportError),
    /// The remote node could not be reached
    #[error("connection to {node} failed: {source}")]
    Connection {
        node: String,
        #[source]
        source: TransportError,
    },
}

/// Handle resolution failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("no default link")]
    NoDefaultLink,
    #[error("invalid link {0}")]
    InvalidLink(LinkHandle),
}

/// Send failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("send failed: {0}")]
pub struct SendError(#[from] pub TransportError);

/// Receive failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiveError {
    /// A message arrived that is not an ordinary send to this node
    #[error("received a {0:?} message, not addressed to this process")]
    NotMine(MessageKind),
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] TransportError),
}

/// RPC failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("rpc failed: {0}")]
    CallFailed(#[source] TransportError),
}
