//! Transport Module
//!
//! The contract between the bridge and the node-connectivity layer.
//!
//! Handshake, cookie authentication, port lookup and socket framing all live
//! behind [`NodeTransport`]. The bridge only sees opaque socket handles, the
//! local identity issued at init, and whole messages.

use entities_data_handling::ErlangPid;
use thiserror::Error;

/// Opaque connected-socket handle issued by [`NodeTransport::dial`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketHandle(pub i32);

impl std::fmt::Display for SocketHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fd:{}", self.0)
    }
}

/// Native connection context for one local node instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdentity {
    /// Host part of the local node name
    pub host_name: String,
    /// Full local node name, `alive@host`
    pub node_name: String,
    /// Alive part of the local node name
    pub alive_name: String,
    /// Cookie in effect for this connection
    pub cookie: String,
    /// Creation number of the local node
    pub creation: u32,
    /// Pid the remote side sees as the sender
    pub self_pid: ErlangPid,
}

/// Distribution message kinds
///
/// Only [`MessageKind::Send`] (an ordinary send to this node's pid) is
/// delivered to callers; everything else is "not mine".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Send,
    RegSend,
    Link,
    Unlink,
    Exit,
}

/// Result of one receive call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// Keep-alive from the remote node
    Tick,
    /// A whole distribution message
    Message { kind: MessageKind, payload: Vec<u8> },
}

/// Transport failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("operation timed out")]
    Timeout,
    #[error("node {0} unreachable")]
    Unreachable(String),
    #[error("socket closed")]
    Closed,
    #[error("transport failure: {0}")]
    Io(String),
}

/// Node connectivity
///
/// `timeout_ms == 0` means block indefinitely.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait NodeTransport: Send + Sync {
    /// Create the local node context: `alive_name@<host>` with the given cookie
    fn init_local_identity(
        &self,
        alive_name: &str,
        cookie: &str,
        creation: u32,
    ) -> Result<LocalIdentity, TransportError>;

    /// Connect to a remote node
    fn dial(
        &self,
        identity: &LocalIdentity,
        remote_node: &str,
        timeout_ms: u64,
    ) -> Result<SocketHandle, TransportError>;

    /// Send to a process registered under `process_name` on the remote node
    fn send_registered(
        &self,
        identity: &LocalIdentity,
        socket: SocketHandle,
        process_name: &str,
        payload: &[u8],
        timeout_ms: u64,
    ) -> Result<(), TransportError>;

    /// Send to a remote pid
    fn send_to_pid(
        &self,
        socket: SocketHandle,
        pid: &ErlangPid,
        payload: &[u8],
        timeout_ms: u64,
    ) -> Result<(), TransportError>;

    /// Wait for the next tick or message
    fn receive_message(
        &self,
        socket: SocketHandle,
        timeout_ms: u64,
    ) -> Result<Received, TransportError>;

    /// Synchronous `rpc:call`; `args` is an encoded argument list, the reply is
    /// the encoded result term
    fn call(
        &self,
        identity: &LocalIdentity,
        socket: SocketHandle,
        module: &str,
        function: &str,
        args: &[u8],
    ) -> Result<Vec<u8>, TransportError>;

    /// Fire-and-forget `rpc:cast`
    fn notify(
        &self,
        identity: &LocalIdentity,
        socket: SocketHandle,
        module: &str,
        function: &str,
        args: &[u8],
    ) -> Result<(), TransportError>;

    /// Release a socket. Called exactly once per successful dial.
    fn close(&self, socket: SocketHandle);
}
