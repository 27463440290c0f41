//! Loopback Node Module
//!
//! An in-memory [`NodeTransport`]. It records everything sent to it, hands
//! out queued inbound messages, answers RPCs from a script, and can be told
//! to fail init or dial. Sockets are tracked so tests can check that every
//! dialed socket is closed exactly once.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use entities_data_handling::ErlangPid;
use tracing::trace;

use crate::transport::{
    LocalIdentity, MessageKind, NodeTransport, Received, SocketHandle, TransportError,
};

/// Where a recorded message was sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Registered(String),
    Pid(ErlangPid),
}

/// A message the loopback node accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub socket: SocketHandle,
    pub from: Option<ErlangPid>,
    pub to: Destination,
    pub payload: Vec<u8>,
}

/// A recorded RPC call or cast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRecord {
    pub socket: SocketHandle,
    pub module: String,
    pub function: String,
    pub args: Vec<u8>,
    pub cast: bool,
}

#[derive(Default)]
struct LoopbackState {
    next_socket: i32,
    next_pid: u32,
    open: HashSet<SocketHandle>,
    closed: Vec<SocketHandle>,
    inbound: VecDeque<Result<Received, TransportError>>,
    sent: Vec<SentMessage>,
    rpcs: Vec<RpcRecord>,
    replies: HashMap<(String, String), Vec<u8>>,
    fail_init: bool,
    fail_dial: bool,
}

/// In-memory node transport
pub struct LoopbackNode {
    host_name: String,
    state: Mutex<LoopbackState>,
}

impl LoopbackNode {
    /// Create a loopback node whose local identities live on `host_name`
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            state: Mutex::new(LoopbackState {
                next_socket: 3,
                next_pid: 1,
                ..LoopbackState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, LoopbackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an inbound tick
    pub fn push_tick(&self) {
        self.state().inbound.push_back(Ok(Received::Tick));
    }

    /// Queue an inbound message
    pub fn push_message(&self, kind: MessageKind, payload: impl Into<Vec<u8>>) {
        self.state().inbound.push_back(Ok(Received::Message {
            kind,
            payload: payload.into(),
        }));
    }

    /// Queue a receive failure
    pub fn push_failure(&self, error: TransportError) {
        self.state().inbound.push_back(Err(error));
    }

    /// Script the encoded reply for `module:function`
    pub fn set_rpc_reply(&self, module: &str, function: &str, reply: impl Into<Vec<u8>>) {
        self.state()
            .replies
            .insert((module.to_string(), function.to_string()), reply.into());
    }

    pub fn fail_init(&self, fail: bool) {
        self.state().fail_init = fail;
    }

    pub fn fail_dial(&self, fail: bool) {
        self.state().fail_dial = fail;
    }

    /// Messages sent so far
    pub fn sent(&self) -> Vec<SentMessage> {
        self.state().sent.clone()
    }

    /// RPC calls and casts so far
    pub fn rpcs(&self) -> Vec<RpcRecord> {
        self.state().rpcs.clone()
    }

    /// Number of sockets currently open
    pub fn open_sockets(&self) -> usize {
        self.state().open.len()
    }

    /// Sockets closed so far, in order
    pub fn closed_sockets(&self) -> Vec<SocketHandle> {
        self.state().closed.clone()
    }

    fn check_open(state: &LoopbackState, socket: SocketHandle) -> Result<(), TransportError> {
        if state.open.contains(&socket) {
            Ok(())
        } else {
            Err(TransportError::Closed)
        }
    }
}

impl Default for LoopbackNode {
    fn default() -> Self {
        Self::new("localhost")
    }
}

impl NodeTransport for LoopbackNode {
    fn init_local_identity(
        &self,
        alive_name: &str,
        cookie: &str,
        creation: u32,
    ) -> Result<LocalIdentity, TransportError> {
        let mut state = self.state();
        if state.fail_init {
            return Err(TransportError::Io("local node init refused".to_string()));
        }
        let node_name = format!("{}@{}", alive_name, self.host_name);
        let id = state.next_pid;
        state.next_pid += 1;
        Ok(LocalIdentity {
            host_name: self.host_name.clone(),
            node_name: node_name.clone(),
            alive_name: alive_name.to_string(),
            cookie: cookie.to_string(),
            creation,
            self_pid: ErlangPid::new(node_name, id, 0, creation),
        })
    }

    fn dial(
        &self,
        identity: &LocalIdentity,
        remote_node: &str,
        _timeout_ms: u64,
    ) -> Result<SocketHandle, TransportError> {
        let mut state = self.state();
        if state.fail_dial {
            return Err(TransportError::Unreachable(remote_node.to_string()));
        }
        let socket = SocketHandle(state.next_socket);
        state.next_socket += 1;
        state.open.insert(socket);
        trace!(%socket, local = %identity.node_name, remote = remote_node, "loopback dial");
        Ok(socket)
    }

    fn send_registered(
        &self,
        identity: &LocalIdentity,
        socket: SocketHandle,
        process_name: &str,
        payload: &[u8],
        _timeout_ms: u64,
    ) -> Result<(), TransportError> {
        let mut state = self.state();
        Self::check_open(&state, socket)?;
        state.sent.push(SentMessage {
            socket,
            from: Some(identity.self_pid.clone()),
            to: Destination::Registered(process_name.to_string()),
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn send_to_pid(
        &self,
        socket: SocketHandle,
        pid: &ErlangPid,
        payload: &[u8],
        _timeout_ms: u64,
    ) -> Result<(), TransportError> {
        let mut state = self.state();
        Self::check_open(&state, socket)?;
        state.sent.push(SentMessage {
            socket,
            from: None,
            to: Destination::Pid(pid.clone()),
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn receive_message(
        &self,
        socket: SocketHandle,
        _timeout_ms: u64,
    ) -> Result<Received, TransportError> {
        let mut state = self.state();
        Self::check_open(&state, socket)?;
        // An empty queue stands in for a remote node that never answers
        state.inbound.pop_front().unwrap_or(Err(TransportError::Timeout))
    }

    fn call(
        &self,
        _identity: &LocalIdentity,
        socket: SocketHandle,
        module: &str,
        function: &str,
        args: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        let mut state = self.state();
        Self::check_open(&state, socket)?;
        state.rpcs.push(RpcRecord {
            socket,
            module: module.to_string(),
            function: function.to_string(),
            args: args.to_vec(),
            cast: false,
        });
        state
            .replies
            .get(&(module.to_string(), function.to_string()))
            .cloned()
            .ok_or_else(|| TransportError::Io(format!("no reply for {}:{}", module, function)))
    }

    fn notify(
        &self,
        _identity: &LocalIdentity,
        socket: SocketHandle,
        module: &str,
        function: &str,
        args: &[u8],
    ) -> Result<(), TransportError> {
        let mut state = self.state();
        Self::check_open(&state, socket)?;
        state.rpcs.push(RpcRecord {
            socket,
            module: module.to_string(),
            function: function.to_string(),
            args: args.to_vec(),
            cast: true,
        });
        Ok(())
    }

    fn close(&self, socket: SocketHandle) {
        let mut state = self.state();
        if state.open.remove(&socket) {
            trace!(%socket, "loopback close");
        }
        state.closed.push(socket);
    }
}
