//! Link Module
//!
//! One connection to a remote node: the local identity issued by the
//! transport plus one connected socket. Dropping the link closes the socket.

use std::sync::{Arc, Mutex, PoisonError};

use adapters_distribution::{LocalIdentity, NodeTransport, SocketHandle};
use entities_data_handling::ErlangPid;
use tracing::{debug, info};

use crate::error::ConnectError;

/// Parameters for opening a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParams<'a> {
    /// Remote node, `name@host`
    pub node: &'a str,
    /// Cookie
    pub secret: &'a str,
    /// Local alive name, e.g. `peb_client_1234`
    pub alive_name: &'a str,
    /// Instance (creation) number for the local node
    pub instance: u32,
    /// Connect timeout, 0 for none
    pub timeout_ms: u64,
    pub persistent: bool,
}

/// A connection to a remote node
pub struct Link {
    node: String,
    secret: String,
    persistent: bool,
    identity: LocalIdentity,
    socket: Mutex<SocketHandle>,
    transport: Arc<dyn NodeTransport>,
}

impl Link {
    /// Create the local identity and dial the remote node
    ///
    /// # Returns
    /// * `Ok(Link)` - Connected link
    /// * `Err(ConnectError::Init)` - Local node context could not be created
    /// * `Err(ConnectError::Connection)` - Remote node unreachable
    pub fn open(transport: Arc<dyn NodeTransport>, params: &LinkParams<'_>) -> Result<Self, ConnectError> {
        let identity = transport
            .init_local_identity(params.alive_name, params.secret, params.instance)
            .map_err(ConnectError::Init)?;
        let socket = transport
            .dial(&identity, params.node, params.timeout_ms)
            .map_err(|source| ConnectError::Connection {
                node: params.node.to_string(),
                source,
            })?;

        info!(
            node = params.node,
            local = %identity.node_name,
            %socket,
            persistent = params.persistent,
            "link connected"
        );

        Ok(Self {
            node: params.node.to_string(),
            secret: params.secret.to_string(),
            persistent: params.persistent,
            identity,
            socket: Mutex::new(socket),
            transport,
        })
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn identity(&self) -> &LocalIdentity {
        &self.identity
    }

    /// Pid the remote node sees as this link's sender
    pub fn self_pid(&self) -> &ErlangPid {
        &self.identity.self_pid
    }

    /// Run `f` with exclusive use of the socket
    ///
    /// Concurrent users of a shared link queue here.
    pub fn with_socket<R>(
        &self,
        f: impl FnOnce(&dyn NodeTransport, &LocalIdentity, SocketHandle) -> R,
    ) -> R {
        let socket = self.socket.lock().unwrap_or_else(PoisonError::into_inner);
        f(self.transport.as_ref(), &self.identity, *socket)
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        let socket = *self.socket.get_mut().unwrap_or_else(PoisonError::into_inner);
        debug!(node = %self.node, %socket, persistent = self.persistent, "link closed");
        self.transport.close(socket);
    }
}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link")
            .field("node", &self.node)
            .field("persistent", &self.persistent)
            .field("local", &self.identity.node_name)
            .finish_non_exhaustive()
    }
}
