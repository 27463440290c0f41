//! Link Registry Module
//!
//! Process-wide table of persistent links, keyed by `(node, secret)`.
//!
//! A persistent link is dialed once and shared by every request scope that
//! asks for the same pair. It stays open until [`LinkRegistry::shutdown`].
//! Transient links are opened through the registry too (so they share the
//! transport and instance numbering) but are never stored here.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use adapters_distribution::NodeTransport;
use tracing::{debug, info};

use crate::error::ConnectError;
use crate::link::{Link, LinkParams};

/// Prefix of every local alive name this process uses
pub const CLIENT_PREFIX: &str = "peb_client";

/// Registry of persistent links
pub struct LinkRegistry {
    transport: Arc<dyn NodeTransport>,
    process_id: u32,
    persistent: RwLock<HashMap<String, Arc<Link>>>,
    next_instance: AtomicU32,
}

impl LinkRegistry {
    /// Create a registry for the current OS process
    pub fn new(transport: Arc<dyn NodeTransport>) -> Self {
        Self::with_process_id(transport, std::process::id())
    }

    /// Create a registry whose local alive names embed `process_id`
    pub fn with_process_id(transport: Arc<dyn NodeTransport>, process_id: u32) -> Self {
        Self {
            transport,
            process_id,
            persistent: RwLock::new(HashMap::new()),
            next_instance: AtomicU32::new(0),
        }
    }

    /// Registry key for a `(node, secret)` pair
    pub fn key(node: &str, secret: &str) -> String {
        format!("peb_{}_{}", node, secret)
    }

    pub fn transport(&self) -> &Arc<dyn NodeTransport> {
        &self.transport
    }

    /// Find an existing persistent link
    pub fn lookup(&self, node: &str, secret: &str) -> Option<Arc<Link>> {
        let links = self.persistent.read().unwrap_or_else(PoisonError::into_inner);
        links.get(&Self::key(node, secret)).cloned()
    }

    /// Get the persistent link for `(node, secret)`, dialing it on first use
    ///
    /// Persistent links always use instance 0 and the alive name
    /// `peb_client_<pid>_0`. When two callers race to create the same link,
    /// the first insert wins and the loser's connection is closed.
    ///
    /// # Arguments
    /// * `node` - Remote node, `name@host`
    /// * `secret` - Cookie
    /// * `timeout_ms` - Connect timeout, 0 for none
    ///
    /// # Returns
    /// * `Ok(Arc<Link>)` - Shared link
    /// * `Err(ConnectError)` - Local init or dial failed
    pub fn connect_persistent(
        &self,
        node: &str,
        secret: &str,
        timeout_ms: u64,
    ) -> Result<Arc<Link>, ConnectError> {
        if let Some(link) = self.lookup(node, secret) {
            debug!(node, "reusing persistent link");
            return Ok(link);
        }

        let alive_name = format!("{}_{}_0", CLIENT_PREFIX, self.process_id);
        let link = Arc::new(Link::open(
            Arc::clone(&self.transport),
            &LinkParams {
                node,
                secret,
                alive_name: &alive_name,
                instance: 0,
                timeout_ms,
                persistent: true,
            },
        )?);

        let mut links = self.persistent.write().unwrap_or_else(PoisonError::into_inner);
        let entry = links
            .entry(Self::key(node, secret))
            .or_insert_with(|| Arc::clone(&link));
        if !Arc::ptr_eq(entry, &link) {
            debug!(node, "persistent link created concurrently, dropping duplicate");
        }
        Ok(Arc::clone(entry))
    }

    /// Open a transient link owned by the caller
    ///
    /// Each transient link gets the next instance number and the alive name
    /// `peb_client_<pid>`.
    pub fn connect_transient(
        &self,
        node: &str,
        secret: &str,
        timeout_ms: u64,
    ) -> Result<Link, ConnectError> {
        let instance = self.next_instance.fetch_add(1, Ordering::Relaxed);
        let alive_name = format!("{}_{}", CLIENT_PREFIX, self.process_id);
        Link::open(
            Arc::clone(&self.transport),
            &LinkParams {
                node,
                secret,
                alive_name: &alive_name,
                instance,
                timeout_ms,
                persistent: false,
            },
        )
    }

    /// Number of persistent links currently registered
    pub fn persistent_count(&self) -> usize {
        self.persistent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Release every persistent link
    ///
    /// Sockets close as the last reference to each link goes away; scopes
    /// still holding one keep it usable until they end.
    pub fn shutdown(&self) {
        let drained: Vec<Arc<Link>> = {
            let mut links = self.persistent.write().unwrap_or_else(PoisonError::into_inner);
            links.drain().map(|(_, link)| link).collect()
        };
        info!(count = drained.len(), "releasing persistent links");
    }
}

impl Drop for LinkRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
