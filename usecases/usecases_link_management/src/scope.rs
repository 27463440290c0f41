//! Request Scope Module
//!
//! Per-request view of links: a handle table, the default link and the
//! transient links opened during the request.
//!
//! Handles are never reused within a scope, so a closed handle stays invalid.
//! Ending the scope (dropping it) closes every transient link it still owns;
//! persistent links only lose this scope's reference.

use std::collections::BTreeMap;
use std::sync::Arc;

use entities_data_handling::{ErlangPid, LinkHandle};
use infrastructure_external_format::SelfPidResolver;
use serde::Serialize;
use tracing::debug;

use crate::error::{ConnectError, LinkError};
use crate::link::Link;
use crate::registry::LinkRegistry;

enum ScopedLink {
    Transient(Link),
    Persistent(Arc<Link>),
}

impl ScopedLink {
    fn link(&self) -> &Link {
        match self {
            ScopedLink::Transient(link) => link,
            ScopedLink::Persistent(link) => link,
        }
    }
}

/// Link counters reported by [`RequestScope::status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopeStatus {
    /// Current default link, if any
    pub default_link: Option<LinkHandle>,
    /// Open links visible to this request: registered persistent links plus
    /// this scope's transient links
    pub num_link: usize,
    /// Registered persistent links
    pub num_persistent: usize,
}

/// Links belonging to one request
pub struct RequestScope {
    registry: Arc<LinkRegistry>,
    links: BTreeMap<LinkHandle, ScopedLink>,
    default_link: Option<LinkHandle>,
    next_handle: u64,
}

impl RequestScope {
    pub fn new(registry: Arc<LinkRegistry>) -> Self {
        Self {
            registry,
            links: BTreeMap::new(),
            default_link: None,
            next_handle: 1,
        }
    }

    pub fn registry(&self) -> &Arc<LinkRegistry> {
        &self.registry
    }

    /// Connect to `node` and make the new handle the default link
    ///
    /// # Arguments
    /// * `node` - Remote node, `name@host`
    /// * `secret` - Cookie
    /// * `timeout_ms` - Connect timeout, 0 for none
    /// * `persistent` - Share the link across requests
    ///
    /// # Returns
    /// * `Ok(LinkHandle)` - Handle valid until `close` or the end of the scope
    /// * `Err(ConnectError)` - Local init or dial failed; the default is unchanged
    pub fn connect(
        &mut self,
        node: &str,
        secret: &str,
        timeout_ms: u64,
        persistent: bool,
    ) -> Result<LinkHandle, ConnectError> {
        let scoped = if persistent {
            ScopedLink::Persistent(self.registry.connect_persistent(node, secret, timeout_ms)?)
        } else {
            ScopedLink::Transient(self.registry.connect_transient(node, secret, timeout_ms)?)
        };

        let handle = LinkHandle(self.next_handle);
        self.next_handle += 1;
        self.links.insert(handle, scoped);
        self.default_link = Some(handle);
        debug!(%handle, node, persistent, "link handle issued");
        Ok(handle)
    }

    /// Close a link, or the default link when `handle` is `None`
    ///
    /// Closing the default link unsets it. A transient link's socket closes
    /// immediately; a persistent link stays open in the registry.
    pub fn close(&mut self, handle: Option<LinkHandle>) -> Result<(), LinkError> {
        let handle = match handle {
            Some(handle) => handle,
            None => self.default_link.ok_or(LinkError::NoDefaultLink)?,
        };
        let scoped = self
            .links
            .remove(&handle)
            .ok_or(LinkError::InvalidLink(handle))?;
        if self.default_link == Some(handle) {
            self.default_link = None;
        }
        debug!(%handle, persistent = matches!(scoped, ScopedLink::Persistent(_)), "link handle closed");
        Ok(())
    }

    /// Resolve a handle, or the default link when `handle` is `None`
    pub fn resolve(&self, handle: Option<LinkHandle>) -> Result<&Link, LinkError> {
        let handle = match handle {
            Some(handle) => handle,
            None => self.default_link.ok_or(LinkError::NoDefaultLink)?,
        };
        self.links
            .get(&handle)
            .map(ScopedLink::link)
            .ok_or(LinkError::InvalidLink(handle))
    }

    pub fn default_link(&self) -> Option<LinkHandle> {
        self.default_link
    }

    pub fn status(&self) -> ScopeStatus {
        let transient = self
            .links
            .values()
            .filter(|scoped| matches!(scoped, ScopedLink::Transient(_)))
            .count();
        let num_persistent = self.registry.persistent_count();
        ScopeStatus {
            default_link: self.default_link,
            num_link: num_persistent + transient,
            num_persistent,
        }
    }
}

impl SelfPidResolver for RequestScope {
    fn self_pid(&self, handle: LinkHandle) -> Option<ErlangPid> {
        self.resolve(Some(handle)).ok().map(|link| link.self_pid().clone())
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        if !self.links.is_empty() {
            debug!(handles = self.links.len(), "request scope ended, releasing links");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters_distribution::LoopbackNode;

    fn scope() -> (Arc<LoopbackNode>, RequestScope) {
        let node = Arc::new(LoopbackNode::default());
        let registry = Arc::new(LinkRegistry::with_process_id(node.clone(), 7));
        (node, RequestScope::new(registry))
    }

    #[test]
    fn test_connect_sets_default() {
        let (_node, mut scope) = scope();
        assert_eq!(scope.default_link(), None);
        let a = scope.connect("a@localhost", "C", 0, false).unwrap();
        assert_eq!(scope.default_link(), Some(a));
        let b = scope.connect("b@localhost", "C", 0, false).unwrap();
        assert_ne!(a, b);
        assert_eq!(scope.default_link(), Some(b));
        assert_eq!(scope.resolve(None).unwrap().node(), "b@localhost");
        assert_eq!(scope.resolve(Some(a)).unwrap().node(), "a@localhost");
    }

    #[test]
    fn test_failed_connect_keeps_default() {
        let (node, mut scope) = scope();
        let a = scope.connect("a@localhost", "C", 0, false).unwrap();
        node.fail_dial(true);
        assert!(matches!(
            scope.connect("b@localhost", "C", 0, false),
            Err(ConnectError::Connection { .. })
        ));
        assert_eq!(scope.default_link(), Some(a));
    }

    #[test]
    fn test_close_default_then_no_default() {
        let (node, mut scope) = scope();
        scope.connect("a@localhost", "C", 0, false).unwrap();
        scope.close(None).unwrap();
        assert_eq!(scope.default_link(), None);
        assert_eq!(node.open_sockets(), 0);
        assert_eq!(scope.close(None), Err(LinkError::NoDefaultLink));
        assert_eq!(scope.resolve(None).unwrap_err(), LinkError::NoDefaultLink);
    }

    #[test]
    fn test_closed_handle_is_invalid() {
        let (_node, mut scope) = scope();
        let a = scope.connect("a@localhost", "C", 0, false).unwrap();
        let b = scope.connect("b@localhost", "C", 0, false).unwrap();
        scope.close(Some(a)).unwrap();
        assert_eq!(scope.default_link(), Some(b));
        assert_eq!(scope.close(Some(a)), Err(LinkError::InvalidLink(a)));
        assert_eq!(scope.resolve(Some(a)).unwrap_err(), LinkError::InvalidLink(a));
    }

    #[test]
    fn test_double_close_releases_socket_once() {
        let (node, mut scope) = scope();
        let a = scope.connect("a@localhost", "C", 0, false).unwrap();
        scope.close(Some(a)).unwrap();
        assert_eq!(scope.close(Some(a)), Err(LinkError::InvalidLink(a)));
        assert_eq!(node.closed_sockets().len(), 1);
        assert_eq!(node.open_sockets(), 0);
        drop(scope);
        assert_eq!(node.closed_sockets().len(), 1);
    }

    #[test]
    fn test_closing_persistent_handle_keeps_socket() {
        let (node, mut scope) = scope();
        let p = scope.connect("a@localhost", "C", 0, true).unwrap();
        scope.close(Some(p)).unwrap();
        assert_eq!(node.open_sockets(), 1);
        assert_eq!(scope.registry().persistent_count(), 1);
    }

    #[test]
    fn test_status_counts() {
        let (_node, mut scope) = scope();
        scope.connect("a@localhost", "C", 0, true).unwrap();
        scope.connect("a@localhost", "C", 0, true).unwrap();
        let t = scope.connect("b@localhost", "C", 0, false).unwrap();
        let status = scope.status();
        assert_eq!(status.default_link, Some(t));
        assert_eq!(status.num_persistent, 1);
        assert_eq!(status.num_link, 2);
    }

    #[test]
    fn test_scope_end_closes_transient_links() {
        let (node, mut scope) = scope();
        scope.connect("a@localhost", "C", 0, false).unwrap();
        scope.connect("b@localhost", "C", 0, true).unwrap();
        let registry = Arc::clone(scope.registry());
        drop(scope);
        assert_eq!(node.open_sockets(), 1);
        registry.shutdown();
        assert_eq!(node.open_sockets(), 0);
    }

    #[test]
    fn test_self_pid_resolver() {
        let (_node, mut scope) = scope();
        let a = scope.connect("a@localhost", "C", 0, false).unwrap();
        let pid = scope.self_pid(a).unwrap();
        assert_eq!(pid.node, "peb_client_7@localhost");
        assert!(scope.self_pid(LinkHandle(99)).is_none());
    }
}
