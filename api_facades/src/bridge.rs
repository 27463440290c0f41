//! Bridge Module
//!
//! Value-level operations for one host request.
//!
//! A `Bridge` owns the request's [`RequestScope`] and remembers the last
//! failure. Every operation clears that failure before it runs, so
//! [`Bridge::error`] and [`Bridge::errorno`] always describe the most recent
//! call.

use std::sync::Arc;

use entities_data_handling::{EncodedBuffer, ErlangPid, LinkHandle, Term, Value};
use infrastructure_data_handling::s_print_term;
use infrastructure_external_format::{decode, decode_buffer, encode};
use serde::Serialize;
use tracing::debug;
use usecases_link_management::{messaging, LinkRegistry, RequestScope, ScopeStatus};

use crate::config::BridgeConfig;
use crate::error::BridgeError;

/// Local side of a link, as reported by [`Bridge::link_info`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkInfo {
    pub this_hostname: String,
    pub this_nodename: String,
    pub this_alivename: String,
    pub connect_cookie: String,
    pub creation: u32,
    pub is_persistent: bool,
}

/// Link counters, as reported by [`Bridge::status`]
pub type BridgeStatus = ScopeStatus;

/// Bridge for one host request
pub struct Bridge {
    scope: RequestScope,
    config: BridgeConfig,
    last_error: Option<BridgeError>,
}

impl Bridge {
    /// Create a bridge with default configuration
    pub fn new(registry: Arc<LinkRegistry>) -> Self {
        Self::with_config(registry, BridgeConfig::default())
    }

    pub fn with_config(registry: Arc<LinkRegistry>, config: BridgeConfig) -> Self {
        Self {
            scope: RequestScope::new(registry),
            config,
            last_error: None,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }

    /// Clear the last error, run `op`, and record its failure
    fn run<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, BridgeError>,
    ) -> Result<T, BridgeError> {
        self.last_error = None;
        let result = op(self);
        if let Err(e) = &result {
            debug!(code = e.code(), error = %e, "bridge call failed");
            self.last_error = Some(e.clone());
        }
        result
    }

    /// Open a transient link and make it the default
    ///
    /// # Arguments
    /// * `node` - Remote node, `name@host`
    /// * `secret` - Cookie
    /// * `timeout_ms` - Connect timeout, 0 for none
    pub fn connect(
        &mut self,
        node: &str,
        secret: &str,
        timeout_ms: u64,
    ) -> Result<LinkHandle, BridgeError> {
        self.run(|b| Ok(b.scope.connect(node, secret, timeout_ms, false)?))
    }

    /// Open (or reuse) a persistent link and make it the default
    pub fn pconnect(
        &mut self,
        node: &str,
        secret: &str,
        timeout_ms: u64,
    ) -> Result<LinkHandle, BridgeError> {
        self.run(|b| Ok(b.scope.connect(node, secret, timeout_ms, true)?))
    }

    /// Connect using the configured node, cookie and timeout
    pub fn connect_default(&mut self, persistent: bool) -> Result<LinkHandle, BridgeError> {
        let BridgeConfig {
            default_nodename,
            default_cookie,
            default_timeout_ms,
        } = self.config.clone();
        self.run(|b| {
            Ok(b.scope
                .connect(&default_nodename, &default_cookie, default_timeout_ms, persistent)?)
        })
    }

    /// Close `link`, or the default link
    pub fn close(&mut self, link: Option<LinkHandle>) -> Result<(), BridgeError> {
        self.run(|b| Ok(b.scope.close(link)?))
    }

    /// Send an encoded message to a registered process
    pub fn send_byname(
        &mut self,
        process_name: &str,
        message: &EncodedBuffer,
        link: Option<LinkHandle>,
        timeout_ms: u64,
    ) -> Result<(), BridgeError> {
        self.run(|b| {
            let link = b.scope.resolve(link)?;
            Ok(messaging::send_by_name(link, process_name, message, timeout_ms)?)
        })
    }

    /// Send an encoded message to a remote pid
    pub fn send_bypid(
        &mut self,
        pid: &ErlangPid,
        message: &EncodedBuffer,
        link: Option<LinkHandle>,
        timeout_ms: u64,
    ) -> Result<(), BridgeError> {
        self.run(|b| {
            let link = b.scope.resolve(link)?;
            Ok(messaging::send_by_pid(link, pid, message, timeout_ms)?)
        })
    }

    /// Wait for the next message on `link` or the default link
    pub fn receive(
        &mut self,
        link: Option<LinkHandle>,
        timeout_ms: u64,
    ) -> Result<EncodedBuffer, BridgeError> {
        self.run(|b| {
            let link = b.scope.resolve(link)?;
            Ok(messaging::receive(link, timeout_ms)?)
        })
    }

    /// Call `module:function` with an encoded argument list and return the
    /// encoded reply
    pub fn rpc(
        &mut self,
        module: &str,
        function: &str,
        args: &EncodedBuffer,
        link: Option<LinkHandle>,
    ) -> Result<EncodedBuffer, BridgeError> {
        self.run(|b| {
            let link = b.scope.resolve(link)?;
            Ok(messaging::rpc(link, module, function, args)?)
        })
    }

    /// Cast `module:function` without waiting for a reply
    pub fn rpc_to(
        &mut self,
        module: &str,
        function: &str,
        args: &EncodedBuffer,
        link: Option<LinkHandle>,
    ) -> Result<(), BridgeError> {
        self.run(|b| {
            let link = b.scope.resolve(link)?;
            Ok(messaging::rpc_notify(link, module, function, args)?)
        })
    }

    /// Encode `values` as directed by `format`, without the version byte
    ///
    /// `~p` resolves against the links of this bridge.
    pub fn encode(&mut self, format: &str, values: &[Value]) -> Result<EncodedBuffer, BridgeError> {
        self.run(|b| Ok(encode(format, values, false, &b.scope)?))
    }

    /// Encode `values` with a leading version byte
    pub fn vencode(&mut self, format: &str, values: &[Value]) -> Result<EncodedBuffer, BridgeError> {
        self.run(|b| Ok(encode(format, values, true, &b.scope)?))
    }

    /// Decode the term at the message cursor, without a version byte
    ///
    /// The result is the root sequence; element 0 is the decoded term. The
    /// cursor moves past the term, so consecutive terms decode in order.
    pub fn decode(&mut self, message: &mut EncodedBuffer) -> Result<Vec<Term>, BridgeError> {
        self.run(|_| Ok(vec![decode_buffer(message, false)?]))
    }

    /// Decode the term at the message cursor, which starts with the version byte
    pub fn vdecode(&mut self, message: &mut EncodedBuffer) -> Result<Vec<Term>, BridgeError> {
        self.run(|_| Ok(vec![decode_buffer(message, true)?]))
    }

    /// Message of the last failure, if the last call failed
    pub fn error(&self) -> Option<String> {
        self.last_error.as_ref().map(ToString::to_string)
    }

    /// Code of the last failure, 0 if the last call succeeded
    pub fn errorno(&self) -> i64 {
        self.last_error.as_ref().map_or(0, BridgeError::code)
    }

    pub fn last_error(&self) -> Option<&BridgeError> {
        self.last_error.as_ref()
    }

    /// Local identity of `link` or the default link
    pub fn link_info(&mut self, link: Option<LinkHandle>) -> Result<LinkInfo, BridgeError> {
        self.run(|b| {
            let link = b.scope.resolve(link)?;
            let identity = link.identity();
            Ok(LinkInfo {
                this_hostname: identity.host_name.clone(),
                this_nodename: identity.node_name.clone(),
                this_alivename: identity.alive_name.clone(),
                connect_cookie: identity.cookie.clone(),
                creation: identity.creation,
                is_persistent: link.is_persistent(),
            })
        })
    }

    pub fn status(&mut self) -> BridgeStatus {
        self.last_error = None;
        self.scope.status()
    }

    /// Render the term at the message cursor in Erlang syntax
    ///
    /// The cursor does not move.
    pub fn format_term(
        &mut self,
        message: &EncodedBuffer,
        with_version: bool,
    ) -> Result<String, BridgeError> {
        self.run(|_| {
            let term = decode(message.remaining(), with_version)?;
            Ok(s_print_term(&term))
        })
    }

    /// Print an encoded term to stdout in Erlang syntax
    pub fn print_term(&mut self, message: &EncodedBuffer, with_version: bool) -> Result<(), BridgeError> {
        let text = self.format_term(message, with_version)?;
        print!("{}", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters_distribution::LoopbackNode;
    use usecases_link_management::LinkError;

    fn bridge() -> (Arc<LoopbackNode>, Bridge) {
        let node = Arc::new(LoopbackNode::default());
        let registry = Arc::new(LinkRegistry::with_process_id(node.clone(), 3));
        (node, Bridge::new(registry))
    }

    #[test]
    fn test_error_is_cleared_by_next_call() {
        let (_node, mut bridge) = bridge();
        assert!(bridge.close(None).is_err());
        assert_eq!(bridge.errorno(), 8);
        assert_eq!(bridge.error().as_deref(), Some("no default link"));

        bridge.connect("server@localhost", "COOKIE", 0).unwrap();
        assert_eq!(bridge.errorno(), 0);
        assert_eq!(bridge.error(), None);
    }

    #[test]
    fn test_connect_failure_codes() {
        let (node, mut bridge) = bridge();
        node.fail_init(true);
        assert!(bridge.connect("server@localhost", "COOKIE", 0).is_err());
        assert_eq!(bridge.errorno(), 1);

        node.fail_init(false);
        node.fail_dial(true);
        assert!(bridge.pconnect("server@localhost", "COOKIE", 0).is_err());
        assert_eq!(bridge.errorno(), 2);
    }

    #[test]
    fn test_invalid_link_code() {
        let (_node, mut bridge) = bridge();
        let link = bridge.connect("server@localhost", "COOKIE", 0).unwrap();
        bridge.close(Some(link)).unwrap();
        let err = bridge.receive(Some(link), 0).unwrap_err();
        assert_eq!(err, BridgeError::Link(LinkError::InvalidLink(link)));
        assert_eq!(bridge.errorno(), 9);
    }

    #[test]
    fn test_encode_self_pid_uses_link_identity() {
        let (_node, mut bridge) = bridge();
        let link = bridge.connect("server@localhost", "COOKIE", 0).unwrap();
        let mut buf = bridge
            .vencode("{~p,~a}", &[Value::Array(vec![Value::Link(link), "hello".into()])])
            .unwrap();
        let root = bridge.vdecode(&mut buf).unwrap();
        let items = root[0].elements().unwrap();
        assert_eq!(items[0].as_pid().map(|p| p.node.as_str()), Some("peb_client_3@localhost"));
        assert_eq!(items[1].as_atom(), Some("hello"));
    }

    #[test]
    fn test_decode_failure_code() {
        let (_node, mut bridge) = bridge();
        assert!(bridge.vdecode(&mut EncodedBuffer::from_bytes(vec![130, 97, 1])).is_err());
        assert_eq!(bridge.errorno(), 6);
        assert!(bridge.encode("~q", &[Value::Int(1)]).is_err());
        assert_eq!(bridge.errorno(), 7);
    }

    #[test]
    fn test_link_info() {
        let (_node, mut bridge) = bridge();
        bridge.pconnect("server@localhost", "COOKIE", 0).unwrap();
        let info = bridge.link_info(None).unwrap();
        assert_eq!(info.this_alivename, "peb_client_3_0");
        assert_eq!(info.this_nodename, "peb_client_3_0@localhost");
        assert_eq!(info.this_hostname, "localhost");
        assert_eq!(info.connect_cookie, "COOKIE");
        assert_eq!(info.creation, 0);
        assert!(info.is_persistent);
    }

    #[test]
    fn test_format_term() {
        let (_node, mut bridge) = bridge();
        let buf = bridge
            .vencode("[~a,~i]", &[Value::Array(vec!["ok".into(), 7i64.into()])])
            .unwrap();
        assert_eq!(bridge.format_term(&buf, true).unwrap(), "[ok,7]");
    }

    #[test]
    fn test_decode_reads_consecutive_terms() {
        let (_node, mut bridge) = bridge();
        let mut buf = bridge.encode("~i", &[Value::Int(1)]).unwrap();
        let second = bridge.encode("~a", &["two".into()]).unwrap();
        buf.append(&second);

        assert_eq!(bridge.format_term(&buf, false).unwrap(), "1");
        assert_eq!(bridge.decode(&mut buf).unwrap(), vec![Term::Integer(1)]);
        assert_eq!(bridge.format_term(&buf, false).unwrap(), "two");
        assert_eq!(bridge.decode(&mut buf).unwrap(), vec![Term::atom("two")]);
        assert!(buf.remaining().is_empty());

        assert!(bridge.decode(&mut buf).is_err());
        assert_eq!(bridge.errorno(), 6);
    }
}
