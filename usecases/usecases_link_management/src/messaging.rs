//! Messaging Module
//!
//! Send, receive and RPC over one link. Payloads are encoded terms; these
//! functions never look inside them.

use adapters_distribution::{MessageKind, Received};
use entities_data_handling::{EncodedBuffer, ErlangPid};
use tracing::{debug, trace, warn};

use crate::error::{ReceiveError, RpcError, SendError};
use crate::link::Link;

/// Send to a process registered under `process_name` on the link's node
pub fn send_by_name(
    link: &Link,
    process_name: &str,
    payload: &EncodedBuffer,
    timeout_ms: u64,
) -> Result<(), SendError> {
    link.with_socket(|transport, identity, socket| {
        transport.send_registered(identity, socket, process_name, payload.as_bytes(), timeout_ms)
    })
    .map_err(|e| {
        warn!(node = link.node(), process_name, error = %e, "send by name failed");
        SendError(e)
    })?;
    debug!(node = link.node(), process_name, bytes = payload.len(), "sent by name");
    Ok(())
}

/// Send to a remote pid over the link
pub fn send_by_pid(
    link: &Link,
    pid: &ErlangPid,
    payload: &EncodedBuffer,
    timeout_ms: u64,
) -> Result<(), SendError> {
    link.with_socket(|transport, _identity, socket| {
        transport.send_to_pid(socket, pid, payload.as_bytes(), timeout_ms)
    })
    .map_err(|e| {
        warn!(node = link.node(), %pid, error = %e, "send by pid failed");
        SendError(e)
    })?;
    debug!(node = link.node(), %pid, bytes = payload.len(), "sent by pid");
    Ok(())
}

/// Wait for the next ordinary message on the link
///
/// Ticks are skipped. A message of any other kind ends the wait with
/// [`ReceiveError::NotMine`]. The timeout applies to each underlying receive.
///
/// # Returns
/// * `Ok(EncodedBuffer)` - Message payload with the cursor at 0
/// * `Err(ReceiveError)` - Not-mine message, timeout, or transport failure
pub fn receive(link: &Link, timeout_ms: u64) -> Result<EncodedBuffer, ReceiveError> {
    link.with_socket(|transport, _identity, socket| loop {
        match transport.receive_message(socket, timeout_ms) {
            Ok(Received::Tick) => {
                trace!(node = link.node(), "tick");
            }
            Ok(Received::Message {
                kind: MessageKind::Send,
                payload,
            }) => {
                debug!(node = link.node(), bytes = payload.len(), "message received");
                return Ok(EncodedBuffer::from_bytes(payload));
            }
            Ok(Received::Message { kind, .. }) => {
                debug!(node = link.node(), ?kind, "message not addressed to us");
                return Err(ReceiveError::NotMine(kind));
            }
            Err(e) => {
                warn!(node = link.node(), error = %e, "receive failed");
                return Err(ReceiveError::ReceiveFailed(e));
            }
        }
    })
}

/// Call `module:function` on the link's node and wait for the reply
///
/// `args` must be an encoded list; the reply is the encoded result term.
pub fn rpc(
    link: &Link,
    module: &str,
    function: &str,
    args: &EncodedBuffer,
) -> Result<EncodedBuffer, RpcError> {
    let reply = link
        .with_socket(|transport, identity, socket| {
            transport.call(identity, socket, module, function, args.as_bytes())
        })
        .map_err(|e| {
            warn!(node = link.node(), module, function, error = %e, "rpc failed");
            RpcError::CallFailed(e)
        })?;
    debug!(node = link.node(), module, function, bytes = reply.len(), "rpc reply");
    Ok(EncodedBuffer::from_bytes(reply))
}

/// Cast `module:function` on the link's node without waiting for a reply
pub fn rpc_notify(
    link: &Link,
    module: &str,
    function: &str,
    args: &EncodedBuffer,
) -> Result<(), RpcError> {
    link.with_socket(|transport, identity, socket| {
        transport.notify(identity, socket, module, function, args.as_bytes())
    })
    .map_err(|e| {
        warn!(node = link.node(), module, function, error = %e, "rpc cast failed");
        RpcError::CallFailed(e)
    })?;
    debug!(node = link.node(), module, function, "rpc cast");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use adapters_distribution::{Destination, LoopbackNode, TransportError};

    use crate::registry::LinkRegistry;

    fn link() -> (Arc<LoopbackNode>, Link) {
        let node = Arc::new(LoopbackNode::default());
        let registry = LinkRegistry::with_process_id(node.clone(), 1);
        let link = registry.connect_transient("server@localhost", "COOKIE", 0).unwrap();
        (node, link)
    }

    #[test]
    fn test_send_by_name_records_sender() {
        let (node, link) = link();
        let payload = EncodedBuffer::from_bytes(vec![131, 97, 1]);
        send_by_name(&link, "pong", &payload, 0).unwrap();
        let sent = node.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, Destination::Registered("pong".to_string()));
        assert_eq!(sent[0].from.as_ref(), Some(link.self_pid()));
        assert_eq!(sent[0].payload, vec![131, 97, 1]);
    }

    #[test]
    fn test_send_by_pid() {
        let (node, link) = link();
        let pid = ErlangPid::new("server@localhost", 80, 0, 1);
        send_by_pid(&link, &pid, &EncodedBuffer::from_bytes(vec![131, 106]), 0).unwrap();
        assert_eq!(node.sent()[0].to, Destination::Pid(pid));
    }

    #[test]
    fn test_receive_skips_ticks() {
        let (node, link) = link();
        node.push_tick();
        node.push_tick();
        node.push_message(MessageKind::Send, vec![131, 97, 7]);
        let buf = receive(&link, 100).unwrap();
        assert_eq!(buf.as_bytes(), &[131, 97, 7]);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_receive_not_mine() {
        let (node, link) = link();
        node.push_message(MessageKind::Link, Vec::new());
        assert_eq!(receive(&link, 100), Err(ReceiveError::NotMine(MessageKind::Link)));
    }

    #[test]
    fn test_receive_timeout() {
        let (_node, link) = link();
        assert_eq!(
            receive(&link, 10),
            Err(ReceiveError::ReceiveFailed(TransportError::Timeout))
        );
    }

    #[test]
    fn test_rpc_reply_and_failure() {
        let (node, link) = link();
        node.set_rpc_reply("erlang", "node", vec![131, 100, 0, 1, b'a']);
        let args = EncodedBuffer::from_bytes(vec![131, 106]);
        let reply = rpc(&link, "erlang", "node", &args).unwrap();
        assert_eq!(reply.as_bytes(), &[131, 100, 0, 1, b'a']);
        assert!(matches!(
            rpc(&link, "nope", "nope", &args),
            Err(RpcError::CallFailed(_))
        ));
    }

    #[test]
    fn test_rpc_notify_is_recorded_as_cast() {
        let (node, link) = link();
        rpc_notify(&link, "logger", "info", &EncodedBuffer::from_bytes(vec![131, 106])).unwrap();
        let rpcs = node.rpcs();
        assert_eq!(rpcs.len(), 1);
        assert!(rpcs[0].cast);
        assert_eq!(rpcs[0].module, "logger");
    }
}
