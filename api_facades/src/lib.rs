//! API Facades Layer
//!
//! Value-level entry points for a host process: connect and close links,
//! encode and decode terms, send, receive and call, and read back the last
//! error of each request.
//!
//! ```rust
//! use std::sync::Arc;
//! use adapters_distribution::{LoopbackNode, MessageKind};
//! use api_facades::Bridge;
//! use entities_data_handling::Value;
//! use usecases_link_management::LinkRegistry;
//!
//! let node = Arc::new(LoopbackNode::default());
//! let mut bridge = Bridge::new(Arc::new(LinkRegistry::new(node.clone())));
//! bridge.connect("server@localhost", "COOKIE", 0).unwrap();
//!
//! let msg = bridge
//!     .vencode("{~a,~i}", &[Value::Array(vec!["ping".into(), 1i64.into()])])
//!     .unwrap();
//! bridge.send_byname("pong", &msg, None, 0).unwrap();
//!
//! node.push_message(MessageKind::Send, msg.into_bytes());
//! let mut reply = bridge.receive(None, 1000).unwrap();
//! let root = bridge.vdecode(&mut reply).unwrap();
//! assert_eq!(root[0].arity(), Some(2));
//! ```

pub mod config;
pub mod error;
pub mod bridge;

pub use config::BridgeConfig;
pub use error::BridgeError;
pub use bridge::{Bridge, BridgeStatus, LinkInfo};
