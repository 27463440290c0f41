//! Link Management
//!
//! Lifecycle and messaging for connections to remote nodes.
//!
//! ## Overview
//!
//! - [`LinkRegistry`]: process-wide owner of persistent links, keyed by
//!   `(node, secret)`
//! - [`RequestScope`]: per-request handle table, default link and transient
//!   links, released when the scope is dropped
//! - [`messaging`]: send by name or pid, receive, RPC call and cast
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use adapters_distribution::LoopbackNode;
//! use usecases_link_management::{LinkRegistry, RequestScope};
//!
//! let registry = Arc::new(LinkRegistry::new(Arc::new(LoopbackNode::default())));
//! let mut scope = RequestScope::new(registry);
//! let handle = scope.connect("server@localhost", "COOKIE", 0, false).unwrap();
//! assert_eq!(scope.default_link(), Some(handle));
//! ```

pub mod error;
pub mod link;
pub mod registry;
pub mod scope;
pub mod messaging;

pub use error::{ConnectError, LinkError, ReceiveError, RpcError, SendError};
pub use link::{Link, LinkParams};
pub use registry::{LinkRegistry, CLIENT_PREFIX};
pub use scope::{RequestScope, ScopeStatus};
pub use messaging::{receive, rpc, rpc_notify, send_by_name, send_by_pid};
