//! Adapters Layer: Distribution
//!
//! Node connectivity for the bridge.
//!
//! ## Modules
//!
//! - **[`transport`](transport/index.html)**: the [`NodeTransport`] contract, local
//!   identities, socket handles and message kinds
//!
//! - **[`loopback`](loopback/index.html)**: [`LoopbackNode`], an in-memory transport
//!   for local experimentation and tests
//!
//! With the `mock` feature (or under `cfg(test)`) a mockall-generated
//! `MockNodeTransport` is exported as well.

pub mod transport;
pub mod loopback;

pub use transport::{
    LocalIdentity, MessageKind, NodeTransport, Received, SocketHandle, TransportError,
};
#[cfg(any(test, feature = "mock"))]
pub use transport::MockNodeTransport;
pub use loopback::{Destination, LoopbackNode, RpcRecord, SentMessage};
