//! Entities Layer: Data Handling
//!
//! This crate provides the core data types exchanged between a host process and a
//! remote Erlang node. It is the innermost layer of the bridge and has no
//! dependencies on other crates in the workspace.
//!
//! ## Overview
//!
//! The `entities_data_handling` crate is part of the entities layer in the CLEAN
//! architecture layout of the bridge. Every higher layer (infrastructure, adapters,
//! usecases, facades) builds on the types defined here.
//!
//! ## Modules
//!
//! - **[`term`](term/index.html)**: The decoded term tree (`Term`) produced and
//!   consumed by the codec: atoms, strings, binaries, integers, floats, pids,
//!   tuples and lists.
//!
//! - **[`pid`](pid/index.html)**: Remote process identifier (`ErlangPid`), an
//!   opaque pass-through value.
//!
//! - **[`value`](value/index.html)**: The host-side input tree (`Value`) that the
//!   format-driven encoder pattern-matches against, plus the opaque
//!   `LinkHandle` resource id.
//!
//! - **[`buffer`](buffer/index.html)**: `EncodedBuffer`, an owned growable byte
//!   buffer with a read cursor.
//!
//! ## Usage
//!
//! ```rust
//! use entities_data_handling::{EncodedBuffer, Term, Value, VERSION_MAGIC};
//!
//! let reply = Term::Tuple(vec![Term::atom("ok"), Term::Integer(42)]);
//! assert_eq!(reply.arity(), Some(2));
//!
//! let args = vec![Value::from("ok"), Value::from(42i64)];
//! assert_eq!(args.len(), 2);
//!
//! let mut buf = EncodedBuffer::from_bytes(vec![VERSION_MAGIC]);
//! buf.append(&EncodedBuffer::from_bytes(vec![97, 1]));
//! assert_eq!(buf.as_bytes(), &[131, 97, 1]);
//! ```
//!
//! ## See Also
//!
//! - [`infrastructure_data_handling`](../infrastructure_data_handling/index.html): wire-level
//!   primitives that read and write these types
//! - [`infrastructure_external_format`](../infrastructure_external_format/index.html): the
//!   format-driven encoder and the tag-dispatched decoder

pub mod term;
pub mod pid;
pub mod value;
pub mod buffer;

// Re-export main types for convenience
pub use term::Term;
pub use pid::ErlangPid;
pub use value::{LinkHandle, Value};
pub use buffer::{EncodedBuffer, VERSION_MAGIC};
