//! Infrastructure Layer: External Term Format
//!
//! Term codec between host values and External Term Format (ETF) bytes.
//!
//! ## Overview
//!
//! The `infrastructure_external_format` crate is part of the infrastructure layer in
//! the CLEAN architecture layout of the bridge. Encoding is driven by a small format
//! language; decoding is driven by the tag bytes in the input.
//!
//! ## Modules
//!
//! - **[`format`](format/index.html)**: compiles format strings such as
//!   `"{~a,[~i,~s]}"` into a bracket-checked directive sequence
//!
//! - **[`encoding`](encoding/index.html)**: interprets a compiled format against a
//!   [`Value`](entities_data_handling::Value) tree, one value per directive
//!
//! - **[`decoding`](decoding/index.html)**: rebuilds a
//!   [`Term`](entities_data_handling::Term) from bytes
//!
//! ## Examples
//!
//! ```rust
//! use entities_data_handling::{Term, Value};
//! use infrastructure_external_format::{decode, encode, NoLinks};
//!
//! let values = vec![Value::Array(vec![Value::from("ok"), Value::from(42i64)])];
//! let buf = encode("{~a,~i}", &values, true, &NoLinks).unwrap();
//! let term = decode(buf.as_bytes(), true).unwrap();
//! assert_eq!(term, Term::Tuple(vec![Term::atom("ok"), Term::Integer(42)]));
//! ```
//!
//! ## See Also
//!
//! - [`infrastructure_data_handling`](../infrastructure_data_handling/index.html): the
//!   per-type wire primitives used here

pub mod format;
pub mod encoding;
pub mod decoding;

pub use format::{Bracket, Directive, Format, FormatError, Instruction, ScalarKind};
pub use encoding::{encode, encode_compiled, EncodeError, NoLinks, SelfPidResolver};
pub use decoding::{decode, decode_at, decode_buffer, DecodeError, MAX_DEPTH};

/// External term format version magic byte
pub use entities_data_handling::VERSION_MAGIC;
