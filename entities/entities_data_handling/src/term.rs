//! Term Module
//!
//! Provides the in-memory term tree exchanged with a remote node.
//!
//! A `Term` is produced by the decoder and is the shape the caller inspects
//! after a receive or an RPC reply. Lists are stored as plain element vectors:
//! the nil terminator (and any segmented list runs) are consumed by the decoder
//! and never appear in the tree.

use serde::Serialize;

use crate::pid::ErlangPid;

/// Erlang term representation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Term {
    /// Atom, stored by name
    Atom(String),
    /// String (`STRING_EXT`), raw bytes
    Str(Vec<u8>),
    /// Binary
    Binary(Vec<u8>),
    /// Integer that fits in 64 bits
    Integer(i64),
    /// Double-precision float
    Float(f64),
    /// Remote process identifier
    Pid(ErlangPid),
    /// Tuple
    Tuple(Vec<Term>),
    /// Proper list (the nil tail is implicit)
    List(Vec<Term>),
}

impl Term {
    /// Build an atom term
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// Build a string term from text
    pub fn string(text: impl AsRef<[u8]>) -> Self {
        Term::Str(text.as_ref().to_vec())
    }

    /// Build a binary term
    pub fn binary(data: impl AsRef<[u8]>) -> Self {
        Term::Binary(data.as_ref().to_vec())
    }

    /// The empty list
    pub fn nil() -> Self {
        Term::List(Vec::new())
    }

    /// Short name of the term's variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Term::Atom(_) => "atom",
            Term::Str(_) => "string",
            Term::Binary(_) => "binary",
            Term::Integer(_) => "integer",
            Term::Float(_) => "float",
            Term::Pid(_) => "pid",
            Term::Tuple(_) => "tuple",
            Term::List(_) => "list",
        }
    }

    /// Atom name, if this is an atom
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// Integer value, if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Term::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Float value, if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Term::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Raw bytes of a string or binary term
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Term::Str(data) | Term::Binary(data) => Some(data),
            _ => None,
        }
    }

    /// Pid, if this is a pid
    pub fn as_pid(&self) -> Option<&ErlangPid> {
        match self {
            Term::Pid(pid) => Some(pid),
            _ => None,
        }
    }

    /// Elements of a tuple or list
    pub fn elements(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(items) | Term::List(items) => Some(items),
            _ => None,
        }
    }

    /// Arity of a tuple
    pub fn arity(&self) -> Option<usize> {
        match self {
            Term::Tuple(items) => Some(items.len()),
            _ => None,
        }
    }

    /// True for the empty list
    pub fn is_nil(&self) -> bool {
        matches!(self, Term::List(items) if items.is_empty())
    }
}

impl From<ErlangPid> for Term {
    fn from(pid: ErlangPid) -> Self {
        Term::Pid(pid)
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::Integer(n)
    }
}

impl From<f64> for Term {
    fn from(f: f64) -> Self {
        Term::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let t = Term::Tuple(vec![Term::atom("ok"), Term::Integer(42)]);
        assert_eq!(t.arity(), Some(2));
        let items = t.elements().unwrap();
        assert_eq!(items[0].as_atom(), Some("ok"));
        assert_eq!(items[1].as_integer(), Some(42));
        assert_eq!(t.as_atom(), None);
    }

    #[test]
    fn test_nil() {
        assert!(Term::nil().is_nil());
        assert!(!Term::List(vec![Term::Integer(1)]).is_nil());
        assert_eq!(Term::nil().arity(), None);
    }

    #[test]
    fn test_bytes_accessor_covers_strings_and_binaries() {
        assert_eq!(Term::string("abc").as_bytes(), Some(&b"abc"[..]));
        assert_eq!(Term::binary([1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(Term::Integer(1).as_bytes(), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Term::Float(1.5).type_name(), "float");
        assert_eq!(Term::Pid(ErlangPid::new("a@b", 1, 0, 0)).type_name(), "pid");
    }
}
