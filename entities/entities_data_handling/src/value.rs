//! Value Module
//!
//! Host-side input tree consumed by the format-driven encoder.
//!
//! The encoder walks a compiled format and pulls one `Value` per directive
//! from the current scope. Each directive accepts a fixed set of variants;
//! anything else is a type mismatch.

use serde::{Deserialize, Serialize};

use crate::pid::ErlangPid;
use crate::term::Term;

/// Opaque handle naming a link inside a request scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkHandle(pub u64);

impl LinkHandle {
    /// Raw id
    pub fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LinkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "link#{}", self.0)
    }
}

/// Host value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text (atoms, strings, binaries)
    Text(String),
    /// Raw bytes (strings, binaries)
    Bytes(Vec<u8>),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// Remote pid
    Pid(ErlangPid),
    /// Link whose local pid is wanted (`~p`)
    Link(LinkHandle),
    /// Nested scope for `[...]` and `{...}`
    Array(Vec<Value>),
}

impl Value {
    /// Short name of the value's variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Pid(_) => "pid",
            Value::Link(_) => "link",
            Value::Array(_) => "array",
        }
    }

    /// Byte view of `Text` or `Bytes`
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Text(s) => Some(s.as_bytes()),
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<ErlangPid> for Value {
    fn from(pid: ErlangPid) -> Self {
        Value::Pid(pid)
    }
}

impl From<LinkHandle> for Value {
    fn from(handle: LinkHandle) -> Self {
        Value::Link(handle)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Decoded terms map back onto host values so replies can be re-sent.
/// Atoms become text, strings and binaries become bytes.
impl From<Term> for Value {
    fn from(term: Term) -> Self {
        match term {
            Term::Atom(name) => Value::Text(name),
            Term::Str(data) | Term::Binary(data) => Value::Bytes(data),
            Term::Integer(n) => Value::Int(n),
            Term::Float(f) => Value::Float(f),
            Term::Pid(pid) => Value::Pid(pid),
            Term::Tuple(items) | Term::List(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(Value::from("ok"), Value::Text("ok".to_string()));
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Bytes(vec![1, 2]));
        assert_eq!(Value::from(LinkHandle(3)), Value::Link(LinkHandle(3)));
    }

    #[test]
    fn test_from_term_flattens_containers() {
        let term = Term::Tuple(vec![
            Term::atom("reply"),
            Term::List(vec![Term::Integer(1), Term::string("hi")]),
        ]);
        let value = Value::from(term);
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Text("reply".to_string()),
                Value::Array(vec![Value::Int(1), Value::Bytes(b"hi".to_vec())]),
            ])
        );
    }

    #[test]
    fn test_as_bytes() {
        assert_eq!(Value::from("ab").as_bytes(), Some(&b"ab"[..]));
        assert_eq!(Value::Int(1).as_bytes(), None);
    }

    #[test]
    fn test_link_handle_display() {
        assert_eq!(LinkHandle(12).to_string(), "link#12");
        assert_eq!(LinkHandle(12).id(), 12);
    }
}
