//! Encoding Module
//!
//! Format-driven encoder: walks a compiled [`Format`] and pulls one host
//! [`Value`] per directive from the current scope.
//!
//! Nested `[...]` and `{...}` scopes are interpreted over an explicit frame
//! stack. Each frame encodes its elements into its own buffer and counts the
//! value slots it consumed; on close the parent writes the header with that
//! count, appends the nested bytes, and terminates lists with nil.

use entities_data_handling::{EncodedBuffer, ErlangPid, LinkHandle, Value};
use infrastructure_data_handling::{
    encode_atom, encode_binary, encode_double, encode_empty_list, encode_list_header, encode_long,
    encode_pid, encode_string, encode_tuple_header, encode_version,
    EncodeError as WireEncodeError,
};
use thiserror::Error;

use crate::format::{Bracket, Directive, Format, FormatError, ScalarKind};

/// Resolves the local pid of a link for `~p`
pub trait SelfPidResolver {
    fn self_pid(&self, handle: LinkHandle) -> Option<ErlangPid>;
}

impl<F> SelfPidResolver for F
where
    F: Fn(LinkHandle) -> Option<ErlangPid>,
{
    fn self_pid(&self, handle: LinkHandle) -> Option<ErlangPid> {
        self(handle)
    }
}

/// Resolver for callers with no links; every `~p` fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinks;

impl SelfPidResolver for NoLinks {
    fn self_pid(&self, _handle: LinkHandle) -> Option<ErlangPid> {
        None
    }
}

/// Encoding error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("bad directive {found:?} at position {position}")]
    BadDirective { position: usize, found: char },
    #[error("missing value for directive at position {position}")]
    MissingValue { position: usize },
    #[error("{directive} at position {position} cannot encode a {found} value")]
    TypeMismatch {
        position: usize,
        directive: &'static str,
        found: &'static str,
    },
    #[error("unbalanced format at position {position}")]
    UnbalancedFormat { position: usize },
    #[error("unknown link {0}")]
    UnknownLink(LinkHandle),
    #[error("atom too long: {0} characters (max 255)")]
    AtomTooLong(usize),
    #[error("float value is not finite")]
    NonFiniteFloat,
    #[error("value too large to encode: {0} elements")]
    TooLarge(usize),
}

impl From<FormatError> for EncodeError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::BadDirective { position, found } => {
                EncodeError::BadDirective { position, found }
            }
            FormatError::Unbalanced { position } => EncodeError::UnbalancedFormat { position },
        }
    }
}

impl From<WireEncodeError> for EncodeError {
    fn from(err: WireEncodeError) -> Self {
        match err {
            WireEncodeError::AtomTooLong(n) => EncodeError::AtomTooLong(n),
            WireEncodeError::NonFiniteFloat => EncodeError::NonFiniteFloat,
            WireEncodeError::TooLarge(n) => EncodeError::TooLarge(n),
        }
    }
}

/// One open scope
struct Frame<'v> {
    bracket: Option<Bracket>,
    values: &'v [Value],
    next: usize,
    buf: EncodedBuffer,
}

impl<'v> Frame<'v> {
    fn new(bracket: Option<Bracket>, values: &'v [Value]) -> Self {
        Self {
            bracket,
            values,
            next: 0,
            buf: EncodedBuffer::new(),
        }
    }

    /// Take the next value slot
    fn take(&mut self, position: usize) -> Result<&'v Value, EncodeError> {
        let value = self
            .values
            .get(self.next)
            .ok_or(EncodeError::MissingValue { position })?;
        self.next += 1;
        Ok(value)
    }
}

/// Encode host values according to a format string
///
/// # Arguments
/// * `format` - Format string, e.g. `"{~a,[~i,~i]}"`
/// * `values` - Top-level value scope
/// * `with_version` - Prepend the version byte 131
/// * `resolver` - Looks up link pids for `~p`
///
/// # Returns
/// * `Ok(EncodedBuffer)` - Encoded bytes
/// * `Err(EncodeError)` - The first format or value error; no partial output
pub fn encode(
    format: &str,
    values: &[Value],
    with_version: bool,
    resolver: &dyn SelfPidResolver,
) -> Result<EncodedBuffer, EncodeError> {
    let compiled = Format::compile(format)?;
    encode_compiled(&compiled, values, with_version, resolver)
}

/// Encode host values according to an already compiled format
pub fn encode_compiled(
    format: &Format,
    values: &[Value],
    with_version: bool,
    resolver: &dyn SelfPidResolver,
) -> Result<EncodedBuffer, EncodeError> {
    let mut stack = vec![Frame::new(None, values)];

    for instruction in format.instructions() {
        let position = instruction.position;
        match instruction.directive {
            Directive::Scalar(kind) => {
                let frame = current(&mut stack, position)?;
                let value = frame.take(position)?;
                encode_scalar(frame.buf.bytes_mut(), kind, value, position, resolver)?;
            }
            Directive::EmptyList => {
                let frame = current(&mut stack, position)?;
                frame.next += 1;
                encode_empty_list(frame.buf.bytes_mut());
            }
            Directive::ListOpen | Directive::TupleOpen => {
                let bracket = if instruction.directive == Directive::ListOpen {
                    Bracket::List
                } else {
                    Bracket::Tuple
                };
                let frame = current(&mut stack, position)?;
                let items = match frame.take(position)? {
                    Value::Array(items) => items.as_slice(),
                    other => {
                        return Err(EncodeError::TypeMismatch {
                            position,
                            directive: if bracket == Bracket::List { "[" } else { "{" },
                            found: other.type_name(),
                        })
                    }
                };
                stack.push(Frame::new(Some(bracket), items));
            }
            Directive::Close(bracket) => {
                let child = match stack.pop() {
                    Some(child) if child.bracket == Some(bracket) => child,
                    _ => return Err(EncodeError::UnbalancedFormat { position }),
                };
                let parent = current(&mut stack, position)?;
                close_scope(&mut parent.buf, child)?;
            }
        }
    }

    let root = match stack.pop() {
        Some(root) if stack.is_empty() && root.bracket.is_none() => root,
        _ => return Err(EncodeError::UnbalancedFormat { position: 0 }),
    };

    if !with_version {
        return Ok(root.buf);
    }
    let mut out = EncodedBuffer::new();
    encode_version(out.bytes_mut());
    out.append(&root.buf);
    Ok(out)
}

fn current<'a, 'v>(
    stack: &'a mut [Frame<'v>],
    position: usize,
) -> Result<&'a mut Frame<'v>, EncodeError> {
    stack
        .last_mut()
        .ok_or(EncodeError::UnbalancedFormat { position })
}

/// Write the header for a finished scope, then its elements
fn close_scope(out: &mut EncodedBuffer, child: Frame<'_>) -> Result<(), EncodeError> {
    let count = child.next;
    match child.bracket {
        Some(Bracket::Tuple) => {
            encode_tuple_header(out.bytes_mut(), count)?;
            out.append(&child.buf);
        }
        _ => {
            encode_list_header(out.bytes_mut(), count)?;
            if count > 0 {
                out.append(&child.buf);
                encode_empty_list(out.bytes_mut());
            }
        }
    }
    Ok(())
}

fn encode_scalar(
    buf: &mut Vec<u8>,
    kind: ScalarKind,
    value: &Value,
    position: usize,
    resolver: &dyn SelfPidResolver,
) -> Result<(), EncodeError> {
    let mismatch = || EncodeError::TypeMismatch {
        position,
        directive: kind.as_str(),
        found: value.type_name(),
    };

    match (kind, value) {
        (ScalarKind::Atom, Value::Text(name)) => {
            encode_atom(buf, name)?;
        }
        (ScalarKind::Str, Value::Text(_) | Value::Bytes(_)) => {
            encode_string(buf, value.as_bytes().ok_or_else(mismatch)?)?;
        }
        (ScalarKind::Binary, Value::Text(_) | Value::Bytes(_)) => {
            encode_binary(buf, value.as_bytes().ok_or_else(mismatch)?)?;
        }
        (ScalarKind::Integer, Value::Int(n)) => {
            encode_long(buf, *n);
        }
        (ScalarKind::Float, Value::Float(f)) => {
            encode_double(buf, *f)?;
        }
        (ScalarKind::Float, Value::Int(n)) => {
            encode_double(buf, *n as f64)?;
        }
        (ScalarKind::SelfPid, Value::Link(handle)) => {
            let pid = resolver
                .self_pid(*handle)
                .ok_or(EncodeError::UnknownLink(*handle))?;
            encode_pid(buf, &pid)?;
        }
        (ScalarKind::RemotePid, Value::Pid(pid)) => {
            encode_pid(buf, pid)?;
        }
        _ => return Err(mismatch()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_data_handling::constants::*;

    fn enc(format: &str, values: Vec<Value>) -> Result<Vec<u8>, EncodeError> {
        encode(format, &values, false, &NoLinks).map(EncodedBuffer::into_bytes)
    }

    #[test]
    fn test_encode_atom() {
        let bytes = enc("~a", vec![Value::from("ok")]).unwrap();
        assert_eq!(bytes, vec![ERL_SMALL_ATOM_UTF8_EXT, 2, b'o', b'k']);
    }

    #[test]
    fn test_encode_with_version() {
        let buf = encode("~i", &[Value::from(1i64)], true, &NoLinks).unwrap();
        assert_eq!(buf.as_bytes(), &[ERL_VERSION, ERL_SMALL_INTEGER_EXT, 1]);
    }

    #[test]
    fn test_encode_tuple() {
        let bytes = enc(
            "{~a,~i}",
            vec![Value::Array(vec![Value::from("ok"), Value::from(42i64)])],
        )
        .unwrap();
        assert_eq!(
            bytes,
            vec![
                ERL_SMALL_TUPLE_EXT, 2,
                ERL_SMALL_ATOM_UTF8_EXT, 2, b'o', b'k',
                ERL_SMALL_INTEGER_EXT, 42,
            ]
        );
    }

    #[test]
    fn test_encode_list_gets_nil_tail() {
        let bytes = enc("[~i,~i]", vec![Value::Array(vec![1i64.into(), 2i64.into()])]).unwrap();
        assert_eq!(
            bytes,
            vec![ERL_LIST_EXT, 0, 0, 0, 2, ERL_SMALL_INTEGER_EXT, 1, ERL_SMALL_INTEGER_EXT, 2, ERL_NIL_EXT]
        );
    }

    #[test]
    fn test_empty_list_literal_consumes_a_slot() {
        let bytes = enc("[],~i", vec![Value::from("ignored"), Value::from(7i64)]).unwrap();
        assert_eq!(bytes, vec![ERL_NIL_EXT, ERL_SMALL_INTEGER_EXT, 7]);
    }

    #[test]
    fn test_empty_scopes_are_encoded() {
        assert_eq!(enc("{}", vec![Value::Array(vec![])]).unwrap(), vec![ERL_SMALL_TUPLE_EXT, 0]);
        assert_eq!(enc("[ ]", vec![Value::Array(vec![])]).unwrap(), vec![ERL_NIL_EXT]);
    }

    #[test]
    fn test_list_of_empty_list() {
        let bytes = enc("[[]]", vec![Value::Array(vec![])]).unwrap();
        assert_eq!(bytes, vec![ERL_LIST_EXT, 0, 0, 0, 1, ERL_NIL_EXT, ERL_NIL_EXT]);
    }

    #[test]
    fn test_extra_values_are_ignored() {
        let bytes = enc("~i", vec![Value::from(1i64), Value::from(2i64)]).unwrap();
        assert_eq!(bytes, vec![ERL_SMALL_INTEGER_EXT, 1]);
    }

    #[test]
    fn test_float_accepts_int() {
        let bytes = enc("~f", vec![Value::from(2i64)]).unwrap();
        let mut expected = vec![NEW_FLOAT_EXT];
        expected.extend_from_slice(&2.0f64.to_bits().to_be_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_self_pid_resolution() {
        let pid = ErlangPid::new("peb_client_1@host", 1, 0, 2);
        let expected = pid.clone();
        let resolver = move |handle: LinkHandle| (handle == LinkHandle(9)).then(|| expected.clone());

        let buf = encode("~p", &[Value::Link(LinkHandle(9))], false, &resolver).unwrap();
        let mut direct = Vec::new();
        encode_pid(&mut direct, &pid).unwrap();
        assert_eq!(buf.as_bytes(), direct.as_slice());

        assert_eq!(
            encode("~p", &[Value::Link(LinkHandle(1))], false, &resolver),
            Err(EncodeError::UnknownLink(LinkHandle(1)))
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            enc("~a,~i", vec![Value::from("x")]),
            Err(EncodeError::MissingValue { position: 3 })
        );
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            enc("~i", vec![Value::from("x")]),
            Err(EncodeError::TypeMismatch {
                position: 0,
                directive: "~i",
                found: "text"
            })
        );
        assert!(matches!(
            enc("{~a}", vec![Value::from(1i64)]),
            Err(EncodeError::TypeMismatch { directive: "{", .. })
        ));
    }

    #[test]
    fn test_format_errors_surface() {
        assert!(matches!(enc("~z", vec![]), Err(EncodeError::BadDirective { found: 'z', .. })));
        assert!(matches!(enc("{~a", vec![]), Err(EncodeError::UnbalancedFormat { .. })));
    }

    #[test]
    fn test_atom_too_long() {
        let name = "a".repeat(256);
        assert_eq!(enc("~a", vec![Value::from(name)]), Err(EncodeError::AtomTooLong(256)));
    }
}
