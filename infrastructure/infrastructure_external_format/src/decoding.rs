//! Decoding Module
//!
//! Tag-dispatched recursive decoder from ETF bytes to a [`Term`] tree.
//! Lists are read as a run of list headers: each non-empty header is
//! followed by its elements, and the run ends at a zero-length header (nil).
//! Any tag outside the supported set fails the whole call.

use entities_data_handling::{EncodedBuffer, Term};
use infrastructure_data_handling::constants::*;
use infrastructure_data_handling::{
    decode_atom, decode_binary, decode_double, decode_list_header, decode_long, decode_pid,
    decode_string, decode_tuple_header, decode_version, get_type,
    DecodeError as WireDecodeError,
};
use thiserror::Error;
use tracing::debug;

/// Deepest container nesting the decoder accepts
///
/// Only non-empty tuples and lists count; list length and segmented list
/// runs do not.
pub const MAX_DEPTH: usize = 1024;

/// Decoding error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unsupported tag {0}")]
    UnsupportedTag(u8),
    #[error("buffer too short")]
    BufferTooShort,
    #[error("invalid version byte {0} (expected 131)")]
    InvalidVersion(u8),
    #[error("integer does not fit in 64 bits")]
    IntegerOverflow,
    #[error("invalid float text")]
    InvalidFloat,
    #[error("invalid atom")]
    InvalidAtom,
    #[error("improper list tail")]
    ImproperList,
    #[error("term nested deeper than {0} levels")]
    TooDeep(usize),
}

impl From<WireDecodeError> for DecodeError {
    fn from(err: WireDecodeError) -> Self {
        match err {
            WireDecodeError::BufferTooShort => DecodeError::BufferTooShort,
            WireDecodeError::UnexpectedTag(tag) => DecodeError::UnsupportedTag(tag),
            WireDecodeError::InvalidVersion(v) => DecodeError::InvalidVersion(v),
            WireDecodeError::IntegerOverflow => DecodeError::IntegerOverflow,
            WireDecodeError::InvalidFloat => DecodeError::InvalidFloat,
            WireDecodeError::InvalidAtom => DecodeError::InvalidAtom,
        }
    }
}

/// Decode one term
///
/// # Arguments
/// * `buf` - Encoded bytes
/// * `with_version` - Expect and consume a leading version byte 131
///
/// # Returns
/// * `Ok(Term)` - The first term in the buffer; trailing bytes are ignored
/// * `Err(DecodeError)` - Decoding error; no partial tree is returned
pub fn decode(buf: &[u8], with_version: bool) -> Result<Term, DecodeError> {
    let mut index = 0;
    decode_at(buf, &mut index, with_version)
}

/// Decode one term starting at `*index`, advancing the index past it
pub fn decode_at(buf: &[u8], index: &mut usize, with_version: bool) -> Result<Term, DecodeError> {
    let start = *index;
    let result = if with_version {
        decode_version(buf, index)
            .map_err(DecodeError::from)
            .and_then(|_| decode_term(buf, index))
    } else {
        decode_term(buf, index)
    };
    if let Err(ref err) = result {
        debug!(error = %err, offset = *index, len = buf.len(), "term decode failed");
        *index = start;
    }
    result
}

/// Decode the term at the buffer's cursor and move the cursor past it
///
/// On failure the cursor stays where it was.
pub fn decode_buffer(buf: &mut EncodedBuffer, with_version: bool) -> Result<Term, DecodeError> {
    let start = buf.cursor();
    let mut index = start;
    let term = decode_at(buf.as_bytes(), &mut index, with_version)?;
    buf.advance(index - start);
    Ok(term)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Container {
    Tuple,
    List,
}

/// A container whose elements are still being read
struct Frame {
    container: Container,
    /// Elements left in the tuple, or in the current list run
    remaining: usize,
    items: Vec<Term>,
}

fn decode_term(buf: &[u8], index: &mut usize) -> Result<Term, DecodeError> {
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        let Some(mut term) = decode_one(buf, index, &mut stack)? else {
            continue;
        };

        // Fold the finished term into its parents for as long as they complete
        loop {
            let Some(frame) = stack.last_mut() else {
                return Ok(term);
            };
            frame.items.push(term);
            frame.remaining -= 1;
            if frame.remaining > 0 {
                break;
            }
            if frame.container == Container::List {
                let len = match decode_list_header(buf, index) {
                    Ok(len) => len,
                    // Tail is neither nil nor another list run
                    Err(WireDecodeError::UnexpectedTag(_)) => return Err(DecodeError::ImproperList),
                    Err(err) => return Err(err.into()),
                };
                if len > 0 {
                    frame.remaining = len;
                    frame.items.reserve(bounded_capacity(len, buf, *index));
                    break;
                }
            }
            term = match stack.pop() {
                Some(Frame { container: Container::Tuple, items, .. }) => Term::Tuple(items),
                Some(Frame { items, .. }) => Term::List(items),
                None => return Err(DecodeError::BufferTooShort),
            };
        }
    }
}

/// Read one scalar, or open a container
///
/// Returns `None` when a non-empty container was pushed onto `stack`.
fn decode_one(
    buf: &[u8],
    index: &mut usize,
    stack: &mut Vec<Frame>,
) -> Result<Option<Term>, DecodeError> {
    let tag = get_type(buf, *index)?;
    let term = match tag {
        ERL_ATOM_EXT | ERL_SMALL_ATOM_EXT | ERL_ATOM_UTF8_EXT | ERL_SMALL_ATOM_UTF8_EXT => {
            Term::Atom(decode_atom(buf, index)?)
        }
        ERL_STRING_EXT => Term::Str(decode_string(buf, index)?),
        ERL_BINARY_EXT => Term::Binary(decode_binary(buf, index)?),
        ERL_SMALL_INTEGER_EXT | ERL_INTEGER_EXT | ERL_SMALL_BIG_EXT => {
            Term::Integer(decode_long(buf, index)?)
        }
        ERL_FLOAT_EXT | NEW_FLOAT_EXT => Term::Float(decode_double(buf, index)?),
        ERL_PID_EXT | ERL_NEW_PID_EXT => Term::Pid(decode_pid(buf, index)?),
        ERL_SMALL_TUPLE_EXT | ERL_LARGE_TUPLE_EXT => {
            let arity = decode_tuple_header(buf, index)?;
            if arity == 0 {
                Term::Tuple(Vec::new())
            } else {
                open(stack, Container::Tuple, arity, buf, *index)?;
                return Ok(None);
            }
        }
        ERL_NIL_EXT | ERL_LIST_EXT => {
            let len = decode_list_header(buf, index)?;
            if len == 0 {
                Term::nil()
            } else {
                open(stack, Container::List, len, buf, *index)?;
                return Ok(None);
            }
        }
        other => return Err(DecodeError::UnsupportedTag(other)),
    };
    Ok(Some(term))
}

fn open(
    stack: &mut Vec<Frame>,
    container: Container,
    len: usize,
    buf: &[u8],
    index: usize,
) -> Result<(), DecodeError> {
    if stack.len() >= MAX_DEPTH {
        return Err(DecodeError::TooDeep(MAX_DEPTH));
    }
    stack.push(Frame {
        container,
        remaining: len,
        items: Vec::with_capacity(bounded_capacity(len, buf, index)),
    });
    Ok(())
}

/// Every element takes at least one byte, so never pre-allocate past the input
fn bounded_capacity(declared: usize, buf: &[u8], index: usize) -> usize {
    declared.min(buf.len().saturating_sub(index))
}
