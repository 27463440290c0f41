//! Error Module
//!
//! Errors raised by the wire-level encoders and decoders.

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Lee Barney 2025. All Rights Reserved.
 *
 * This file is derived from work copyrighted by Ericsson AB 1996-2025.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

use thiserror::Error;

/// Encoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Atom name longer than 255 characters
    #[error("atom too long: {0} characters (max 255)")]
    AtomTooLong(usize),
    /// Erlang has no representation for NaN or infinities
    #[error("float value is not finite")]
    NonFiniteFloat,
    /// Length does not fit the wire format's length field
    #[error("value too large to encode: {0} elements")]
    TooLarge(usize),
}

/// Decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer ended before the term did
    #[error("buffer too short")]
    BufferTooShort,
    /// Tag byte does not introduce the expected kind of term
    #[error("unexpected tag {0}")]
    UnexpectedTag(u8),
    /// Leading byte is not the format version
    #[error("invalid version byte {0} (expected 131)")]
    InvalidVersion(u8),
    /// Integer does not fit in 64 bits
    #[error("integer does not fit in 64 bits")]
    IntegerOverflow,
    /// FLOAT_EXT text could not be parsed
    #[error("invalid float text")]
    InvalidFloat,
    /// Atom bytes are not valid for their encoding
    #[error("invalid atom encoding")]
    InvalidAtom,
}

/// Read `N` bytes at `*index`, advancing the index
pub(crate) fn take<const N: usize>(buf: &[u8], index: &mut usize) -> Result<[u8; N], DecodeError> {
    let end = index.checked_add(N).ok_or(DecodeError::BufferTooShort)?;
    let slice = buf.get(*index..end).ok_or(DecodeError::BufferTooShort)?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    *index = end;
    Ok(out)
}

/// Read `len` bytes at `*index`, advancing the index
pub(crate) fn take_slice<'a>(
    buf: &'a [u8],
    index: &mut usize,
    len: usize,
) -> Result<&'a [u8], DecodeError> {
    let end = index.checked_add(len).ok_or(DecodeError::BufferTooShort)?;
    let slice = buf.get(*index..end).ok_or(DecodeError::BufferTooShort)?;
    *index = end;
    Ok(slice)
}

/// Read the tag byte at `*index`, advancing the index
pub(crate) fn take_tag(buf: &[u8], index: &mut usize) -> Result<u8, DecodeError> {
    let [tag] = take::<1>(buf, index)?;
    Ok(tag)
}
