//! Decode Atom Module
//!
//! Provides functionality to decode EI-encoded atoms.
//! Based on lib/erl_interface/src/decode/decode_atom.c

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

use crate::constants::*;
use crate::error::{take, take_slice, take_tag, DecodeError};

/// Decode an atom from EI-encoded bytes
///
/// Accepts all four atom tags. Latin-1 atoms are widened to UTF-8.
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Current index in buffer, advanced past the atom
///
/// # Returns
/// * `Ok(atom_name)` - Decoded atom name
/// * `Err(DecodeError)` - Decoding error
pub fn decode_atom(buf: &[u8], index: &mut usize) -> Result<String, DecodeError> {
    let tag = take_tag(buf, index)?;
    let len = match tag {
        ERL_ATOM_EXT | ERL_ATOM_UTF8_EXT => u16::from_be_bytes(take::<2>(buf, index)?) as usize,
        ERL_SMALL_ATOM_EXT | ERL_SMALL_ATOM_UTF8_EXT => take::<1>(buf, index)?[0] as usize,
        _ => return Err(DecodeError::UnexpectedTag(tag)),
    };
    let data = take_slice(buf, index, len)?;

    match tag {
        ERL_ATOM_EXT | ERL_SMALL_ATOM_EXT => Ok(latin1_to_string(data)),
        _ => {
            let name = std::str::from_utf8(data).map_err(|_| DecodeError::InvalidAtom)?;
            if name.chars().count() > MAX_ATOM_CHARACTERS {
                return Err(DecodeError::InvalidAtom);
            }
            Ok(name.to_string())
        }
    }
}

/// Latin-1 code points map one to one onto the first 256 Unicode scalars
fn latin1_to_string(data: &[u8]) -> String {
    data.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_small_atom() {
        let buf = vec![ERL_SMALL_ATOM_EXT, 3, b'f', b'o', b'o'];
        let mut index = 0;
        assert_eq!(decode_atom(&buf, &mut index).unwrap(), "foo");
        assert_eq!(index, 5);
    }

    #[test]
    fn test_decode_atom_ext() {
        let buf = vec![ERL_ATOM_EXT, 0, 2, b'o', b'k'];
        let mut index = 0;
        assert_eq!(decode_atom(&buf, &mut index).unwrap(), "ok");
        assert_eq!(index, 5);
    }

    #[test]
    fn test_decode_latin1_atom_widens() {
        let buf = vec![ERL_SMALL_ATOM_EXT, 2, b'a', 0xE9];
        let mut index = 0;
        assert_eq!(decode_atom(&buf, &mut index).unwrap(), "aé");
    }

    #[test]
    fn test_decode_utf8_atoms() {
        let mut buf = vec![ERL_SMALL_ATOM_UTF8_EXT, 2];
        buf.extend_from_slice("é".as_bytes());
        let mut index = 0;
        assert_eq!(decode_atom(&buf, &mut index).unwrap(), "é");

        let buf = vec![ERL_ATOM_UTF8_EXT, 0, 1, b'x'];
        let mut index = 0;
        assert_eq!(decode_atom(&buf, &mut index).unwrap(), "x");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let buf = vec![ERL_SMALL_ATOM_UTF8_EXT, 2, 0xC3, 0x28];
        let mut index = 0;
        assert_eq!(decode_atom(&buf, &mut index), Err(DecodeError::InvalidAtom));
    }

    #[test]
    fn test_decode_atom_buffer_too_short() {
        let buf = vec![ERL_SMALL_ATOM_EXT, 10];
        let mut index = 0;
        assert_eq!(decode_atom(&buf, &mut index), Err(DecodeError::BufferTooShort));
    }

    #[test]
    fn test_decode_atom_wrong_tag() {
        let buf = vec![ERL_SMALL_INTEGER_EXT, 1];
        let mut index = 0;
        assert_eq!(decode_atom(&buf, &mut index), Err(DecodeError::UnexpectedTag(97)));
    }
}
