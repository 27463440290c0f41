//! Encode Atom Module
//!
//! Provides functionality to encode atoms to EI format.
//! Atoms are always written as UTF-8: `SMALL_ATOM_UTF8_EXT` when the name fits
//! in 255 bytes, `ATOM_UTF8_EXT` otherwise.
//! Based on lib/erl_interface/src/encode/encode_atom.c

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

use crate::constants::{ERL_ATOM_UTF8_EXT, ERL_SMALL_ATOM_UTF8_EXT, MAX_ATOM_CHARACTERS};
use crate::error::EncodeError;

/// Encode an atom to EI format
///
/// # Arguments
/// * `buf` - Buffer to write encoded data to
/// * `atom_name` - Atom name
///
/// # Returns
/// * `Ok(bytes_written)` - Number of bytes written
/// * `Err(EncodeError::AtomTooLong)` - More than 255 characters
pub fn encode_atom(buf: &mut Vec<u8>, atom_name: &str) -> Result<usize, EncodeError> {
    let characters = atom_name.chars().count();
    if characters > MAX_ATOM_CHARACTERS {
        return Err(EncodeError::AtomTooLong(characters));
    }

    let name_bytes = atom_name.as_bytes();
    let len = name_bytes.len();
    let initial_len = buf.len();

    if len <= 0xFF {
        buf.push(ERL_SMALL_ATOM_UTF8_EXT);
        buf.push(len as u8);
    } else {
        // 255 characters of up to 4 bytes each always fit in u16
        buf.push(ERL_ATOM_UTF8_EXT);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    }
    buf.extend_from_slice(name_bytes);

    Ok(buf.len() - initial_len)
}
