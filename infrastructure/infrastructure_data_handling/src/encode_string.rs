//! Encode String Module
//!
//! Byte strings are written the way `ei_encode_string_len` writes them:
//! `NIL_EXT` when empty, `STRING_EXT` up to 65535 bytes, and a proper list
//! of small integers beyond that.
//! Based on lib/erl_interface/src/encode/encode_string.c

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
use crate::error::EncodeError;

/// Encode a byte string to EI format
///
/// # Arguments
/// * `buf` - Buffer to write encoded data to
/// * `data` - String bytes
///
/// # Returns
/// * `Ok(bytes_written)` - Number of bytes written
pub fn encode_string(buf: &mut Vec<u8>, data: &[u8]) -> Result<usize, EncodeError> {
    let initial_len = buf.len();
    let len = data.len();

    if len == 0 {
        buf.push(ERL_NIL_EXT);
    } else if len <= MAX_STRING_EXT_LEN {
        buf.push(ERL_STRING_EXT);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
        buf.extend_from_slice(data);
    } else {
        let len = u32::try_from(len).map_err(|_| EncodeError::TooLarge(len))?;
        buf.push(ERL_LIST_EXT);
        buf.extend_from_slice(&len.to_be_bytes());
        buf.reserve(data.len() * 2 + 1);
        for &byte in data {
            buf.push(ERL_SMALL_INTEGER_EXT);
            buf.push(byte);
        }
        buf.push(ERL_NIL_EXT);
    }

    Ok(buf.len() - initial_len)
}
