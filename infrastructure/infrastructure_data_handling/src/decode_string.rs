//! Decode String Module
//!
//! Based on lib/erl_interface/src/decode/decode_string.c

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

use crate::constants::{ERL_NIL_EXT, ERL_STRING_EXT};
use crate::error::{take, take_slice, take_tag, DecodeError};

/// Decode a `STRING_EXT` (or `NIL_EXT`, as the empty string)
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Current index in buffer, advanced past the string
///
/// # Returns
/// * `Ok(bytes)` - String bytes
/// * `Err(DecodeError)` - Decoding error
pub fn decode_string(buf: &[u8], index: &mut usize) -> Result<Vec<u8>, DecodeError> {
    match take_tag(buf, index)? {
        ERL_STRING_EXT => {
            let len = u16::from_be_bytes(take::<2>(buf, index)?) as usize;
            Ok(take_slice(buf, index, len)?.to_vec())
        }
        ERL_NIL_EXT => Ok(Vec::new()),
        tag => Err(DecodeError::UnexpectedTag(tag)),
    }
}
