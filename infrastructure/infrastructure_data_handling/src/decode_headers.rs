//! Header Decoding Module
//!
//! Provides functionality to decode tuple and list headers from EI format,
//! and to peek at the tag of the next term.
//! Based on lib/erl_interface/src/decode/decode_tuple_header.c

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
use crate::error::{take, take_tag, DecodeError};

/// Peek at the tag byte of the next term without consuming it
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Index of the term
///
/// # Returns
/// * `Ok(tag)` - The tag byte
/// * `Err(DecodeError::BufferTooShort)` - No byte at `index`
pub fn get_type(buf: &[u8], index: usize) -> Result<u8, DecodeError> {
    buf.get(index).copied().ok_or(DecodeError::BufferTooShort)
}

/// Decode a tuple header from EI format
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Current index in buffer, advanced past the header
///
/// # Returns
/// * `Ok(arity)` - Number of elements that follow
/// * `Err(DecodeError)` - Decoding error
pub fn decode_tuple_header(buf: &[u8], index: &mut usize) -> Result<usize, DecodeError> {
    match take_tag(buf, index)? {
        ERL_SMALL_TUPLE_EXT => Ok(take::<1>(buf, index)?[0] as usize),
        ERL_LARGE_TUPLE_EXT => Ok(u32::from_be_bytes(take::<4>(buf, index)?) as usize),
        tag => Err(DecodeError::UnexpectedTag(tag)),
    }
}

/// Decode a list header from EI format
///
/// `NIL_EXT` decodes as a header of length 0.
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Current index in buffer, advanced past the header
///
/// # Returns
/// * `Ok(len)` - Number of elements that follow (a tail follows them)
/// * `Err(DecodeError)` - Decoding error
pub fn decode_list_header(buf: &[u8], index: &mut usize) -> Result<usize, DecodeError> {
    match take_tag(buf, index)? {
        ERL_NIL_EXT => Ok(0),
        ERL_LIST_EXT => Ok(u32::from_be_bytes(take::<4>(buf, index)?) as usize),
        tag => Err(DecodeError::UnexpectedTag(tag)),
    }
}
