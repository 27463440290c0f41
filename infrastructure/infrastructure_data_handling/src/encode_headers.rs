//! Header Encoding Module
//!
//! Provides functionality to encode compound type headers (tuples, lists) to
//! EI format. Headers specify the structure and size of compound types before
//! their elements are written.
//!
//! ## Header Types
//!
//! - **Tuple Headers**: `ERL_SMALL_TUPLE_EXT` (<= 255 elements) or `ERL_LARGE_TUPLE_EXT` (> 255)
//! - **List Headers**: `ERL_LIST_EXT` with a 4-byte length, or `ERL_NIL_EXT` for the empty list
//!
//! A non-empty list header must be followed by its elements and then a tail;
//! a proper list ends with [`encode_empty_list`].
//!
//! ## Examples
//!
//! ```rust
//! use infrastructure_data_handling::encode_headers::*;
//! use infrastructure_data_handling::encode_integers::encode_long;
//!
//! let mut buf = Vec::new();
//! encode_list_header(&mut buf, 2).unwrap();
//! encode_long(&mut buf, 1);
//! encode_long(&mut buf, 2);
//! encode_empty_list(&mut buf);
//! assert_eq!(buf, vec![108, 0, 0, 0, 2, 97, 1, 97, 2, 106]);
//! ```
//!
//! Based on `lib/erl_interface/src/encode/encode_tuple_header.c` and
//! `encode_list_header.c`

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

/// Encode a tuple header to EI format
///
/// # Arguments
/// * `buf` - Buffer to write encoded data to
/// * `arity` - Number of elements in the tuple
///
/// # Returns
/// * `Ok(bytes_written)` - Number of bytes written
/// * `Err(EncodeError::TooLarge)` - Arity does not fit in 32 bits
pub fn encode_tuple_header(buf: &mut Vec<u8>, arity: usize) -> Result<usize, EncodeError> {
    if arity <= 0xFF {
        buf.push(ERL_SMALL_TUPLE_EXT);
        buf.push(arity as u8);
        Ok(2)
    } else {
        let arity = u32::try_from(arity).map_err(|_| EncodeError::TooLarge(arity))?;
        buf.push(ERL_LARGE_TUPLE_EXT);
        buf.extend_from_slice(&arity.to_be_bytes());
        Ok(5)
    }
}

/// Encode a list header to EI format
///
/// A length of zero writes `NIL_EXT`.
///
/// # Arguments
/// * `buf` - Buffer to write encoded data to
/// * `len` - Number of elements that follow
///
/// # Returns
/// * `Ok(bytes_written)` - Number of bytes written
/// * `Err(EncodeError::TooLarge)` - Length does not fit in 32 bits
pub fn encode_list_header(buf: &mut Vec<u8>, len: usize) -> Result<usize, EncodeError> {
    if len == 0 {
        return Ok(encode_empty_list(buf));
    }
    let len = u32::try_from(len).map_err(|_| EncodeError::TooLarge(len))?;
    buf.push(ERL_LIST_EXT);
    buf.extend_from_slice(&len.to_be_bytes());
    Ok(5)
}

/// Encode the empty list (`NIL_EXT`)
pub fn encode_empty_list(buf: &mut Vec<u8>) -> usize {
    buf.push(ERL_NIL_EXT);
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_small_tuple_header() {
        let mut buf = Vec::new();
        assert_eq!(encode_tuple_header(&mut buf, 3).unwrap(), 2);
        assert_eq!(buf, vec![ERL_SMALL_TUPLE_EXT, 3]);
    }

    #[test]
    fn test_encode_large_tuple_header() {
        let mut buf = Vec::new();
        assert_eq!(encode_tuple_header(&mut buf, 256).unwrap(), 5);
        assert_eq!(buf, vec![ERL_LARGE_TUPLE_EXT, 0, 0, 1, 0]);
    }

    #[test]
    fn test_encode_empty_tuple_header() {
        let mut buf = Vec::new();
        encode_tuple_header(&mut buf, 0).unwrap();
        assert_eq!(buf, vec![ERL_SMALL_TUPLE_EXT, 0]);
    }

    #[test]
    fn test_encode_list_header() {
        let mut buf = Vec::new();
        assert_eq!(encode_list_header(&mut buf, 2).unwrap(), 5);
        assert_eq!(buf, vec![ERL_LIST_EXT, 0, 0, 0, 2]);
    }

    #[test]
    fn test_encode_zero_length_list_header_is_nil() {
        let mut buf = Vec::new();
        assert_eq!(encode_list_header(&mut buf, 0).unwrap(), 1);
        assert_eq!(buf, vec![ERL_NIL_EXT]);
    }
}
