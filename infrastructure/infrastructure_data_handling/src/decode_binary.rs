//! Decode Binary Module
//!
//! Provides functionality to decode EI-encoded binaries.
//! Based on lib/erl_interface/src/decode/decode_binary.c

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

use crate::constants::ERL_BINARY_EXT;
use crate::error::{take, take_slice, take_tag, DecodeError};

/// Decode a binary from EI-encoded bytes
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Current index in buffer, advanced past the binary
///
/// # Returns
/// * `Ok(binary_data)` - Decoded binary data
/// * `Err(DecodeError)` - Decoding error
pub fn decode_binary(buf: &[u8], index: &mut usize) -> Result<Vec<u8>, DecodeError> {
    let tag = take_tag(buf, index)?;
    if tag != ERL_BINARY_EXT {
        return Err(DecodeError::UnexpectedTag(tag));
    }
    let len = u32::from_be_bytes(take::<4>(buf, index)?) as usize;
    Ok(take_slice(buf, index, len)?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_binary() {
        let buf = vec![ERL_BINARY_EXT, 0, 0, 0, 3, 1, 2, 3];
        let mut index = 0;
        assert_eq!(decode_binary(&buf, &mut index).unwrap(), vec![1, 2, 3]);
        assert_eq!(index, 8);
    }

    #[test]
    fn test_decode_binary_length_past_end() {
        let buf = vec![ERL_BINARY_EXT, 0, 0, 0, 9, 1];
        let mut index = 0;
        assert_eq!(decode_binary(&buf, &mut index), Err(DecodeError::BufferTooShort));
    }

    #[test]
    fn test_decode_binary_invalid_tag() {
        let mut index = 0;
        assert_eq!(decode_binary(&[110, 0], &mut index), Err(DecodeError::UnexpectedTag(110)));
    }
}
