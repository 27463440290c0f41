//! Integer Encoding Module
//!
//! Provides functionality to encode integers to EI format.
//!
//! | Range | Tag |
//! |---|---|
//! | `0..=255` | `SMALL_INTEGER_EXT` |
//! | `i32` | `INTEGER_EXT` |
//! | anything else | `SMALL_BIG_EXT` (sign byte, little-endian magnitude) |
//!
//! Based on lib/erl_interface/src/encode/encode_longlong.c

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

/// Encode a signed 64-bit integer to EI format
///
/// # Arguments
/// * `buf` - Buffer to write encoded data to
/// * `value` - The integer value to encode
///
/// # Returns
/// * Number of bytes written
pub fn encode_long(buf: &mut Vec<u8>, value: i64) -> usize {
    let initial_len = buf.len();

    if (0..=255).contains(&value) {
        buf.push(ERL_SMALL_INTEGER_EXT);
        buf.push(value as u8);
    } else if (ERL_MIN..=ERL_MAX).contains(&value) {
        buf.push(ERL_INTEGER_EXT);
        buf.extend_from_slice(&(value as i32).to_be_bytes());
    } else {
        let magnitude = value.unsigned_abs();
        let digits = magnitude.to_le_bytes();
        let arity = 8 - (magnitude.leading_zeros() / 8) as usize;
        buf.push(ERL_SMALL_BIG_EXT);
        buf.push(arity as u8);
        buf.push(u8::from(value < 0));
        buf.extend_from_slice(&digits[..arity]);
    }

    buf.len() - initial_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_small_integer() {
        let mut buf = Vec::new();
        assert_eq!(encode_long(&mut buf, 42), 2);
        assert_eq!(buf, vec![ERL_SMALL_INTEGER_EXT, 42]);
    }

    #[test]
    fn test_encode_negative_uses_integer_ext() {
        let mut buf = Vec::new();
        assert_eq!(encode_long(&mut buf, -1), 5);
        assert_eq!(buf, vec![ERL_INTEGER_EXT, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_encode_256() {
        let mut buf = Vec::new();
        encode_long(&mut buf, 256);
        assert_eq!(buf, vec![ERL_INTEGER_EXT, 0, 0, 1, 0]);
    }

    #[test]
    fn test_encode_big_positive() {
        let mut buf = Vec::new();
        let written = encode_long(&mut buf, 1 << 32);
        assert_eq!(buf, vec![ERL_SMALL_BIG_EXT, 5, 0, 0, 0, 0, 0, 1]);
        assert_eq!(written, 8);
    }

    #[test]
    fn test_encode_i64_min() {
        let mut buf = Vec::new();
        encode_long(&mut buf, i64::MIN);
        assert_eq!(buf, vec![ERL_SMALL_BIG_EXT, 8, 1, 0, 0, 0, 0, 0, 0, 0, 0x80]);
    }
}
