//! Double Decoding Module
//!
//! Provides functionality to decode floating-point numbers from EI format.
//! Both the IEEE 754 form and the legacy 31-byte text form are accepted.
//! Based on lib/erl_interface/src/decode/decode_double.c

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

use crate::constants::{ERL_FLOAT_EXT, FLOAT_EXT_TEXT_LEN, NEW_FLOAT_EXT};
use crate::error::{take, take_slice, take_tag, DecodeError};

/// Decode a double-precision floating-point number from EI format
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Current index in buffer, advanced past the float
///
/// # Returns
/// * `Ok(value)` - Decoded value
/// * `Err(DecodeError)` - Decoding error
pub fn decode_double(buf: &[u8], index: &mut usize) -> Result<f64, DecodeError> {
    match take_tag(buf, index)? {
        NEW_FLOAT_EXT => Ok(f64::from_bits(u64::from_be_bytes(take::<8>(buf, index)?))),
        ERL_FLOAT_EXT => {
            let text = take_slice(buf, index, FLOAT_EXT_TEXT_LEN)?;
            parse_float_text(text)
        }
        tag => Err(DecodeError::UnexpectedTag(tag)),
    }
}

/// FLOAT_EXT carries a NUL-padded "%.20e" rendering
fn parse_float_text(text: &[u8]) -> Result<f64, DecodeError> {
    let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
    let text = std::str::from_utf8(&text[..end]).map_err(|_| DecodeError::InvalidFloat)?;
    text.trim().parse::<f64>().map_err(|_| DecodeError::InvalidFloat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_ext(text: &str) -> Vec<u8> {
        let mut buf = vec![ERL_FLOAT_EXT];
        let mut field = text.as_bytes().to_vec();
        field.resize(FLOAT_EXT_TEXT_LEN, 0);
        buf.extend_from_slice(&field);
        buf
    }

    #[test]
    fn test_decode_new_float() {
        let mut buf = vec![NEW_FLOAT_EXT];
        buf.extend_from_slice(&(-2.25f64).to_bits().to_be_bytes());
        let mut index = 0;
        assert_eq!(decode_double(&buf, &mut index).unwrap(), -2.25);
        assert_eq!(index, 9);
    }

    #[test]
    fn test_decode_float_ext_text() {
        let buf = float_ext("1.50000000000000000000e+00");
        let mut index = 0;
        assert_eq!(decode_double(&buf, &mut index).unwrap(), 1.5);
        assert_eq!(index, 32);
    }

    #[test]
    fn test_decode_float_ext_garbage() {
        let buf = float_ext("not a float");
        let mut index = 0;
        assert_eq!(decode_double(&buf, &mut index), Err(DecodeError::InvalidFloat));
    }

    #[test]
    fn test_decode_float_truncated() {
        let mut index = 0;
        assert_eq!(decode_double(&[NEW_FLOAT_EXT, 0, 0], &mut index), Err(DecodeError::BufferTooShort));
    }
}
