//! Double Encoding Module
//!
//! Provides functionality to encode floating-point numbers to EI format.
//! Based on lib/erl_interface/src/encode/encode_double.c

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

use crate::constants::NEW_FLOAT_EXT;
use crate::error::EncodeError;

/// Encode a double-precision floating-point number as `NEW_FLOAT_EXT`
///
/// # Arguments
/// * `buf` - Buffer to write encoded data to
/// * `value` - The floating-point value to encode
///
/// # Returns
/// * `Ok(bytes_written)` - Always 9
/// * `Err(EncodeError::NonFiniteFloat)` - NaN or infinity
pub fn encode_double(buf: &mut Vec<u8>, value: f64) -> Result<usize, EncodeError> {
    // Erlang does not handle Inf and NaN
    if !value.is_finite() {
        return Err(EncodeError::NonFiniteFloat);
    }

    buf.push(NEW_FLOAT_EXT);
    buf.extend_from_slice(&value.to_bits().to_be_bytes());
    Ok(9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_double() {
        let mut buf = Vec::new();
        assert_eq!(encode_double(&mut buf, 1.5).unwrap(), 9);
        assert_eq!(buf[0], NEW_FLOAT_EXT);
        assert_eq!(&buf[1..], &1.5f64.to_bits().to_be_bytes());
    }

    #[test]
    fn test_encode_double_rejects_non_finite() {
        let mut buf = Vec::new();
        assert_eq!(encode_double(&mut buf, f64::NAN), Err(EncodeError::NonFiniteFloat));
        assert_eq!(encode_double(&mut buf, f64::INFINITY), Err(EncodeError::NonFiniteFloat));
        assert!(buf.is_empty());
    }
}
