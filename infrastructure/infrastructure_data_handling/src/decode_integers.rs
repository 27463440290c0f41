//! Integer Decoding Module
//!
//! Provides functionality to decode integers from EI format.
//! Based on lib/erl_interface/src/decode/decode_longlong.c

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

/// Decode a signed 64-bit integer from EI format
///
/// Bignums are accepted as long as their magnitude fits in an `i64`.
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Current index in buffer, advanced past the integer
///
/// # Returns
/// * `Ok(value)` - Decoded value
/// * `Err(DecodeError)` - Decoding error
pub fn decode_long(buf: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let tag = take_tag(buf, index)?;

    match tag {
        ERL_SMALL_INTEGER_EXT => Ok(take::<1>(buf, index)?[0] as i64),
        ERL_INTEGER_EXT => Ok(i32::from_be_bytes(take::<4>(buf, index)?) as i64),
        ERL_SMALL_BIG_EXT | ERL_LARGE_BIG_EXT => {
            let arity = if tag == ERL_SMALL_BIG_EXT {
                take::<1>(buf, index)?[0] as usize
            } else {
                u32::from_be_bytes(take::<4>(buf, index)?) as usize
            };
            let [sign] = take::<1>(buf, index)?;
            let digits = take_slice(buf, index, arity)?;
            bignum_to_i64(sign != 0, digits)
        }
        _ => Err(DecodeError::UnexpectedTag(tag)),
    }
}

/// Fold little-endian magnitude digits into an `i64`
fn bignum_to_i64(negative: bool, digits: &[u8]) -> Result<i64, DecodeError> {
    if digits.iter().skip(8).any(|&d| d != 0) {
        return Err(DecodeError::IntegerOverflow);
    }
    let magnitude = digits
        .iter()
        .take(8)
        .enumerate()
        .fold(0u64, |acc, (i, &d)| acc | (u64::from(d) << (i * 8)));

    if negative {
        if magnitude > 1 << 63 {
            return Err(DecodeError::IntegerOverflow);
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| DecodeError::IntegerOverflow)
    }
}
