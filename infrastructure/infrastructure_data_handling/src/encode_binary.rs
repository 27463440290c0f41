//! Encode Binary Module
//!
//! Provides functionality to encode binaries to EI format.
//! Based on lib/erl_interface/src/encode/encode_binary.c

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
use crate::error::EncodeError;

/// Encode a binary to EI format
///
/// # Arguments
/// * `buf` - Buffer to write encoded data to
/// * `data` - Binary data to encode
///
/// # Returns
/// * `Ok(bytes_written)` - Number of bytes written
/// * `Err(EncodeError::TooLarge)` - Length does not fit in 32 bits
pub fn encode_binary(buf: &mut Vec<u8>, data: &[u8]) -> Result<usize, EncodeError> {
    let len = u32::try_from(data.len()).map_err(|_| EncodeError::TooLarge(data.len()))?;
    let initial_len = buf.len();

    buf.push(ERL_BINARY_EXT);
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(data);

    Ok(buf.len() - initial_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_binary() {
        let mut buf = Vec::new();
        let data = vec![1, 2, 3, 4];
        assert_eq!(encode_binary(&mut buf, &data).unwrap(), 9);
        assert_eq!(buf[0], ERL_BINARY_EXT);
        assert_eq!(u32::from_be_bytes([buf[1], buf[2], buf[3], buf[4]]), 4);
        assert_eq!(&buf[5..], &data);
    }

    #[test]
    fn test_encode_binary_empty() {
        let mut buf = Vec::new();
        encode_binary(&mut buf, &[]).unwrap();
        assert_eq!(buf, vec![ERL_BINARY_EXT, 0, 0, 0, 0]);
    }
}
