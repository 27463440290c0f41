//! PID Decoding Module
//!
//! Provides functionality to decode Process IDs (PIDs) from EI format.
//!
//! ## Supported Formats
//!
//! - **ERL_PID_EXT**: Old format with an 8-bit creation field (low 2 bits significant)
//! - **ERL_NEW_PID_EXT**: New format with 32-bit creation number
//!
//! Based on `lib/erl_interface/src/decode/decode_pid.c`

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

use crate::constants::{ERL_NEW_PID_EXT, ERL_PID_EXT};
use crate::decode_atom::decode_atom;
use crate::error::{take, take_tag, DecodeError};
use entities_data_handling::ErlangPid;

/// Decode a PID from EI format
///
/// # Arguments
/// * `buf` - Buffer containing EI-encoded data
/// * `index` - Current index in buffer, advanced past the pid
///
/// # Returns
/// * `Ok(pid)` - Decoded PID
/// * `Err(DecodeError)` - Decoding error
pub fn decode_pid(buf: &[u8], index: &mut usize) -> Result<ErlangPid, DecodeError> {
    let tag = take_tag(buf, index)?;
    if tag != ERL_PID_EXT && tag != ERL_NEW_PID_EXT {
        return Err(DecodeError::UnexpectedTag(tag));
    }

    let node = decode_atom(buf, index)?;
    let id = u32::from_be_bytes(take::<4>(buf, index)?);
    let serial = u32::from_be_bytes(take::<4>(buf, index)?);
    let creation = if tag == ERL_PID_EXT {
        u32::from(take::<1>(buf, index)?[0] & 0x03)
    } else {
        u32::from_be_bytes(take::<4>(buf, index)?)
    };

    Ok(ErlangPid {
        node,
        id,
        serial,
        creation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ERL_SMALL_ATOM_EXT;
    use crate::encode_pid::encode_pid;

    #[test]
    fn test_decode_new_pid() {
        let pid = ErlangPid::new("node@host", 123, 456, 0x1234_5678);
        let mut buf = Vec::new();
        encode_pid(&mut buf, &pid).unwrap();
        let mut index = 0;
        assert_eq!(decode_pid(&buf, &mut index).unwrap(), pid);
        assert_eq!(index, buf.len());
    }

    #[test]
    fn test_decode_old_pid() {
        let mut buf = vec![ERL_PID_EXT, ERL_SMALL_ATOM_EXT, 1, b'n'];
        buf.extend_from_slice(&7u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.push(0xFE);
        let mut index = 0;
        let pid = decode_pid(&buf, &mut index).unwrap();
        assert_eq!(pid, ErlangPid::new("n", 7, 0, 2));
        assert_eq!(index, buf.len());
    }

    #[test]
    fn test_decode_pid_truncated() {
        let buf = vec![ERL_NEW_PID_EXT, ERL_SMALL_ATOM_EXT, 1, b'n', 0, 0];
        let mut index = 0;
        assert_eq!(decode_pid(&buf, &mut index), Err(DecodeError::BufferTooShort));
    }
}
