//! PID Encoding Module
//!
//! Provides functionality to encode PIDs to EI format.
//! Based on lib/erl_interface/src/encode/encode_pid.c

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

use crate::constants::ERL_NEW_PID_EXT;
use crate::encode_atom::encode_atom;
use crate::error::EncodeError;
use entities_data_handling::ErlangPid;

/// Encode a PID as `NEW_PID_EXT` (32-bit creation)
///
/// # Arguments
/// * `buf` - Buffer to write encoded data to
/// * `pid` - The PID to encode
///
/// # Returns
/// * `Ok(bytes_written)` - Number of bytes written
/// * `Err(EncodeError)` - The node name is not a valid atom
pub fn encode_pid(buf: &mut Vec<u8>, pid: &ErlangPid) -> Result<usize, EncodeError> {
    let initial_len = buf.len();

    buf.push(ERL_NEW_PID_EXT);
    if let Err(e) = encode_atom(buf, &pid.node) {
        buf.truncate(initial_len);
        return Err(e);
    }
    buf.extend_from_slice(&pid.id.to_be_bytes());
    buf.extend_from_slice(&pid.serial.to_be_bytes());
    buf.extend_from_slice(&pid.creation.to_be_bytes());

    Ok(buf.len() - initial_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ERL_SMALL_ATOM_UTF8_EXT;

    #[test]
    fn test_encode_pid() {
        let pid = ErlangPid::new("a@b", 123, 456, 1);
        let mut buf = Vec::new();
        let written = encode_pid(&mut buf, &pid).unwrap();
        assert_eq!(written, 1 + 5 + 12);
        assert_eq!(buf[0], ERL_NEW_PID_EXT);
        assert_eq!(&buf[1..6], &[ERL_SMALL_ATOM_UTF8_EXT, 3, b'a', b'@', b'b']);
        assert_eq!(&buf[6..10], &123u32.to_be_bytes());
        assert_eq!(&buf[10..14], &456u32.to_be_bytes());
        assert_eq!(&buf[14..18], &1u32.to_be_bytes());
    }

    #[test]
    fn test_encode_pid_bad_node_leaves_buffer_untouched() {
        let pid = ErlangPid::new("n".repeat(300), 1, 0, 0);
        let mut buf = vec![0xAA];
        assert!(encode_pid(&mut buf, &pid).is_err());
        assert_eq!(buf, vec![0xAA]);
    }
}
