//! Version Module
//!
//! The leading format-version byte of a standalone encoded term.
//! Based on lib/erl_interface/src/encode/encode_version.c and
//! lib/erl_interface/src/decode/decode_version.c

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

use crate::constants::ERL_VERSION;
use crate::error::{take_tag, DecodeError};

/// Write the version byte
pub fn encode_version(buf: &mut Vec<u8>) -> usize {
    buf.push(ERL_VERSION);
    1
}

/// Consume the version byte
///
/// # Returns
/// * `Ok(())` - The byte was 131
/// * `Err(DecodeError::InvalidVersion)` - Any other byte
pub fn decode_version(buf: &[u8], index: &mut usize) -> Result<(), DecodeError> {
    let start = *index;
    match take_tag(buf, index)? {
        ERL_VERSION => Ok(()),
        other => {
            *index = start;
            Err(DecodeError::InvalidVersion(other))
        }
    }
}
