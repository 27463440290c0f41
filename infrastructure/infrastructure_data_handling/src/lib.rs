//! Infrastructure Layer: Data Handling
//!
//! Wire-level EI primitives. Each encoder appends one term (or header) to a
//! `Vec<u8>` and reports the number of bytes written; each decoder reads one
//! term at `*index` and advances the index past it.
//!
//! ## Modules
//!
//! - **[`constants`]**: tag bytes and limits
//! - **[`encode_atom`] / [`decode_atom`]**: atoms (UTF-8 out, Latin-1 or UTF-8 in)
//! - **[`encode_string`] / [`decode_string`]**: byte strings
//! - **[`encode_binary`] / [`decode_binary`]**: binaries
//! - **[`encode_integers`] / [`decode_integers`]**: 64-bit integers, including bignums that fit
//! - **[`encode_double`] / [`decode_double`]**: floats
//! - **[`encode_headers`] / [`decode_headers`]**: tuple and list headers, tag peeking
//! - **[`encode_pid`] / [`decode_pid`]**: process identifiers
//! - **[`version`]**: the leading version byte
//! - **[`print_term`]**: Erlang-syntax rendering of a decoded term
//!
//! Based on lib/erl_interface/src/encode, lib/erl_interface/src/decode and
//! lib/erl_interface/src/misc/ei_printterm.c.
//! Depends on Entities layer.

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

pub mod constants;
pub mod error;
pub mod encode_atom;
pub mod decode_atom;
pub mod encode_string;
pub mod decode_string;
pub mod encode_binary;
pub mod decode_binary;
pub mod encode_integers;
pub mod decode_integers;
pub mod encode_double;
pub mod decode_double;
pub mod encode_headers;
pub mod decode_headers;
pub mod encode_pid;
pub mod decode_pid;
pub mod version;
pub mod print_term;

pub use error::{DecodeError, EncodeError};
pub use encode_atom::encode_atom;
pub use decode_atom::decode_atom;
pub use encode_string::encode_string;
pub use decode_string::decode_string;
pub use encode_binary::encode_binary;
pub use decode_binary::decode_binary;
pub use encode_integers::encode_long;
pub use decode_integers::decode_long;
pub use encode_double::encode_double;
pub use decode_double::decode_double;
pub use encode_headers::{encode_empty_list, encode_list_header, encode_tuple_header};
pub use decode_headers::{decode_list_header, decode_tuple_header, get_type};
pub use encode_pid::encode_pid;
pub use decode_pid::decode_pid;
pub use version::{decode_version, encode_version};
pub use print_term::{print_term, s_print_term};
