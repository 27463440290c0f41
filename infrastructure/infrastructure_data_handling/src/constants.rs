//! EI Format Constants
//!
//! Defines the tag constants used in the Erlang Interface (EI) format.
//! These match the constants defined in lib/erl_interface/src/eidef.h

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

/// New float (IEEE 754, 8 bytes)
pub const NEW_FLOAT_EXT: u8 = 70;

/// New PID (32-bit creation)
pub const ERL_NEW_PID_EXT: u8 = 88;

/// Small integer (0-255)
pub const ERL_SMALL_INTEGER_EXT: u8 = 97;

/// Integer (32-bit signed)
pub const ERL_INTEGER_EXT: u8 = 98;

/// Float (old format, 31 bytes of text)
pub const ERL_FLOAT_EXT: u8 = 99;

/// Atom (Latin-1, 2-byte length)
pub const ERL_ATOM_EXT: u8 = 100;

/// PID (8-bit creation)
pub const ERL_PID_EXT: u8 = 103;

/// Small tuple (arity <= 255)
pub const ERL_SMALL_TUPLE_EXT: u8 = 104;

/// Large tuple (arity > 255)
pub const ERL_LARGE_TUPLE_EXT: u8 = 105;

/// Nil (empty list)
pub const ERL_NIL_EXT: u8 = 106;

/// String (byte list, 2-byte length)
pub const ERL_STRING_EXT: u8 = 107;

/// List
pub const ERL_LIST_EXT: u8 = 108;

/// Binary
pub const ERL_BINARY_EXT: u8 = 109;

/// Small big integer (arity <= 255 bytes)
pub const ERL_SMALL_BIG_EXT: u8 = 110;

/// Large big integer (arity > 255 bytes)
pub const ERL_LARGE_BIG_EXT: u8 = 111;

/// Small atom (Latin-1, length <= 255)
pub const ERL_SMALL_ATOM_EXT: u8 = 115;

/// Atom UTF-8
pub const ERL_ATOM_UTF8_EXT: u8 = 118;

/// Small atom UTF-8
pub const ERL_SMALL_ATOM_UTF8_EXT: u8 = 119;

/// Version
pub const ERL_VERSION: u8 = 131;

/// Maximum value for ERL_INTEGER_EXT (2^31 - 1)
pub const ERL_MAX: i64 = 2_147_483_647;

/// Minimum value for ERL_INTEGER_EXT (-2^31)
pub const ERL_MIN: i64 = -2_147_483_648;

/// Longest string that still fits STRING_EXT
pub const MAX_STRING_EXT_LEN: usize = 0xFFFF;

/// Maximum number of characters in an atom
pub const MAX_ATOM_CHARACTERS: usize = 255;

/// Width of the FLOAT_EXT text field
pub const FLOAT_EXT_TEXT_LEN: usize = 31;
