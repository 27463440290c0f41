//! Print Term Module
//!
//! Renders a decoded term in Erlang syntax, as the shell would print it.
//! Based on lib/erl_interface/src/misc/ei_printterm.c

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

use std::fmt::Write;

use entities_data_handling::Term;

/// Reserved words that must be quoted when used as atoms
const RESERVED_WORDS: &[&str] = &[
    "after", "and", "andalso", "band", "begin", "bnot", "bor", "bsl", "bsr", "bxor", "case",
    "catch", "cond", "div", "end", "fun", "if", "let", "maybe", "not", "of", "or", "orelse",
    "receive", "rem", "try", "when", "xor",
];

/// Print a term to a string
///
/// # Arguments
/// * `term` - Term to print
///
/// # Returns
/// * String representation in Erlang syntax
pub fn s_print_term(term: &Term) -> String {
    let mut out = String::new();
    print_term_internal(term, &mut out);
    out
}

/// Print a term to stdout
pub fn print_term(term: &Term) {
    print!("{}", s_print_term(term));
}

/// Internal printing function
fn print_term_internal(term: &Term, out: &mut String) {
    match term {
        Term::Atom(name) => print_atom(name, out),
        Term::Integer(n) => {
            let _ = write!(out, "{}", n);
        }
        Term::Float(f) => print_float(*f, out),
        Term::Str(data) => print_string(data, out),
        Term::Binary(data) => {
            out.push_str("<<");
            print_separated(data.iter(), out, |byte, out| {
                let _ = write!(out, "{}", byte);
            });
            out.push_str(">>");
        }
        Term::Pid(pid) => {
            let _ = write!(out, "{}", pid);
        }
        Term::Tuple(elements) => {
            out.push('{');
            print_separated(elements.iter(), out, print_term_internal);
            out.push('}');
        }
        Term::List(elements) => {
            out.push('[');
            print_separated(elements.iter(), out, print_term_internal);
            out.push(']');
        }
    }
}

fn print_separated<I, T, F>(items: I, out: &mut String, mut print: F)
where
    I: Iterator<Item = T>,
    F: FnMut(T, &mut String),
{
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(',');
        }
        print(item, out);
    }
}

fn print_atom(name: &str, out: &mut String) {
    if atom_needs_quotes(name) {
        out.push('\'');
        for c in name.chars() {
            push_escaped(c, '\'', out);
        }
        out.push('\'');
    } else {
        out.push_str(name);
    }
}

fn atom_needs_quotes(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return true,
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@') {
        return true;
    }
    RESERVED_WORDS.contains(&name)
}

/// Printable byte strings print as `"..."`, anything else as a list of integers
fn print_string(data: &[u8], out: &mut String) {
    let printable = data
        .iter()
        .all(|&b| (0x20..0x7F).contains(&b) || matches!(b, b'\n' | b'\r' | b'\t' | 0x0B | 0x0C | 0x08 | 0x1B));
    if printable {
        out.push('"');
        for &b in data {
            push_escaped(b as char, '"', out);
        }
        out.push('"');
    } else {
        out.push('[');
        print_separated(data.iter(), out, |byte, out| {
            let _ = write!(out, "{}", byte);
        });
        out.push(']');
    }
}

fn push_escaped(c: char, quote: char, out: &mut String) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{0B}' => out.push_str("\\v"),
        '\u{0C}' => out.push_str("\\f"),
        '\u{08}' => out.push_str("\\b"),
        '\u{1B}' => out.push_str("\\e"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\{:03o}", c as u32);
        }
        c => out.push(c),
    }
}

/// Erlang float literals always carry a fractional part
fn print_float(f: f64, out: &mut String) {
    let text = format!("{:?}", f);
    match text.find('e') {
        Some(pos) if !text[..pos].contains('.') => {
            out.push_str(&text[..pos]);
            out.push_str(".0");
            out.push_str(&text[pos..]);
        }
        Some(_) => out.push_str(&text),
        None if text.contains('.') => out.push_str(&text),
        None => {
            out.push_str(&text);
            out.push_str(".0");
        }
    }
}
