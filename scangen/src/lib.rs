// scangen - generates dispatch code for hand-written scanners.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Generates the keyword and punctuation dispatch code for a hand-written C
//! scanner.
//!
//! Given the keywords and symbols listed in a [config::Config], this crate
//! builds a prefix [trie::Trie] over each set and writes:
//!
//! - A source file with an identifier dispatch function, which classifies a
//!   scanned identifier as a keyword or plain identifier, and a symbol
//!   dispatch function, which classifies punctuation.
//!
//! - A header that declares the token type enumeration.
//!
//! - A header that declares the two dispatch functions.
//!
//! [codegen::CodeGenerator] is the entry point.

pub mod codegen;
pub mod config;
pub mod dispatch;
pub mod enumeration;
pub mod output;
pub mod token;
pub mod trie;
