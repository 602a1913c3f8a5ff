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

//! Dispatch code generation.
//!
//! A dispatch generator walks a [Trie] and writes a C function that
//! classifies scanned text into token constants, one `switch` level per
//! character where the trie branches.  Every token constant that the function
//! refers to is registered in the generator's own [TokenRegistry], which is
//! handed back alongside the text in [DispatchCode] so that the token
//! enumeration can be rendered from it afterward.

use std::fmt::{Display, Formatter, Result as FmtResult, Write};

use crate::{
    codegen::GenerateError,
    config::Config,
    output::IndentWriter,
    token::TokenRegistry,
    trie::{Branch, Trie},
};

mod ident;
mod symbol;

#[cfg(test)]
mod eval;

pub use ident::IdentifierDispatch;
pub use symbol::SymbolDispatch;

/// The operations shared by the dispatch generators.
pub trait DispatchGenerator {
    /// Writes the complete dispatch function.
    fn generate<W>(&mut self, w: &mut IndentWriter<W>) -> Result<(), GenerateError>
    where
        W: Write;

    /// Writes the `switch` that dispatches on the character at offset `depth`
    /// among the children of `branch`.
    fn visit_branch<W>(
        &mut self,
        w: &mut IndentWriter<W>,
        branch: Branch<'_>,
        depth: usize,
    ) -> Result<(), GenerateError>
    where
        W: Write;

    /// Writes the body of one `case`, for the subtrie `node` that the case's
    /// character leads to.  The `case` label has already been written, without
    /// a new-line.
    fn visit_case<W>(
        &mut self,
        w: &mut IndentWriter<W>,
        node: Branch<'_>,
        depth: usize,
    ) -> Result<(), GenerateError>
    where
        W: Write;

    /// Consumes the generator, returning the tokens it registered.
    fn into_tokens(self) -> TokenRegistry;
}

/// A dispatch function's text and the tokens registered while writing it.
#[derive(Clone, Debug)]
pub struct DispatchCode {
    pub text: String,
    pub tokens: TokenRegistry,
}

/// One of the dispatch generators.
pub enum Dispatch<'a> {
    /// Classifies identifiers as keywords.
    Identifier(IdentifierDispatch<'a>),

    /// Classifies punctuation.
    Symbol(SymbolDispatch<'a>),
}

impl<'a> Dispatch<'a> {
    pub fn identifier(config: &'a Config, keywords: &'a Trie) -> Self {
        Self::Identifier(IdentifierDispatch::new(config, keywords))
    }

    pub fn symbol(config: &'a Config, symbols: &'a Trie) -> Self {
        Self::Symbol(SymbolDispatch::new(config, symbols))
    }

    /// Generates the dispatch function.
    pub fn run(self) -> Result<DispatchCode, GenerateError> {
        let mut w = IndentWriter::new(String::new());
        let tokens = match self {
            Self::Identifier(mut generator) => {
                generator.generate(&mut w)?;
                generator.into_tokens()
            }
            Self::Symbol(mut generator) => {
                generator.generate(&mut w)?;
                generator.into_tokens()
            }
        };
        Ok(DispatchCode {
            text: w.into_inner(),
            tokens,
        })
    }
}

fn write_escaped(f: &mut Formatter<'_>, c: char, quote: char) -> FmtResult {
    match c {
        '\\' => write!(f, "\\\\"),
        '\n' => write!(f, "\\n"),
        '\t' => write!(f, "\\t"),
        '\r' => write!(f, "\\r"),
        '\0' => write!(f, "\\0"),
        _ if c == quote => write!(f, "\\{c}"),
        _ if c.is_ascii_control() => write!(f, "\\{:03o}", c as u32),
        _ => write!(f, "{c}"),
    }
}

/// Displays a character as a C character literal.
pub struct CharLiteral(pub char);

impl Display for CharLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "'")?;
        write_escaped(f, self.0, '\'')?;
        write!(f, "'")
    }
}

/// Displays a string as a C string literal.
pub struct StringLiteral<'a>(pub &'a str);

impl Display for StringLiteral<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "\"")?;
        for c in self.0.chars() {
            write_escaped(f, c, '"')?;
        }
        write!(f, "\"")
    }
}
