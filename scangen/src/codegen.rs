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

//! Generation of the three output files.
//!
//! Generation happens in two phases.  [CodeGenerator::generate_source] writes
//! the dispatch functions, which registers the keyword and symbol tokens they
//! refer to, and returns them together in a [SourceFile].  Only then can
//! [CodeGenerator::generate_header_decls] render the token enumeration, since
//! it requires that [SourceFile].

use std::fmt::{Error as FmtError, Write};

use log::debug;
use thiserror::Error as ThisError;

use crate::{
    config::Config,
    dispatch::Dispatch,
    enumeration::render_enum,
    output::IndentWriter,
    token::{TokenClass, TokenRegistry},
    trie::Trie,
};


#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error("Formatting generated code failed.")]
    Format(#[from] FmtError),

    /// A trie node that has neither children nor a string ending at it.
    /// Insertion never creates one.
    #[error("Internal error: trie node at depth {depth} has no children and no value.")]
    Structure { depth: usize },
}

/// The generated source file and the tokens it refers to.
#[derive(Clone, Debug)]
pub struct SourceFile {
    text: String,
    tokens: TokenRegistry,
}

impl SourceFile {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }
}

/// The contents of all three output files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outputs {
    pub source: String,
    pub header_decls: String,
    pub header: String,
}

pub struct CodeGenerator {
    config: Config,
    keywords: Trie,
    symbols: Trie,
}

impl CodeGenerator {
    pub fn new(config: Config) -> Self {
        let mut keywords = Trie::new();
        for keyword in &config.tokens.keywords {
            keywords.insert(keyword, keyword);
        }

        let mut symbols = Trie::new();
        for (name, value) in &config.tokens.symbols {
            symbols.insert(value, name);
        }

        debug!(
            "{} keywords in {} trie nodes, {} symbols in {} trie nodes",
            config.tokens.keywords.len(),
            keywords.len(),
            config.tokens.symbols.len(),
            symbols.len()
        );
        Self {
            config,
            keywords,
            symbols,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn keywords(&self) -> &Trie {
        &self.keywords
    }

    pub fn symbols(&self) -> &Trie {
        &self.symbols
    }

    /// Generates all three files.
    pub fn generate(&self) -> Result<Outputs, GenerateError> {
        let source = self.generate_source()?;
        let header_decls = self.generate_header_decls(&source)?;
        let header = self.generate_header()?;
        Ok(Outputs {
            source: source.text,
            header_decls,
            header,
        })
    }

    /// Generates the source file, which contains the identifier and symbol
    /// dispatch functions.
    pub fn generate_source(&self) -> Result<SourceFile, GenerateError> {
        let ident = Dispatch::identifier(&self.config, &self.keywords).run()?;
        let symbol = Dispatch::symbol(&self.config, &self.symbols).run()?;

        let mut w = IndentWriter::new(String::new());
        write_includes(&mut w, &self.config.includes.source_file)?;
        w.write_str(&ident.text)?;
        writeln!(w)?;
        w.write_str(&symbol.text)?;

        let mut tokens = ident.tokens;
        tokens.merge(symbol.tokens);
        Ok(SourceFile {
            text: w.into_inner(),
            tokens,
        })
    }

    /// Generates the header that declares the token enumeration, from the
    /// tokens that `source` refers to plus the literal and special tokens.
    pub fn generate_header_decls(&self, source: &SourceFile) -> Result<String, GenerateError> {
        let settings = &self.config.settings;
        let mut tokens = source.tokens.clone();
        for literal in &self.config.tokens.literals {
            tokens.register(literal, TokenClass::Literal);
        }
        for special in &self.config.tokens.specials {
            tokens.register(special, TokenClass::Special);
        }
        for (class, names) in tokens.iter() {
            debug!("{class:?}: {} tokens", names.len());
        }

        let mut w = IndentWriter::new(String::new());
        write_guard_start(&mut w, &settings.header_decls_guard)?;
        write_includes(&mut w, &self.config.includes.header_decls_file)?;
        render_enum(&mut w, &tokens, &settings.token_enum_type)?;
        write_guard_end(&mut w, &settings.header_decls_guard)?;
        Ok(w.into_inner())
    }

    /// Generates the header that declares the dispatch functions.
    pub fn generate_header(&self) -> Result<String, GenerateError> {
        let settings = &self.config.settings;

        let mut w = IndentWriter::new(String::new());
        write_guard_start(&mut w, &settings.header_guard)?;
        write_includes(&mut w, &self.config.includes.header_file)?;
        writeln!(
            w,
            "{} {}({}* scanner);",
            settings.token_enum_type, settings.ident_function_name, settings.scanner_type
        )?;
        writeln!(
            w,
            "{} {}({}* scanner, char c);",
            settings.token_type, settings.char_token_function_name, settings.scanner_type
        )?;
        write_guard_end(&mut w, &settings.header_guard)?;
        Ok(w.into_inner())
    }
}

/// Writes an `#include` for each of `includes`, skipping empty ones, followed
/// by a blank line if anything was written.
fn write_includes<W>(w: &mut IndentWriter<W>, includes: &[String]) -> Result<(), FmtError>
where
    W: Write,
{
    let mut any = false;
    for include in includes.iter().filter(|include| !include.is_empty()) {
        writeln!(w, "#include {include}")?;
        any = true;
    }
    if any {
        writeln!(w)?;
    }
    Ok(())
}

fn write_guard_start<W>(w: &mut IndentWriter<W>, guard: &str) -> Result<(), FmtError>
where
    W: Write,
{
    writeln!(w, "#ifndef {guard}")?;
    writeln!(w, "#define {guard}")?;
    writeln!(w)
}

fn write_guard_end<W>(w: &mut IndentWriter<W>, guard: &str) -> Result<(), FmtError>
where
    W: Write,
{
    writeln!(w)?;
    writeln!(w, "#endif // {guard}")
}
