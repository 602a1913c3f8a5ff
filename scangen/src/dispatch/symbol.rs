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

use std::fmt::Write;

use itertools::Itertools;
use log::warn;

use crate::{
    codegen::GenerateError,
    config::{Config, Settings},
    output::IndentWriter,
    token::{TokenClass, TokenRegistry},
    trie::{Branch, Terminal, Trie},
};

use super::{CharLiteral, DispatchGenerator, StringLiteral};

/// Generates the function that classifies punctuation.
///
/// The generated function switches on the first character, which the scanner
/// has already consumed.  For a character that begins two-character symbols,
/// it tries each possible second character with the match function before
/// settling for the one-character symbol, so the longest match always wins.
pub struct SymbolDispatch<'a> {
    settings: &'a Settings,
    symbols: &'a Trie,
    tokens: TokenRegistry,
}

impl<'a> SymbolDispatch<'a> {
    pub fn new(config: &'a Config, symbols: &'a Trie) -> Self {
        Self {
            settings: &config.settings,
            symbols,
            tokens: TokenRegistry::new(&config.settings.token_prefix),
        }
    }

    fn make_token(&mut self, symbol: &Terminal) -> String {
        let token = self
            .tokens
            .register(&symbol.token, TokenClass::for_symbol(&symbol.value));
        format!(
            "{}(scanner, {token})",
            self.settings.make_token_function_name
        )
    }
}

impl DispatchGenerator for SymbolDispatch<'_> {
    fn generate<W>(&mut self, w: &mut IndentWriter<W>) -> Result<(), GenerateError>
    where
        W: Write,
    {
        let settings = self.settings;
        let symbols = self.symbols;

        writeln!(
            w,
            "{} {}({}* scanner, char c) {{",
            settings.token_type, settings.symbol_function_name, settings.scanner_type
        )?;
        w.indented(|w| {
            self.visit_branch(w, symbols.root(), 0)?;
            writeln!(w)?;
            writeln!(
                w,
                "return {}(scanner, {});",
                settings.error_token_function_name,
                StringLiteral(&settings.error_message)
            )?;
            Ok::<_, GenerateError>(())
        })?;
        writeln!(w, "}}")?;
        Ok(())
    }

    fn visit_branch<W>(
        &mut self,
        w: &mut IndentWriter<W>,
        branch: Branch<'_>,
        depth: usize,
    ) -> Result<(), GenerateError>
    where
        W: Write,
    {
        writeln!(w, "switch (c) {{")?;
        for (c, child) in branch.children() {
            write!(w, "case {}:", CharLiteral(c))?;
            self.visit_case(w, child, depth + 1)?;
        }
        writeln!(w, "default: break;")?;
        writeln!(w, "}}")?;
        Ok(())
    }

    fn visit_case<W>(
        &mut self,
        w: &mut IndentWriter<W>,
        node: Branch<'_>,
        depth: usize,
    ) -> Result<(), GenerateError>
    where
        W: Write,
    {
        if node.is_leaf() {
            let symbol = node.terminal().ok_or(GenerateError::Structure { depth })?;
            let call = self.make_token(symbol);
            writeln!(w, " return {call};")?;
            return Ok(());
        }

        writeln!(w, " {{")?;
        w.indented(|w| {
            for (c, next) in node.children() {
                let symbol = next
                    .terminal()
                    .ok_or(GenerateError::Structure { depth: depth + 1 })?;
                let call = self.make_token(symbol);
                writeln!(
                    w,
                    "if ({}(scanner, {})) return {call};",
                    self.settings.match_function_name,
                    CharLiteral(c)
                )?;
            }
            match node.terminal() {
                Some(symbol) => {
                    let call = self.make_token(symbol);
                    writeln!(w, "return {call};")?;
                }
                None => {
                    let symbols = node
                        .children()
                        .filter_map(|(_, next)| next.terminal())
                        .map(|symbol| symbol.value.as_str())
                        .join(", ");
                    warn!("{symbols}: no one-character symbol to fall back on");
                    writeln!(w, "break;")?;
                }
            }
            Ok::<_, GenerateError>(())
        })?;
        writeln!(w, "}}")?;
        Ok(())
    }

    fn into_tokens(self) -> TokenRegistry {
        self.tokens
    }
}
