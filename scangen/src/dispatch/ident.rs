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

use crate::{
    codegen::GenerateError,
    config::{Config, Settings},
    output::IndentWriter,
    token::{TokenClass, TokenRegistry},
    trie::{Branch, Terminal, Trie},
};

use super::{CharLiteral, DispatchGenerator, StringLiteral};

/// Generates the function that tells keywords apart from other identifiers.
///
/// The function switches on successive characters of the scanned lexeme for
/// as long as the keyword trie branches.  Once only one keyword remains
/// possible, it compares the rest of the lexeme against that keyword with a
/// single call to the check-keyword function, instead of a `switch` per
/// remaining character.  Anything that falls through every `switch` is an
/// identifier.
pub struct IdentifierDispatch<'a> {
    settings: &'a Settings,
    keywords: &'a Trie,
    tokens: TokenRegistry,
}

impl<'a> IdentifierDispatch<'a> {
    pub fn new(config: &'a Config, keywords: &'a Trie) -> Self {
        Self {
            settings: &config.settings,
            keywords,
            tokens: TokenRegistry::new(&config.settings.token_prefix),
        }
    }

    /// Returns a call that checks that the lexeme, from offset `start` on,
    /// matches the rest of `keyword`, and registers the keyword's token.
    fn check_keyword(&mut self, keyword: &Terminal, start: usize) -> String {
        let rest: String = keyword.value.chars().skip(start).collect();
        let token = self.tokens.register(&keyword.token, TokenClass::Keyword);
        format!(
            "{}(scanner, {start}, {}, {}, {token})",
            self.settings.check_keyword_function_name,
            rest.chars().count(),
            StringLiteral(&rest)
        )
    }
}

impl DispatchGenerator for IdentifierDispatch<'_> {
    fn generate<W>(&mut self, w: &mut IndentWriter<W>) -> Result<(), GenerateError>
    where
        W: Write,
    {
        let settings = self.settings;
        let keywords = self.keywords;

        // This registration never reaches the token enumeration, because
        // `Skip` isn't rendered.  The identifier token appears there through
        // `tokens.literals` instead.
        let ident_token = self
            .tokens
            .register(&settings.ident_token_name, TokenClass::Skip);

        writeln!(
            w,
            "{} {}({}* scanner) {{",
            settings.token_enum_type, settings.ident_function_name, settings.scanner_type
        )?;
        w.indented(|w| {
            self.visit_branch(w, keywords.root(), 0)?;
            writeln!(w, "return {ident_token};")?;
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
        writeln!(w, "switch (scanner->start[{depth}]) {{")?;
        for (c, child) in branch.children() {
            write!(w, "case {}:", CharLiteral(c))?;
            w.indented(|w| self.visit_case(w, child, depth))?;
        }
        writeln!(w, "default: ;")?;
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
        let consumed = depth + 1;
        if let Some(keyword) = node.extract() {
            let call = self.check_keyword(keyword, consumed);
            writeln!(w, " return {call};")?;
            return Ok(());
        }
        if node.is_leaf() {
            return Err(GenerateError::Structure { depth: consumed });
        }

        writeln!(w)?;
        writeln!(w, "if (scanner->current - scanner->start > {consumed}) {{")?;
        w.indented(|w| self.visit_branch(w, node, consumed))?;
        writeln!(w, "}}")?;

        // A keyword that is also a prefix of longer keywords ends here.
        match node.terminal() {
            Some(keyword) => {
                let call = self.check_keyword(keyword, consumed);
                writeln!(w, "return {call};")?;
            }
            None => writeln!(w, "break;")?,
        }
        Ok(())
    }

    fn into_tokens(self) -> TokenRegistry {
        self.tokens
    }
}
