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

//! Token classes and the registry of generated token constant names.

use enum_iterator::{Sequence, all};
use enum_map::{Enum, EnumMap};

/// A category of generated token constants.
///
/// The order of the variants is the order in which their groups appear in the
/// rendered token enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Sequence)]
pub enum TokenClass {
    /// The identifier token, as referenced by identifier dispatch.  Never
    /// rendered.
    Skip,

    /// Punctuation consisting of one character, e.g. `=`.
    OneChar,

    /// Punctuation consisting of two characters, e.g. `==`.
    TwoChar,

    /// Tokens whose text varies, such as identifiers, strings, and numbers.
    Literal,

    /// Reserved words.
    Keyword,

    /// Tokens that the scanner produces without matching text, such as
    /// errors and end of input.
    Special,
}

impl TokenClass {
    /// Stable numeric identifier, starting from 1.
    pub fn id(self) -> usize {
        match self {
            TokenClass::Skip => 1,
            TokenClass::OneChar => 2,
            TokenClass::TwoChar => 3,
            TokenClass::Literal => 4,
            TokenClass::Keyword => 5,
            TokenClass::Special => 6,
        }
    }

    /// The comment that introduces this class's group in the token
    /// enumeration.  A class without a comment is left out of the
    /// enumeration.
    pub fn comment(self) -> Option<&'static str> {
        match self {
            TokenClass::Skip => None,
            TokenClass::OneChar => Some("Single character tokens"),
            TokenClass::TwoChar => Some("Two character tokens"),
            TokenClass::Literal => Some("Value literal tokens"),
            TokenClass::Keyword => Some("Keyword tokens"),
            TokenClass::Special => Some("Special tokens"),
        }
    }

    /// Returns the class for punctuation whose text is `value`.
    pub fn for_symbol(value: &str) -> Self {
        if value.chars().count() == 1 {
            TokenClass::OneChar
        } else {
            TokenClass::TwoChar
        }
    }

    pub fn is_rendered(self) -> bool {
        self.comment().is_some()
    }
}

/// Accumulates generated token constant names, grouped by [TokenClass].
///
/// Names are kept in the order they were registered, without removing
/// duplicates.  The only way to obtain a constant name is to register it, so
/// every constant that generated code refers to is recorded here.
#[derive(Clone, Debug)]
pub struct TokenRegistry {
    prefix: String,
    tokens: EnumMap<TokenClass, Vec<String>>,
}

impl TokenRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            tokens: EnumMap::default(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Produces the constant name `<prefix>_<NAME>` for `name`, records it
    /// under `class`, and returns it.
    pub fn register(&mut self, name: &str, class: TokenClass) -> String {
        let token = format!("{}_{}", self.prefix, name.to_uppercase());
        self.tokens[class].push(token.clone());
        token
    }

    /// The names registered under `class`, in registration order.
    pub fn tokens(&self, class: TokenClass) -> &[String] {
        &self.tokens[class]
    }

    /// Iterates over every class, including those with no tokens.
    pub fn iter(&self) -> impl Iterator<Item = (TokenClass, &[String])> {
        all::<TokenClass>().map(|class| (class, self.tokens(class)))
    }

    pub fn len(&self) -> usize {
        self.tokens.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends all of the tokens in `other` to those in `self`, class by
    /// class.
    pub fn merge(&mut self, other: TokenRegistry) {
        for (class, tokens) in other.tokens {
            self.tokens[class].extend(tokens);
        }
    }
}
