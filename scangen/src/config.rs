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

//! Generator configuration.
//!
//! A configuration is a TOML document with three tables:
//!
//! - `settings`: names used in the generated code, as camelCase keys.  See
//!   [Settings] for the keys and [DEFAULTS] for the ones that may be omitted.
//!
//! - `includes`: `header_file`, `header_decls_file`, and `source_file`, each
//!   a list of `#include` targets for the corresponding output file.
//!
//! - `tokens`: `keywords`, `specials`, and `literals`, each a list of
//!   strings, and `symbols`, a table that maps token names to punctuation.

use std::{
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use thiserror::Error as ThisError;

/// Settings that may be left out of a configuration, with their values.
pub const DEFAULTS: &[(&str, &str)] = &[
    ("tokenPrefix", "TOKEN"),
    ("tokenType", "Token"),
    ("tokenEnumType", "TokenType"),
    ("scannerType", "Scanner"),
    ("matchFunctionName", "match"),
    ("errorMessage", "Unexpected character."),
    ("headerGuard", "__CLOX2_SCANNER_GENERATED_H__"),
    ("headerDeclsGuard", "__CLOX2_SCANNER_GENERATED_DECLS_H__"),
];

/// A configuration that is well-formed TOML but can't be used to generate
/// code.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Keyword {index} is empty.  Keywords can't be empty.")]
    EmptyKeyword { index: usize },

    #[error("Symbol token '{name}' can't be empty.")]
    EmptySymbol { name: String },

    #[error("Symbol token '{name}' is '{value}', but symbol tokens must be at most two characters long.")]
    SymbolTooLong { name: String, value: String },

    #[error("settings.identTokenName ({0}) must be listed in tokens.literals.")]
    IdentNotLiteral(String),

    #[error("Required setting settings.{0} is missing.")]
    MissingSetting(&'static str),
}

#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("Could not open '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("{}: read failed ({source})", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Names used in generated code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Prefix for token constants, e.g. `TOKEN` for `TOKEN_WHILE`.
    pub token_prefix: String,

    /// Name of the identifier token, without prefix.
    pub ident_token_name: String,

    /// Type returned by symbol dispatch.
    pub token_type: String,

    /// Name of the generated token enumeration, which identifier dispatch
    /// returns.
    pub token_enum_type: String,

    pub make_token_function_name: String,
    pub error_token_function_name: String,
    pub check_keyword_function_name: String,

    /// Name under which the header declares the symbol dispatch function.
    pub char_token_function_name: String,

    /// Name of the generated identifier dispatch function.
    pub ident_function_name: String,

    /// Name of the generated symbol dispatch function.
    pub symbol_function_name: String,

    pub scanner_type: String,
    pub match_function_name: String,

    /// Message passed to the error token function for unexpected characters.
    pub error_message: String,

    pub header_guard: String,
    pub header_decls_guard: String,
}

impl Settings {
    fn from_table(mut table: IndexMap<String, String>) -> Result<Self, ConfigError> {
        for &(key, value) in DEFAULTS {
            table
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }

        let mut take =
            |key: &'static str| table.shift_remove(key).ok_or(ConfigError::MissingSetting(key));
        let settings = Self {
            token_prefix: take("tokenPrefix")?,
            ident_token_name: take("identTokenName")?,
            token_type: take("tokenType")?,
            token_enum_type: take("tokenEnumType")?,
            make_token_function_name: take("makeTokenFunctionName")?,
            error_token_function_name: take("errorTokenFunctionName")?,
            check_keyword_function_name: take("checkKeywordFunctionName")?,
            char_token_function_name: take("charTokenFunctionName")?,
            ident_function_name: take("identFunctionName")?,
            symbol_function_name: take("symbolFunctionName")?,
            scanner_type: take("scannerType")?,
            match_function_name: take("matchFunctionName")?,
            error_message: take("errorMessage")?,
            header_guard: take("headerGuard")?,
            header_decls_guard: take("headerDeclsGuard")?,
        };
        for key in table.keys() {
            warn!("ignoring unknown setting settings.{key}");
        }
        Ok(settings)
    }
}

/// `#include` targets for each output file, e.g. `<stdio.h>` or
/// `"scanner.h"`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Includes {
    pub header_file: Vec<String>,
    pub header_decls_file: Vec<String>,
    pub source_file: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Tokens {
    pub keywords: Vec<String>,
    pub specials: Vec<String>,
    pub literals: Vec<String>,

    /// Maps token names to their text, in document order.
    pub symbols: IndexMap<String, String>,
}

/// A configuration as it appears in the document, before defaults are applied
/// and before it is validated.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub settings: IndexMap<String, String>,
    pub includes: Includes,
    pub tokens: Tokens,
}

/// A validated configuration, with defaults applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub settings: Settings,
    pub includes: Includes,
    pub tokens: Tokens,
}

impl Config {
    /// Reads and validates the configuration in `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, LoadError> {
        let raw: RawConfig = toml::from_str(text)?;
        Ok(Self::from_raw(raw)?)
    }

    /// Applies [DEFAULTS] to `raw`, then validates it.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let config = Self {
            settings: Settings::from_table(raw.settings)?,
            includes: raw.includes,
            tokens: raw.tokens,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.tokens.keywords.iter().position(String::is_empty) {
            return Err(ConfigError::EmptyKeyword { index });
        }

        for (name, value) in &self.tokens.symbols {
            match value.chars().count() {
                0 => return Err(ConfigError::EmptySymbol { name: name.clone() }),
                1 | 2 => (),
                _ => {
                    return Err(ConfigError::SymbolTooLong {
                        name: name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        let ident = &self.settings.ident_token_name;
        if !self.tokens.literals.contains(ident) {
            return Err(ConfigError::IdentNotLiteral(ident.clone()));
        }

        Ok(())
    }
}
