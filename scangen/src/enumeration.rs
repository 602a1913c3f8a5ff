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

//! Rendering of the token type enumeration.

use std::fmt::{Error as FmtError, Result as FmtResult, Write};

use enum_iterator::all;
use itertools::Itertools;

use crate::{
    output::IndentWriter,
    token::{TokenClass, TokenRegistry},
};

/// Number of token names per line.
const PER_LINE: usize = 4;

/// Writes a `typedef enum` named `enum_type` that declares every token in
/// `tokens`.
///
/// Tokens are grouped by class, in [TokenClass] order, with each group
/// introduced by its class's comment.  Classes without a comment are left
/// out, whatever was registered under them.
pub fn render_enum<W>(w: &mut IndentWriter<W>, tokens: &TokenRegistry, enum_type: &str) -> FmtResult
where
    W: Write,
{
    let groups: Vec<(&str, &[String])> = all::<TokenClass>()
        .filter_map(|class| Some((class.comment()?, tokens.tokens(class))))
        .collect();
    let last = groups.iter().rposition(|(_, names)| !names.is_empty());

    writeln!(w, "typedef enum {{")?;
    w.indented(|w| {
        for (index, (comment, names)) in groups.iter().enumerate() {
            if index > 0 {
                writeln!(w)?;
            }
            writeln!(w, "// {comment}")?;

            let n_lines = names.len().div_ceil(PER_LINE);
            for (line, chunk) in names.chunks(PER_LINE).enumerate() {
                write!(w, "{}", chunk.iter().join(", "))?;
                if line + 1 < n_lines || Some(index) != last {
                    write!(w, ",")?;
                }
                writeln!(w)?;
            }
        }
        Ok::<_, FmtError>(())
    })?;
    writeln!(w, "}} {enum_type};")
}
