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

//! Indentation-aware text sink shared by all of the generators.

use std::fmt::{Result as FmtResult, Write};

/// A [Write] adapter that prefixes each line with one tab per level of
/// indentation.
///
/// Indentation is applied lazily: writing a new-line only arms it, and the
/// tabs are emitted by the next write that has something other than a new-line
/// to say.  Thus blank lines never carry trailing tabs, and a line that is
/// started at one depth keeps that depth even if the depth changes before the
/// line is finished.
#[derive(Debug)]
pub struct IndentWriter<W> {
    inner: W,
    depth: usize,
    at_line_start: bool,
}

impl<W> IndentWriter<W>
where
    W: Write,
{
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            depth: 0,
            at_line_start: true,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Calls `f` with the indentation increased by one level.  The previous
    /// depth is restored afterward, whether or not `f` succeeds.
    pub fn indented<F, T, E>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

impl<W> Write for IndentWriter<W>
where
    W: Write,
{
    fn write_str(&mut self, s: &str) -> FmtResult {
        for piece in s.split_inclusive('\n') {
            if self.at_line_start && piece != "\n" {
                for _ in 0..self.depth {
                    self.inner.write_char('\t')?;
                }
                self.at_line_start = false;
            }
            self.inner.write_str(piece)?;
            if piece.ends_with('\n') {
                self.at_line_start = true;
            }
        }
        Ok(())
    }
}
