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

use std::{
    env::{current_dir, set_current_dir},
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use log::info;
use scangen::{codegen::CodeGenerator, config::Config};

/// Generates scanner code from a configuration file.
#[derive(Args, Clone, Debug)]
pub struct Generate {
    /// Scanner configuration file.
    config_file: PathBuf,

    /// Output file to write the type declarations to.
    #[arg(short = 'D', long, value_name = "decl_header_file")]
    output_header_decls: PathBuf,

    /// Output file to write the function declarations to.
    #[arg(short = 'H', long, value_name = "header_file")]
    output_header: PathBuf,

    /// Output file to write the source code to.
    #[arg(short = 'S', long, value_name = "source_file")]
    output_source: PathBuf,

    /// Directory to run in.  Other file names are relative to it.  Defaults to
    /// the current directory.
    #[arg(short = 'C', long, value_name = "dir")]
    workdir: Option<PathBuf>,
}

impl Generate {
    pub fn run(self) -> Result<()> {
        let workdir = match &self.workdir {
            Some(dir) => dir
                .canonicalize()
                .map_err(|_| anyhow!("Directory not found at '{}'", dir.display()))?,
            None => current_dir()?,
        };
        if !workdir.is_dir() {
            bail!("Directory not found at '{}'", workdir.display());
        }
        set_current_dir(&workdir)?;

        let config = Config::load(&self.config_file)?;
        let outputs = CodeGenerator::new(config).generate()?;

        write_output(&self.output_source, &outputs.source)?;
        write_output(&self.output_header_decls, &outputs.header_decls)?;
        write_output(&self.output_header, &outputs.header)?;
        Ok(())
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)
            .with_context(|| format!("{}: could not create directory", parent.display()))?;
    }
    write(path, contents).with_context(|| format!("{}: write failed", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}
