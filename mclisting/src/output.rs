//! Naming and writing of the `.bin` / `.symbols` pair.

use crate::conversion::Dump;
use log::info;
use mccommon::symbols::write_symbols;
use miette::Diagnostic;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Argument that selects standard input instead of a file.
pub const STDIN_ARGUMENT: &str = "-";
/// Base name for outputs when reading standard input.
pub const STDIN_BASE_NAME: &str = "input";

/// The argument itself is the base name, path separators and all.
pub fn base_name(argument: &str) -> &str {
    if argument == STDIN_ARGUMENT {
        STDIN_BASE_NAME
    } else {
        argument
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OutputPaths {
    pub image: PathBuf,
    pub symbols: PathBuf,
}

impl OutputPaths {
    pub fn for_base(base: &str) -> Self {
        Self {
            image: format!("{}.bin", base).into(),
            symbols: format!("{}.symbols", base).into(),
        }
    }
}

impl Dump {
    pub fn write_image(&self, writer: impl Write) -> std::io::Result<()> {
        self.image.save(writer)
    }

    pub fn write_symbols(&self, writer: impl Write) -> std::io::Result<()> {
        write_symbols(&self.symbols, writer)
    }

    /// Renders both outputs in memory first, then writes `<base>.bin` and `<base>.symbols`.
    pub fn save(&self, base: &str) -> Result<OutputPaths, SaveError> {
        let paths = OutputPaths::for_base(base);

        let mut image = Vec::with_capacity(self.image.snapshot().len());
        let mut symbols = vec![];
        self.write_image(&mut image).map_err(SaveError::Render)?;
        self.write_symbols(&mut symbols).map_err(SaveError::Render)?;

        for (path, contents) in [(&paths.image, image), (&paths.symbols, symbols)] {
            std::fs::write(path, contents).map_err(|source| SaveError::Write {
                path: path.clone(),
                source,
            })?;
            info!("Wrote {}", path.display());
        }
        Ok(paths)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SaveError {
    #[error("Could not render the outputs")]
    #[diagnostic(code(mclisting::output::render))]
    Render(#[source] std::io::Error),
    #[error("Could not write {}", .path.display())]
    #[diagnostic(code(mclisting::output::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
