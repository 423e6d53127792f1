//! Shared argument groups and file I/O for the commands

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use bracket_core::{Format, InMemoryTournament};

/// Format picked on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatChoice {
    Swiss,
    SingleElimination,
    DoubleElimination,
}

#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Tournament format, with default settings
    #[arg(long, value_enum, default_value = "swiss")]
    pub format: FormatChoice,

    /// Format JSON file with explicit settings (overrides --format)
    #[arg(long, value_name = "FILE")]
    pub format_file: Option<PathBuf>,
}

impl FormatArgs {
    /// The selected format, validated
    pub fn resolve(&self) -> Result<Format> {
        let format = match &self.format_file {
            Some(path) => {
                let content = read_file(path, "format")?;
                serde_json::from_str::<Format>(&content)
                    .with_context(|| format!("Failed to parse format: {}", path.display()))?
            }
            None => match self.format {
                FormatChoice::Swiss => Format::swiss(),
                FormatChoice::SingleElimination => Format::single_elimination(),
                FormatChoice::DoubleElimination => Format::double_elimination(),
            },
        };

        if let Err(e) = format.validate() {
            bail!("{}", e);
        }
        Ok(format)
    }
}

/// Load a tournament JSON file
pub fn load_tournament(path: &Path) -> Result<InMemoryTournament> {
    let content = read_file(path, "tournament")?;
    InMemoryTournament::from_json(&content)
        .with_context(|| format!("Failed to parse tournament: {}", path.display()))
}

/// Write a tournament as pretty JSON
pub fn save_tournament(tournament: &InMemoryTournament, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(tournament)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write tournament: {}", path.display()))
}

/// Read a whole file, naming `what` on failure
pub fn read_file(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}: {}", what, path.display()))
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
