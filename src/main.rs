//! Reckon - load, edit and print a spreadsheet from the command line.

mod config;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use clap::Parser;
use reckon_core::storage::{parse_sheet, write_sheet};
use reckon_core::{Position, Sheet};
use tracing_subscriber::EnvFilter;

use config::{DumpMode, load_config};

#[derive(Parser, Debug)]
#[command(name = "reckon", version)]
#[command(about = "Reactive in-memory spreadsheet: load a sheet, apply edits, print it")]
#[command(after_help = "\
Examples:
  reckon budget.grd
  reckon --set A1=10 --set 'B1==A1*2'
  reckon budget.grd --clear C3 --texts --save budget.grd

Set RECKON_LOG (e.g. RECKON_LOG=debug) to see engine logs on stderr.")]
struct Cli {
    /// Sheet file to load (.grd)
    file: Option<PathBuf>,

    /// Set a cell, as CELL=TEXT (repeatable, applied in order)
    #[arg(short, long = "set", value_name = "CELL=TEXT")]
    set: Vec<String>,

    /// Clear a cell (repeatable, applied after every --set)
    #[arg(short, long = "clear", value_name = "CELL")]
    clear: Vec<String>,

    /// Print cell values (default)
    #[arg(long, conflicts_with = "texts")]
    values: bool,

    /// Print cell texts instead of values
    #[arg(long)]
    texts: bool,

    /// Save the resulting sheet to PATH
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Read configuration from PATH instead of the user config dir
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, warnings) = load_config(cli.config.as_deref());
    init_logging(&config.log);
    for warning in warnings {
        tracing::warn!("{}", warning);
    }

    let mode = if cli.texts {
        DumpMode::Texts
    } else if cli.values {
        DumpMode::Values
    } else {
        config.mode
    };

    match run(&cli, mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_env("RECKON_LOG")
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli, mode: DumpMode) -> anyhow::Result<()> {
    let mut sheet = match &cli.file {
        Some(path) => {
            parse_sheet(path).with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Sheet::new(),
    };

    for edit in &cli.set {
        let (address, text) = edit
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected CELL=TEXT, got '{}'", edit))?;
        let pos = parse_address(address)?;
        sheet
            .set_cell(pos, text)
            .with_context(|| format!("Failed to set {}", address))?;
    }

    for address in &cli.clear {
        let pos = parse_address(address)?;
        sheet
            .clear_cell(pos)
            .with_context(|| format!("Failed to clear {}", address))?;
    }

    if let Some(path) = &cli.save {
        write_sheet(path, &sheet).with_context(|| format!("Failed to save {}", path.display()))?;
        tracing::info!(path = %path.display(), cells = sheet.len(), "sheet saved");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        DumpMode::Values => sheet.print_values(&mut out)?,
        DumpMode::Texts => sheet.print_texts(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn parse_address(address: &str) -> anyhow::Result<Position> {
    Position::parse(address.trim())
        .filter(Position::is_valid)
        .ok_or_else(|| anyhow!("Invalid cell reference: {}", address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("B3").unwrap(), Position::new(2, 1));
        assert_eq!(parse_address(" A1 ").unwrap(), Position::new(0, 0));
        assert!(parse_address("A0").is_err());
        assert!(parse_address("XFE1").is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["reckon", "-s", "A1=1", "--set", "B1==A1", "-c", "C1", "--texts"])
            .unwrap();
        assert_eq!(cli.set, vec!["A1=1", "B1==A1"]);
        assert_eq!(cli.clear, vec!["C1"]);
        assert!(cli.texts);
        assert!(Cli::try_parse_from(["reckon", "--values", "--texts"]).is_err());
    }
}
