//! Gridcalc - evaluate spreadsheet cells from the command line

mod cli;
mod settings;

use anyhow::{Context, Result};
use gridcalc_core::{CellRef, Document, ERROR_DISPLAY, SheetConfig};
use std::collections::BTreeSet;
use std::env;
use std::process::ExitCode;

use cli::{CliArgs, Command};
use settings::Settings;

/// Build the document, apply assignments, and print the requested cells.
/// Returns true if every printed cell evaluated cleanly.
fn run(cli: CliArgs) -> Result<bool> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let config = SheetConfig::new(
        cli.rows.unwrap_or(settings.sheet.rows),
        cli.cols.unwrap_or(settings.sheet.cols),
    )?;

    let mut functions = settings.functions;
    functions.extend(cli.functions);
    settings::prepend_default_functions_if_present(&mut functions, cli.no_default_functions);

    let mut doc = Document::with_functions(config, functions)
        .context("Failed to load custom functions")?;

    let mut assigned = BTreeSet::new();
    for (addr, content) in &cli.assignments {
        doc.set_cell(addr, content)
            .with_context(|| format!("Cannot set {}", addr))?;
        assigned.insert(CellRef::parse(addr)?);
    }

    let targets: Vec<CellRef> = if cli.cells.is_empty() {
        assigned.into_iter().collect()
    } else {
        cli.cells
            .iter()
            .map(|addr| CellRef::parse(addr).with_context(|| format!("Cannot print {}", addr)))
            .collect::<Result<_>>()?
    };

    let mut session = doc.session();
    let mut clean = true;
    for target in &targets {
        let display = session.display_value(target);
        if display == ERROR_DISPLAY {
            clean = false;
        }
        println!("{}\t{}", target, display);
    }

    Ok(clean)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match cli::parse_args(&args) {
        Ok(Command::Help) => {
            cli::print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(cli)) => cli,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            cli::print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
