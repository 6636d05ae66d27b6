// src/cli/dispatch.rs
//! Runs one invocation: load config, ingest, render.

use std::io::{self, BufWriter, Write};

use anyhow::Result;
use colored::Colorize;

use super::args::Cli;
use crate::aggregator::aggregate_path;
use crate::config::Config;
use crate::error::DriveDataError;
use crate::exit::DriveDataExit;
use crate::reporting::{self, select_regions};

/// Executes the parsed command line.
///
/// Data and lookup problems come back as exit codes; only output failures
/// are errors.
///
/// # Errors
/// Returns error if writing the report to stdout fails.
pub fn execute(cli: &Cli) -> Result<DriveDataExit> {
    let sections = cli.sections();
    if !sections.any() {
        eprintln!("{}", "Specify one of [-a], [-m], [-p], or [-s]".yellow());
        return Ok(DriveDataExit::InvalidInput);
    }

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return Ok(fail(&e)),
    };
    cli.apply_overrides(&mut config);

    if !cli.file.is_file() {
        eprintln!("{} file not found: {}", "error:".red().bold(), cli.file.display());
        return Ok(DriveDataExit::Error);
    }

    let store = match aggregate_path(&cli.file, config.ingest) {
        Ok(store) => store,
        Err(e) => return Ok(fail(&e)),
    };
    let reader = store.reader();
    let regions = match select_regions(&reader, cli.region()) {
        Ok(regions) => regions,
        Err(e) => return Ok(fail(&e)),
    };

    let mut out = BufWriter::new(io::stdout().lock());
    reporting::render(&reader, &regions, sections, cli.format(), &mut out)?;
    out.flush()?;
    Ok(DriveDataExit::Success)
}

fn fail(err: &DriveDataError) -> DriveDataExit {
    eprintln!("{} {err}", "error:".red().bold());
    DriveDataExit::for_error(err)
}
