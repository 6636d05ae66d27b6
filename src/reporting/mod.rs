// src/reporting/mod.rs
//! Report rendering over an [`AggregateReader`].
//!
//! Text output mirrors the classic fixed-width drive report; CSV and JSON
//! carry the same tables for spreadsheets and scripts.

pub mod console;
pub mod delimited;
pub mod json;
mod shared;

use std::io::Write;

use anyhow::Result;

use crate::logging;
use crate::reader::AggregateReader;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Which report sections to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sections {
    /// Power-on hours, age histogram and wear averages.
    pub power: bool,
    pub models: bool,
    pub sizes: bool,
}

impl Sections {
    #[must_use]
    pub fn all() -> Self {
        Self {
            power: true,
            models: true,
            sizes: true,
        }
    }

    #[must_use]
    pub fn any(self) -> bool {
        self.power || self.models || self.sizes
    }
}

/// Regions to report: just `region` when given, otherwise every known one.
///
/// # Errors
/// Returns `RegionNotFound` when `region` never appeared in the data.
pub fn select_regions<'a>(
    reader: &AggregateReader<'a>,
    region: Option<&str>,
) -> crate::error::Result<Vec<&'a str>> {
    let Some(name) = region else {
        return Ok(reader.regions());
    };
    reader.summary(name)?;
    Ok(reader.regions().into_iter().filter(|k| *k == name).collect())
}

/// Writes the report for `regions` in the requested format.
///
/// # Errors
/// Returns error if writing to `out` fails.
pub fn render<W: Write>(
    reader: &AggregateReader<'_>,
    regions: &[&str],
    sections: Sections,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    tracing::debug!(target: logging::REPORTS, ?regions, ?sections, ?format, "rendering report");
    match format {
        OutputFormat::Text => console::write_report(reader, regions, sections, out),
        OutputFormat::Csv => delimited::write_report(reader, regions, sections, out),
        OutputFormat::Json => json::write_report(reader, regions, sections, out),
    }
}
