// src/reporting/json.rs
//! Machine-readable report.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::reader::AggregateReader;
use crate::reporting::Sections;
use crate::store::{AgeHistogram, DriveStats, IngestCounters, ModelFrequency, SizeFrequency};

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub counters: &'a IngestCounters,
    pub regions: Vec<JsonRegion<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonRegion<'a> {
    pub region: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<&'a DriveStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ages: Option<&'a AgeHistogram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<&'a ModelFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<&'a SizeFrequency>,
}

/// Collects the selected sections of `regions`.
///
/// # Errors
/// Returns `RegionNotFound` for unknown regions.
pub fn build<'a>(
    reader: &AggregateReader<'a>,
    regions: &[&'a str],
    sections: Sections,
) -> crate::error::Result<JsonReport<'a>> {
    let mut out = Vec::with_capacity(regions.len());
    for &region in regions {
        let summary = reader.summary(region)?;
        out.push(JsonRegion {
            region,
            stats: sections.power.then(|| summary.stats()),
            ages: sections.power.then(|| summary.ages()),
            models: sections.models.then(|| summary.models()),
            sizes: sections.sizes.then(|| summary.sizes()),
        });
    }
    Ok(JsonReport {
        counters: reader.counters(),
        regions: out,
    })
}

/// # Errors
/// Returns error if serialization or writing fails.
pub fn write_report<W: Write>(
    reader: &AggregateReader<'_>,
    regions: &[&str],
    sections: Sections,
    out: &mut W,
) -> Result<()> {
    let report = build(reader, regions, sections)?;
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
