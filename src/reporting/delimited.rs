// src/reporting/delimited.rs
//! CSV report: one wide table per section, separated by a blank line.

use std::io::Write;

use anyhow::Result;

use crate::reader::{AggregateReader, ModelOrder};
use crate::region::GLOBAL_REGION;
use crate::reporting::Sections;
use crate::store::{AgeHistogram, AGE_BUCKETS};

/// # Errors
/// Returns error if writing fails or a region is unknown.
pub fn write_report<W: Write>(
    reader: &AggregateReader<'_>,
    regions: &[&str],
    sections: Sections,
    out: &mut W,
) -> Result<()> {
    let mut first = true;
    let mut separate = |out: &mut W| -> Result<()> {
        if !first {
            writeln!(out)?;
        }
        first = false;
        Ok(())
    };

    if sections.power {
        separate(out)?;
        write_ages(reader, regions, out)?;
    }
    if sections.sizes {
        separate(out)?;
        write_sizes(reader, regions, out)?;
    }
    if sections.models {
        separate(out)?;
        write_models(reader, regions, out)?;
    }
    Ok(())
}

fn write_ages<W: Write>(reader: &AggregateReader<'_>, regions: &[&str], out: &mut W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    let mut header = vec!["Region\\Age".to_string()];
    header.extend((0..AGE_BUCKETS).map(AgeHistogram::label));
    header.extend(
        ["Drives", "Avg Power-On Hours", "Avg Power-On Years", "Avg Power Cycles"]
            .map(String::from),
    );
    wtr.write_record(&header)?;

    for region in regions {
        let stats = reader.drive_stats(region)?;
        let mut row = vec![(*region).to_string()];
        row.extend(reader.age_histogram(region)?.iter().map(|(_, n)| n.to_string()));
        row.push(stats.count().to_string());
        row.push(format!("{:.2}", stats.avg_power_on_hours()));
        row.push(format!("{:.2}", stats.avg_power_on_years()));
        row.push(format!("{:.2}", stats.avg_power_cycle_count()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Columns are every size seen anywhere, taken from the global table.
fn write_sizes<W: Write>(reader: &AggregateReader<'_>, regions: &[&str], out: &mut W) -> Result<()> {
    let columns: Vec<u64> = reader
        .size_frequency(GLOBAL_REGION)?
        .into_iter()
        .map(|(size, _)| size)
        .collect();

    let mut wtr = csv::Writer::from_writer(out);
    let mut header = vec!["Region\\Size".to_string()];
    header.extend(columns.iter().map(u64::to_string));
    header.push("Zero/Null".to_string());
    wtr.write_record(&header)?;

    for region in regions {
        let sizes = reader.summary(region)?.sizes();
        let mut row = vec![(*region).to_string()];
        row.extend(
            columns
                .iter()
                .map(|size| sizes.get(*size).map_or(0, |s| s.count()).to_string()),
        );
        row.push(reader.drive_stats(region)?.zero_size_count().to_string());
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_models<W: Write>(reader: &AggregateReader<'_>, regions: &[&str], out: &mut W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["Region", "Model", "Count"])?;
    for region in regions {
        for (family, count) in reader.model_frequency(region, ModelOrder::ByCount)? {
            let count = count.to_string();
            wtr.write_record([*region, family, count.as_str()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
