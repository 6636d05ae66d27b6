// src/reporting/console.rs
use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::reader::{AggregateReader, ModelOrder};
use crate::region::GLOBAL_REGION;
use crate::repair::MISSING_MODEL;
use crate::reporting::shared::{age_label_wide, percent, RULE};
use crate::reporting::Sections;

/// Writes the fixed-width text report.
///
/// All power sections come first, then all model sections, then all size
/// sections, each in region order.
///
/// # Errors
/// Returns error if writing fails or a region is unknown.
pub fn write_report<W: Write>(
    reader: &AggregateReader<'_>,
    regions: &[&str],
    sections: Sections,
    out: &mut W,
) -> Result<()> {
    if sections.power {
        for region in regions {
            write_power_on_hours(reader, region, out)?;
        }
    }
    if sections.models {
        for region in regions {
            write_models(reader, region, out)?;
        }
    }
    if sections.sizes {
        for region in regions {
            write_sizes(reader, region, out)?;
        }
    }
    Ok(())
}

fn heading<W: Write>(out: &mut W, region: &str, title: &str) -> Result<()> {
    writeln!(
        out,
        "{} {} {}",
        "REGION:".bold(),
        region.cyan().bold(),
        format!("===> {title}").bold()
    )?;
    writeln!(out)?;
    Ok(())
}

/// Age histogram plus the region's wear summary.
///
/// # Errors
/// Returns error if writing fails or the region is unknown.
pub fn write_power_on_hours<W: Write>(
    reader: &AggregateReader<'_>,
    region: &str,
    out: &mut W,
) -> Result<()> {
    let stats = reader.drive_stats(region)?;
    let ages = reader.age_histogram(region)?;

    heading(out, region, "Drive power-on hours")?;
    writeln!(out, "\t  Years\t\tDrives\tPercent")?;
    for (bucket, drives) in ages.iter() {
        writeln!(
            out,
            "\t {}\t{drives:6}\t{:4.1}%",
            age_label_wide(bucket),
            percent(drives, stats.count())
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{region} region summary:")?;
    writeln!(out, "\t{:8.0} average drive power-on hours", stats.avg_power_on_hours())?;
    writeln!(out, "\t{:8.2} average drive power-on years", stats.avg_power_on_years())?;
    writeln!(out, "\t{:8.2} average drive power cycle count", stats.avg_power_cycle_count())?;
    writeln!(out, "\t{:8} drive records reported", stats.count())?;

    if region == GLOBAL_REGION {
        let counters = reader.counters();
        writeln!(
            out,
            "\t{:8} drives reported zero Power On Hours ({:4.1} %)",
            counters.missing_power_on_hours,
            percent(counters.missing_power_on_hours, stats.count())
        )?;
        writeln!(
            out,
            "\t{:8} drives reported zero Power Cycle Count ({:4.1} %)",
            counters.missing_power_cycle_count,
            percent(counters.missing_power_cycle_count, stats.count())
        )?;
    }
    writeln!(out, "{}", RULE.dimmed())?;
    Ok(())
}

/// Model families by descending quantity.
///
/// # Errors
/// Returns error if writing fails or the region is unknown.
pub fn write_models<W: Write>(reader: &AggregateReader<'_>, region: &str, out: &mut W) -> Result<()> {
    let models = reader.model_frequency(region, ModelOrder::ByCount)?;

    heading(out, region, "Drive model quantities")?;
    writeln!(out, "\tQuantity : Model")?;
    let mut total = 0;
    let mut nulls = None;
    for (family, count) in &models {
        writeln!(out, "\t{count:8} : {family}")?;
        total += count;
        if *family == MISSING_MODEL {
            nulls = Some(*count);
        }
    }
    writeln!(out)?;
    writeln!(out, "\t{:8} Unique drive model(s)", models.len())?;
    if let Some(nulls) = nulls {
        writeln!(out, "\t{nulls:8} Drive(s) reporting a null model number")?;
    }
    writeln!(out, "\t{total:8} Total drive record(s)")?;
    writeln!(out, "{}", RULE.dimmed())?;
    Ok(())
}

/// Sizes ascending with quantity and average power-on hours.
///
/// # Errors
/// Returns error if writing fails or the region is unknown.
pub fn write_sizes<W: Write>(reader: &AggregateReader<'_>, region: &str, out: &mut W) -> Result<()> {
    let sizes = reader.size_frequency(region)?;
    let stats = reader.drive_stats(region)?;

    heading(out, region, "Drive size quantities")?;
    writeln!(out, "\tSize (GB):      Quantity\t Avg POH")?;
    let mut total = 0;
    for (size, entry) in &sizes {
        writeln!(
            out,
            "\t{size:8} :\t{:8}\t{:8.0}",
            entry.count(),
            entry.avg_power_on_hours()
        )?;
        total += entry.count();
    }
    writeln!(out)?;
    writeln!(out, "\t{:8} Unique drive size(s)", sizes.len())?;
    writeln!(
        out,
        "\t{:8} Drive(s) reporting size of zero or null",
        stats.zero_size_count()
    )?;
    writeln!(out, "\t{total:8} Total drive record(s)")?;
    writeln!(out, "{}", RULE.dimmed())?;
    Ok(())
}
