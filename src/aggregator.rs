// src/aggregator.rs
//! The record aggregator: one strictly ordered pass over the input.
//!
//! Per record: resolve region, count the drive in region and global, then
//! repair and fold power-on hours, power-cycle count, model and size, in that
//! order. Power-on-hours substitution reads the region's running average as
//! left by the previous record, so records must be folded in file order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::IngestConfig;
use crate::error::{DriveDataError, Result};
use crate::logging;
use crate::region::{self, HostnamePolicy};
use crate::repair::{self, Repair, Repaired};
use crate::store::{AgeHistogram, AggregateStore, IngestCounters, ModelCountPolicy, RegionSummary};

/// Columns every input file must name in its header row.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Hostname",
    "Model",
    "Serial",
    "Size",
    "Power_Cycle_Count",
    "Power_On_Hours",
];

/// One input row. Absent trailing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DriveRecord {
    #[serde(rename = "Hostname", default)]
    pub hostname: String,
    #[serde(rename = "Model", default)]
    pub model: String,
    #[serde(rename = "Serial", default)]
    pub serial: String,
    #[serde(rename = "Size", default)]
    pub size: String,
    #[serde(rename = "Power_Cycle_Count", default)]
    pub power_cycle_count: String,
    #[serde(rename = "Power_On_Hours", default)]
    pub power_on_hours: String,
    /// Read for diagnostics, never aggregated.
    #[serde(rename = "UDMA_CRC_Error_Count", default)]
    pub udma_crc_error_count: Option<String>,
    /// Read for diagnostics, never aggregated.
    #[serde(rename = "Raw_Read_Error_Rate", default)]
    pub raw_read_error_rate: Option<String>,
}

/// How each field of an aggregated record was repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRepairs {
    pub power_on_hours: Repair,
    pub power_cycle_count: Repair,
    pub model: Repair,
    pub size: Repair,
    /// Age fell past the last histogram bucket.
    pub age_clamped: bool,
}

/// What happened to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Aggregated { region: String, repairs: FieldRepairs },
    Comment,
    Rejected,
}

/// Folds records into an [`AggregateStore`].
#[derive(Debug)]
pub struct Aggregator {
    store: AggregateStore,
    config: IngestConfig,
    line: u64,
}

impl Aggregator {
    #[must_use]
    pub fn new(config: IngestConfig) -> Self {
        Self {
            store: AggregateStore::new(),
            config,
            line: 0,
        }
    }

    /// The store as it stands after the records folded so far.
    #[must_use]
    pub fn store(&self) -> &AggregateStore {
        &self.store
    }

    #[must_use]
    pub fn finish(self) -> AggregateStore {
        self.store
    }

    /// Opens and ingests a data file.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened, its header lacks a required
    /// column, or the underlying stream fails.
    pub fn ingest_path(&mut self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "processing data file");
        let file = File::open(path).map_err(|source| DriveDataError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        self.ingest_reader(file)
    }

    /// Ingests comma-separated input with a header row.
    ///
    /// Rows that cannot be decoded are skipped and counted; only header
    /// problems and I/O failures abort the pass.
    ///
    /// # Errors
    /// Returns `Header` if a required column is missing, `Csv` on stream failure.
    pub fn ingest_reader<R: Read>(&mut self, input: R) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        check_header(&headers)?;
        info!(columns = %headers.iter().collect::<Vec<_>>().join(", "), "column names");

        let mut raw = csv::StringRecord::new();
        loop {
            match reader.read_record(&mut raw) {
                Ok(false) => break,
                Ok(true) => self.ingest_raw(&raw, &headers),
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
                Err(err) => {
                    self.store.counters_mut().unreadable_rows += 1;
                    warn!(%err, "skipping unreadable row");
                }
            }
        }

        let counters = self.store.reader().counters();
        info!(
            records = counters.data_rows,
            comments = counters.comment_rows,
            "finished data file"
        );
        Ok(())
    }

    fn ingest_raw(&mut self, raw: &csv::StringRecord, headers: &csv::StringRecord) {
        self.line = raw.position().map_or(0, csv::Position::line);
        match raw.deserialize::<DriveRecord>(Some(headers)) {
            Ok(record) => {
                debug!(target: logging::DATA, line = self.line, ?record);
                self.ingest(&record);
            }
            Err(err) => {
                self.store.counters_mut().unreadable_rows += 1;
                warn!(line = self.line, %err, "skipping undecodable row");
            }
        }
    }

    /// Folds one record into the store. Never fails: bad fields are repaired
    /// and counted.
    pub fn ingest(&mut self, record: &DriveRecord) -> RecordOutcome {
        if record.hostname.trim_start().starts_with(&self.config.comment_prefix) {
            self.store.counters_mut().comment_rows += 1;
            return RecordOutcome::Comment;
        }
        let Some(region) = self.region_for(&record.hostname) else {
            return RecordOutcome::Rejected;
        };

        let line = self.line;
        let policy = self.config.model_counts;
        let (local, global) = self.store.tables_for(&region);

        // Count first so this record's averages divide by the right count.
        local.stats.add_drive();
        global.stats.add_drive();

        let (hours, age_clamped) = fold_power_on_hours(local, global, record, line);
        let repairs = FieldRepairs {
            power_on_hours: hours.repair,
            power_cycle_count: fold_power_cycles(local, global, record, line),
            model: fold_model(local, global, record, policy, line),
            size: fold_size(local, global, record, hours.value, line),
            age_clamped,
        };

        tally(self.store.counters_mut(), &repairs);
        RecordOutcome::Aggregated { region, repairs }
    }

    fn region_for(&mut self, hostname: &str) -> Option<String> {
        let err = match region::resolve_region(hostname) {
            Ok(name) => return Some(name.to_string()),
            Err(err) => err,
        };
        let line = self.line;
        let counters = self.store.counters_mut();
        counters.malformed_hostnames += 1;
        match self.config.hostname_policy {
            HostnamePolicy::Fallback => {
                warn!(line, %err, fallback = %self.config.fallback_region, "using fallback region");
                Some(self.config.fallback_region.clone())
            }
            HostnamePolicy::Reject => {
                counters.rejected_records += 1;
                warn!(line, %err, "rejecting record");
                None
            }
        }
    }
}

/// Reads `path` with the given policies and returns the finished store.
///
/// # Errors
/// See [`Aggregator::ingest_path`].
pub fn aggregate_path(path: &Path, config: IngestConfig) -> Result<AggregateStore> {
    let mut aggregator = Aggregator::new(config);
    aggregator.ingest_path(path)?;
    Ok(aggregator.finish())
}

fn check_header(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| (*column).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DriveDataError::Header { missing })
    }
}

fn fold_power_on_hours(
    local: &mut RegionSummary,
    global: &mut RegionSummary,
    record: &DriveRecord,
    line: u64,
) -> (Repaired<u64>, bool) {
    let hours = repair::power_on_hours(&record.power_on_hours, local.stats.avg_power_on_hours());
    match hours.repair {
        Repair::Missing => info!(
            target: logging::POH,
            line, serial = %record.serial, substitute = hours.value,
            "Power_On_Hours is null; using region running average"
        ),
        Repair::Invalid => info!(
            target: logging::POH,
            line, serial = %record.serial, raw = %record.power_on_hours, substitute = hours.value,
            "Power_On_Hours is not a number; using region running average"
        ),
        Repair::Clean | Repair::Truncated => {}
    }

    let (bucket, clamped) = AgeHistogram::bucket_for(hours.value);
    for tables in [&mut *local, &mut *global] {
        tables.stats.add_power_on_hours(hours.value);
        tables.ages.record(bucket);
    }
    debug!(target: logging::POH, line, hours = hours.value, bucket, clamped, "power-on hours folded");
    (hours, clamped)
}

fn fold_power_cycles(
    local: &mut RegionSummary,
    global: &mut RegionSummary,
    record: &DriveRecord,
    line: u64,
) -> Repair {
    let cycles = repair::power_cycle_count(&record.power_cycle_count);
    if cycles.repair == Repair::Invalid {
        warn!(
            target: logging::PCC,
            line, model = %record.model, serial = %record.serial, raw = %record.power_cycle_count,
            "invalid Power_Cycle_Count; sum not updated"
        );
    }
    for tables in [&mut *local, &mut *global] {
        tables.stats.add_power_cycles(cycles.value);
    }
    debug!(target: logging::PCC, line, cycles = ?cycles.value, "power cycles folded");
    cycles.repair
}

fn fold_model(
    local: &mut RegionSummary,
    global: &mut RegionSummary,
    record: &DriveRecord,
    policy: ModelCountPolicy,
    line: u64,
) -> Repair {
    let family = repair::model_family(&record.model);
    let new_global = global.models.record(&family.value, policy);
    let new_local = local.models.record(&family.value, policy);
    if new_global || new_local {
        info!(target: logging::MODEL, line, model = %family.value, new_global, new_local, "new model family");
    }
    debug!(target: logging::MODEL, line, model = %family.value, "model counted");
    family.repair
}

fn fold_size(
    local: &mut RegionSummary,
    global: &mut RegionSummary,
    record: &DriveRecord,
    hours: u64,
    line: u64,
) -> Repair {
    let size = repair::size_gb(&record.size);
    let Some(gb) = size.value else {
        info!(
            target: logging::SIZE,
            line, model = %record.model, serial = %record.serial, raw = %record.size,
            "zero or null size; excluded from size table"
        );
        for tables in [&mut *local, &mut *global] {
            tables.stats.add_zero_size();
        }
        return size.repair;
    };

    if global.sizes.record(gb, hours) {
        debug!(target: logging::SIZE, line, size_gb = gb, "new size in global");
    }
    if local.sizes.record(gb, hours) {
        info!(target: logging::SIZE, line, size_gb = gb, "new size in region");
    }
    size.repair
}

fn tally(counters: &mut IngestCounters, repairs: &FieldRepairs) {
    counters.data_rows += 1;
    match repairs.power_on_hours {
        Repair::Missing => counters.missing_power_on_hours += 1,
        Repair::Invalid => counters.invalid_power_on_hours += 1,
        Repair::Clean | Repair::Truncated => {}
    }
    match repairs.power_cycle_count {
        Repair::Missing => counters.missing_power_cycle_count += 1,
        Repair::Invalid => counters.invalid_power_cycle_count += 1,
        Repair::Clean | Repair::Truncated => {}
    }
    if repairs.model.is_warning() {
        counters.missing_models += 1;
    }
    if repairs.size == Repair::Invalid {
        counters.invalid_sizes += 1;
    }
    if repairs.age_clamped {
        counters.clamped_ages += 1;
    }
}
