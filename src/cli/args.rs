// src/cli/args.rs
use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::logging::DebugTopic;
use crate::region::{HostnamePolicy, GLOBAL_REGION};
use crate::reporting::{OutputFormat, Sections};
use crate::store::ModelCountPolicy;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser)]
#[command(
    name = "drivedata",
    version,
    about = "Parse hard drive S.M.A.R.T. data and summarize by region and by drive characteristics"
)]
pub struct Cli {
    /// Report all data from all regions combined
    #[arg(long, short)]
    pub all: bool,
    /// Report data in CSV format
    #[arg(long, short, conflicts_with = "json")]
    pub csv: bool,
    /// Report data as JSON
    #[arg(long)]
    pub json: bool,
    /// Report additional debug output for a topic (repeatable)
    #[arg(long, short, value_enum, value_name = "TOPIC")]
    pub debug: Vec<DebugTopic>,
    /// Report drive model distribution
    #[arg(long, short)]
    pub model: bool,
    /// Report drive power-on hours distribution
    #[arg(long, short)]
    pub power: bool,
    /// Report drive size distribution
    #[arg(long, short)]
    pub size: bool,
    /// Print verbose information
    #[arg(long, short)]
    pub verbose: bool,
    /// Data file to process
    #[arg(long, short, value_name = "FILE")]
    pub file: PathBuf,
    /// Report data from specified region
    #[arg(long, short, value_name = "REGION")]
    pub region: Option<String>,
    /// Config file [default: ./drivedata.toml when present]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Count a model's first sighting twice, matching historic reports
    #[arg(long)]
    pub legacy_model_counts: bool,
    /// Drop records whose hostname has no region segment
    #[arg(long)]
    pub reject_malformed: bool,
}

impl Cli {
    /// `--all` selects every section.
    #[must_use]
    pub fn sections(&self) -> Sections {
        if self.all {
            return Sections::all();
        }
        Sections {
            power: self.power,
            models: self.model,
            sizes: self.size,
        }
    }

    /// `--all` reports the global region, overriding `--region`.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        if self.all {
            Some(GLOBAL_REGION)
        } else {
            self.region.as_deref()
        }
    }

    #[must_use]
    pub fn format(&self) -> OutputFormat {
        if self.csv {
            OutputFormat::Csv
        } else if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Flags that override `drivedata.toml`.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.legacy_model_counts {
            config.ingest.model_counts = ModelCountPolicy::Legacy;
        }
        if self.reject_malformed {
            config.ingest.hostname_policy = HostnamePolicy::Reject;
        }
    }
}
