// src/logging.rs
//! Diagnostic targets and subscriber setup.
//!
//! Every debug topic maps to its own tracing target under `drivedata_core`,
//! so `-d poh` or `RUST_LOG=drivedata_core::poh=debug` selects just the
//! power-on-hours trail.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

pub const DATA: &str = "drivedata_core::data";
pub const KEYS: &str = "drivedata_core::keys";
pub const MODEL: &str = "drivedata_core::model";
pub const PCC: &str = "drivedata_core::pcc";
pub const POH: &str = "drivedata_core::poh";
pub const REPORTS: &str = "drivedata_core::reports";
pub const SIZE: &str = "drivedata_core::size";

const ROOT: &str = "drivedata_core";

/// Topics selectable with `--debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DebugTopic {
    /// Every raw record as read.
    Data,
    /// Region table creation.
    Keys,
    /// Model family extraction and counting.
    Model,
    /// Power-cycle-count repair and sums.
    Pcc,
    /// Power-on-hours repair, sums and age buckets.
    Poh,
    /// Report rendering.
    Reports,
    /// Size extraction and size table updates.
    Size,
}

impl DebugTopic {
    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            Self::Data => DATA,
            Self::Keys => KEYS,
            Self::Model => MODEL,
            Self::Pcc => PCC,
            Self::Poh => POH,
            Self::Reports => REPORTS,
            Self::Size => SIZE,
        }
    }
}

/// Builds the filter directives for the given verbosity and debug topics.
#[must_use]
pub fn directives(verbose: bool, topics: &[DebugTopic]) -> String {
    let level = if verbose { "info" } else { "warn" };
    let mut out = format!("{ROOT}={level}");
    for topic in topics {
        out.push(',');
        out.push_str(topic.target());
        out.push_str("=debug");
    }
    out
}

/// Installs the global stderr subscriber. `RUST_LOG` wins when set.
pub fn init(verbose: bool, topics: &[DebugTopic]) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbose, topics)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
