// src/reader.rs
//! Read-only queries over a finished [`AggregateStore`].

use crate::error::{DriveDataError, Result};
use crate::region::GLOBAL_REGION;
use crate::store::{AgeHistogram, AggregateStore, DriveStats, IngestCounters, RegionSummary, SizeStats};

/// Ordering for model frequency queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelOrder {
    /// Alphabetical by family.
    ByName,
    /// Most common first; ties alphabetical.
    #[default]
    ByCount,
}

/// A borrowed view of the store for reporting.
#[derive(Debug, Clone, Copy)]
pub struct AggregateReader<'a> {
    store: &'a AggregateStore,
}

impl AggregateStore {
    #[must_use]
    pub fn reader(&self) -> AggregateReader<'_> {
        AggregateReader { store: self }
    }
}

impl<'a> AggregateReader<'a> {
    /// Known region keys: `global` first, then regions in first-seen order.
    #[must_use]
    pub fn regions(&self) -> Vec<&'a str> {
        std::iter::once(GLOBAL_REGION)
            .chain(self.store.region_names().iter().map(String::as_str))
            .collect()
    }

    #[must_use]
    pub fn contains(&self, region: &str) -> bool {
        region == GLOBAL_REGION || self.store.region(region).is_some()
    }

    /// All four tables of `region`.
    ///
    /// # Errors
    /// Returns `RegionNotFound`, listing the known regions, for unseen keys.
    pub fn summary(&self, region: &str) -> Result<&'a RegionSummary> {
        if region == GLOBAL_REGION {
            return Ok(self.store.global());
        }
        self.store
            .region(region)
            .ok_or_else(|| DriveDataError::RegionNotFound {
                region: region.to_string(),
                known: self.regions().into_iter().map(str::to_string).collect(),
            })
    }

    /// # Errors
    /// Returns `RegionNotFound` for unseen keys.
    pub fn drive_stats(&self, region: &str) -> Result<&'a DriveStats> {
        self.summary(region).map(RegionSummary::stats)
    }

    /// # Errors
    /// Returns `RegionNotFound` for unseen keys.
    pub fn age_histogram(&self, region: &str) -> Result<&'a AgeHistogram> {
        self.summary(region).map(RegionSummary::ages)
    }

    /// # Errors
    /// Returns `RegionNotFound` for unseen keys.
    pub fn model_frequency(&self, region: &str, order: ModelOrder) -> Result<Vec<(&'a str, u64)>> {
        let models = self.summary(region)?.models();
        Ok(match order {
            ModelOrder::ByName => models.iter().collect(),
            ModelOrder::ByCount => models.by_count(),
        })
    }

    /// Sizes ascending by gigabytes.
    ///
    /// # Errors
    /// Returns `RegionNotFound` for unseen keys.
    pub fn size_frequency(&self, region: &str) -> Result<Vec<(u64, &'a SizeStats)>> {
        Ok(self.summary(region)?.sizes().iter().collect())
    }

    /// Pass-wide counters, including missing power-on-hours and power-cycle
    /// counts.
    #[must_use]
    pub fn counters(&self) -> &'a IngestCounters {
        self.store.counters()
    }
}
