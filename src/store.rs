// src/store.rs
//! The aggregate store: per-region and global running totals.
//!
//! Every region owns a [`RegionSummary`] holding four tables. The global
//! summary always exists; region summaries are created on first sighting
//! through [`AggregateStore::tables_for`], which hands back the region and
//! global tables together so one record can update both.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::logging;

/// Hours in a (non-leap) year; the width of one age bucket.
pub const HOURS_PER_YEAR: u64 = 24 * 365;

/// Number of age buckets. The last one collects everything older.
pub const AGE_BUCKETS: usize = 12;

#[allow(clippy::cast_precision_loss)]
fn mean(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Drive count and wear totals for one region.
///
/// Averages are stored, and recomputed in the same call that moves their
/// sum. Between a record's count increment and its field updates, the stored
/// average still reflects the previous records only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DriveStats {
    count: u64,
    power_on_hours_sum: u64,
    avg_power_on_hours: f64,
    power_cycle_count_sum: u64,
    avg_power_cycle_count: f64,
    zero_size_count: u64,
}

impl DriveStats {
    pub(crate) fn add_drive(&mut self) {
        self.count += 1;
    }

    pub(crate) fn add_power_on_hours(&mut self, hours: u64) {
        self.power_on_hours_sum = self.power_on_hours_sum.saturating_add(hours);
        self.avg_power_on_hours = mean(self.power_on_hours_sum, self.count);
    }

    /// `None` skips the sum but still refreshes the average against the
    /// current count.
    pub(crate) fn add_power_cycles(&mut self, cycles: Option<u64>) {
        if let Some(cycles) = cycles {
            self.power_cycle_count_sum = self.power_cycle_count_sum.saturating_add(cycles);
        }
        self.avg_power_cycle_count = mean(self.power_cycle_count_sum, self.count);
    }

    pub(crate) fn add_zero_size(&mut self) {
        self.zero_size_count += 1;
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn power_on_hours_sum(&self) -> u64 {
        self.power_on_hours_sum
    }

    #[must_use]
    pub fn avg_power_on_hours(&self) -> f64 {
        self.avg_power_on_hours
    }

    #[must_use]
    pub fn avg_power_on_years(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let per_year = HOURS_PER_YEAR as f64;
        self.avg_power_on_hours / per_year
    }

    #[must_use]
    pub fn power_cycle_count_sum(&self) -> u64 {
        self.power_cycle_count_sum
    }

    #[must_use]
    pub fn avg_power_cycle_count(&self) -> f64 {
        self.avg_power_cycle_count
    }

    #[must_use]
    pub fn zero_size_count(&self) -> u64 {
        self.zero_size_count
    }
}

/// Drive counts by operational age in whole years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgeHistogram {
    buckets: [u64; AGE_BUCKETS],
}

impl AgeHistogram {
    /// Bucket index for a power-on-hours value, and whether it was clamped.
    #[must_use]
    pub fn bucket_for(hours: u64) -> (usize, bool) {
        let years = hours / HOURS_PER_YEAR;
        let last = AGE_BUCKETS - 1;
        match usize::try_from(years) {
            Ok(y) if y <= last => (y, false),
            _ => (last, true),
        }
    }

    /// Display label: `0-1` .. `10-11`, then `11+`.
    #[must_use]
    pub fn label(bucket: usize) -> String {
        if bucket + 1 >= AGE_BUCKETS {
            format!("{bucket}+")
        } else {
            format!("{bucket}-{}", bucket + 1)
        }
    }

    pub(crate) fn record(&mut self, bucket: usize) {
        if let Some(slot) = self.buckets.get_mut(bucket) {
            *slot += 1;
        }
    }

    #[must_use]
    pub fn get(&self, bucket: usize) -> u64 {
        self.buckets.get(bucket).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.buckets.iter().copied().enumerate()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }
}

/// How a model family's counter starts on first sighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelCountPolicy {
    /// First sighting counts once.
    #[default]
    Exact,
    /// First sighting counts twice, as historic reports did.
    Legacy,
}

impl ModelCountPolicy {
    fn first_sighting(self) -> u64 {
        match self {
            Self::Exact => 1,
            Self::Legacy => 2,
        }
    }
}

/// Occurrences per model family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelFrequency {
    counts: BTreeMap<String, u64>,
}

impl ModelFrequency {
    /// Counts one drive of `family`. Returns true when the family is new.
    pub(crate) fn record(&mut self, family: &str, policy: ModelCountPolicy) -> bool {
        if let Some(count) = self.counts.get_mut(family) {
            *count += 1;
            return false;
        }
        self.counts.insert(family.to_string(), policy.first_sighting());
        true
    }

    #[must_use]
    pub fn get(&self, family: &str) -> Option<u64> {
        self.counts.get(family).copied()
    }

    /// Families in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Families by descending count; equal counts in name order.
    #[must_use]
    pub fn by_count(&self) -> Vec<(&str, u64)> {
        let mut out: Vec<(&str, u64)> = self.iter().collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Count and wear for drives of one size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SizeStats {
    count: u64,
    power_on_hours_sum: u64,
    avg_power_on_hours: f64,
}

impl SizeStats {
    fn add(&mut self, hours: u64) {
        self.count += 1;
        self.power_on_hours_sum = self.power_on_hours_sum.saturating_add(hours);
        self.avg_power_on_hours = mean(self.power_on_hours_sum, self.count);
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn power_on_hours_sum(&self) -> u64 {
        self.power_on_hours_sum
    }

    #[must_use]
    pub fn avg_power_on_hours(&self) -> f64 {
        self.avg_power_on_hours
    }
}

/// Per-size statistics keyed by whole gigabytes, ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SizeFrequency {
    sizes: BTreeMap<u64, SizeStats>,
}

impl SizeFrequency {
    /// Counts one drive of `size_gb`. Returns true when the size is new.
    pub(crate) fn record(&mut self, size_gb: u64, hours: u64) -> bool {
        let created = !self.sizes.contains_key(&size_gb);
        self.sizes.entry(size_gb).or_default().add(hours);
        created
    }

    #[must_use]
    pub fn get(&self, size_gb: u64) -> Option<&SizeStats> {
        self.sizes.get(&size_gb)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &SizeStats)> + '_ {
        self.sizes.iter().map(|(k, v)| (*k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.sizes.values().map(SizeStats::count).sum()
    }
}

/// The four tables kept for every region, and for global.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionSummary {
    pub(crate) stats: DriveStats,
    pub(crate) ages: AgeHistogram,
    pub(crate) models: ModelFrequency,
    pub(crate) sizes: SizeFrequency,
}

impl RegionSummary {
    #[must_use]
    pub fn stats(&self) -> &DriveStats {
        &self.stats
    }

    #[must_use]
    pub fn ages(&self) -> &AgeHistogram {
        &self.ages
    }

    #[must_use]
    pub fn models(&self) -> &ModelFrequency {
        &self.models
    }

    #[must_use]
    pub fn sizes(&self) -> &SizeFrequency {
        &self.sizes
    }
}

/// Pass-wide counters that belong to no region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestCounters {
    /// Non-comment data rows that reached the aggregator.
    pub data_rows: u64,
    pub comment_rows: u64,
    /// Rows dropped by the `reject` hostname policy.
    pub rejected_records: u64,
    /// Rows the CSV reader could not decode.
    pub unreadable_rows: u64,
    pub malformed_hostnames: u64,
    pub missing_power_on_hours: u64,
    pub invalid_power_on_hours: u64,
    pub missing_power_cycle_count: u64,
    pub invalid_power_cycle_count: u64,
    pub missing_models: u64,
    pub invalid_sizes: u64,
    /// Ages beyond the last bucket folded into it.
    pub clamped_ages: u64,
}

/// All aggregates of one ingestion pass.
#[derive(Debug, Clone, Default)]
pub struct AggregateStore {
    global: RegionSummary,
    regions: HashMap<String, RegionSummary>,
    order: Vec<String>,
    counters: IngestCounters,
}

impl AggregateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(region, global)` tables, creating the region's on first use.
    pub(crate) fn tables_for(&mut self, region: &str) -> (&mut RegionSummary, &mut RegionSummary) {
        let local = match self.regions.entry(region.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                tracing::debug!(target: logging::KEYS, region, "creating region tables");
                self.order.push(e.key().clone());
                e.insert(RegionSummary::default())
            }
        };
        (local, &mut self.global)
    }

    pub(crate) fn counters_mut(&mut self) -> &mut IngestCounters {
        &mut self.counters
    }

    pub(crate) fn global(&self) -> &RegionSummary {
        &self.global
    }

    pub(crate) fn region(&self, name: &str) -> Option<&RegionSummary> {
        self.regions.get(name)
    }

    /// Real region names in first-seen order.
    pub(crate) fn region_names(&self) -> &[String] {
        &self.order
    }

    pub(crate) fn counters(&self) -> &IngestCounters {
        &self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_buckets_are_whole_years() {
        assert_eq!(AgeHistogram::bucket_for(0), (0, false));
        assert_eq!(AgeHistogram::bucket_for(8759), (0, false));
        assert_eq!(AgeHistogram::bucket_for(8760), (1, false));
        assert_eq!(AgeHistogram::bucket_for(11 * 8760 + 5), (11, false));
    }

    #[test]
    fn ages_past_last_bucket_are_clamped() {
        assert_eq!(AgeHistogram::bucket_for(12 * 8760), (11, true));
        assert_eq!(AgeHistogram::bucket_for(u64::MAX), (11, true));
    }

    #[test]
    fn age_labels() {
        assert_eq!(AgeHistogram::label(0), "0-1");
        assert_eq!(AgeHistogram::label(10), "10-11");
        assert_eq!(AgeHistogram::label(11), "11+");
    }

    #[test]
    fn averages_follow_sums() {
        let mut s = DriveStats::default();
        s.add_drive();
        s.add_power_on_hours(100);
        s.add_drive();
        assert!((s.avg_power_on_hours() - 100.0).abs() < f64::EPSILON);
        s.add_power_on_hours(300);
        assert!((s.avg_power_on_hours() - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn skipped_power_cycles_still_refresh_average() {
        let mut s = DriveStats::default();
        s.add_drive();
        s.add_power_cycles(Some(10));
        s.add_drive();
        s.add_power_cycles(None);
        assert_eq!(s.power_cycle_count_sum(), 10);
        assert!((s.avg_power_cycle_count() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn model_first_sighting_follows_policy() {
        let mut exact = ModelFrequency::default();
        assert!(exact.record("ST4000", ModelCountPolicy::Exact));
        assert!(!exact.record("ST4000", ModelCountPolicy::Exact));
        assert_eq!(exact.get("ST4000"), Some(2));

        let mut legacy = ModelFrequency::default();
        legacy.record("ST4000", ModelCountPolicy::Legacy);
        assert_eq!(legacy.get("ST4000"), Some(2));
    }

    #[test]
    fn models_sort_by_count_then_name() {
        let mut m = ModelFrequency::default();
        for family in ["b", "a", "c", "c"] {
            m.record(family, ModelCountPolicy::Exact);
        }
        assert_eq!(m.by_count(), vec![("c", 2), ("a", 1), ("b", 1)]);
    }

    #[test]
    fn sizes_iterate_ascending() {
        let mut s = SizeFrequency::default();
        assert!(s.record(7452, 10));
        assert!(s.record(1862, 20));
        assert!(!s.record(7452, 30));
        let keys: Vec<u64> = s.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1862, 7452]);
        assert_eq!(s.get(7452).map(SizeStats::count), Some(2));
        assert!(s.get(7452).is_some_and(|v| (v.avg_power_on_hours() - 20.0).abs() < f64::EPSILON));
    }

    #[test]
    fn region_tables_are_created_once_in_order() {
        let mut store = AggregateStore::new();
        store.tables_for("west").0.stats.add_drive();
        store.tables_for("east").0.stats.add_drive();
        store.tables_for("west").0.stats.add_drive();
        assert_eq!(store.region_names(), ["west".to_string(), "east".to_string()]);
        assert_eq!(store.region("west").map(|r| r.stats().count()), Some(2));
    }
}
