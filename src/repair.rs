// src/repair.rs
//! Field repair rules.
//!
//! Each raw CSV field goes through an explicit parse-with-fallback function
//! that returns the usable value together with a [`Repair`] outcome. Nothing
//! in here touches the aggregate tables; substitution values that depend on
//! running state (the region's average power-on hours) are passed in.

use serde::Serialize;

/// Placeholder family for records with an empty model field.
pub const MISSING_MODEL: &str = "(NULL)";

/// Power-cycle count assumed for drives that report none. A drive cannot
/// enter service without being powered on at least once.
pub const DEFAULT_POWER_CYCLES: u64 = 1;

/// How a raw field was turned into a usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Repair {
    /// Value used as given.
    Clean,
    /// Fractional part dropped.
    Truncated,
    /// Field was empty; a substitute was used.
    Missing,
    /// Field was present but unusable; a substitute (or nothing) was used.
    Invalid,
}

impl Repair {
    /// True when the outcome deserves a diagnostic.
    #[must_use]
    pub fn is_warning(self) -> bool {
        matches!(self, Self::Missing | Self::Invalid)
    }
}

/// A repaired field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired<T> {
    pub value: T,
    pub repair: Repair,
}

impl<T> Repaired<T> {
    fn new(value: T, repair: Repair) -> Self {
        Self { value, repair }
    }
}

/// Repairs a power-on-hours field.
///
/// Empty or unparsable values take the integer part of `running_average`,
/// the region's average as it stood before this record. Decimal values are
/// truncated, never rounded.
#[must_use]
pub fn power_on_hours(raw: &str, running_average: f64) -> Repaired<u64> {
    let substitute = truncate_average(running_average);
    let raw = raw.trim();
    if raw.is_empty() {
        return Repaired::new(substitute, Repair::Missing);
    }

    let (integer, truncated) = match raw.split_once('.') {
        Some((integer, _)) => (integer.trim(), true),
        None => (raw, false),
    };
    if integer.is_empty() {
        return Repaired::new(0, Repair::Truncated);
    }

    match integer.parse::<u64>() {
        Ok(hours) if truncated => Repaired::new(hours, Repair::Truncated),
        Ok(hours) => Repaired::new(hours, Repair::Clean),
        Err(_) => Repaired::new(substitute, Repair::Invalid),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_average(average: f64) -> u64 {
    if average.is_finite() && average > 0.0 {
        average.trunc() as u64
    } else {
        0
    }
}

/// Repairs a power-cycle-count field.
///
/// `None` means the value was non-numeric: the caller skips the sum update
/// for this record but still counts the drive.
#[must_use]
pub fn power_cycle_count(raw: &str) -> Repaired<Option<u64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Repaired::new(Some(DEFAULT_POWER_CYCLES), Repair::Missing);
    }
    match raw.parse::<u64>() {
        Ok(cycles) => Repaired::new(Some(cycles), Repair::Clean),
        Err(_) => Repaired::new(None, Repair::Invalid),
    }
}

/// Reduces a model number to its family: the text before the first hyphen.
#[must_use]
pub fn model_family(raw: &str) -> Repaired<String> {
    if raw.trim().is_empty() {
        return Repaired::new(MISSING_MODEL.to_string(), Repair::Missing);
    }
    let family = raw.split('-').next().unwrap_or_default().trim();
    if family.is_empty() {
        return Repaired::new(MISSING_MODEL.to_string(), Repair::Invalid);
    }
    Repaired::new(family.to_string(), Repair::Clean)
}

/// Reduces a decimal size in GB to its integer part.
///
/// `None` marks a zero-size record: empty, zero, or non-numeric. Zero-size
/// records never reach the size table.
#[must_use]
pub fn size_gb(raw: &str) -> Repaired<Option<u64>> {
    let integer = raw.split('.').next().unwrap_or_default().trim();
    if integer.is_empty() {
        return Repaired::new(None, Repair::Missing);
    }
    match integer.parse::<u64>() {
        Ok(0) => Repaired::new(None, Repair::Missing),
        Ok(size) => Repaired::new(Some(size), Repair::Clean),
        Err(_) => Repaired::new(None, Repair::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_hours_passes_integers_through() {
        assert_eq!(power_on_hours("43800", 0.0), Repaired::new(43800, Repair::Clean));
        assert_eq!(power_on_hours(" 12 ", 0.0).value, 12);
    }

    #[test]
    fn power_on_hours_truncates_decimals() {
        assert_eq!(power_on_hours("1234.99", 0.0), Repaired::new(1234, Repair::Truncated));
        assert_eq!(power_on_hours(".5", 0.0), Repaired::new(0, Repair::Truncated));
    }

    #[test]
    fn empty_power_on_hours_takes_running_average() {
        assert_eq!(power_on_hours("", 166.67), Repaired::new(166, Repair::Missing));
        assert_eq!(power_on_hours("", 0.0), Repaired::new(0, Repair::Missing));
    }

    #[test]
    fn garbage_power_on_hours_takes_running_average() {
        assert_eq!(power_on_hours("n/a", 250.0), Repaired::new(250, Repair::Invalid));
        assert_eq!(power_on_hours("-40", 7.5), Repaired::new(7, Repair::Invalid));
    }

    #[test]
    fn empty_power_cycle_count_is_one() {
        assert_eq!(power_cycle_count(""), Repaired::new(Some(1), Repair::Missing));
    }

    #[test]
    fn non_numeric_power_cycle_count_yields_nothing() {
        assert_eq!(power_cycle_count("3.0"), Repaired::new(None, Repair::Invalid));
        assert_eq!(power_cycle_count("lots"), Repaired::new(None, Repair::Invalid));
        assert_eq!(power_cycle_count("17").value, Some(17));
    }

    #[test]
    fn model_family_is_prefix_before_hyphen() {
        assert_eq!(model_family("ST4000NM0033-9ZM170").value, "ST4000NM0033");
        assert_eq!(model_family(" HUS726060ALE610 ").value, "HUS726060ALE610");
        assert_eq!(model_family("WDC WD40EFRX-68N32N0").value, "WDC WD40EFRX");
    }

    #[test]
    fn empty_model_is_null_placeholder() {
        let repaired = model_family("");
        assert_eq!(repaired.value, MISSING_MODEL);
        assert_eq!(repaired.repair, Repair::Missing);
        assert_eq!(model_family("-X").value, MISSING_MODEL);
    }

    #[test]
    fn size_keeps_integer_gigabytes() {
        assert_eq!(size_gb("3726.02").value, Some(3726));
        assert_eq!(size_gb(" 7452 ").value, Some(7452));
    }

    #[test]
    fn zero_or_empty_size_is_zero_size() {
        assert_eq!(size_gb(""), Repaired::new(None, Repair::Missing));
        assert_eq!(size_gb("0"), Repaired::new(None, Repair::Missing));
        assert_eq!(size_gb("0.00").value, None);
        assert_eq!(size_gb("big"), Repaired::new(None, Repair::Invalid));
        assert_eq!(size_gb("-5"), Repaired::new(None, Repair::Invalid));
    }
}
