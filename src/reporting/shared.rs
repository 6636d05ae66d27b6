// src/reporting/shared.rs
use crate::store::AGE_BUCKETS;

#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Fixed-width age label for the text report: ` 3 -  4`, `11+    `.
pub(crate) fn age_label_wide(bucket: usize) -> String {
    if bucket + 1 >= AGE_BUCKETS {
        format!("{:<7}", format!("{bucket:2}+"))
    } else {
        format!("{bucket:2} - {:2}", bucket + 1)
    }
}

pub(crate) const RULE: &str =
    "-----------------------------------------------------------------";
