// src/region.rs
//! Region resolution from fully-qualified hostnames.
//!
//! `host1.us-east.example.com` belongs to region `us-east`: the second
//! dot-separated segment. The name `global` is reserved for the cross-region
//! aggregate and is never produced from input.

use serde::{Deserialize, Serialize};

use crate::error::{DriveDataError, HostnameFault, Result};

/// Key of the cross-region aggregate.
pub const GLOBAL_REGION: &str = "global";

/// Default bucket for hostnames that carry no usable region segment.
pub const DEFAULT_FALLBACK_REGION: &str = "(unresolved)";

/// What to do with a record whose hostname has no region segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostnamePolicy {
    /// File the record under the fallback region.
    #[default]
    Fallback,
    /// Skip the record; it contributes to no aggregate.
    Reject,
}

/// Extracts the region key from a hostname.
///
/// # Errors
/// Returns `MalformedHostname` when the second segment is absent, empty, or
/// equal to the reserved global key.
pub fn resolve_region(hostname: &str) -> Result<&str> {
    let fault = |reason| DriveDataError::MalformedHostname {
        hostname: hostname.to_string(),
        reason,
    };

    let segment = hostname
        .trim()
        .split('.')
        .nth(1)
        .ok_or_else(|| fault(HostnameFault::MissingSegment))?;

    if segment.is_empty() {
        return Err(fault(HostnameFault::EmptySegment));
    }
    if segment == GLOBAL_REGION {
        return Err(fault(HostnameFault::ReservedName));
    }
    Ok(segment)
}
