// src/config/types.rs
use serde::{Deserialize, Serialize};

use crate::region::{HostnamePolicy, DEFAULT_FALLBACK_REGION};
use crate::store::ModelCountPolicy;

/// Contents of `drivedata.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Policies applied while folding records into the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub hostname_policy: HostnamePolicy,
    #[serde(default = "default_fallback_region")]
    pub fallback_region: String,
    #[serde(default)]
    pub model_counts: ModelCountPolicy,
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            hostname_policy: HostnamePolicy::default(),
            fallback_region: default_fallback_region(),
            model_counts: ModelCountPolicy::default(),
            comment_prefix: default_comment_prefix(),
        }
    }
}

fn default_fallback_region() -> String { DEFAULT_FALLBACK_REGION.to_string() }
fn default_comment_prefix() -> String { "#".to_string() }
