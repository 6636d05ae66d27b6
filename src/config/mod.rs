// src/config/mod.rs
pub mod types;

pub use self::types::{Config, IngestConfig};

use std::fs;
use std::path::Path;

use crate::error::{DriveDataError, Result};
use crate::region::GLOBAL_REGION;

/// Config file looked up in the working directory when none is named.
pub const CONFIG_FILE: &str = "drivedata.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, or `drivedata.toml` from the working directory.
    ///
    /// A missing default file yields the defaults; a missing named file does not.
    ///
    /// # Errors
    /// Returns a `Config` error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p, true),
            None => (Path::new(CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|e| DriveDataError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse_toml(&content, path)
    }

    /// Parses and validates TOML text. `origin` is only used in error messages.
    ///
    /// # Errors
    /// Returns error on invalid TOML or on values that fail validation.
    pub fn parse_toml(content: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| DriveDataError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error if the fallback region or comment prefix is unusable.
    pub fn validate(&self, origin: &Path) -> Result<()> {
        let invalid = |message: &str| DriveDataError::Config {
            path: origin.to_path_buf(),
            message: message.to_string(),
        };
        let fallback = self.ingest.fallback_region.trim();
        if fallback.is_empty() {
            return Err(invalid("fallback_region must not be empty"));
        }
        if fallback == GLOBAL_REGION {
            return Err(invalid("fallback_region must not be the reserved name 'global'"));
        }
        if self.ingest.comment_prefix.is_empty() {
            return Err(invalid("comment_prefix must not be empty"));
        }
        Ok(())
    }
}
