// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveDataError {
    #[error("data file does not contain a proper column header line (missing: {})", .missing.join(", "))]
    Header { missing: Vec<String> },

    #[error("malformed hostname '{hostname}': {reason}")]
    MalformedHostname {
        hostname: String,
        reason: HostnameFault,
    },

    #[error("Region '{region}' not found; specify one of: {}", .known.join(" "))]
    RegionNotFound { region: String, known: Vec<String> },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// Why a hostname could not yield a region segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostnameFault {
    MissingSegment,
    EmptySegment,
    ReservedName,
}

impl std::fmt::Display for HostnameFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MissingSegment => "no second dot-separated segment",
            Self::EmptySegment => "second segment is empty",
            Self::ReservedName => "second segment is the reserved name 'global'",
        };
        f.write_str(text)
    }
}

pub type Result<T> = std::result::Result<T, DriveDataError>;

// Allow `?` on std::io::Error by converting to DriveDataError::Io with unknown path.
impl From<std::io::Error> for DriveDataError {
    fn from(source: std::io::Error) -> Self {
        DriveDataError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
