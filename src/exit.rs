// src/exit.rs
//! Standardized process exit codes for `drivedata`.
//!
//! Provides a stable contract for scripts that wrap the report.

use std::process::Termination;

use crate::error::DriveDataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum DriveDataExit {
    /// Report rendered successfully.
    Success = 0,
    /// Generic error (I/O, unreadable input stream).
    Error = 1,
    /// Input or invocation rejected (bad header, no report selected, bad config).
    InvalidInput = 2,
    /// The requested region never appeared in the data.
    RegionNotFound = 3,
}

impl DriveDataExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps a library error onto the exit code scripts see.
    #[must_use]
    pub fn for_error(err: &DriveDataError) -> Self {
        match err {
            DriveDataError::Header { .. } | DriveDataError::Config { .. } => Self::InvalidInput,
            DriveDataError::RegionNotFound { .. } => Self::RegionNotFound,
            DriveDataError::MalformedHostname { .. }
            | DriveDataError::Io { .. }
            | DriveDataError::Csv(_) => Self::Error,
        }
    }
}

impl Termination for DriveDataExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
