//! Exit codes for the loganon CLI.
//!
//! Exit code ranges:
//! - 0: success
//! - 10-19: user/configuration errors (recoverable by user action)
//! - 20-29: internal and I/O errors
//!
//! Argument syntax errors are reported by clap with its own exit code (2).

use loganon_engine::AnonError;

/// Exit codes for loganon runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Input fully processed (including passthrough of binary content)
    Clean = 0,

    /// Invalid configuration: unknown processor, mask or ratio out of range,
    /// malformed config file
    ArgsError = 10,

    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error reading input, writing output, or replacing the file
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<&AnonError> for ExitCode {
    fn from(err: &AnonError) -> Self {
        if err.is_config_error() {
            return ExitCode::ArgsError;
        }
        match err {
            AnonError::IoError(_) => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}
