//! Exit status codes for the CLI
//!
//! - 0: Success (HTTP 1xx/2xx/3xx)
//! - 1: Usage or argument error
//! - 2: Context error (bad or missing base URL, unwritable state, bad config)
//! - 3: Transport error, stdin or stdout failure
//! - 4: HTTP 4xx response
//! - 5: HTTP 5xx response
//! - 130: User interrupted (Ctrl+C, standard SIGINT exit code)

use std::process::{ExitCode, Termination};

/// Exit status codes reported by the `http` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Usage = 1,
    Context = 2,
    Transport = 3,
    ClientError = 4,
    ServerError = 5,
    /// User interrupted (Ctrl+C) - standard SIGINT code
    Interrupted = 130,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Map an HTTP status code onto the process exit status
    pub fn from_http_status(status_code: u16) -> Self {
        match status_code {
            500.. => ExitStatus::ServerError,
            400..=499 => ExitStatus::ClientError,
            _ => ExitStatus::Success,
        }
    }
}
