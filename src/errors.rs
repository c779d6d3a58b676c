//! Error types for httpcli

use thiserror::Error;

use crate::status::ExitStatus;

/// Main error type for httpcli
#[derive(Error, Debug)]
pub enum HttpcliError {
    #[error("{0}")]
    Usage(String),

    #[error("Error parsing URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error(
        "Relative URL passed as argument but missing an absolute base URL from \
         environment. Either supply an absolute URL or use the \"http url <base-url>\" \
         command to set an absolute base URL."
    )]
    MissingBaseUrl,

    #[error("No base URL set")]
    NoBaseUrl,

    #[error("Error parsing base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Base URL must be an absolute URL: {0}")]
    NotAbsolute(String),

    #[error("Malformed session state: {0}")]
    MalformedState(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to persist session state to {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpcliError {
    /// Exit status the process terminates with when this error reaches `core::run`
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            HttpcliError::Usage(_)
            | HttpcliError::UrlParse(_)
            | HttpcliError::InvalidHeader(_) => ExitStatus::Usage,
            HttpcliError::MissingBaseUrl
            | HttpcliError::NoBaseUrl
            | HttpcliError::InvalidBaseUrl(_)
            | HttpcliError::NotAbsolute(_)
            | HttpcliError::MalformedState(_)
            | HttpcliError::Config(_)
            | HttpcliError::Persist { .. } => ExitStatus::Context,
            HttpcliError::Stdin(_) | HttpcliError::Transport(_) | HttpcliError::Io(_) => {
                ExitStatus::Transport
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HttpcliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_mapping() {
        assert_eq!(HttpcliError::Usage("x".into()).exit_status(), ExitStatus::Usage);
        assert_eq!(HttpcliError::MissingBaseUrl.exit_status(), ExitStatus::Context);
        assert_eq!(HttpcliError::NoBaseUrl.exit_status(), ExitStatus::Context);
        assert_eq!(
            HttpcliError::Stdin(std::io::Error::other("closed")).exit_status(),
            ExitStatus::Transport
        );
    }

    #[test]
    fn test_url_parse_is_usage_error() {
        let err: HttpcliError = url::Url::parse("http://[::1").unwrap_err().into();
        assert_eq!(err.exit_status(), ExitStatus::Usage);
        assert!(err.to_string().starts_with("Error parsing URL"));
    }

    #[test]
    fn test_no_base_url_message() {
        assert_eq!(HttpcliError::NoBaseUrl.to_string(), "No base URL set");
    }
}
