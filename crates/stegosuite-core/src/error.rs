use std::path::PathBuf;
use thiserror::Error;

use crate::api::shared::MAX_MESSAGE_CHARS;
use crate::selection::Direction;

#[derive(Error, Debug)]
pub enum StegoSuiteError {
    /// Represents a locally detected input problem, it never reaches the service
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Represents a submission attempt while another one is still outstanding
    #[error("Another transformation is still in progress")]
    ConcurrentRequest,

    /// Represents a network failure or a missing response.
    /// The message stays generic, details go to the log.
    #[error("{0} failed")]
    Transport(Direction),

    /// Represents a structured error returned by the service, or a synthesized one
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Represents a success status that came without any body
    #[error("Empty response from server")]
    EmptyResponse,

    /// Represents a success body that does not follow the decode contract
    #[error("Malformed response from server")]
    MalformedResponse,

    /// Represents an unknown scheme code, for example `lsb` instead of `lsbm`
    #[error("Unknown scheme `{0}`, expected one of lsbm, erde, dct, pvd")]
    UnknownScheme(String),

    /// Represents a selection of something that is not a readable regular file
    #[error("Not a selectable file: {}", .0.display())]
    FileNotSelectable(PathBuf),

    /// Represents a broken configuration file or value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Represents a failure to parse the TOML configuration file
    #[error("Invalid configuration file")]
    ConfigParseError(#[from] toml::de::Error),

    /// Represents a failure while setting up the HTTP client
    #[error("HTTP client setup error")]
    HttpClientError(#[from] reqwest::Error),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    #[error("No outcome has been published yet")]
    NoOutcome,
}

impl StegoSuiteError {
    /// The taxonomy bucket of this error when it ends up as a published failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            StegoSuiteError::Validation(_)
            | StegoSuiteError::UnknownScheme(_)
            | StegoSuiteError::FileNotSelectable(_) => ErrorKind::Validation,
            StegoSuiteError::ConcurrentRequest => ErrorKind::ConcurrentRequest,
            StegoSuiteError::Service { .. }
            | StegoSuiteError::EmptyResponse
            | StegoSuiteError::MalformedResponse => ErrorKind::Service,
            StegoSuiteError::Transport(_) | StegoSuiteError::HttpClientError(_) => {
                ErrorKind::Transport
            }
            StegoSuiteError::InvalidConfig(_)
            | StegoSuiteError::ConfigParseError(_)
            | StegoSuiteError::ReadError { .. }
            | StegoSuiteError::WriteError { .. }
            | StegoSuiteError::NoOutcome => ErrorKind::Local,
        }
    }

    /// Builds the service error from a non-2xx status, preferring the message given by the service.
    pub fn service(status: u16, status_text: &str, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| {
            format!("Server error: {status} {status_text}")
                .trim_end()
                .to_string()
        });
        StegoSuiteError::Service { status, message }
    }
}

/// Input problems detected before anything is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select an image file")]
    MissingImage,

    #[error("Please enter a secret message")]
    MissingMessage,

    #[error("Secret message is {0} characters long, at most {max} are allowed", max = MAX_MESSAGE_CHARS)]
    MessageTooLong(usize),
}

/// Classification of a failed transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    ConcurrentRequest,
    Transport,
    Service,
    /// configuration or local file problems, the service is not involved
    Local,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_prefers_the_given_message() {
        let e = StegoSuiteError::service(
            422,
            "Unprocessable Entity",
            Some("unsupported scheme".into()),
        );
        assert_eq!(e.to_string(), "unsupported scheme");
        assert_eq!(e.kind(), ErrorKind::Service);
    }

    #[test]
    fn service_error_synthesizes_status_line() {
        let e = StegoSuiteError::service(500, "Internal Server Error", None);
        assert_eq!(e.to_string(), "Server error: 500 Internal Server Error");

        let e = StegoSuiteError::service(599, "", None);
        assert_eq!(e.to_string(), "Server error: 599");
    }

    #[test]
    fn empty_response_counts_as_service_error() {
        assert_eq!(StegoSuiteError::EmptyResponse.kind(), ErrorKind::Service);
    }

    #[test]
    fn transport_error_names_the_operation() {
        assert_eq!(
            StegoSuiteError::Transport(Direction::Encode).to_string(),
            "Encoding failed"
        );
        assert_eq!(
            StegoSuiteError::Transport(Direction::Decode).to_string(),
            "Decoding failed"
        );
    }

    #[test]
    fn local_problems_are_not_blamed_on_the_network() {
        let write = StegoSuiteError::WriteError {
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };

        assert_eq!(write.kind(), ErrorKind::Local);
        assert_eq!(StegoSuiteError::InvalidConfig("x".into()).kind(), ErrorKind::Local);
        assert_eq!(StegoSuiteError::NoOutcome.kind(), ErrorKind::Local);
        assert_eq!(
            StegoSuiteError::Transport(Direction::Decode).kind(),
            ErrorKind::Transport
        );
    }

    #[test]
    fn validation_messages() {
        assert_eq!(
            ValidationError::MessageTooLong(501).to_string(),
            "Secret message is 501 characters long, at most 500 are allowed"
        );
        assert_eq!(
            StegoSuiteError::from(ValidationError::MissingImage).to_string(),
            "Please select an image file"
        );
    }
}
