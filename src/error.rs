use std::io;
use thiserror::Error;

/// Result type for srrdb operations
pub type Result<T> = std::result::Result<T, SrrdbError>;

/// Unified error type for the transport, the container scanner and the commands
#[derive(Debug, Error)]
pub enum SrrdbError {
    // Transport errors
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected return code {0}.")]
    UnexpectedStatus(u16),

    #[error("Not found.")]
    NotFound,

    #[error("Failed to parse {0}.")]
    UnparsableResponse(&'static str),

    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    // Container errors
    #[error("isn't a valid SRR file")]
    InvalidContainer,

    #[error(
        "malformed SRR file: block at offset {offset} needs {needed} bytes, only {available} available"
    )]
    MalformedContainer {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Extension {0} not found in SRR file")]
    MemberNotFound(String),

    // Authentication errors
    #[error("Failed to login: {0}")]
    Authentication(String),

    // Fatal usage errors
    #[error("{0}")]
    MissingArguments(&'static str),

    #[error("Nothing found!")]
    NothingFound,

    // Local errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<fancy_regex::Error> for SrrdbError {
    fn from(_: fancy_regex::Error) -> Self {
        SrrdbError::UnparsableResponse("upload result")
    }
}
