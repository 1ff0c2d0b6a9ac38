//! Archive client error types

use thiserror::Error;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// The archive operation an [`ArchiveError::Operation`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOperation {
    /// Starting a recording (`create`)
    Start,
    /// Fetching a single archive (`find`)
    Get,
    /// Fetching a page of archives (`list`)
    List,
    /// Stopping a recording (`stop_by_id`)
    Stop,
    /// Deleting an archive (`delete_by_id`)
    Delete,
}

impl std::fmt::Display for ArchiveOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveOperation::Start => write!(f, "start"),
            ArchiveOperation::Get => write!(f, "get"),
            ArchiveOperation::List => write!(f, "list"),
            ArchiveOperation::Stop => write!(f, "stop"),
            ArchiveOperation::Delete => write!(f, "delete"),
        }
    }
}

/// Archive client errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// A caller-supplied parameter was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The service rejected the project credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The service rejected the request for domain reasons (archive or
    /// session not found, wrong status for the operation, peer-to-peer
    /// session, no connected clients, already or not recording), or
    /// answered with any other non-success status.
    #[error("Archive {operation} failed: {message}")]
    Operation {
        /// Which operation the rejection belongs to.
        operation: ArchiveOperation,
        /// HTTP status answered by the service, when one was received.
        status: Option<u16>,
        /// The service's own message, verbatim.
        message: String,
    },

    /// The request never completed: connect failure, timeout, or a response
    /// body that could not be decoded.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
}
