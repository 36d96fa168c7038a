//! Error types for the HTTP server.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::server::response::StatusCode;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The request bytes could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// Socket I/O error while reading the request or writing the response.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No route matched, or the requested file could not be read.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Creating or writing a file for an upload failed.
    #[error("File I/O error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The status a route-level error is answered with.
    ///
    /// Returns `None` for errors that close the connection without a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::NotFound(_) => Some(StatusCode::NotFound),
            Error::FileIo { .. } => Some(StatusCode::InternalServerError),
            Error::ParseError(_) | Error::IoError(_) | Error::Config(_) => None,
        }
    }
}
