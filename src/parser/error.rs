//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur during HTTP request parsing.
///
/// Every variant means the request is malformed; the connection driver
/// closes the connection without writing a response.
#[derive(Debug, Error)]
pub enum Error {
    /// No `\r\n` terminates the start line.
    #[error("Malformed request: start line delimiter not found")]
    MissingStartLine,

    /// No `\r\n\r\n` terminates the header section.
    #[error("Malformed request: headers delimiter not found")]
    MissingHeaderTerminator,

    /// The start line is not `METHOD PATH VERSION`.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// A header line is not `Name: Value` (strict policy only).
    #[error("Malformed header line: {0}")]
    MalformedHeader(String),
}
