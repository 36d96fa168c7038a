//! HTTP response types and serialization.

use std::fmt;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::parser::HeaderMap;

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

const CRLF: &[u8] = b"\r\n";

/// The statuses this server answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    NotFound = 404,
    InternalServerError = 500,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// The full status line, without a trailing CRLF.
    pub fn status_line(&self) -> &'static str {
        match self {
            StatusCode::Ok => "HTTP/1.1 200 OK",
            StatusCode::Created => "HTTP/1.1 201 Created",
            StatusCode::NotFound => "HTTP/1.1 404 Not Found",
            StatusCode::InternalServerError => "HTTP/1.1 500 Internal Server Error",
        }
    }

    /// The numeric status code.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Represents an HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The HTTP headers, empty unless set explicitly
    pub headers: HeaderMap,
    /// The response body
    pub content: Vec<u8>,
}

impl HttpResponse {
    /// Create a status-only response with no headers and no content.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            content: Vec::new(),
        }
    }

    /// Create a `200 OK` response carrying `content`.
    ///
    /// `Content-Length` is the byte length of the payload, so binary
    /// content is framed correctly.
    pub fn content(content_type: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let content = content.into();
        let content_length = content.len().to_string();

        let mut response = Self::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_header("Content-Length", content_length);
        response.content = content;
        response
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Convert the response to its wire bytes.
    ///
    /// Non-empty content is followed by a CRLF; an empty body adds nothing
    /// after the blank line.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(64 + self.content.len());

        bytes.extend_from_slice(self.status.status_line().as_bytes());
        bytes.extend_from_slice(CRLF);

        for (name, value) in &self.headers {
            bytes.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }

        bytes.extend_from_slice(CRLF);

        if !self.content.is_empty() {
            bytes.extend_from_slice(&self.content);
            bytes.extend_from_slice(CRLF);
        }

        bytes
    }

    /// Serialize the response and write it to `writer`.
    ///
    /// The first write failure is returned and nothing further is written.
    pub async fn write_to<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        writer.write_all(&self.to_bytes()).await?;
        writer.flush().await
    }
}
