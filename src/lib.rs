//! A minimal HTTP/1.1 server.
//!
//! Each connection carries exactly one request. The request is read in a
//! single read, parsed, routed to one of a handful of handlers, and answered
//! with a hand-assembled response before the connection is closed.
//!
//! # Routes
//!
//! - `GET /` answers `200 OK` with no body
//! - `GET /user-agent` echoes the `User-Agent` header
//! - `GET /echo/<text>` echoes `<text>`
//! - `GET /files/<name>` serves a file from the configured directory
//! - `POST /files/<name>` stores the request body in the configured directory
//!
//! Anything else answers `404 Not Found`.
//!
//! # Examples
//!
//! ## Parsing
//!
//! ```
//! use tinyserve::{parse_request, Method};
//!
//! let request = parse_request(b"GET /echo/hi HTTP/1.1\r\nUser-Agent: curl\r\n\r\n").unwrap();
//! assert_eq!(request.method, Method::GET);
//! assert_eq!(request.path, "/echo/hi");
//! assert_eq!(request.version, "HTTP/1.1");
//! assert_eq!(request.header("User-Agent"), Some("curl"));
//! ```
//!
//! ## Building a response
//!
//! ```
//! use tinyserve::{HttpResponse, TEXT_PLAIN};
//!
//! let response = HttpResponse::content(TEXT_PLAIN, "abc");
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! assert!(bytes.ends_with(b"\r\n\r\nabc\r\n"));
//! ```
//!
//! ## Running the server
//!
//! ```no_run
//! use std::path::PathBuf;
//! use tinyserve::{HttpServer, ServerConfig};
//!
//! # async fn run() -> Result<(), tinyserve::ServerError> {
//! let config = ServerConfig {
//!     directory: Some(PathBuf::from("/tmp/files")),
//!     ..ServerConfig::default()
//! };
//! HttpServer::new(config).start().await
//! # }
//! ```

// Command-line configuration
pub mod cli;

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{parse_request, parse_request_with, Error as ParserError, HeaderMap, HeaderPolicy, HttpRequest, Method};
pub use server::{
    Error as ServerError, HttpResponse, HttpServer, Protocol, Route, Router, ServerConfig, StatusCode, OCTET_STREAM,
    TEXT_PLAIN,
};
