//! HTTP server implementation for tinyserve.
//!
//! This module holds everything after parsing: the response model and its
//! serializer, the route table and handlers, and the tokio accept loop that
//! ties them to sockets.

mod config;
mod error;
mod handler;
mod http_server;
mod response;
mod router;

// Re-export public items
pub use config::{Protocol, ServerConfig};
pub use error::Error;
pub use http_server::HttpServer;
pub use response::{HttpResponse, StatusCode, OCTET_STREAM, TEXT_PLAIN};
pub use router::{Route, Router};
