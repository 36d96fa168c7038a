//! HTTP request parser module.
//!
//! Turns the raw bytes of a single socket read into an [`HttpRequest`].
//! Only the subset of HTTP/1.1 framing the server needs is understood: a
//! start line, a header section terminated by a blank line, and whatever
//! bytes follow it as the body.

mod error;
mod headers;
mod method;
mod request;
mod tests;

// Re-export public items
pub use error::Error;
pub use headers::HeaderMap;
pub use method::Method;
pub use request::{HeaderPolicy, HttpRequest};

// Re-export the parse functions
pub use request::{parse_request, parse_request_with};
