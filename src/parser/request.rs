//! HTTP request parsing and representation.

use log::debug;

use crate::parser::error::Error;
use crate::parser::headers::HeaderMap;
use crate::parser::method::Method;

const CRLF: &[u8] = b"\r\n";
const HEADERS_END: &[u8] = b"\r\n\r\n";
const HEADER_SEPARATOR: &str = ": ";

/// How the parser treats header lines that are not `Name: Value`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Skip malformed header lines and keep the well-formed ones.
    #[default]
    Lenient,
    /// Reject the whole request on the first malformed header line.
    Strict,
}

/// Represents a parsed HTTP request.
///
/// A request is built once by [`parse_request`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path, exactly as sent
    pub path: String,
    /// The protocol version token, e.g. `HTTP/1.1`
    pub version: String,
    /// The HTTP headers
    pub headers: HeaderMap,
    /// The request body, trailing zero padding removed
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    pub fn new(method: Method, path: impl Into<String>, version: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            path: path.into(),
            version: version.into(),
            headers,
            body: Vec::new(),
        }
    }

    /// Create a new HTTP request with a body.
    pub fn with_body(
        method: Method,
        path: impl Into<String>,
        version: impl Into<String>,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        let mut request = Self::new(method, path, version, headers);
        request.body = body;
        request
    }

    /// Get a header value by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Whether this is a `GET` request.
    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    /// Whether this is a `POST` request.
    pub fn is_post(&self) -> bool {
        self.method == Method::POST
    }
}

/// Parse an HTTP request from a byte slice using the lenient header policy.
///
/// `input` is the result of a single read and may end in zero padding.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    parse_request_with(input, HeaderPolicy::Lenient)
}

/// Parse an HTTP request from a byte slice with an explicit header policy.
pub fn parse_request_with(input: &[u8], policy: HeaderPolicy) -> Result<HttpRequest, Error> {
    let start_line_end = find(input, CRLF).ok_or(Error::MissingStartLine)?;
    let headers_end = find(input, HEADERS_END).ok_or(Error::MissingHeaderTerminator)?;

    let (method, path, version) = parse_start_line(&input[..start_line_end])?;

    // The first CRLF is never past the start of the first CRLFCRLF, so the
    // section below is well-formed even when there are no headers at all.
    let header_section = &input[start_line_end + CRLF.len()..headers_end + CRLF.len()];
    let headers = parse_headers(header_section, policy)?;

    let body = trim_zero_padding(&input[headers_end + HEADERS_END.len()..]).to_vec();

    Ok(HttpRequest::with_body(method, path, version, headers, body))
}

fn parse_start_line(line: &[u8]) -> Result<(Method, &str, &str), Error> {
    let line = std::str::from_utf8(line)
        .map_err(|_| Error::MalformedRequestLine(String::from_utf8_lossy(line).into_owned()))?;

    let parts: Vec<&str> = line.split(' ').collect();
    match parts.as_slice() {
        [method, path, version] => Ok((Method::from(*method), *path, *version)),
        _ => Err(Error::MalformedRequestLine(line.to_string())),
    }
}

fn parse_headers(section: &[u8], policy: HeaderPolicy) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    for line in split(section, CRLF).filter(|line| !line.is_empty()) {
        let parsed = std::str::from_utf8(line)
            .ok()
            .and_then(|line| line.split_once(HEADER_SEPARATOR));

        match (parsed, policy) {
            (Some((name, value)), _) => {
                headers.insert(name, value);
            }
            (None, HeaderPolicy::Lenient) => {
                debug!("Skipping malformed header line: {:?}", String::from_utf8_lossy(line));
            }
            (None, HeaderPolicy::Strict) => {
                return Err(Error::MalformedHeader(String::from_utf8_lossy(line).into_owned()));
            }
        }
    }

    Ok(headers)
}

fn trim_zero_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Split `bytes` on every occurrence of `delimiter`, like `str::split`.
fn split<'a>(bytes: &'a [u8], delimiter: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
    let mut rest = Some(bytes);
    std::iter::from_fn(move || {
        let current = rest?;
        match find(current, delimiter) {
            Some(i) => {
                rest = Some(&current[i + delimiter.len()..]);
                Some(&current[..i])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}
