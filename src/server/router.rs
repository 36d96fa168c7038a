//! Request routing.

use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::parser::{HttpRequest, Method};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler;
use crate::server::response::{HttpResponse, StatusCode};

const ECHO_PREFIX: &str = "/echo/";
const FILES_PREFIX: &str = "/files/";

/// A matched route, borrowing its path parameter from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `GET /`
    Root,
    /// `GET /user-agent`
    UserAgent,
    /// `GET /echo/<text>`
    Echo(&'a str),
    /// `GET /files/<name>`
    ReadFile(&'a str),
    /// `POST /files/<name>`
    WriteFile(&'a str),
}

impl<'a> Route<'a> {
    /// Match a method and path against the route table.
    ///
    /// Rules are tried in order and the first match wins. Prefix routes take
    /// everything after the prefix verbatim.
    pub fn resolve(method: &Method, path: &'a str) -> Option<Self> {
        match method {
            Method::GET => {
                if path == "/" {
                    Some(Route::Root)
                } else if path == "/user-agent" {
                    Some(Route::UserAgent)
                } else if let Some(text) = path.strip_prefix(ECHO_PREFIX) {
                    Some(Route::Echo(text))
                } else {
                    path.strip_prefix(FILES_PREFIX).map(Route::ReadFile)
                }
            }
            Method::POST => path.strip_prefix(FILES_PREFIX).map(Route::WriteFile),
            Method::Other(_) => None,
        }
    }
}

/// Dispatches parsed requests to the route handlers.
#[derive(Debug, Clone, Default)]
pub struct Router {
    directory: Option<PathBuf>,
}

impl Router {
    /// Create a router serving files from `directory`, or none at all.
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    /// Create a router for the directory in `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.directory.clone())
    }

    /// The base directory of the file routes, if enabled.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Build the response for `request`.
    ///
    /// Route-level failures become status-only responses, so this always
    /// produces something to send.
    pub async fn dispatch(&self, request: &HttpRequest) -> HttpResponse {
        let result = match Route::resolve(&request.method, &request.path) {
            Some(Route::Root) => handler::root(),
            Some(Route::UserAgent) => handler::user_agent(request),
            Some(Route::Echo(text)) => handler::echo(text),
            Some(Route::ReadFile(name)) => handler::read_file(self.directory(), name).await,
            Some(Route::WriteFile(name)) => handler::write_file(self.directory(), name, &request.body).await,
            None => Err(Error::NotFound(format!("{} {}", request.method, request.path))),
        };

        match result {
            Ok(response) => response,
            Err(e) => match e.status() {
                Some(StatusCode::NotFound) => {
                    debug!("{e}");
                    HttpResponse::new(StatusCode::NotFound)
                }
                Some(status) => {
                    warn!("{e}");
                    HttpResponse::new(status)
                }
                None => {
                    error!("Unexpected handler error: {e}");
                    HttpResponse::new(StatusCode::InternalServerError)
                }
            },
        }
    }
}
