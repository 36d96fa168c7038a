//! Route handlers.
//!
//! Each handler builds the response for one route. Failures are returned as
//! [`Error`] values and turned into status-only responses by the router.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::parser::HttpRequest;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode, OCTET_STREAM, TEXT_PLAIN};

/// `GET /`
pub fn root() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::new(StatusCode::Ok))
}

/// `GET /user-agent`: echo the `User-Agent` header, empty when absent.
pub fn user_agent(request: &HttpRequest) -> Result<HttpResponse, Error> {
    let agent = request.header("User-Agent").unwrap_or_default();
    Ok(HttpResponse::content(TEXT_PLAIN, agent))
}

/// `GET /echo/<text>`
pub fn echo(text: &str) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::content(TEXT_PLAIN, text))
}

/// `GET /files/<name>`: serve a file from the base directory.
pub async fn read_file(directory: Option<&Path>, name: &str) -> Result<HttpResponse, Error> {
    let directory = directory.ok_or_else(|| Error::NotFound(format!("/files/{name} (file routes disabled)")))?;
    let path = file_path(directory, name);

    match tokio::fs::read(&path).await {
        Ok(contents) => Ok(HttpResponse::content(OCTET_STREAM, contents)),
        Err(e) => {
            debug!("Cannot read {path}: {e}", path = path.display());
            Err(Error::NotFound(format!("/files/{name}")))
        }
    }
}

/// `POST /files/<name>`: store the request body, replacing any existing file.
pub async fn write_file(directory: Option<&Path>, name: &str, body: &[u8]) -> Result<HttpResponse, Error> {
    let directory = directory.ok_or_else(|| Error::NotFound(format!("/files/{name} (file routes disabled)")))?;
    let path = file_path(directory, name);

    match tokio::fs::write(&path, body).await {
        Ok(()) => Ok(HttpResponse::new(StatusCode::Created)),
        Err(source) => Err(Error::FileIo { path, source }),
    }
}

/// Join `name` onto `directory` with a plain separator.
///
/// `name` is not normalised: `..` segments and leading slashes are kept, so
/// a request can address files outside `directory`.
fn file_path(directory: &Path, name: &str) -> PathBuf {
    let mut path = OsString::from(directory.as_os_str());
    path.push("/");
    path.push(name);
    PathBuf::from(path)
}
