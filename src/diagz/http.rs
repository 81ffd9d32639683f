//! # Transport
//!
//! Every network read in the crate goes through the [`HttpClient`] trait so the
//! sources can be exercised without a network. Production uses
//! [`ReqwestClient`]; tests use `test_utils::MockHttpClient`.
//!
//! Requests are single attempts: no retries, no timeouts beyond what the
//! underlying client applies by default.
//!
//! [`Location`] unifies the two ways the local registry can be reached, a
//! directory on disk or an http(s) base URL, and [`fetch_location`] reads
//! either one.

use crate::error::{GalleryError, Result};
use std::fmt;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url)
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// "404 Not Found", used in error messages.
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

/// A blocking, single-attempt HTTP transport.
///
/// Implementations return `Err` only when no response was obtained at all;
/// a non-success status is still `Ok` and callers decide what it means.
pub trait HttpClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            inner: reqwest::blocking::Client::new(),
        }
    }
}

impl HttpClient for ReqwestClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.inner.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .map_err(|e| GalleryError::fetch(&request.url, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| GalleryError::fetch(&request.url, e))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}

/// A readable resource: a local path or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    Url(String),
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Location::Url(trimmed.trim_end_matches('/').to_string())
        } else {
            Location::Path(PathBuf::from(trimmed))
        }
    }

    /// Append one path segment. URL segments are percent-encoded.
    pub fn join(&self, segment: &str) -> Self {
        match self {
            Location::Path(path) => Location::Path(path.join(segment)),
            Location::Url(url) => {
                Location::Url(format!("{}/{}", url, urlencoding::encode(segment)))
            }
        }
    }

    pub fn file_name(&self) -> Option<String> {
        match self {
            Location::Path(path) => path.file_name().map(|n| n.to_string_lossy().into_owned()),
            Location::Url(url) => {
                let without_query = url.split(['?', '#']).next().unwrap_or_default();
                let last = without_query.rsplit('/').next().unwrap_or_default();
                if last.is_empty() {
                    None
                } else {
                    urlencoding::decode(last).ok().map(|s| s.into_owned())
                }
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => f.write_str(url),
        }
    }
}

/// Read the bytes behind a location. Missing files, unreachable hosts and
/// non-success statuses all surface as [`GalleryError::Fetch`].
pub fn fetch_location<H: HttpClient + ?Sized>(http: &H, location: &Location) -> Result<Vec<u8>> {
    match location {
        Location::Path(path) => {
            fs::read(path).map_err(|e| GalleryError::fetch(path.display().to_string(), e))
        }
        Location::Url(url) => {
            let response = http.execute(&HttpRequest::get(url.as_str()))?;
            if !response.is_success() {
                return Err(GalleryError::fetch(url.as_str(), response.status_line()));
            }
            Ok(response.body)
        }
    }
}
