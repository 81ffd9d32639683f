//! Test doubles for the transport and the clock.

use crate::clock::Clock;
use crate::error::{GalleryError, Result};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Replays queued responses in order and records every request it sees.
///
/// An exhausted queue yields a transport error, so a test that performs one
/// call more than expected fails loudly.
#[derive(Default)]
pub struct MockHttpClient {
    responses: RefCell<VecDeque<Result<HttpResponse>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, body: impl Into<String>) {
        self.push_status(200, "OK", body);
    }

    pub fn push_status(&self, status: u16, reason: &str, body: impl Into<String>) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            reason: reason.to_string(),
            body: body.into().into_bytes(),
        }));
    }

    pub fn push_bytes(&self, body: &[u8]) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status: 200,
            reason: "OK".to_string(),
            body: body.to_vec(),
        }));
    }

    pub fn push_unreachable(&self) {
        self.responses
            .borrow_mut()
            .push_back(Err(GalleryError::fetch("mock", "connection refused")));
    }

    /// A token endpoint answer with the given lifetime in seconds.
    pub fn push_token(&self, token: &str, expires_in: i64) {
        self.push_json(format!(
            r#"{{"access_token":"{}","token_type":"bearer","expires_in":{}}}"#,
            token, expires_in
        ));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HttpClient for MockHttpClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(GalleryError::fetch(&request.url, "no mock response queued")))
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
