//! OAuth2 client-credentials token for the remote repository.
//!
//! The token is cached for the lifetime of the owning source and refreshed
//! proactively once the clock is within [`REFRESH_MARGIN`] of its expiry, so a
//! request never starts with a token that is about to lapse. A refresh does
//! not invalidate requests already using the previous token.

use crate::clock::Clock;
use crate::error::{GalleryError, Result};
use crate::http::{HttpClient, HttpRequest};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{debug, info};

pub const REFRESH_MARGIN: Duration = Duration::minutes(5);

/// Lifetime assumed when the issuer does not send `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 43_200;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn endpoint(&self) -> String {
        format!("{}/oauth/token", self.token_url)
    }

    pub fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

pub struct TokenCache {
    token: Option<AccessToken>,
    clock: Box<dyn Clock>,
}

impl TokenCache {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { token: None, clock }
    }

    /// The cached token while it is more than the refresh margin from expiry.
    pub fn current(&self) -> Option<&str> {
        let token = self.token.as_ref()?;
        let refresh_at = token.expires_at.checked_sub_signed(REFRESH_MARGIN)?;
        if self.clock.now() < refresh_at {
            Some(&token.value)
        } else {
            None
        }
    }

    /// Cache `value` for `expires_in_secs`. A lifetime that does not fit in a
    /// timestamp is rejected and leaves the cache untouched.
    pub fn store(&mut self, value: String, expires_in_secs: i64) -> Result<&str> {
        let expires_at = Duration::try_seconds(expires_in_secs)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                GalleryError::Auth(format!("invalid expires_in: {}", expires_in_secs))
            })?;
        Ok(&self.token.insert(AccessToken { value, expires_at }).value)
    }

    pub fn get_token<H: HttpClient + ?Sized>(
        &mut self,
        http: &H,
        credentials: &ClientCredentials,
    ) -> Result<String> {
        if let Some(token) = self.current() {
            debug!("Using cached access token");
            return Ok(token.to_string());
        }

        let request = HttpRequest::post(credentials.endpoint())
            .header("Authorization", credentials.basic_auth())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials");

        let response = http
            .execute(&request)
            .map_err(|e| GalleryError::Auth(e.to_string()))?;
        if !response.is_success() {
            return Err(GalleryError::Auth(response.status_line()));
        }

        let parsed: TokenResponse = serde_json::from_slice(&response.body)
            .map_err(|e| GalleryError::Auth(format!("invalid token response: {}", e)))?;
        let lifetime = parsed.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        info!(expires_in = lifetime, "Obtained new access token");

        Ok(self.store(parsed.access_token, lifetime)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ManualClock, MockHttpClient};
    use std::rc::Rc;

    fn credentials() -> ClientCredentials {
        ClientCredentials {
            token_url: "https://auth.example.com".into(),
            client_id: "client".into(),
            client_secret: "secret".into(),
        }
    }

    fn cache_with_clock() -> (TokenCache, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        (TokenCache::new(Box::new(clock.clone())), clock)
    }

    #[test]
    fn exchange_sends_client_credentials() {
        let (mut cache, _clock) = cache_with_clock();
        let http = MockHttpClient::new();
        http.push_token("tok-1", 3600);

        let token = cache.get_token(&http, &credentials()).unwrap();
        assert_eq!(token, "tok-1");

        let request = &http.requests()[0];
        assert_eq!(request.url, "https://auth.example.com/oauth/token");
        assert_eq!(request.body.as_deref(), Some("grant_type=client_credentials"));
        assert_eq!(
            request.header_value("authorization"),
            Some("Basic Y2xpZW50OnNlY3JldA==")
        );
    }

    #[test]
    fn second_call_uses_cache() {
        let (mut cache, _clock) = cache_with_clock();
        let http = MockHttpClient::new();
        http.push_token("tok-1", 3600);

        cache.get_token(&http, &credentials()).unwrap();
        let again = cache.get_token(&http, &credentials()).unwrap();
        assert_eq!(again, "tok-1");
        assert_eq!(http.request_count(), 1);
    }

    #[test]
    fn refreshes_within_five_minutes_of_expiry() {
        let (mut cache, clock) = cache_with_clock();
        let http = MockHttpClient::new();
        http.push_token("tok-1", 3600);
        http.push_token("tok-2", 3600);

        cache.get_token(&http, &credentials()).unwrap();

        clock.advance(Duration::seconds(3600 - 301));
        assert_eq!(cache.get_token(&http, &credentials()).unwrap(), "tok-1");
        assert_eq!(http.request_count(), 1);

        clock.advance(Duration::seconds(1));
        assert_eq!(cache.get_token(&http, &credentials()).unwrap(), "tok-2");
        assert_eq!(http.request_count(), 2);
    }

    #[test]
    fn missing_expires_in_uses_default_lifetime() {
        let (mut cache, clock) = cache_with_clock();
        let http = MockHttpClient::new();
        http.push_json(r#"{"access_token":"tok"}"#);

        cache.get_token(&http, &credentials()).unwrap();
        clock.advance(Duration::hours(11));
        assert_eq!(cache.current(), Some("tok"));
        clock.advance(Duration::minutes(56));
        assert_eq!(cache.current(), None);
    }

    #[test]
    fn rejected_exchange_is_auth_error() {
        let (mut cache, _clock) = cache_with_clock();
        let http = MockHttpClient::new();
        http.push_status(401, "Unauthorized", r#"{"error":"invalid_client"}"#);

        let err = cache.get_token(&http, &credentials()).unwrap_err();
        assert!(matches!(err, GalleryError::Auth(ref m) if m == "401 Unauthorized"));
        assert_eq!(cache.current(), None);
    }

    #[test]
    fn out_of_range_expires_in_is_auth_error() {
        let (mut cache, _clock) = cache_with_clock();
        let http = MockHttpClient::new();
        http.push_json(r#"{"access_token":"t","expires_in":9223372036854775807}"#);

        let err = cache.get_token(&http, &credentials()).unwrap_err();
        assert!(matches!(err, GalleryError::Auth(ref m) if m.contains("expires_in")));
        assert_eq!(cache.current(), None);
    }

    #[test]
    fn unreachable_issuer_is_auth_error() {
        let (mut cache, _clock) = cache_with_clock();
        let http = MockHttpClient::new();
        http.push_unreachable();
        assert!(matches!(
            cache.get_token(&http, &credentials()),
            Err(GalleryError::Auth(_))
        ));
    }
}
