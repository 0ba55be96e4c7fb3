//! Supabase auth configuration and session-cookie encoding.
//!
//! The HTTP call itself lives in the server crate. This module holds the
//! parts that do not need a network: where to send the request, how to
//! read the answer, and how the returned session is laid out in cookies
//! so the browser SDK can pick it up.

use crate::error::AuthenticationError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Provider name used in errors and logs.
pub const PROVIDER: &str = "supabase";

/// Largest cookie value written before the session is split into chunks.
pub const MAX_COOKIE_CHUNK_SIZE: usize = 3180;

/// Prefix marking a base64url-encoded session cookie.
const BASE64_PREFIX: &str = "base64-";

/// Connection settings for a Supabase project.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g., "https://abcd1234.supabase.co").
    url: String,
    /// Public anon key, sent as `apikey` and bearer token.
    anon_key: String,
    /// Overrides the session cookie name derived from the project URL.
    #[serde(default)]
    cookie_name: Option<String>,
    /// Timeout for calls to the auth API, in seconds.
    /// Default: 10
    #[serde(default = "default_request_timeout_seconds")]
    request_timeout_seconds: u64,
}

fn default_request_timeout_seconds() -> u64 {
    10
}

impl SupabaseConfig {
    /// Creates a configuration with defaults for optional fields.
    #[must_use]
    pub fn new(url: String, anon_key: String) -> Self {
        Self {
            url,
            anon_key,
            cookie_name: None,
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }

    /// Sets an explicit session cookie name.
    #[must_use]
    pub fn with_cookie_name(mut self, name: String) -> Self {
        self.cookie_name = Some(name);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_request_timeout_seconds(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Returns the project URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the anon key.
    #[must_use]
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Returns the request timeout in seconds.
    #[must_use]
    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }

    /// Returns the password-grant token endpoint.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/auth/v1/token?grant_type=password",
            self.url.trim_end_matches('/')
        )
    }

    /// Returns the project reference: the first DNS label of the URL host.
    #[must_use]
    pub fn project_ref(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);
        let authority = without_scheme.split('/').next().unwrap_or_default();
        let host = authority.rsplit('@').next().unwrap_or_default();
        let host = host.split(':').next().unwrap_or_default();
        host.split('.').next().unwrap_or_default()
    }

    /// Returns the name of the session cookie.
    #[must_use]
    pub fn session_cookie_name(&self) -> String {
        match &self.cookie_name {
            Some(name) => name.clone(),
            None => format!("sb-{}-auth-token", self.project_ref()),
        }
    }
}

/// Reads the token endpoint's answer.
///
/// Returns the session JSON to store on success. Client errors (the
/// service answered and refused) become
/// [`AuthenticationError::InvalidCredentials`]; anything else is a
/// provider error.
pub fn classify_token_response(status: u16, body: &str) -> Result<String, AuthenticationError> {
    match status {
        200 => {
            let session: serde_json::Value = serde_json::from_str(body).map_err(|e| {
                AuthenticationError::provider(PROVIDER, format!("invalid session body: {e}"))
            })?;
            if !session
                .get("access_token")
                .is_some_and(serde_json::Value::is_string)
            {
                return Err(AuthenticationError::provider(
                    PROVIDER,
                    "session response missing access_token",
                ));
            }
            Ok(session.to_string())
        }
        400 | 401 | 422 => Err(AuthenticationError::InvalidCredentials),
        other => Err(AuthenticationError::provider(
            PROVIDER,
            format!("unexpected status {other}"),
        )),
    }
}

/// Encodes a session for storage in a cookie.
#[must_use]
pub fn encode_session(session_json: &str) -> String {
    format!("{BASE64_PREFIX}{}", URL_SAFE_NO_PAD.encode(session_json))
}

/// Splits a cookie into `(name, value)` pairs that fit the browser limit.
///
/// Short values keep the plain name; longer ones are written as
/// `name.0`, `name.1`, and so on.
#[must_use]
pub fn chunk_cookie(name: &str, value: &str) -> Vec<(String, String)> {
    if value.len() <= MAX_COOKIE_CHUNK_SIZE {
        return vec![(name.to_string(), value.to_string())];
    }

    value
        .as_bytes()
        .chunks(MAX_COOKIE_CHUNK_SIZE)
        .enumerate()
        .map(|(index, chunk)| {
            (
                format!("{name}.{index}"),
                String::from_utf8_lossy(chunk).into_owned(),
            )
        })
        .collect()
}

/// Lays a session out as session cookies: encoded, then chunked.
#[must_use]
pub fn session_cookies(config: &SupabaseConfig, session_json: &str) -> Vec<(String, String)> {
    chunk_cookie(&config.session_cookie_name(), &encode_session(session_json))
}
