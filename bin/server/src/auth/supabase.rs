//! Supabase password sign-in over HTTP using reqwest.

use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, SameSite};
use listas_core::Credentials;
use listas_platform_access::supabase::{self, PROVIDER};
use listas_platform_access::{
    AuthenticationError, PasswordAuthenticator, SessionHeaders, SupabaseConfig,
};
use std::time::Duration;
use time::Duration as TimeDuration;

use crate::config::SessionConfig;

/// Client for the Supabase auth API.
pub struct SupabaseClient {
    http_client: reqwest::Client,
    config: SupabaseConfig,
    session_config: SessionConfig,
}

impl SupabaseClient {
    /// Creates a client with a pooled HTTP connection and request timeout.
    pub fn new(
        config: SupabaseConfig,
        session_config: SessionConfig,
    ) -> listas_core::Result<Self, AuthenticationError> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .build()
            .map_err(|e| {
                AuthenticationError::provider(
                    PROVIDER,
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            http_client,
            config,
            session_config,
        })
    }

    /// Turns a session into `Set-Cookie` headers the browser SDK can read.
    pub fn session_headers(&self, session_json: &str) -> SessionHeaders {
        supabase::session_cookies(&self.config, session_json)
            .into_iter()
            .fold(SessionHeaders::new(), |headers, (name, value)| {
                let cookie = Cookie::build((name, value))
                    .path("/")
                    .http_only(false)
                    .secure(self.session_config.secure_cookies)
                    .same_site(SameSite::Lax)
                    .max_age(TimeDuration::days(
                        self.session_config.cookie_max_age_days,
                    ))
                    .build();
                headers.with("set-cookie", cookie.to_string())
            })
    }
}

#[async_trait]
impl PasswordAuthenticator for SupabaseClient {
    #[tracing::instrument(skip_all, fields(provider = PROVIDER))]
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> listas_core::Result<SessionHeaders, AuthenticationError> {
        let response = self
            .http_client
            .post(self.config.token_endpoint())
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.config.anon_key())
            .json(&serde_json::json!({
                "email": credentials.email(),
                "password": credentials.password(),
            }))
            .send()
            .await
            .map_err(|e| {
                AuthenticationError::provider(PROVIDER, format!("token request failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            AuthenticationError::provider(PROVIDER, format!("failed to read response: {}", e))
        })?;

        tracing::debug!(status, "Token endpoint answered");

        let session = supabase::classify_token_response(status, &body)?;
        Ok(self.session_headers(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_cookies(headers: &SessionHeaders) -> Vec<&str> {
        headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("set-cookie"))
            .map(|(_, value)| value)
            .collect()
    }

    fn client(secure_cookies: bool) -> SupabaseClient {
        let config = SupabaseConfig::new(
            "https://abcd1234.supabase.co".to_string(),
            "anon-key".to_string(),
        );
        let session_config = SessionConfig {
            secure_cookies,
            ..SessionConfig::default()
        };
        SupabaseClient::new(config, session_config).expect("client")
    }

    #[test]
    fn session_headers_are_set_cookie_headers() {
        let headers = client(true).session_headers(r#"{"access_token":"jwt"}"#);

        let cookies = set_cookies(&headers);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("sb-abcd1234-auth-token=base64-"));
        assert!(cookies[0].contains("Path=/"));
        assert!(cookies[0].contains("SameSite=Lax"));
        assert!(cookies[0].contains("Secure"));
        assert!(cookies[0].contains("Max-Age=34560000"));
        assert!(!cookies[0].contains("HttpOnly"));
    }

    #[test]
    fn insecure_cookies_for_local_development() {
        let headers = client(false).session_headers(r#"{"access_token":"jwt"}"#);

        let cookies = set_cookies(&headers);
        let cookie = cookies.first().expect("cookie");
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn large_sessions_become_several_cookies() {
        let token = "x".repeat(supabase::MAX_COOKIE_CHUNK_SIZE * 2);
        let session = format!(r#"{{"access_token":"{token}"}}"#);

        let headers = client(true).session_headers(&session);

        let cookies = set_cookies(&headers);
        assert!(cookies.len() >= 3);
        assert!(cookies[0].starts_with("sb-abcd1234-auth-token.0="));
        assert!(cookies[1].starts_with("sb-abcd1234-auth-token.1="));
    }
}
