//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested keys (e.g., `SUPABASE__ANON_KEY`).
//!
//! See [`SupabaseConfig`](listas_platform_access::SupabaseConfig) for the
//! auth service settings.

use listas_platform_access::SupabaseConfig;
use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Hosted auth service configuration.
    pub supabase: SupabaseConfig,

    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Attributes for the session cookies written after a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// Cookie lifetime in days.
    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,
}

fn default_secure_cookies() -> bool {
    true
}

fn default_cookie_max_age_days() -> i64 {
    400
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: default_secure_cookies(),
            cookie_max_age_days: default_cookie_max_age_days(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert!(config.secure_cookies);
        assert_eq!(config.cookie_max_age_days, 400);
    }

    #[test]
    fn server_config_fills_session_defaults() {
        let json = r#"{
            "supabase": {
                "url": "https://abcd1234.supabase.co",
                "anon_key": "anon"
            }
        }"#;

        let config: ServerConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.supabase.anon_key(), "anon");
        assert_eq!(config.session.cookie_max_age_days, 400);
    }
}
