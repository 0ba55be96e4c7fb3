//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause: the
//! authenticator returns a `Report<AuthenticationError>` and the login
//! workflow classifies it by its current context.

use std::fmt;

/// Errors from a password sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The auth service rejected the email/password pair.
    InvalidCredentials,
    /// The auth service could not be reached or answered unexpectedly.
    ProviderError { provider: String, reason: String },
}

impl AuthenticationError {
    /// Creates a provider error.
    pub fn provider(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the service answered and said no.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "invalid login credentials")
            }
            Self::ProviderError { provider, reason } => {
                write!(f, "auth provider '{provider}' error: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}
