//! The seam to the hosted auth service.

use crate::error::AuthenticationError;
use crate::session::SessionHeaders;
use async_trait::async_trait;
use listas_core::Credentials;

/// Verifies an email/password pair and establishes a session.
///
/// Implementations return the headers that establish the session on
/// success, [`AuthenticationError::InvalidCredentials`] when the service
/// rejects the pair, and [`AuthenticationError::ProviderError`] for every
/// other failure.
#[async_trait]
pub trait PasswordAuthenticator: Send + Sync {
    /// Signs in with the given credentials.
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> listas_core::Result<SessionHeaders, AuthenticationError>;
}
