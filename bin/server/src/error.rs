//! Server-side error types for the login flow.
//!
//! Field-level problems never reach this module; they travel back to the
//! form inside a `SubmissionReply`. These variants cover wiring faults
//! that leave the server unable to finish a request.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Errors raised while serving the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// No authenticator was registered as a request extension.
    AuthenticatorMissing,
    /// The auth provider produced a header that is not valid HTTP.
    InvalidSessionHeader { name: String },
    /// The reply for a plain form post could not be put into the URL.
    ReplyEncoding { details: String },
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthenticatorMissing => write!(f, "authenticator not configured"),
            Self::InvalidSessionHeader { name } => {
                write!(f, "invalid session header '{}'", name)
            }
            Self::ReplyEncoding { details } => {
                write!(f, "failed to encode login reply: {}", details)
            }
        }
    }
}

impl std::error::Error for LoginError {}

impl LoginError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            LoginError::AuthenticatorMissing => ServerFnError::new("Sign-in is not available"),
            LoginError::InvalidSessionHeader { .. } => {
                ServerFnError::new("Sign-in could not be completed")
            }
            LoginError::ReplyEncoding { .. } => ServerFnError::new("Sign-in could not be completed"),
        }
    }
}
