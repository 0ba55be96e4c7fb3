//! The login workflow.
//!
//! One call to [`sign_in`] handles one form submission:
//!
//! ```text
//! validating ─┬─> Invalid                      (re-render with field errors)
//!             └─> authenticating ─┬─> Rejected    (re-render, generic message)
//!                                 ├─> Unavailable (re-render, form error)
//!                                 └─> Authenticated (redirect with headers)
//! ```
//!
//! Every state on the right is terminal. Nothing is retried.

use crate::authenticator::PasswordAuthenticator;
use crate::error::AuthenticationError;
use crate::session::SessionHeaders;
use listas_core::credentials::{
    CREDENTIALS_REJECTED_MESSAGE, EMAIL_FIELD, PASSWORD_FIELD, SIGN_IN_UNAVAILABLE_MESSAGE,
};
use listas_core::{Credentials, FieldErrors, FormPayload, ReplyOptions, Submission, SubmissionReply};

/// Where a signed-in user lands.
pub const HOME_PATH: &str = "/home";

/// Result of one login submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The form failed validation; the authenticator was not called.
    Invalid(SubmissionReply),
    /// The auth service rejected the credentials.
    Rejected(SubmissionReply),
    /// The auth service could not be reached.
    Unavailable(SubmissionReply),
    /// Signed in. Redirect to `location` with `headers` attached.
    Authenticated {
        location: &'static str,
        headers: SessionHeaders,
    },
}

/// Errors placed on both credential fields when the service says no.
fn rejected_field_errors() -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.push(EMAIL_FIELD, CREDENTIALS_REJECTED_MESSAGE);
    errors.push(PASSWORD_FIELD, CREDENTIALS_REJECTED_MESSAGE);
    errors
}

/// Validates a posted login form and, if it is valid, signs in.
///
/// The authenticator is called at most once, and never for a form that
/// fails validation.
pub async fn sign_in(
    payload: &FormPayload,
    authenticator: &dyn PasswordAuthenticator,
) -> LoginOutcome {
    let submission = Credentials::parse(payload);
    let credentials = match &submission {
        Submission::Success { value, .. } => value,
        Submission::Failure { errors, .. } => {
            tracing::debug!(
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Login form failed validation"
            );
            return LoginOutcome::Invalid(submission.reply());
        }
    };

    match authenticator.sign_in_with_password(credentials).await {
        Ok(headers) => {
            tracing::info!(session_headers = headers.len(), "User signed in");
            LoginOutcome::Authenticated {
                location: HOME_PATH,
                headers,
            }
        }
        Err(report) => match report.current_context() {
            AuthenticationError::InvalidCredentials => {
                tracing::info!("Sign-in rejected by auth provider");
                LoginOutcome::Rejected(
                    submission.reply_with(ReplyOptions::new().field_errors(rejected_field_errors())),
                )
            }
            error @ AuthenticationError::ProviderError { .. } => {
                tracing::error!(error = %error, "Auth provider unavailable during sign-in");
                LoginOutcome::Unavailable(
                    submission.reply_with(ReplyOptions::new().form_error(SIGN_IN_UNAVAILABLE_MESSAGE)),
                )
            }
        },
    }
}
