//! Password sign-in for listas.
//!
//! This crate provides:
//! - The [`PasswordAuthenticator`] seam to the hosted auth service
//! - Authentication error types
//! - The login workflow ([`login::sign_in`]) that validates a posted form,
//!   calls the authenticator and decides between re-rendering the form and
//!   redirecting with session headers
//! - Supabase configuration and session-cookie encoding
//!
//! # Example
//!
//! ```
//! use listas_core::FormPayload;
//! use listas_platform_access::{AuthenticationError, LoginOutcome, PasswordAuthenticator, SessionHeaders};
//! use listas_core::Credentials;
//!
//! struct AlwaysRejects;
//!
//! #[async_trait::async_trait]
//! impl PasswordAuthenticator for AlwaysRejects {
//!     async fn sign_in_with_password(
//!         &self,
//!         _credentials: &Credentials,
//!     ) -> listas_core::Result<SessionHeaders, AuthenticationError> {
//!         Err(AuthenticationError::InvalidCredentials.into())
//!     }
//! }
//!
//! # tokio_test_block_on(async {
//! let payload = FormPayload::from_pairs([("email", "not-an-email"), ("password", "longenough1")]);
//! let outcome = listas_platform_access::login::sign_in(&payload, &AlwaysRejects).await;
//! assert!(matches!(outcome, LoginOutcome::Invalid(_)));
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod authenticator;
pub mod error;
pub mod login;
pub mod session;
pub mod supabase;

// Re-export main types at crate root
pub use authenticator::PasswordAuthenticator;
pub use error::AuthenticationError;
pub use login::LoginOutcome;
pub use session::SessionHeaders;
pub use supabase::SupabaseConfig;
