//! Core domain types for the listas web application.
//!
//! Everything in this crate is free of I/O so it can be compiled both into
//! the server and into the browser bundle. The login form validates with
//! [`Credentials::parse`] on both sides, which keeps the interactive check
//! and the authoritative server gate in lockstep.

pub mod credentials;
pub mod error;
pub mod form;

pub use credentials::Credentials;
pub use error::Result;
pub use form::{
    FieldErrors, FormPayload, REPLY_QUERY_PARAM, ReplyOptions, ReplyStatus, Submission,
    SubmissionReply, ValidationPolicy,
};
