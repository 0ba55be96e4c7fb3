//! Form submission primitives.
//!
//! A posted form arrives as a [`FormPayload`], is validated into a
//! [`Submission`], and is answered with a [`SubmissionReply`] that the page
//! re-renders from. [`ValidationPolicy`] decides when the browser shows
//! errors while the user is still typing.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Query parameter that carries a [`SubmissionReply`] back to the form page
/// after a plain (script-less) form post.
pub const REPLY_QUERY_PARAM: &str = "reply";

/// Raw field values as posted by a form.
///
/// Browsers post empty inputs as empty strings, so an empty value is
/// reported as absent by [`FormPayload::value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload(BTreeMap<String, String>);

impl FormPayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a payload from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Sets the value of a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the value of a field, treating an empty string as absent.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns a copy of the payload with one field removed.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        let mut payload = self.clone();
        payload.0.remove(name);
        payload
    }

    /// Iterates over `(name, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no field was posted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Human-readable error messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to a field's error list.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Replaces a field's error list.
    pub fn set(&mut self, field: impl Into<String>, messages: Vec<String>) {
        self.0.insert(field.into(), messages);
    }

    /// Returns the messages recorded for a field, in insertion order.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns true if the field has at least one message.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        !self.messages(field).is_empty()
    }

    /// Returns the names of fields that have errors.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns true if no field has errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

/// Outcome of validating one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    /// Every field passed; `value` is ready to use.
    Success {
        /// The validated value.
        value: T,
        /// Values to re-fill the form with.
        payload: FormPayload,
    },
    /// At least one field failed.
    Failure {
        /// Values to re-fill the form with.
        payload: FormPayload,
        /// Messages for every failing field.
        errors: FieldErrors,
    },
}

impl<T> Submission<T> {
    /// Returns true if validation passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the validated value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the validation errors, if any.
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { errors, .. } => Some(errors),
        }
    }

    /// Returns the values to re-fill the form with.
    #[must_use]
    pub fn payload(&self) -> &FormPayload {
        match self {
            Self::Success { payload, .. } | Self::Failure { payload, .. } => payload,
        }
    }

    /// Builds the reply for this submission as validated.
    #[must_use]
    pub fn reply(&self) -> SubmissionReply {
        self.reply_with(ReplyOptions::default())
    }

    /// Builds a reply, letting the caller override field errors or add
    /// form-level errors discovered after validation.
    #[must_use]
    pub fn reply_with(&self, options: ReplyOptions) -> SubmissionReply {
        let field_errors = options
            .field_errors
            .or_else(|| self.errors().cloned())
            .unwrap_or_default();
        let status = if field_errors.is_empty() && options.form_errors.is_empty() {
            ReplyStatus::Success
        } else {
            ReplyStatus::Error
        };

        SubmissionReply {
            status,
            initial_value: self.payload().clone(),
            field_errors,
            form_errors: options.form_errors,
        }
    }
}

/// Overrides applied by [`Submission::reply_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyOptions {
    field_errors: Option<FieldErrors>,
    form_errors: Vec<String>,
}

impl ReplyOptions {
    /// Creates options that change nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the submission's field errors.
    #[must_use]
    pub fn field_errors(mut self, errors: FieldErrors) -> Self {
        self.field_errors = Some(errors);
        self
    }

    /// Adds an error that belongs to the form as a whole.
    #[must_use]
    pub fn form_error(mut self, message: impl Into<String>) -> Self {
        self.form_errors.push(message.into());
        self
    }
}

/// Whether a reply carries errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    #[default]
    Success,
    Error,
}

/// Result of a submission as sent back to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReply {
    /// Whether any error is attached.
    pub status: ReplyStatus,
    /// Values to re-fill the form with. Secrets are never included.
    pub initial_value: FormPayload,
    /// Errors attached to individual fields.
    pub field_errors: FieldErrors,
    /// Errors attached to the form as a whole.
    pub form_errors: Vec<String>,
}

impl SubmissionReply {
    /// Returns true if the reply carries any error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ReplyStatus::Error
    }

    /// Returns the messages for a field.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.field_errors.messages(field)
    }

    /// Encodes the reply as a URL-safe query value.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply cannot be serialized.
    pub fn to_query_value(&self) -> Result<String, serde_json::Error> {
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?))
    }

    /// Decodes a value produced by [`SubmissionReply::to_query_value`].
    ///
    /// Anything else, including a hand-edited URL, yields `None`.
    #[must_use]
    pub fn from_query_value(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// When interactive validation runs for each field.
///
/// A field is validated for the first time when it loses focus and is then
/// re-validated on every input event. Submitting the form (or receiving a
/// reply from the server) marks every field as validated. Errors are shown
/// only for validated fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    validated: BTreeSet<String>,
    submitted: bool,
}

impl ValidationPolicy {
    /// Records that a field lost focus.
    pub fn on_blur(&mut self, field: &str) {
        self.validated.insert(field.to_string());
    }

    /// Records a submit attempt.
    pub fn on_submit(&mut self) {
        self.submitted = true;
    }

    /// Returns true if an input event on `field` should re-run validation.
    #[must_use]
    pub fn should_revalidate(&self, field: &str) -> bool {
        self.is_validated(field)
    }

    /// Returns true if errors for `field` should be displayed.
    #[must_use]
    pub fn is_validated(&self, field: &str) -> bool {
        self.submitted || self.validated.contains(field)
    }
}
