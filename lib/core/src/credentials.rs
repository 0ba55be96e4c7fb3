//! Login credentials and the schema that validates them.

use crate::form::{FieldErrors, FormPayload, Submission};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError};

/// Name of the email input.
pub const EMAIL_FIELD: &str = "email";

/// Name of the password input.
pub const PASSWORD_FIELD: &str = "password";

/// Shortest password accepted by the form.
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Shown when a field is missing or empty.
pub const REQUIRED_MESSAGE: &str = "Campo obrigatorio.";

/// Shown when the email is not a valid address.
pub const INVALID_EMAIL_MESSAGE: &str = "E-mail invalido.";

/// Shown when the password is shorter than [`MIN_PASSWORD_LENGTH`].
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "Senha tem que ter no minimo 8 caracteres.";

/// Shown on both fields when the auth service rejects the pair. It never
/// says which of the two was wrong.
pub const CREDENTIALS_REJECTED_MESSAGE: &str = "email ou senha incorretos.";

/// Shown on the form when the auth service cannot be reached.
pub const SIGN_IN_UNAVAILABLE_MESSAGE: &str = "Nao foi possivel entrar agora. Tente novamente.";

/// A validated email/password pair.
///
/// Only [`Credentials::parse`] creates values of this type.
#[derive(Clone, PartialEq, Eq, Validate)]
pub struct Credentials {
    #[validate(custom(function = "validate_email_address"))]
    email: String,
    #[validate(custom(function = "validate_password_length"))]
    password: String,
}

/// Accepts `local@label.label.tld`, the address shape browsers and the
/// auth service agree on.
///
/// Case-insensitive and ASCII only:
/// - the address neither starts with `.` nor contains `..`;
/// - the local part uses letters, digits and `_ ' + - .`, and ends in a
///   letter, digit, `_`, `+` or `-`;
/// - each domain label starts with a letter or digit and continues with
///   letters, digits or `-`;
/// - the top-level domain is at least two letters.
fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if is_email_address(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message(Cow::Borrowed(INVALID_EMAIL_MESSAGE)))
    }
}

fn is_email_address(email: &str) -> bool {
    if email.starts_with('.') || email.contains("..") {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_'+-.".contains(c))
        && local
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_alphanumeric() || "_+-".contains(c));

    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let labels_ok = labels.split('.').all(|label| {
        label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    local_ok && labels_ok && tld_ok
}

fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() as u64 >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(ValidationError::new("length")
            .with_message(Cow::Borrowed(PASSWORD_TOO_SHORT_MESSAGE)))
    }
}

impl Credentials {
    /// Validates a posted login form.
    ///
    /// Missing fields report [`REQUIRED_MESSAGE`] and skip the format
    /// checks, so each field carries at most one message. The password is
    /// never part of the submission's re-fill payload.
    #[must_use]
    pub fn parse(payload: &FormPayload) -> Submission<Self> {
        let echo = payload.without(PASSWORD_FIELD);
        let email = payload.value(EMAIL_FIELD);
        let password = payload.value(PASSWORD_FIELD);

        let mut errors = FieldErrors::new();
        if email.is_none() {
            errors.push(EMAIL_FIELD, REQUIRED_MESSAGE);
        }
        if password.is_none() {
            errors.push(PASSWORD_FIELD, REQUIRED_MESSAGE);
        }

        let candidate = Self {
            email: email.unwrap_or_default().to_string(),
            password: password.unwrap_or_default().to_string(),
        };

        if let Err(report) = candidate.validate() {
            for (field, failures) in report.field_errors() {
                if errors.contains(&field) {
                    continue;
                }
                for failure in failures {
                    let message = failure
                        .message
                        .as_deref()
                        .map(str::to_string)
                        .unwrap_or_else(|| failure.code.to_string());
                    errors.push(field.to_string(), message);
                }
            }
        }

        if errors.is_empty() {
            Submission::Success {
                value: candidate,
                payload: echo,
            }
        } else {
            Submission::Failure {
                payload: echo,
                errors,
            }
        }
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(email: &str, password: &str) -> Submission<Credentials> {
        Credentials::parse(&FormPayload::from_pairs([
            (EMAIL_FIELD, email),
            (PASSWORD_FIELD, password),
        ]))
    }

    #[test]
    fn empty_email_and_short_password_report_both_fields() {
        let submission = parse("", "short");
        let errors = submission.errors().expect("should fail");

        assert_eq!(errors.messages(EMAIL_FIELD), [REQUIRED_MESSAGE]);
        assert_eq!(errors.messages(PASSWORD_FIELD), [PASSWORD_TOO_SHORT_MESSAGE]);
    }

    #[test]
    fn malformed_email_reports_only_email() {
        let submission = parse("not-an-email", "longenough1");
        let errors = submission.errors().expect("should fail");

        assert_eq!(errors.messages(EMAIL_FIELD), [INVALID_EMAIL_MESSAGE]);
        assert!(!errors.contains(PASSWORD_FIELD));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![EMAIL_FIELD]);
    }

    #[test]
    fn missing_fields_are_required() {
        let submission = Credentials::parse(&FormPayload::new());
        let errors = submission.errors().expect("should fail");

        assert_eq!(errors.messages(EMAIL_FIELD), [REQUIRED_MESSAGE]);
        assert_eq!(errors.messages(PASSWORD_FIELD), [REQUIRED_MESSAGE]);
    }

    #[test]
    fn valid_pair_is_accepted() {
        let submission = parse("a@b.com", "longenough1");
        let credentials = submission.value().expect("should pass");

        assert_eq!(credentials.email(), "a@b.com");
        assert_eq!(credentials.password(), "longenough1");
    }

    #[test]
    fn password_of_exactly_minimum_length_is_accepted() {
        assert!(parse("a@b.com", "12345678").is_success());
        assert!(!parse("a@b.com", "1234567").is_success());
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // Seven characters, fourteen bytes.
        let submission = parse("a@b.com", "ããããããã");
        assert!(!submission.is_success());

        assert!(parse("a@b.com", "çãçãçãçã").is_success());
    }

    #[test]
    fn every_short_password_fails_with_the_length_message() {
        for password in ["a", "ab", "abc", "abcd", "abcde", "abcdef", "abcdefg"] {
            let submission = parse("a@b.com", password);
            let errors = submission.errors().expect("should fail");
            assert_eq!(errors.messages(PASSWORD_FIELD), [PASSWORD_TOO_SHORT_MESSAGE]);
            assert!(!errors.contains(EMAIL_FIELD));
        }
    }

    #[test]
    fn assorted_malformed_emails_fail() {
        for email in [
            "plain",
            "@b.com",
            "a@",
            "a b@c.com",
            "a@@b.com",
            "a@localhost",
            "a@b",
            "a@b.c",
            "a..b@c.com",
            ".a@b.com",
            "a.@b.com",
            "a@-b.com",
            "a@b..com",
            "a@.b.com",
            "a@b.c0m",
            "ação@b.com",
        ] {
            let submission = parse(email, "longenough1");
            let errors = submission.errors().expect("should fail");
            assert_eq!(errors.messages(EMAIL_FIELD), [INVALID_EMAIL_MESSAGE], "{email}");
        }
    }

    #[test]
    fn password_is_not_echoed_back() {
        let submission = parse("a@b.com", "short");

        assert_eq!(submission.payload().value(EMAIL_FIELD), Some("a@b.com"));
        assert_eq!(submission.payload().value(PASSWORD_FIELD), None);
        assert_eq!(submission.reply().initial_value.value(PASSWORD_FIELD), None);
    }

    #[test]
    fn debug_output_redacts_password() {
        let submission = parse("a@b.com", "longenough1");
        let credentials = submission.value().expect("should pass");
        let debug = format!("{credentials:?}");

        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("longenough1"));
    }

    #[test]
    fn well_formed_emails_pass() {
        for email in [
            "a@b.com",
            "first.last@example.com.br",
            "o'brien+listas@mail-server.io",
            "UPPER_case-1@Sub.Domain.ORG",
            "a@b-.co",
        ] {
            assert!(parse(email, "longenough1").is_success(), "{email}");
        }
    }

    #[test]
    fn schema_messages_match_exported_constants() {
        let candidate = Credentials {
            email: "a@b".to_string(),
            password: "x".repeat(MIN_PASSWORD_LENGTH as usize - 1),
        };
        let report = candidate.validate().expect_err("should fail");
        let errors = report.field_errors();

        assert_eq!(
            errors["email"][0].message.as_deref(),
            Some(INVALID_EMAIL_MESSAGE)
        );
        assert_eq!(
            errors["password"][0].message.as_deref(),
            Some(PASSWORD_TOO_SHORT_MESSAGE)
        );
        assert!(PASSWORD_TOO_SHORT_MESSAGE.contains(&MIN_PASSWORD_LENGTH.to_string()));
    }
}
