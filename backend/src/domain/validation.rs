//! Input policy checks for registration data.
//!
//! Both checks are pure. The patterns compile once on first use and are
//! shared read-only afterwards.

use std::sync::OnceLock;

use regex::Regex;

use super::error::UsersError;

/// Minimum password length, counted in Unicode scalar values.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PASSWORD_CHARS_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Local part from the RFC 5322 atom set; domain labels are 1-63
        // alphanumerics with interior hyphens only.
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@",
            r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn password_chars_regex() -> &'static Regex {
    PASSWORD_CHARS_RE.get_or_init(|| {
        // Printable: letters, marks, numbers, punctuation, symbols, ASCII space.
        let pattern = r"^[\p{L}\p{M}\p{N}\p{P}\p{S} ]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("password regex failed to compile: {error}"))
    })
}

/// Check that `email` has an acceptable address shape.
///
/// # Errors
///
/// Returns [`UsersError::InvalidEmail`] when the shape does not match.
///
/// # Examples
/// ```
/// use ebox_users::domain::{UsersError, validate_email};
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert_eq!(validate_email("a@b..com"), Err(UsersError::InvalidEmail));
/// ```
pub fn validate_email(email: &str) -> Result<(), UsersError> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(UsersError::InvalidEmail)
    }
}

/// Check `password` against the character and length policy.
///
/// The character check runs first; only its error is reported when both
/// checks would fail.
///
/// # Errors
///
/// Returns [`UsersError::PasswordContainsInvalidChars`] for an empty password
/// or one with control or other non-printable characters, then [`UsersError::PasswordTooShort`] for fewer
/// than [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<(), UsersError> {
    if !password_chars_regex().is_match(password) {
        return Err(UsersError::PasswordContainsInvalidChars);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UsersError::PasswordTooShort);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com")]
    #[case("first.last+tag@sub.example.co.uk")]
    #[case("o'brien!#$%&*/=?^_`{|}~-@example.com")]
    #[case("x@localhost")]
    #[case("x@a-b.c")]
    fn accepts_well_formed_emails(#[case] email: &str) {
        assert_eq!(validate_email(email), Ok(()));
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("a@b..com")]
    #[case("")]
    #[case("@example.com")]
    #[case("user@")]
    #[case("user@-example.com")]
    #[case("user@example-.com")]
    #[case("user@example.com.")]
    #[case("us er@example.com")]
    #[case("user@exa_mple.com")]
    #[case("user@@example.com")]
    #[case("üser@example.com")]
    fn rejects_malformed_emails(#[case] email: &str) {
        assert_eq!(validate_email(email), Err(UsersError::InvalidEmail));
    }

    #[rstest]
    fn label_length_is_capped_at_sixty_three() {
        let longest = format!("user@{}.com", "a".repeat(63));
        let too_long = format!("user@{}.com", "a".repeat(64));

        assert_eq!(validate_email(&longest), Ok(()));
        assert_eq!(validate_email(&too_long), Err(UsersError::InvalidEmail));
    }

    #[rstest]
    #[case("password")]
    #[case("correct horse battery staple")]
    #[case("P@ssw0rd!~{}")]
    #[case("pässwörd")]
    #[case("密码密码密码密码")]
    fn accepts_printable_passwords(#[case] password: &str) {
        assert_eq!(validate_password(password), Ok(()));
    }

    #[rstest]
    #[case("short1")]
    #[case("1234567")]
    #[case("密码密码")]
    fn rejects_short_passwords(#[case] password: &str) {
        assert_eq!(validate_password(password), Err(UsersError::PasswordTooShort));
    }

    #[rstest]
    #[case("")]
    #[case("a\x01bcdefgh")]
    #[case("a\x01b")]
    #[case("tab\tseparated")]
    #[case("line\nbreak-here")]
    #[case("delete\x7fcharacter")]
    #[case("zero\u{200b}width-space")]
    fn rejects_non_printable_characters_before_length(#[case] password: &str) {
        assert_eq!(
            validate_password(password),
            Err(UsersError::PasswordContainsInvalidChars)
        );
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        // Seven two-byte characters: fourteen bytes but still too short.
        let password = "ééééééé";
        assert_eq!(password.len(), 14);
        assert_eq!(validate_password(password), Err(UsersError::PasswordTooShort));
    }
}
