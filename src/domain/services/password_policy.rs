//! Password acceptance rules and strength scoring.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that count as "special".
pub const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

static LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]").expect("letter pattern is valid"));
static DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("digit pattern is valid"));
static SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("special pattern is valid"));

/// Reason a password was refused. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PasswordPolicyError {
    #[error("password must be at least {} characters long", MIN_PASSWORD_LENGTH)]
    TooShort,
    #[error("password must contain a letter")]
    MissingLetter,
    #[error("password must contain a digit")]
    MissingDigit,
    #[error("password must contain one of {}", SPECIAL_CHARACTERS)]
    MissingSpecial,
    #[error("passwords do not match")]
    Mismatch,
}

impl PasswordPolicyError {
    /// Stable reason code for forms and logs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::MissingLetter => "missing_letter",
            Self::MissingDigit => "missing_digit",
            Self::MissingSpecial => "missing_special",
            Self::Mismatch => "mismatch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Maps a 0-4 criteria score onto a strength bucket.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::Weak,
            3 => Self::Medium,
            _ => Self::Strong,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Validates a password, stopping at the first failing rule.
///
/// When `confirmation` is given it must equal `password`; that check runs last.
///
/// # Errors
/// Returns the first rule the password breaks.
pub fn validate_password(
    password: &str,
    confirmation: Option<&str>,
) -> Result<(), PasswordPolicyError> {
    if !long_enough(password) {
        return Err(PasswordPolicyError::TooShort);
    }
    if !LETTER_RE.is_match(password) {
        return Err(PasswordPolicyError::MissingLetter);
    }
    if !DIGIT_RE.is_match(password) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !SPECIAL_RE.is_match(password) {
        return Err(PasswordPolicyError::MissingSpecial);
    }
    if let Some(confirmation) = confirmation {
        if confirmation != password {
            return Err(PasswordPolicyError::Mismatch);
        }
    }
    Ok(())
}

/// Number of satisfied criteria (length, letter, digit, special), 0-4.
#[must_use]
pub fn password_score(password: &str) -> u8 {
    [
        long_enough(password),
        LETTER_RE.is_match(password),
        DIGIT_RE.is_match(password),
        SPECIAL_RE.is_match(password),
    ]
    .into_iter()
    .map(u8::from)
    .sum()
}

#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    PasswordStrength::from_score(password_score(password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("abc1!" , Err(PasswordPolicyError::TooShort) ; "too_short")]
    #[test_case("12345678!", Err(PasswordPolicyError::MissingLetter) ; "no_letter")]
    #[test_case("abcdefgh!", Err(PasswordPolicyError::MissingDigit) ; "no_digit")]
    #[test_case("abc12345", Err(PasswordPolicyError::MissingSpecial) ; "no_special")]
    #[test_case("abc123!@", Ok(()) ; "valid_eight_chars")]
    #[test_case("Correct-Horse9?", Ok(()) ; "valid_long")]
    fn test_validate_without_confirmation(password: &str, expected: Result<(), PasswordPolicyError>) {
        assert_eq!(validate_password(password, None), expected);
    }

    #[test]
    fn test_first_failure_wins() {
        // Short and missing everything else: length is reported.
        assert_eq!(validate_password("", None), Err(PasswordPolicyError::TooShort));
        // Mismatch only surfaces once the password itself passes.
        assert_eq!(
            validate_password("abc12345", Some("different")),
            Err(PasswordPolicyError::MissingSpecial)
        );
    }

    #[test]
    fn test_confirmation() {
        assert_eq!(validate_password("abc123!@", Some("abc123!@")), Ok(()));
        assert_eq!(
            validate_password("abc123!@", Some("abc123!#")),
            Err(PasswordPolicyError::Mismatch)
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert_eq!(validate_password("äöü1!ab", None), Err(PasswordPolicyError::TooShort));
        assert_eq!(validate_password("äöü1!abc", None), Ok(()));
    }

    #[test]
    fn test_unlisted_symbol_is_not_special() {
        assert_eq!(
            validate_password("abc12345-", None),
            Err(PasswordPolicyError::MissingSpecial)
        );
    }

    #[test_case("abc", 1, PasswordStrength::Weak ; "letters_only")]
    #[test_case("", 0, PasswordStrength::Weak ; "empty")]
    #[test_case("Ab1!", 3, PasswordStrength::Medium ; "short_but_mixed")]
    #[test_case("abcdefg1", 3, PasswordStrength::Medium ; "no_special")]
    #[test_case("abc123!@", 4, PasswordStrength::Strong ; "all_criteria")]
    fn test_strength(password: &str, score: u8, strength: PasswordStrength) {
        assert_eq!(password_score(password), score);
        assert_eq!(password_strength(password), strength);
    }

    #[test]
    fn test_reason_codes_are_distinct() {
        let codes = [
            PasswordPolicyError::TooShort,
            PasswordPolicyError::MissingLetter,
            PasswordPolicyError::MissingDigit,
            PasswordPolicyError::MissingSpecial,
            PasswordPolicyError::Mismatch,
        ]
        .map(PasswordPolicyError::code);

        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
