//! Email comparison keys.

/// Domains whose mailboxes ignore dots in the local part.
const DOT_INSENSITIVE_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];

/// Produces the canonical form used to compare email addresses.
///
/// Trims and lower-cases the address. For Gmail domains every `.` in the
/// local part is removed; other domains keep their local part unchanged.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    let normalized = email.trim().to_lowercase();

    let Some((local, domain)) = normalized.rsplit_once('@') else {
        return normalized;
    };

    if DOT_INSENSITIVE_DOMAINS.contains(&domain) {
        format!("{}@{domain}", local.replace('.', ""))
    } else {
        normalized
    }
}

/// Cheap shape check run before an address is sent to the backend.
#[must_use]
pub fn looks_like_email(email: &str) -> bool {
    let trimmed = email.trim();
    let Some((local, domain)) = trimmed.rsplit_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !trimmed.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("John.Doe@GMAIL.com", "johndoe@gmail.com" ; "gmail_dots_removed")]
    #[test_case("John.Doe@example.com", "john.doe@example.com" ; "other_domain_untouched")]
    #[test_case("  a.b.c@googlemail.com \n", "abc@googlemail.com" ; "googlemail_and_whitespace")]
    #[test_case("j.doe+news@gmail.com", "jdoe+news@gmail.com" ; "plus_tag_kept")]
    #[test_case("first.last@mail.gmail.com", "first.last@mail.gmail.com" ; "subdomain_not_alias")]
    #[test_case("NoAtSign", "noatsign" ; "missing_at")]
    fn test_normalize_email(input: &str, expected: &str) {
        assert_eq!(normalize_email(input), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_email("John.Doe@GMAIL.com");
        assert_eq!(normalize_email(&once), once);
    }

    #[test_case("ada@example.com", true ; "plain")]
    #[test_case("ada@localhost", false ; "no_tld")]
    #[test_case("@example.com", false ; "empty_local")]
    #[test_case("ada @example.com", false ; "inner_space")]
    #[test_case("ada@example.", false ; "trailing_dot")]
    fn test_looks_like_email(input: &str, expected: bool) {
        assert_eq!(looks_like_email(input), expected);
    }
}
