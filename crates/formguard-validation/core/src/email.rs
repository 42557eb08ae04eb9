//! Email validation

use once_cell::sync::Lazy;
use regex::Regex;

pub const EMAIL_MESSAGE: &str = "This field must be an email";

// Word characters are ASCII-only and matching is case-sensitive as written:
// `local@domain.tld`, `.`/`-` separators, 2-3 character final segments.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .expect("email pattern is a valid regex")
});

/// Validates basic email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Email rule: fails with [`EMAIL_MESSAGE`] unless the value looks like an address
pub fn validate_email(value: &str) -> Result<(), String> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(EMAIL_MESSAGE.to_string())
    }
}
