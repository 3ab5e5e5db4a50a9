//! Field-level input rules shared by every form in the dashboard.
//!
//! Each rule trims its input and returns the cleaned value, so a chain of rules
//! can be composed with `and_then`. Lengths are counted in characters.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Why a single field value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Input cannot be empty")]
    Empty,
    #[error("Input too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
    #[error("Invalid format: expected {expected}")]
    InvalidFormat { expected: &'static str },
}

static ISBN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(97(8|9))?[0-9]{9}([0-9]|X)$").ok());

static YEAR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").ok());

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(value))
}

pub fn required(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(trimmed.to_owned())
}

pub fn max_chars(input: String, max: usize) -> Result<String, ValidationError> {
    let actual = input.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { max, actual });
    }
    Ok(input)
}

/// Accepts `local@domain.tld` addresses with conventional characters.
pub fn email(input: &str) -> Result<String, ValidationError> {
    const MAX_EMAIL_LEN: usize = 254;
    const EXPECTED: &str = "valid email address (user@domain.com)";

    let trimmed = required(input)?;
    let trimmed = max_chars(trimmed, MAX_EMAIL_LEN)?;

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(ValidationError::InvalidFormat { expected: EXPECTED });
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return Err(ValidationError::InvalidFormat { expected: EXPECTED });
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(ValidationError::InvalidFormat { expected: EXPECTED });
    }
    if labels.last().is_some_and(|tld| tld.len() < 2) {
        return Err(ValidationError::InvalidFormat { expected: EXPECTED });
    }

    let valid_local = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let valid_domain = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c));
    if !valid_local || !valid_domain {
        return Err(ValidationError::InvalidFormat { expected: EXPECTED });
    }

    Ok(trimmed)
}

/// ISBN-10 or ISBN-13 without separators.
pub fn isbn(input: &str) -> Result<String, ValidationError> {
    let trimmed = required(input)?;
    if !matches(&ISBN, &trimmed) {
        return Err(ValidationError::InvalidFormat {
            expected: "ISBN-10 or ISBN-13 digits",
        });
    }
    Ok(trimmed)
}

pub fn four_digit_year(input: &str) -> Result<i32, ValidationError> {
    const EXPECTED: &str = "4-digit year";

    let trimmed = required(input)?;
    if !matches(&YEAR, &trimmed) {
        return Err(ValidationError::InvalidFormat { expected: EXPECTED });
    }
    trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidFormat { expected: EXPECTED })
}

/// Absolute `http`/`https` URL with a host.
pub fn http_url(input: &str) -> Result<String, ValidationError> {
    const EXPECTED: &str = "absolute http(s) URL";

    let trimmed = required(input)?;
    let uri: http::Uri = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidFormat { expected: EXPECTED })?;

    let scheme_ok = matches!(uri.scheme_str(), Some("http" | "https"));
    let host_ok = uri.host().is_some_and(|host| !host.is_empty());
    if !scheme_ok || !host_ok {
        return Err(ValidationError::InvalidFormat { expected: EXPECTED });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  Borges ").unwrap(), "Borges");
        assert_eq!(required("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_max_chars_counts_characters() {
        assert!(max_chars("é".repeat(100), 100).is_ok());
        assert_matches!(
            max_chars("a".repeat(101), 100),
            Err(ValidationError::TooLong { max: 100, actual: 101 })
        );
    }

    #[test]
    fn test_email_accepts_valid() {
        assert_eq!(email("ada@example.com").unwrap(), "ada@example.com");
        assert!(email("first.last+tag@mail.example.org").is_ok());
        assert!(email(" spaced@example.io ").is_ok());
    }

    #[test]
    fn test_email_rejects_invalid() {
        for bad in [
            "not-an-email",
            "@example.com",
            "ada@",
            "ada@example",
            "ada@example.c",
            "ada@@example.com",
            "ada@exa mple.com",
            "ada@.com",
        ] {
            assert_matches!(email(bad), Err(ValidationError::InvalidFormat { .. }), "{bad}");
        }
        assert_eq!(email(""), Err(ValidationError::Empty));
    }

    #[test]
    fn test_isbn_patterns() {
        assert!(isbn("9780441013593").is_ok());
        assert!(isbn("044101359X").is_ok());
        assert!(isbn("0441013597").is_ok());
        assert_matches!(isbn("978-0441013593"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(isbn("12345"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(isbn("977044101359X"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(isbn("\u{660}\u{664}\u{664}\u{661}\u{660}\u{661}\u{663}\u{665}\u{669}\u{667}"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(isbn("\u{ff10}441013597"), Err(ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_four_digit_year() {
        assert_eq!(four_digit_year("1965"), Ok(1965));
        assert_matches!(four_digit_year("65"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(four_digit_year("19650"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(four_digit_year("19a5"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(four_digit_year("\u{661}\u{669}\u{666}\u{665}"), Err(ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_http_url() {
        assert!(http_url("https://covers.example/dune.jpg").is_ok());
        assert!(http_url("http://localhost:8080/img.png").is_ok());
        assert_matches!(http_url("/relative/path.png"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(http_url("ftp://files.example/a.png"), Err(ValidationError::InvalidFormat { .. }));
        assert_matches!(http_url("not a url"), Err(ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::TooLong { max: 50, actual: 60 };
        assert_eq!(err.to_string(), "Input too long: maximum 50 characters, got 60");
    }
}
