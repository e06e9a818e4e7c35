//! Naive input sanitisation and format checks.
//!
//! These helpers strip characters commonly used in markup and injection
//! payloads. They are a last line of defence, not a substitute for
//! context-aware escaping or parameterised queries.

use lazy_static::lazy_static;
use regex::Regex;

/// Default maximum length, in characters, kept by [`sanitize_input`].
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1000;

/// Characters removed by [`sanitize_input`].
const STRIPPED_CHARS: [char; 6] = ['<', '>', '"', '\'', '&', ';'];

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is a valid regex");
}

/// Truncate `input` to `max_length` characters, drop `< > " ' & ;` and trim
/// surrounding whitespace.
pub fn sanitize_input(input: &str, max_length: usize) -> String {
    input
        .chars()
        .take(max_length)
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Whether `email` looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_script_tag() {
        assert_eq!(
            sanitize_input("<script>alert('xss')</script>Hello", DEFAULT_MAX_INPUT_LENGTH),
            "scriptalert(xss)/scriptHello"
        );
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_input("", DEFAULT_MAX_INPUT_LENGTH), "");
    }

    #[test]
    fn test_sanitize_trims_after_stripping() {
        assert_eq!(sanitize_input("  a & b;  ", DEFAULT_MAX_INPUT_LENGTH), "a  b");
        assert_eq!(sanitize_input("<> hi <>", DEFAULT_MAX_INPUT_LENGTH), "hi");
    }

    #[test]
    fn test_sanitize_truncates_before_stripping() {
        // Truncation counts the stripped characters too.
        assert_eq!(sanitize_input("<<abcdef", 4), "ab");
    }

    #[test]
    fn test_sanitize_counts_characters_not_bytes() {
        assert_eq!(sanitize_input("héllo wörld", 5), "héllo");
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("first.last+tag@sub.example.co"));
        assert!(validate_email("a_b%c-d@host-name.io"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!validate_email(""));
        assert!(!validate_email("plainaddress"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@example"));
        assert!(!validate_email("user@example.c"));
        assert!(!validate_email("user name@example.com"));
        assert!(!validate_email("user@example.com "));
    }
}
