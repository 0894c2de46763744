//! Input validators applied before any collaborator call.

use std::sync::LazyLock;

use regex::Regex;

// U+FEFF is whitespace for the browser-side checks but not for `\s`
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("compile email regex")
});

/// Minimum lengths, in UTF-16 code units like the front end measures them.
pub const NAME_MIN_CHARS: usize = 2;
pub const PASSWORD_MIN_CHARS: usize = 6;

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Returns the field value when it is present and non-empty.
pub fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Strips surrounding whitespace, BOM included.
pub fn trim_name(name: &str) -> &str {
    name.trim_matches(is_blank)
}

/// Names are checked after trimming surrounding whitespace.
pub fn is_valid_name(name: &str) -> bool {
    utf16_len(trim_name(name)) >= NAME_MIN_CHARS
}

pub fn is_valid_password(password: &str) -> bool {
    utf16_len(password) >= PASSWORD_MIN_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("maria.lopez@golfito.co.cr"));
        assert!(!is_valid_email("nada_neutho"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a\u{FEFF}b@c.com"));
        assert!(!is_valid_email("ab@c.\u{FEFF}com"));
    }

    #[test]
    fn test_required_treats_empty_as_missing() {
        assert_eq!(required(&None), None);
        assert_eq!(required(&Some(String::new())), None);
        assert_eq!(required(&Some("x".to_string())), Some("x"));
    }

    #[test]
    fn test_name_length_is_measured_after_trim() {
        assert!(is_valid_name("Jo"));
        assert!(is_valid_name("  Jo  "));
        assert!(!is_valid_name(" J "));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("\u{FEFF}J\u{FEFF}"));
        assert_eq!(trim_name("\u{FEFF} Jo\t"), "Jo");
    }

    #[test]
    fn test_lengths_count_utf16_units() {
        // Astral characters take two units each
        assert!(is_valid_name("😀"));
        assert!(is_valid_password("😀😀😀"));
        assert!(!is_valid_password("😀😀"));
    }

    #[test]
    fn test_password_length() {
        assert!(is_valid_password("123456"));
        assert!(!is_valid_password("12345"));
        assert!(is_valid_password("ñandú!"));
    }
}
