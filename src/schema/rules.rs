//! Shared field rules

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationErrors;

/// Loose structural check: something@domain.tld, no whitespace
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Number of digits in a CNPJ registration number
pub const CNPJ_DIGITS: usize = 14;

/// Shortest accepted company password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Trimmed value, or `None` when blank
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether the trimmed value has at least `min` characters
pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Digits of a CNPJ, accepting the usual `00.000.000/0000-00` punctuation
///
/// Returns `None` unless exactly 14 digits remain.
pub fn cnpj_digits(value: &str) -> Option<String> {
    let mut digits = String::with_capacity(CNPJ_DIGITS);
    for c in value.chars() {
        match c {
            '0'..='9' => digits.push(c),
            '.' | '/' | '-' | ' ' => {}
            _ => return None,
        }
    }
    (digits.len() == CNPJ_DIGITS).then_some(digits)
}

/// Report `message` on `field` unless it has `min` characters
pub fn require_min(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) {
    if !has_min_chars(value, min) {
        errors.field(field, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_trims_and_drops_blank() {
        assert_eq!(optional("  Sao Paulo "), Some("Sao Paulo".to_string()));
        assert_eq!(optional("   "), None);
        assert_eq!(optional(""), None);
    }

    #[test]
    fn test_min_chars_counts_characters_not_bytes() {
        assert!(has_min_chars("Zé", 2));
        assert!(!has_min_chars(" a ", 2));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email("a@acme.com"));
        assert!(is_email(" ana.silva@empresa.com.br "));
        assert!(!is_email("acme.com"));
        assert!(!is_email("a@acme"));
        assert!(!is_email("a b@acme.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_cnpj_digits() {
        assert_eq!(
            cnpj_digits("12.345.678/0001-95"),
            Some("12345678000195".to_string())
        );
        assert_eq!(cnpj_digits("12345678000195"), Some("12345678000195".to_string()));
        assert_eq!(cnpj_digits("123"), None);
        assert_eq!(cnpj_digits("12.345.678/0001-9X"), None);
    }

    #[test]
    fn test_require_min_reports_once() {
        let mut errors = ValidationErrors::new();
        require_min(&mut errors, "name", "A", 2, "Team name is required");
        require_min(&mut errors, "other", "Ok", 2, "unused");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field("name").map(|e| e.message.as_str()),
            Some("Team name is required")
        );
    }
}
