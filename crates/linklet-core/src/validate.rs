//! Pure validation over the creation form fields.
//!
//! Everything here is side-effect-free: syntax checks only, no store
//! lookups and no network. Uniqueness is checked by the shortener
//! service against its store.

use crate::shortcode::ShortCode;
use std::fmt::Display;
use url::Url;

/// The form fields a validation error can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LongUrl,
    Validity,
    CustomCode,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::LongUrl => f.write_str("longUrl"),
            Field::Validity => f.write_str("validity"),
            Field::CustomCode => f.write_str("customCode"),
        }
    }
}

/// A field-tagged validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_owned(),
        }
    }
}

/// Raw form input for one link-creation row, all fields as typed by the
/// user. An empty validity means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub long_url: String,
    pub validity: String,
    pub custom_code: String,
}

impl FormInput {
    pub fn new(
        long_url: impl Into<String>,
        validity: impl Into<String>,
        custom_code: impl Into<String>,
    ) -> Self {
        Self {
            long_url: long_url.into(),
            validity: validity.into(),
            custom_code: custom_code.into(),
        }
    }

    /// True when every field is blank; blank rows are skipped by batch
    /// creation.
    pub fn is_blank(&self) -> bool {
        self.long_url.trim().is_empty()
            && self.validity.trim().is_empty()
            && self.custom_code.trim().is_empty()
    }
}

/// True iff `s` parses as an absolute URL with a scheme and a host.
/// Syntactic only; no network check.
pub fn is_valid_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

/// True iff `s` is 3-20 alphanumeric characters.
pub fn is_valid_shortcode(s: &str) -> bool {
    ShortCode::is_valid(s)
}

/// True iff `s` is empty (use the default) or parses as a positive
/// integer number of minutes.
pub fn is_valid_minutes(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return true;
    }
    s.parse::<i64>().map(|n| n > 0).unwrap_or(false)
}

/// Validates one creation row, accumulating every failing field rather
/// than stopping at the first. An empty list signals valid input.
pub fn validate_form(input: &FormInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if input.long_url.trim().is_empty() {
        errors.push(FieldError::new(Field::LongUrl, "URL is required"));
    } else if !is_valid_url(input.long_url.trim()) {
        errors.push(FieldError::new(Field::LongUrl, "Please enter a valid URL"));
    }

    if !input.validity.trim().is_empty() && !is_valid_minutes(&input.validity) {
        errors.push(FieldError::new(
            Field::Validity,
            "Validity must be a positive integer (minutes)",
        ));
    }

    if !input.custom_code.trim().is_empty() && !is_valid_shortcode(input.custom_code.trim()) {
        errors.push(FieldError::new(
            Field::CustomCode,
            "Custom code must be 3-20 alphanumeric characters",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?q=1"));
        assert!(is_valid_url("ftp://files.example.com"));
    }

    #[test]
    fn rejects_urls_without_scheme_or_host() {
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("mailto:user@example.com"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn shortcode_syntax() {
        assert!(is_valid_shortcode("abc"));
        assert!(is_valid_shortcode("Abc123xyz0"));
        assert!(!is_valid_shortcode("ab"));
        assert!(!is_valid_shortcode(&"a".repeat(21)));
        assert!(!is_valid_shortcode("has space"));
        assert!(!is_valid_shortcode("has-dash"));
    }

    #[test]
    fn minutes_syntax() {
        assert!(is_valid_minutes(""));
        assert!(is_valid_minutes("  "));
        assert!(is_valid_minutes("30"));
        assert!(is_valid_minutes("1"));
        assert!(!is_valid_minutes("0"));
        assert!(!is_valid_minutes("-5"));
        assert!(!is_valid_minutes("abc"));
        assert!(!is_valid_minutes("1.5"));
    }

    #[test]
    fn valid_form_yields_no_errors() {
        let input = FormInput::new("https://example.com", "", "");
        assert!(validate_form(&input).is_empty());
    }

    #[test]
    fn missing_url_is_required() {
        let errors = validate_form(&FormInput::new("", "", ""));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::LongUrl);
        assert_eq!(errors[0].message, "URL is required");
    }

    #[test]
    fn malformed_url_message() {
        let errors = validate_form(&FormInput::new("not-a-url", "", ""));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::LongUrl);
        assert_eq!(errors[0].message, "Please enter a valid URL");
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let errors = validate_form(&FormInput::new("not-a-url", "zero", "a!"));
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::LongUrl, Field::Validity, Field::CustomCode]);
    }

    #[test]
    fn optional_fields_do_not_error_when_blank() {
        let errors = validate_form(&FormInput::new("https://example.com", "", ""));
        assert!(errors.is_empty());
    }

    #[test]
    fn blank_row_detection() {
        assert!(FormInput::new("", " ", "").is_blank());
        assert!(!FormInput::new("", "", "abc").is_blank());
    }
}
