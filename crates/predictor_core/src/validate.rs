use thiserror::Error;

use crate::field::{FieldKind, FieldSpec};

/// Why a field failed validation. `Display` is the message shown next to the
/// field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    MissingRequiredValue,
    #[error("Please enter a valid number")]
    UnparseableNumber,
    #[error("Score must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
}

/// Result of validating one field against its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub value: String,
    pub error: Option<FieldError>,
}

impl FieldState {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Validates a raw control value against its spec.
pub fn validate_value(spec: &FieldSpec, raw: &str) -> FieldState {
    let value = raw.trim();
    let error = if value.is_empty() {
        spec.required.then_some(FieldError::MissingRequiredValue)
    } else {
        match spec.kind {
            FieldKind::Number { range } => match parse_float_prefix(value) {
                None => Some(FieldError::UnparseableNumber),
                Some(number) if !range.contains(number) => Some(FieldError::OutOfRange {
                    min: range.min,
                    max: range.max,
                }),
                Some(_) => None,
            },
            FieldKind::Text | FieldKind::Select => None,
        }
    };

    FieldState {
        value: raw.to_string(),
        error,
    }
}

/// Parses the longest leading decimal literal of `text`, the way browsers
/// read numbers out of form controls (`"12abc"` is 12, `"abc"` is nothing).
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        // A dangling exponent marker is not part of the number.
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}
