use thiserror::Error;

use crate::validate::parse_float_prefix;

/// Control names on the prediction form, in page order.
pub const PREDICTION_FIELD_NAMES: [&str; 7] = [
    "gender",
    "ethnicity",
    "parental_level_of_education",
    "lunch",
    "test_preparation_course",
    "reading_score",
    "writing_score",
];

const DEFAULT_MIN: f64 = 0.0;
const DEFAULT_MAX: f64 = 100.0;

/// Inclusive bounds for a numeric control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl Default for NumericRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl NumericRange {
    /// Builds a range from raw `min`/`max` attribute text.
    ///
    /// An attribute that is missing, unparseable or parses to zero falls back
    /// to its default, matching how the page reads `parseFloat(attr) || default`.
    pub fn from_attributes(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            min: attribute_or(min, DEFAULT_MIN),
            max: attribute_or(max, DEFAULT_MAX),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

fn attribute_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|text| parse_float_prefix(text.trim()))
        .filter(|value| *value != 0.0)
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Select,
    Number { range: NumericRange },
}

/// Static description of one tracked form control.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub required: bool,
    pub kind: FieldKind,
    /// False when the page lacks a control for this name. Such a field can
    /// never be filled, so it keeps the form incomplete.
    pub has_control: bool,
}

impl FieldSpec {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            kind: FieldKind::Text,
            has_control: true,
        }
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            kind: FieldKind::Select,
            has_control: true,
        }
    }

    pub fn number(name: impl Into<String>, range: NumericRange) -> Self {
        Self {
            name: name.into(),
            required: true,
            kind: FieldKind::Number { range },
            has_control: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn without_control(mut self) -> Self {
        self.has_control = false;
        self
    }
}

/// The registry used by the prediction page when no document attributes
/// override it: five selects and two scores bounded to `[0, 100]`.
pub fn prediction_form_fields() -> Vec<FieldSpec> {
    PREDICTION_FIELD_NAMES
        .iter()
        .map(|name| {
            if name.ends_with("_score") {
                FieldSpec::number(*name, NumericRange::default())
            } else {
                FieldSpec::select(*name)
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("field `{0}` is registered more than once")]
    DuplicateField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_attributes_fall_back_to_defaults() {
        assert_eq!(
            NumericRange::from_attributes(None, None),
            NumericRange { min: 0.0, max: 100.0 }
        );
        assert_eq!(
            NumericRange::from_attributes(Some("10"), Some("abc")),
            NumericRange { min: 10.0, max: 100.0 }
        );
        // Zero is falsy in the page's attribute reading.
        assert_eq!(
            NumericRange::from_attributes(Some("-5"), Some("0")),
            NumericRange { min: -5.0, max: 100.0 }
        );
    }

    #[test]
    fn prediction_fields_mark_scores_numeric() {
        let fields = prediction_form_fields();
        assert_eq!(fields.len(), PREDICTION_FIELD_NAMES.len());
        assert!(fields.iter().all(|f| f.required));
        let numeric: Vec<_> = fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Number { .. }))
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(numeric, vec!["reading_score", "writing_score"]);
    }
}
