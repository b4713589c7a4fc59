use page_logging::page_warn;
use predictor_core::{FieldSpec, NumericRange, STEP_COUNT};

use super::document::{
    Control, ControlAttributes, ControlType, Document, HeadlessDocument, Node, SubmitButton,
};

const SELECTS: [(&str, &[&str]); 5] = [
    ("gender", &["female", "male"]),
    (
        "ethnicity",
        &["group A", "group B", "group C", "group D", "group E"],
    ),
    (
        "parental_level_of_education",
        &[
            "some high school",
            "high school",
            "some college",
            "associate's degree",
            "bachelor's degree",
            "master's degree",
        ],
    ),
    ("lunch", &["standard", "free/reduced"]),
    ("test_preparation_course", &["none", "completed"]),
];

const SCORES: [&str; 2] = ["reading_score", "writing_score"];

/// The prediction page as served: five selects, two scores, progress bar,
/// step indicators and a locked submit button.
pub fn prediction_page() -> HeadlessDocument {
    let mut doc = HeadlessDocument::new();
    doc.add_steps(STEP_COUNT);

    for (name, options) in SELECTS {
        let mut control = Control::new(
            name,
            ControlAttributes {
                control_type: ControlType::Select,
                required: true,
                min: None,
                max: None,
            },
        );
        control.options = options.iter().map(|option| option.to_string()).collect();
        doc.push(Node::Control(control));
    }
    for name in SCORES {
        doc.push(Node::Control(Control::new(
            name,
            ControlAttributes {
                control_type: ControlType::Number,
                required: true,
                min: Some("0".to_string()),
                max: Some("100".to_string()),
            },
        )));
    }

    doc.push(Node::Progress {
        width: "0%".to_string(),
        label: "0% Complete".to_string(),
    });
    doc.push(Node::Submit(SubmitButton {
        disabled: true,
        class: "btn btn-predict disabled".to_string(),
        icon: "fas fa-lock".to_string(),
        label: "Complete all fields first".to_string(),
        opacity: None,
    }));
    doc
}

/// Builds the registry for `names` from the controls present in `doc`.
///
/// A name without a matching control stays registered as a required field
/// that can never be filled.
pub fn field_specs(doc: &impl Document, names: &[&str]) -> Vec<FieldSpec> {
    names
        .iter()
        .map(|name| match doc.control_attributes(name) {
            Some(attributes) => spec_from_attributes(name, &attributes),
            None => {
                page_warn!("No control named {} on the page; counting it as unfilled", name);
                FieldSpec::select(*name).without_control()
            }
        })
        .collect()
}

fn spec_from_attributes(name: &str, attributes: &ControlAttributes) -> FieldSpec {
    let spec = match attributes.control_type {
        ControlType::Number => FieldSpec::number(
            name,
            NumericRange::from_attributes(attributes.min.as_deref(), attributes.max.as_deref()),
        ),
        ControlType::Select => FieldSpec::select(name),
    };
    if attributes.required {
        spec
    } else {
        spec.optional()
    }
}
