use crate::{StepState, Theme, STEP_COUNT};

#[derive(Debug, Clone, PartialEq)]
pub struct FormViewModel {
    pub fields: Vec<FieldView>,
    pub progress: ProgressView,
    pub steps: [StepState; STEP_COUNT],
    pub submit: SubmitView,
    pub banner: Option<BannerView>,
    pub theme: Theme,
}

impl FormViewModel {
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub value: String,
    /// Set once the field has been validated.
    pub marker: Option<ValidityMarker>,
    /// Inline message rendered right after the control.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityMarker {
    Valid,
    Invalid,
}

impl ValidityMarker {
    pub fn css_class(self) -> &'static str {
        match self {
            ValidityMarker::Valid => "is-valid",
            ValidityMarker::Invalid => "is-invalid",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub filled: usize,
    pub total: usize,
    /// Bar width in percent.
    pub percent: f64,
    /// `"{rounded percent}% Complete"`.
    pub label: String,
}

impl ProgressView {
    pub fn width_style(&self) -> String {
        format!("{}%", self.percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitView {
    /// Some required field is empty.
    Locked,
    /// Every required field holds a value.
    Armed,
    /// A valid submit is navigating away.
    Processing,
}

impl SubmitView {
    pub fn disabled(self) -> bool {
        !matches!(self, SubmitView::Armed)
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmitView::Locked => "Complete all fields first",
            SubmitView::Armed => "Predict Math Score",
            SubmitView::Processing => "Predicting...",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            SubmitView::Locked => "fas fa-lock",
            SubmitView::Armed => "fas fa-magic",
            SubmitView::Processing => "fas fa-spinner fa-spin",
        }
    }

    pub fn button_class(self) -> &'static str {
        match self {
            SubmitView::Locked => "btn btn-predict disabled",
            SubmitView::Armed | SubmitView::Processing => "btn btn-predict",
        }
    }

    /// Inline opacity applied while processing.
    pub fn opacity(self) -> Option<&'static str> {
        match self {
            SubmitView::Processing => Some("0.7"),
            SubmitView::Locked | SubmitView::Armed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub id: u64,
    pub message: String,
}
