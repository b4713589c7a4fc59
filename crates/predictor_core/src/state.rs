use std::collections::HashMap;
use std::time::Duration;

use crate::validate::validate_value;
use crate::view_model::{BannerView, FieldView, FormViewModel, ProgressView, SubmitView, ValidityMarker};
use crate::{DraftSnapshot, FieldSpec, FieldState, FormProgress, RegistryError, Theme};

/// Banner shown when a submit is blocked by invalid fields.
pub const SUBMIT_ERROR_BANNER: &str = "Please fix the errors above before submitting.";
/// How long the submit error banner stays up.
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    /// Navigation is under way; never left because the page goes away.
    Processing,
}

#[derive(Debug, Clone, PartialEq)]
struct TrackedField {
    spec: FieldSpec,
    value: String,
    /// Outcome of the last validation, if the field was ever validated.
    validation: Option<FieldState>,
    error_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Banner {
    id: u64,
    message: String,
}

/// State of one form for the lifetime of a page view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    fields: Vec<TrackedField>,
    index: HashMap<String, usize>,
    theme: Theme,
    banner: Option<Banner>,
    last_banner_id: u64,
    phase: SubmissionPhase,
    dirty: bool,
}

impl FormState {
    /// Builds the field registry. Field order is page order.
    pub fn new(specs: impl IntoIterator<Item = FieldSpec>) -> Result<Self, RegistryError> {
        let mut state = Self::default();
        for spec in specs {
            if state.index.contains_key(&spec.name) {
                return Err(RegistryError::DuplicateField(spec.name));
            }
            state.index.insert(spec.name.clone(), state.fields.len());
            state.fields.push(TrackedField {
                spec,
                value: String::new(),
                validation: None,
                error_visible: false,
            });
        }
        Ok(state)
    }

    pub fn view(&self) -> FormViewModel {
        let progress = self.progress();
        let percent = progress.percent();
        let submit = match self.phase {
            SubmissionPhase::Processing => SubmitView::Processing,
            SubmissionPhase::Editing if progress.is_complete() => SubmitView::Armed,
            SubmissionPhase::Editing => SubmitView::Locked,
        };

        FormViewModel {
            fields: self.fields.iter().map(field_view).collect(),
            progress: ProgressView {
                filled: progress.filled,
                total: progress.total,
                percent,
                label: format!("{}% Complete", percent.round()),
            },
            steps: progress.steps(),
            submit,
            banner: self.banner.as_ref().map(|banner| BannerView {
                id: banner.id,
                message: banner.message.clone(),
            }),
            theme: self.theme,
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Progress over the required fields.
    pub fn progress(&self) -> FormProgress {
        FormProgress::from_values(
            self.fields
                .iter()
                .filter(|field| field.spec.required)
                .map(|field| field.value.as_str()),
        )
    }

    pub fn field_specs(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().map(|field| &field.spec)
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|field| field.value.as_str())
    }

    /// Outcome of the last validation of `name`.
    pub fn field_state(&self, name: &str) -> Option<&FieldState> {
        self.field(name).and_then(|field| field.validation.as_ref())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn draft_snapshot(&self) -> DraftSnapshot {
        self.fields
            .iter()
            .map(|field| (field.spec.name.as_str(), field.value.as_str()))
            .collect()
    }

    pub fn form_values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|field| (field.spec.name.clone(), field.value.clone()))
            .collect()
    }

    fn field(&self, name: &str) -> Option<&TrackedField> {
        self.index.get(name).map(|&at| &self.fields[at])
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut TrackedField> {
        self.index.get(name).map(|&at| &mut self.fields[at])
    }

    pub(crate) fn is_registered(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Stores a new raw value. Returns false for unknown fields and for
    /// fields without a control on the page.
    pub(crate) fn set_value(&mut self, name: &str, value: String) -> bool {
        let Some(field) = self.field_mut(name).filter(|field| field.spec.has_control) else {
            return false;
        };
        if field.value != value {
            field.value = value;
            self.dirty = true;
        }
        true
    }

    /// Validates one field and records the outcome. `None` for unknown fields.
    pub(crate) fn validate_field(&mut self, name: &str) -> Option<bool> {
        let field = self.field_mut(name)?;
        let outcome = validate_value(&field.spec, &field.value);
        let valid = outcome.is_valid();
        let changed = field.validation.as_ref() != Some(&outcome) || field.error_visible == valid;
        field.error_visible = !valid;
        field.validation = Some(outcome);
        if changed {
            self.dirty = true;
        }
        Some(valid)
    }

    /// Validates every required field without stopping at the first failure.
    /// Returns the name of the first invalid field in page order, preferring
    /// fields that have a control to focus.
    pub(crate) fn validate_form(&mut self) -> Option<String> {
        let required: Vec<(String, bool)> = self
            .fields
            .iter()
            .filter(|field| field.spec.required)
            .map(|field| (field.spec.name.clone(), field.spec.has_control))
            .collect();

        let mut first_focusable = None;
        let mut first_invalid = None;
        for (name, has_control) in required {
            if self.validate_field(&name) != Some(false) {
                continue;
            }
            if has_control && first_focusable.is_none() {
                first_focusable = Some(name.clone());
            }
            first_invalid.get_or_insert(name);
        }
        first_focusable.or(first_invalid)
    }

    pub(crate) fn hide_error(&mut self, name: &str) {
        if let Some(field) = self.field_mut(name) {
            if field.error_visible {
                field.error_visible = false;
                self.dirty = true;
            }
        }
    }

    /// Replaces any current banner. Returns the new banner's id.
    pub(crate) fn show_banner(&mut self, message: &str) -> u64 {
        self.last_banner_id += 1;
        self.banner = Some(Banner {
            id: self.last_banner_id,
            message: message.to_string(),
        });
        self.dirty = true;
        self.last_banner_id
    }

    /// Removes the banner only if it is still the one identified by `id`.
    pub(crate) fn dismiss_banner(&mut self, id: u64) -> bool {
        if self.banner.as_ref().is_some_and(|banner| banner.id == id) {
            self.banner = None;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_processing(&mut self) {
        self.phase = SubmissionPhase::Processing;
        self.dirty = true;
    }
}

fn field_view(field: &TrackedField) -> FieldView {
    // Empty controls carry no marker, only the message.
    let marker = field
        .validation
        .as_ref()
        .filter(|_| !field.value.trim().is_empty())
        .map(|outcome| {
            if outcome.is_valid() {
                ValidityMarker::Valid
            } else {
                ValidityMarker::Invalid
            }
        });
    let error = field
        .validation
        .as_ref()
        .filter(|_| field.error_visible)
        .and_then(FieldState::error_message);

    FieldView {
        name: field.spec.name.clone(),
        value: field.value.clone(),
        marker,
        error,
    }
}
