//! Predictor core: pure form state machine and view-model helpers.
mod effect;
mod field;
mod msg;
mod persisted;
mod progress;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use field::{
    prediction_form_fields, FieldKind, FieldSpec, NumericRange, RegistryError,
    PREDICTION_FIELD_NAMES,
};
pub use msg::Msg;
pub use persisted::{DraftSnapshot, Theme};
pub use progress::{FormProgress, StepState, STEP_COUNT};
pub use state::{FormState, SubmissionPhase, BANNER_TIMEOUT, SUBMIT_ERROR_BANNER};
pub use update::update;
pub use validate::{parse_float_prefix, validate_value, FieldError, FieldState};
pub use view_model::{
    BannerView, FieldView, FormViewModel, ProgressView, SubmitView, ValidityMarker,
};
