pub const FORM_ID: &str = "predictionForm";
pub const FORM_ACTION: &str = "/simple-predict";

pub const CONTROL_CLASS: &str = "form-control";
pub const FIELD_ERROR_CLASS: &str = "invalid-feedback d-block";
pub const BANNER_CLASS: &str = "alert alert-danger form-error mt-3";
pub const BANNER_ICON: &str = "fas fa-exclamation-triangle";

pub const DARK_THEME_CLASS: &str = "dark-theme";
pub const THEME_ICON_DARK: &str = "☀️";
pub const THEME_ICON_LIGHT: &str = "🌙";
