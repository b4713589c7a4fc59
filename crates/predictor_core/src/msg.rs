#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User typed into a control (fires per keystroke).
    FieldInput { name: String, value: String },
    /// User committed a control value (select picked, input left after edit).
    FieldChanged { name: String, value: String },
    /// A control lost focus; validate it.
    FieldBlurred { name: String },
    /// A control gained focus; hide its error message.
    FieldFocused { name: String },
    /// The form's submit event fired.
    SubmitRequested,
    /// User clicked the theme toggle.
    ThemeToggled,
    /// Theme flag read from the local store at page load.
    RestoreTheme(crate::Theme),
    /// Draft read from the local store at page load.
    RestoreDraft(crate::DraftSnapshot),
    /// Auto-dismiss timer for the error banner elapsed.
    BannerExpired { banner_id: u64 },
    /// Fallback for placeholder wiring.
    NoOp,
}
