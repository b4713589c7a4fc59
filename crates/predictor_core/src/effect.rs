use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the draft to the local store.
    SaveDraft(crate::DraftSnapshot),
    /// Write the theme flag to the local store.
    SaveTheme(crate::Theme),
    /// Scroll to and focus a control.
    FocusField { name: String },
    /// Prevent the form's default navigation.
    CancelSubmit,
    /// Let the form navigate, posting `(name, value)` pairs in page order.
    ProceedSubmit { values: Vec<(String, String)> },
    /// Send `Msg::BannerExpired { banner_id }` back after `after`.
    ScheduleBannerDismiss { banner_id: u64, after: Duration },
}
