use page_logging::{page_info, page_warn};
use predictor_core::{DraftSnapshot, Theme};

use crate::{LocalStore, StoreError};

/// Key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";
/// Key holding the JSON-encoded form draft.
pub const DRAFT_KEY: &str = "prediction_form_draft";

/// Reads the theme flag. Read failures fall back to no preference.
pub fn load_theme(store: &impl LocalStore) -> Option<Theme> {
    match store.get(THEME_KEY) {
        Ok(flag) => flag.map(|flag| Theme::from_flag(&flag)),
        Err(err) => {
            page_warn!("Failed to read theme flag: {}", err);
            None
        }
    }
}

pub fn save_theme(store: &mut impl LocalStore, theme: Theme) -> Result<(), StoreError> {
    store.set(THEME_KEY, theme.as_str())
}

/// Reads the saved draft. A missing, unreadable or malformed draft is `None`.
pub fn load_draft(store: &impl LocalStore) -> Option<DraftSnapshot> {
    let raw = match store.get(DRAFT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            page_warn!("Failed to read form draft: {}", err);
            return None;
        }
    };

    match decode_draft(&raw) {
        Ok(draft) => {
            page_info!("Loaded form draft with {} fields", draft.len());
            Some(draft)
        }
        Err(err) => {
            page_warn!("Discarding malformed form draft: {}", err);
            None
        }
    }
}

/// Parses a stored draft. Anything but a JSON object of strings is rejected.
pub fn decode_draft(raw: &str) -> Result<DraftSnapshot, StoreError> {
    serde_json::from_str(raw).map_err(|err| StoreError::Decode(err.to_string()))
}

pub fn save_draft(store: &mut impl LocalStore, draft: &DraftSnapshot) -> Result<(), StoreError> {
    let encoded =
        serde_json::to_string(draft).map_err(|err| StoreError::Encode(err.to_string()))?;
    store.set(DRAFT_KEY, &encoded)
}
