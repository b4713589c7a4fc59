use std::time::Duration;

use page_logging::{page_debug, page_error, page_info};
use predictor_core::{Effect, Msg};
use predictor_store::{save_draft, save_theme, LocalStore};

/// Page-level consequence of an effect that the store cannot absorb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Focus { name: String },
    CancelNavigation,
    Navigate { values: Vec<(String, String)> },
    Schedule { after: Duration, msg: Msg },
}

/// Executes effects against the local store and hands the rest back to the page.
pub struct EffectRunner<S> {
    store: S,
}

impl<S: LocalStore> EffectRunner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<PageAction> {
        let mut actions = Vec::new();
        for effect in effects {
            match effect {
                Effect::SaveDraft(draft) => {
                    if let Err(err) = save_draft(&mut self.store, &draft) {
                        page_error!("Failed to save form draft: {}", err);
                    } else {
                        page_debug!("Saved form draft with {} fields", draft.len());
                    }
                }
                Effect::SaveTheme(theme) => {
                    if let Err(err) = save_theme(&mut self.store, theme) {
                        page_error!("Failed to save theme {}: {}", theme, err);
                    }
                }
                Effect::FocusField { name } => actions.push(PageAction::Focus { name }),
                Effect::CancelSubmit => actions.push(PageAction::CancelNavigation),
                Effect::ProceedSubmit { values } => {
                    page_info!("Submitting {} fields", values.len());
                    actions.push(PageAction::Navigate { values });
                }
                Effect::ScheduleBannerDismiss { banner_id, after } => {
                    actions.push(PageAction::Schedule {
                        after,
                        msg: Msg::BannerExpired { banner_id },
                    });
                }
            }
        }
        actions
    }
}
