use crate::state::{BANNER_TIMEOUT, SUBMIT_ERROR_BANNER};
use crate::{Effect, FormState, Msg, SubmissionPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldInput { name, value } => {
            state.set_value(&name, value);
            Vec::new()
        }
        Msg::FieldChanged { name, value } => {
            if state.set_value(&name, value) {
                vec![Effect::SaveDraft(state.draft_snapshot())]
            } else {
                Vec::new()
            }
        }
        Msg::FieldBlurred { name } => {
            state.validate_field(&name);
            Vec::new()
        }
        Msg::FieldFocused { name } => {
            state.hide_error(&name);
            Vec::new()
        }
        Msg::SubmitRequested => submit(&mut state),
        Msg::ThemeToggled => {
            let theme = state.theme().toggled();
            state.set_theme(theme);
            vec![Effect::SaveTheme(theme)]
        }
        Msg::RestoreTheme(theme) => {
            state.set_theme(theme);
            Vec::new()
        }
        Msg::RestoreDraft(draft) => {
            for (name, value) in draft.iter() {
                if !value.is_empty() && state.is_registered(name) {
                    state.set_value(name, value.to_string());
                }
            }
            Vec::new()
        }
        Msg::BannerExpired { banner_id } => {
            state.dismiss_banner(banner_id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut FormState) -> Vec<Effect> {
    // The navigation is already under way; a second submit would post twice.
    if state.phase() == SubmissionPhase::Processing {
        return vec![Effect::CancelSubmit];
    }

    match state.validate_form() {
        Some(first_invalid) => {
            let banner_id = state.show_banner(SUBMIT_ERROR_BANNER);
            vec![
                Effect::CancelSubmit,
                Effect::FocusField {
                    name: first_invalid,
                },
                Effect::ScheduleBannerDismiss {
                    banner_id,
                    after: BANNER_TIMEOUT,
                },
            ]
        }
        None => {
            state.begin_processing();
            vec![Effect::ProceedSubmit {
                values: state.form_values(),
            }]
        }
    }
}
