use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use page_logging::{page_debug, page_info, page_warn};
use predictor_core::{update, FormState, Msg, RegistryError, PREDICTION_FIELD_NAMES};
use predictor_store::{load_draft, load_theme, FileStore, LocalStore, MemoryStore, DRAFT_KEY};

use super::effects::{EffectRunner, PageAction};
use super::logging::{self, LogDestination};
use super::script::{load_script, DomEvent};
use super::ui;
use super::ui::document::Document;

/// Command-line options of the page runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub script: PathBuf,
    pub store_dir: Option<PathBuf>,
    pub log: LogDestination,
}

/// Replays an event script against a freshly loaded prediction page and
/// prints the resulting document.
pub fn run_app(options: RunOptions) -> anyhow::Result<()> {
    logging::initialize(options.log);

    let events = load_script(&options.script)?;
    let store: Box<dyn LocalStore> = match &options.store_dir {
        Some(dir) => Box::new(FileStore::open(dir.clone())?),
        None => Box::new(MemoryStore::new()),
    };

    let mut page = FormPage::load(ui::layout::prediction_page(), store)?;
    for event in events {
        page.handle_event(event);
    }

    let doc = page.document();
    println!("{doc}");
    let progress = page.state().progress();
    println!("{} of {} required fields filled", progress.filled, progress.total);
    if let Some((_, label)) = doc.progress() {
        println!("progress: {label}");
    }
    if let Some(submit) = doc.submit() {
        let state = if submit.disabled { "disabled" } else { "enabled" };
        println!("submit: {} ({state})", submit.label);
    }
    if let Some(banner) = doc.banner() {
        println!("banner: {banner}");
    }
    if let Some(name) = doc.focused() {
        println!("focused: {name}");
    }
    if let Ok(Some(draft)) = page.store().get(DRAFT_KEY) {
        page_debug!("Stored draft: {}", draft);
    }
    match page.outcome() {
        PageOutcome::Open => println!("page still open"),
        PageOutcome::Navigated { values } => {
            println!("navigated to {}", ui::constants::FORM_ACTION);
            for (name, value) in values {
                println!("  {name}={value}");
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageOutcome {
    #[default]
    Open,
    /// The form submitted and the browser left the page.
    Navigated { values: Vec<(String, String)> },
}

struct Timer {
    due: Duration,
    msg: Msg,
}

/// One prediction form for the lifetime of a page view.
pub struct FormPage<D, S> {
    state: FormState,
    document: D,
    effects: EffectRunner<S>,
    inbox: VecDeque<Msg>,
    event_seq: u64,
    clock: Duration,
    timers: Vec<Timer>,
    outcome: PageOutcome,
}

impl<D: Document, S: LocalStore> FormPage<D, S> {
    /// Builds the registry from the document, restores theme and draft from
    /// the store and renders the initial state.
    pub fn load(document: D, store: S) -> Result<Self, RegistryError> {
        let specs = ui::layout::field_specs(&document, &PREDICTION_FIELD_NAMES);
        let state = FormState::new(specs)?;

        let mut inbox = VecDeque::new();
        // Values already in the markup (e.g. a re-rendered form) come first.
        for spec in state.field_specs() {
            if let Some(value) = document.control_value(&spec.name) {
                inbox.push_back(Msg::FieldInput {
                    name: spec.name.clone(),
                    value,
                });
            }
        }
        if let Some(theme) = load_theme(&store) {
            inbox.push_back(Msg::RestoreTheme(theme));
        }
        if let Some(draft) = load_draft(&store) {
            inbox.push_back(Msg::RestoreDraft(draft));
        }

        let mut page = Self {
            state,
            document,
            effects: EffectRunner::new(store),
            inbox,
            event_seq: 0,
            clock: Duration::ZERO,
            timers: Vec::new(),
            outcome: PageOutcome::Open,
        };
        page.process_pending_messages();
        // First paint happens even when nothing was restored.
        ui::render::render(&mut page.document, &page.state.view());
        page_info!(
            "Prediction page loaded with {} tracked fields",
            page.state.field_specs().count()
        );
        Ok(page)
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn store(&self) -> &S {
        self.effects.store()
    }

    pub fn outcome(&self) -> &PageOutcome {
        &self.outcome
    }

    pub fn handle_event(&mut self, event: DomEvent) {
        if self.outcome != PageOutcome::Open {
            page_warn!("Ignoring {:?}; the page has navigated away", event);
            return;
        }

        let msg = match event {
            DomEvent::Input { name, value } => {
                self.document.set_control_value(&name, &value);
                Msg::FieldInput { name, value }
            }
            DomEvent::Change { name, value } => {
                self.document.set_control_value(&name, &value);
                Msg::FieldChanged { name, value }
            }
            DomEvent::Focus { name } => {
                self.document.focus_control(&name);
                Msg::FieldFocused { name }
            }
            DomEvent::Blur { name } => Msg::FieldBlurred { name },
            DomEvent::Submit => Msg::SubmitRequested,
            DomEvent::ToggleTheme => Msg::ThemeToggled,
            DomEvent::Wait { ms } => {
                self.advance(Duration::from_millis(ms));
                return;
            }
        };

        self.inbox.push_back(msg);
        self.process_pending_messages();
    }

    /// Moves the page clock forward and fires every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
        self.timers.sort_by_key(|timer| timer.due);
        let due_count = self
            .timers
            .iter()
            .take_while(|timer| timer.due <= self.clock)
            .count();
        for timer in self.timers.drain(..due_count) {
            self.inbox.push_back(timer.msg);
        }
        self.process_pending_messages();
    }

    fn process_pending_messages(&mut self) {
        while let Some(msg) = self.inbox.pop_front() {
            if self.outcome != PageOutcome::Open {
                break;
            }
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        self.event_seq += 1;
        page_logging::set_event_seq(self.event_seq);
        page_debug!("Dispatching {:?}", msg);

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        let actions = self.effects.run(effects);
        if was_dirty {
            ui::render::render(&mut self.document, &self.state.view());
        }
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: PageAction) {
        match action {
            PageAction::Focus { name } => self.document.focus_control(&name),
            PageAction::CancelNavigation => page_debug!("Submit cancelled"),
            PageAction::Navigate { values } => {
                // Leaving the page drops every pending timer.
                self.timers.clear();
                self.inbox.clear();
                self.outcome = PageOutcome::Navigated { values };
            }
            PageAction::Schedule { after, msg } => self.timers.push(Timer {
                due: self.clock + after,
                msg,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ui::document::{HeadlessDocument, Node};
    use crate::platform::ui::layout::prediction_page;
    use pretty_assertions::assert_eq;
    use predictor_core::{SubmissionPhase, Theme};
    use predictor_store::{save_draft, save_theme, THEME_KEY};
    use std::sync::Once;
    use tempfile::TempDir;

    fn init_logging() {
        static INIT: Once = Once::new();
        INIT.call_once(page_logging::initialize_for_tests);
    }

    fn input(name: &str, value: &str) -> DomEvent {
        DomEvent::Input {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn change(name: &str, value: &str) -> DomEvent {
        DomEvent::Change {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn fresh_page() -> FormPage<HeadlessDocument, MemoryStore> {
        FormPage::load(prediction_page(), MemoryStore::new()).unwrap()
    }

    fn fill_all(page: &mut FormPage<HeadlessDocument, MemoryStore>, writing: &str) {
        for (name, value) in [
            ("gender", "female"),
            ("ethnicity", "group C"),
            ("parental_level_of_education", "high school"),
            ("lunch", "standard"),
            ("test_preparation_course", "completed"),
            ("reading_score", "68"),
            ("writing_score", writing),
        ] {
            page.handle_event(change(name, value));
        }
    }

    #[test]
    fn initial_render_locks_submit() {
        init_logging();
        let page = fresh_page();
        let doc = page.document();

        assert_eq!(doc.progress(), Some(("0%", "0% Complete")));
        let submit = doc.submit().unwrap();
        assert!(submit.disabled);
        assert_eq!(submit.label, "Complete all fields first");
        assert!(doc.step_classes(0).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_submit_is_cancelled_and_banner_expires() {
        init_logging();
        let mut page = fresh_page();
        fill_all(&mut page, "150");
        assert!(!page.document().submit().unwrap().disabled);

        page.handle_event(DomEvent::Submit);
        assert_eq!(page.outcome(), &PageOutcome::Open);
        let doc = page.document();
        assert_eq!(
            doc.banner(),
            Some("Please fix the errors above before submitting.")
        );
        assert_eq!(doc.focused(), Some("writing_score"));
        assert_eq!(
            doc.next_sibling("writing_score"),
            Some(&Node::FieldError {
                field: "writing_score".to_string(),
                message: "Score must be between 0 and 100".to_string(),
            })
        );

        page.handle_event(DomEvent::Wait { ms: 4999 });
        assert!(page.document().banner().is_some());
        page.handle_event(DomEvent::Wait { ms: 1 });
        assert_eq!(page.document().banner(), None);
    }

    #[test]
    fn valid_submit_navigates_and_ignores_later_events() {
        init_logging();
        let mut page = fresh_page();
        fill_all(&mut page, "72");
        page.handle_event(DomEvent::Submit);

        let PageOutcome::Navigated { values } = page.outcome().clone() else {
            panic!("expected navigation");
        };
        assert_eq!(values.len(), PREDICTION_FIELD_NAMES.len());
        assert_eq!(values[6], ("writing_score".to_string(), "72".to_string()));
        assert_eq!(page.state().phase(), SubmissionPhase::Processing);

        let submit = page.document().submit().unwrap().clone();
        assert!(submit.disabled);
        assert_eq!(submit.label, "Predicting...");
        assert_eq!(submit.opacity.as_deref(), Some("0.7"));

        page.handle_event(input("gender", "male"));
        assert_eq!(page.state().field_value("gender"), Some("female"));
    }

    #[test]
    fn change_events_autosave_and_draft_restores_on_reload() {
        init_logging();
        let temp = TempDir::new().unwrap();
        {
            let store = FileStore::open(temp.path()).unwrap();
            let mut page = FormPage::load(prediction_page(), store).unwrap();
            page.handle_event(change("gender", "male"));
            page.handle_event(change("reading_score", "91"));
            page.handle_event(input("writing_score", "not saved until change"));
            assert!(page.store().get(DRAFT_KEY).unwrap().is_some());
        }

        let store = FileStore::open(temp.path()).unwrap();
        let page = FormPage::load(prediction_page(), store).unwrap();
        let doc = page.document();
        assert_eq!(doc.control("gender").unwrap().value, "male");
        assert_eq!(doc.control("reading_score").unwrap().value, "91");
        assert_eq!(doc.control("writing_score").unwrap().value, "");
        assert_eq!(page.state().progress().filled, 2);
    }

    #[test]
    fn stored_theme_is_applied_and_toggle_persists() {
        init_logging();
        let mut store = MemoryStore::new();
        save_theme(&mut store, Theme::Dark).unwrap();
        let mut page = FormPage::load(prediction_page(), store).unwrap();
        assert!(page.document().body_has_class("dark-theme"));
        assert_eq!(page.document().theme_icon(), "☀️");

        page.handle_event(DomEvent::ToggleTheme);
        assert!(!page.document().body_has_class("dark-theme"));
        assert_eq!(page.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn focus_hides_error_until_next_blur() {
        init_logging();
        let mut page = fresh_page();
        page.handle_event(input("reading_score", "abc"));
        page.handle_event(DomEvent::Blur {
            name: "reading_score".to_string(),
        });
        assert_eq!(
            page.document().field_error("reading_score"),
            Some("Please enter a valid number")
        );

        page.handle_event(DomEvent::Focus {
            name: "reading_score".to_string(),
        });
        assert_eq!(page.document().field_error("reading_score"), None);
        assert!(page
            .document()
            .control("reading_score")
            .unwrap()
            .classes
            .contains("is-invalid"));
    }

    #[test]
    fn blurring_an_empty_field_shows_message_without_marker() {
        init_logging();
        let mut page = fresh_page();
        page.handle_event(DomEvent::Blur {
            name: "lunch".to_string(),
        });
        let doc = page.document();
        assert_eq!(doc.field_error("lunch"), Some("This field is required"));
        let classes = &doc.control("lunch").unwrap().classes;
        assert!(!classes.contains("is-invalid"));
        assert!(!classes.contains("is-valid"));
    }

    #[test]
    fn page_missing_a_required_control_never_submits() {
        init_logging();
        let mut doc = prediction_page();
        doc.remove_control("writing_score");
        let mut page = FormPage::load(doc, MemoryStore::new()).unwrap();
        for (name, value) in [
            ("gender", "female"),
            ("ethnicity", "group C"),
            ("parental_level_of_education", "high school"),
            ("lunch", "standard"),
            ("test_preparation_course", "completed"),
            ("reading_score", "68"),
        ] {
            page.handle_event(change(name, value));
        }

        let doc = page.document();
        assert_eq!(doc.progress(), Some(("85.71428571428571%", "86% Complete")));
        let submit = doc.submit().unwrap();
        assert!(submit.disabled);
        assert_eq!(submit.label, "Complete all fields first");

        page.handle_event(DomEvent::Submit);
        assert_eq!(page.outcome(), &PageOutcome::Open);
        assert_eq!(page.state().phase(), SubmissionPhase::Editing);
        assert_eq!(
            page.document().banner(),
            Some("Please fix the errors above before submitting.")
        );
    }

    #[test]
    fn draft_with_empty_values_does_not_clear_markup_values() {
        init_logging();
        let mut doc = prediction_page();
        doc.set_control_value("gender", "female");
        let mut store = MemoryStore::new();
        let draft = [("gender", ""), ("lunch", "free/reduced")].into_iter().collect();
        save_draft(&mut store, &draft).unwrap();

        let page = FormPage::load(doc, store).unwrap();
        assert_eq!(page.state().field_value("gender"), Some("female"));
        assert_eq!(page.state().field_value("lunch"), Some("free/reduced"));
        assert_eq!(page.document().progress().unwrap().1, "29% Complete");
    }
}
