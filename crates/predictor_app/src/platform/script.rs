use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// A user interaction with the page, as recorded in an event script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum DomEvent {
    Input { name: String, value: String },
    Change { name: String, value: String },
    Focus { name: String },
    Blur { name: String },
    Submit,
    ToggleTheme,
    /// Let page timers run for `ms` milliseconds.
    Wait { ms: u64 },
}

/// Reads a RON list of events, e.g.
/// `[Input(name: "gender", value: "female"), Blur(name: "gender"), Submit]`.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<DomEvent>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read event script {}", path.display()))?;
    parse_script(&content).with_context(|| format!("invalid event script {}", path.display()))
}

pub fn parse_script(content: &str) -> anyhow::Result<Vec<DomEvent>> {
    Ok(ron::from_str(content)?)
}
