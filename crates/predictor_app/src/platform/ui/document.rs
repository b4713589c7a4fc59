//! The page's document: what the form engine reads from and writes to.
//!
//! `Document` is the DOM contract. `HeadlessDocument` is an in-memory page
//! that keeps form children in order, so "the error element directly after
//! its control" is an observable property rather than a styling detail.

use std::collections::BTreeSet;
use std::fmt;

use predictor_core::{SubmitView, Theme, ValidityMarker};

use super::constants::{
    BANNER_CLASS, BANNER_ICON, CONTROL_CLASS, DARK_THEME_CLASS, FIELD_ERROR_CLASS, FORM_ACTION,
    FORM_ID, THEME_ICON_DARK, THEME_ICON_LIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    Number,
    Select,
}

/// Attributes of a control as declared in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlAttributes {
    pub control_type: ControlType,
    pub required: bool,
    pub min: Option<String>,
    pub max: Option<String>,
}

pub trait Document {
    fn control_attributes(&self, name: &str) -> Option<ControlAttributes>;
    fn control_value(&self, name: &str) -> Option<String>;
    fn set_control_value(&mut self, name: &str, value: &str);
    fn set_validity_marker(&mut self, name: &str, marker: Option<ValidityMarker>);
    /// Inserts, replaces or removes the error element following `name`.
    fn set_field_error(&mut self, name: &str, message: Option<&str>);
    fn set_progress(&mut self, width: &str, label: &str);
    fn set_step_class(&mut self, index: usize, class: Option<&str>);
    fn set_submit(&mut self, submit: SubmitView);
    fn set_banner(&mut self, message: Option<&str>);
    fn focus_control(&mut self, name: &str);
    fn set_theme(&mut self, theme: Theme);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub name: String,
    pub attributes: ControlAttributes,
    pub options: Vec<String>,
    pub value: String,
    pub classes: BTreeSet<String>,
}

impl Control {
    pub fn new(name: &str, attributes: ControlAttributes) -> Self {
        Self {
            name: name.to_string(),
            attributes,
            options: Vec::new(),
            value: String::new(),
            classes: BTreeSet::from([CONTROL_CLASS.to_string()]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub class: String,
    pub icon: String,
    pub label: String,
    pub opacity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Control(Control),
    FieldError { field: String, message: String },
    Banner { message: String },
    Progress { width: String, label: String },
    Submit(SubmitButton),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadlessDocument {
    nodes: Vec<Node>,
    steps: Vec<BTreeSet<String>>,
    body_classes: BTreeSet<String>,
    theme_icon: String,
    focused: Option<String>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self {
            theme_icon: THEME_ICON_LIGHT.to_string(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn add_steps(&mut self, count: usize) {
        self.steps.extend((0..count).map(|_| BTreeSet::new()));
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.control_position(name).and_then(|at| match &self.nodes[at] {
            Node::Control(control) => Some(control),
            _ => None,
        })
    }

    pub fn banner(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::Banner { message } => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn progress(&self) -> Option<(&str, &str)> {
        self.nodes.iter().find_map(|node| match node {
            Node::Progress { width, label } => Some((width.as_str(), label.as_str())),
            _ => None,
        })
    }

    pub fn submit(&self) -> Option<&SubmitButton> {
        self.nodes.iter().find_map(|node| match node {
            Node::Submit(button) => Some(button),
            _ => None,
        })
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    fn control_position(&self, name: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| matches!(node, Node::Control(control) if control.name == name))
    }

    fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.nodes.iter_mut().find_map(|node| match node {
            Node::Control(control) if control.name == name => Some(control),
            _ => None,
        })
    }
}

#[cfg(test)]
impl HeadlessDocument {
    pub fn remove_control(&mut self, name: &str) {
        self.nodes
            .retain(|node| !matches!(node, Node::Control(control) if control.name == name));
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node directly after the control called `name`.
    pub fn next_sibling(&self, name: &str) -> Option<&Node> {
        self.control_position(name)
            .and_then(|at| self.nodes.get(at + 1))
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::FieldError { field, message } if field == name => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn step_classes(&self, index: usize) -> Option<&BTreeSet<String>> {
        self.steps.get(index)
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn theme_icon(&self) -> &str {
        &self.theme_icon
    }
}

impl Document for HeadlessDocument {
    fn control_attributes(&self, name: &str) -> Option<ControlAttributes> {
        self.control(name).map(|control| control.attributes.clone())
    }

    fn control_value(&self, name: &str) -> Option<String> {
        self.control(name).map(|control| control.value.clone())
    }

    fn set_control_value(&mut self, name: &str, value: &str) {
        if let Some(control) = self.control_mut(name) {
            if control.value != value {
                control.value = value.to_string();
            }
        }
    }

    fn set_validity_marker(&mut self, name: &str, marker: Option<ValidityMarker>) {
        if let Some(control) = self.control_mut(name) {
            control.classes.remove(ValidityMarker::Valid.css_class());
            control.classes.remove(ValidityMarker::Invalid.css_class());
            if let Some(marker) = marker {
                control.classes.insert(marker.css_class().to_string());
            }
        }
    }

    fn set_field_error(&mut self, name: &str, message: Option<&str>) {
        self.nodes
            .retain(|node| !matches!(node, Node::FieldError { field, .. } if field == name));
        let (Some(message), Some(at)) = (message, self.control_position(name)) else {
            return;
        };
        self.nodes.insert(
            at + 1,
            Node::FieldError {
                field: name.to_string(),
                message: message.to_string(),
            },
        );
    }

    fn set_progress(&mut self, new_width: &str, new_label: &str) {
        for node in &mut self.nodes {
            if let Node::Progress { width, label } = node {
                *width = new_width.to_string();
                *label = new_label.to_string();
            }
        }
    }

    fn set_step_class(&mut self, index: usize, class: Option<&str>) {
        if let Some(classes) = self.steps.get_mut(index) {
            classes.clear();
            if let Some(class) = class {
                classes.insert(class.to_string());
            }
        }
    }

    fn set_submit(&mut self, submit: SubmitView) {
        for node in &mut self.nodes {
            if let Node::Submit(button) = node {
                button.disabled = submit.disabled();
                button.class = submit.button_class().to_string();
                button.icon = submit.icon_class().to_string();
                button.label = submit.label().to_string();
                button.opacity = submit.opacity().map(str::to_string);
            }
        }
    }

    fn set_banner(&mut self, message: Option<&str>) {
        self.nodes.retain(|node| !matches!(node, Node::Banner { .. }));
        let Some(message) = message else {
            return;
        };
        let banner = Node::Banner {
            message: message.to_string(),
        };
        // The banner sits right before the submit control.
        match self
            .nodes
            .iter()
            .position(|node| matches!(node, Node::Submit(_)))
        {
            Some(at) => self.nodes.insert(at, banner),
            None => self.nodes.push(banner),
        }
    }

    fn focus_control(&mut self, name: &str) {
        if self.control_position(name).is_some() {
            self.focused = Some(name.to_string());
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        match theme {
            Theme::Dark => {
                self.body_classes.insert(DARK_THEME_CLASS.to_string());
                self.theme_icon = THEME_ICON_DARK.to_string();
            }
            Theme::Light => {
                self.body_classes.remove(DARK_THEME_CLASS);
                self.theme_icon = THEME_ICON_LIGHT.to_string();
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn class_list(classes: &BTreeSet<String>) -> String {
    classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for HeadlessDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<body class="{}">"#, class_list(&self.body_classes))?;
        writeln!(f, r#"  <button class="theme-toggle">{}</button>"#, self.theme_icon)?;
        if !self.steps.is_empty() {
            writeln!(f, r#"  <div class="steps">"#)?;
            for classes in &self.steps {
                let mut all = BTreeSet::from(["step".to_string()]);
                all.extend(classes.iter().cloned());
                writeln!(f, r#"    <div class="{}"></div>"#, class_list(&all))?;
            }
            writeln!(f, "  </div>")?;
        }
        writeln!(
            f,
            r#"  <form id="{FORM_ID}" action="{FORM_ACTION}" method="post">"#
        )?;
        for node in &self.nodes {
            match node {
                Node::Control(control) => {
                    let focus = if self.focused.as_deref() == Some(control.name.as_str()) {
                        " autofocus"
                    } else {
                        ""
                    };
                    let required = if control.attributes.required {
                        " required"
                    } else {
                        ""
                    };
                    let tag = match control.attributes.control_type {
                        ControlType::Select => "select",
                        ControlType::Number => "input",
                    };
                    let options = if control.options.is_empty() {
                        String::new()
                    } else {
                        format!(r#" options="{}""#, escape(&control.options.join("|")))
                    };
                    writeln!(
                        f,
                        r#"    <{tag} name="{}" class="{}" value="{}"{options}{required}{focus}>"#,
                        control.name,
                        class_list(&control.classes),
                        escape(&control.value),
                    )?;
                }
                Node::FieldError { message, .. } => {
                    writeln!(
                        f,
                        r#"    <div class="{FIELD_ERROR_CLASS}">{}</div>"#,
                        escape(message)
                    )?;
                }
                Node::Banner { message } => {
                    writeln!(
                        f,
                        r#"    <div class="{BANNER_CLASS}"><i class="{BANNER_ICON}"></i> {}</div>"#,
                        escape(message)
                    )?;
                }
                Node::Progress { width, label } => {
                    writeln!(
                        f,
                        r#"    <div class="progress-fill" style="width: {width}"></div><small>{}</small>"#,
                        escape(label)
                    )?;
                }
                Node::Submit(button) => {
                    let disabled = if button.disabled { " disabled" } else { "" };
                    let style = button
                        .opacity
                        .as_deref()
                        .map(|opacity| format!(r#" style="opacity: {opacity}""#))
                        .unwrap_or_default();
                    writeln!(
                        f,
                        r#"    <button type="submit" class="{}"{disabled}{style}><i class="{}"></i> {}</button>"#,
                        button.class,
                        button.icon,
                        escape(&button.label),
                    )?;
                }
            }
        }
        writeln!(f, "  </form>")?;
        write!(f, "</body>")
    }
}
