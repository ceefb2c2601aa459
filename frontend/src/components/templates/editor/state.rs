use yew::prelude::*;

use common::model::template::Template;
use common::model::validation::{validate, ValidationIssue};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Editor,
    Preview,
}

pub struct TemplateEditor {
    /// `None` until the first render has loaded or created the draft.
    pub template: Option<Template>,
    pub active_tab: Tab,
    /// Fingerprint at the last load or save.
    pub saved_fingerprint: Option<String>,
    pub loaded: bool,
    /// Request in flight (save or approval).
    pub busy: bool,
    pub asset_input_ref: NodeRef,
    pub asset_dialog_ref: NodeRef,
    /// Header section the asset picker or dialog works on.
    pub asset_section: Option<usize>,
}

impl TemplateEditor {
    pub fn new() -> Self {
        Self {
            template: None,
            active_tab: Tab::Editor,
            saved_fingerprint: None,
            loaded: false,
            busy: false,
            asset_input_ref: NodeRef::default(),
            asset_dialog_ref: NodeRef::default(),
            asset_section: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match (&self.template, &self.saved_fingerprint) {
            (Some(template), Some(saved)) => &template.fingerprint() != saved,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        self.template.as_ref().map(validate).unwrap_or_default()
    }
}
