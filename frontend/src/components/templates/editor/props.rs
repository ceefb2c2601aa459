use yew::prelude::*;

use common::services::InMemoryTemplateStore;

#[derive(Properties, PartialEq, Clone)]
pub struct TemplateEditorProps {
    /// Template to open. `None`, or an id the store does not know, starts a
    /// new draft.
    #[prop_or_default]
    pub template_id: Option<String>,
    pub store: InMemoryTemplateStore,
    pub toast_duration_ms: u32,
    pub on_close: Callback<()>,
}
