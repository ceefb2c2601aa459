//! Template editor: the `Component` impl wires the state, update and view
//! submodules together.
//!
//! On first render the requested template is loaded from the shared store, or
//! a fresh draft is created when there is nothing to load.

use log::info;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::template::Template;
use common::services::TemplateRepository;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::TemplateEditorProps;
pub use state::TemplateEditor;

impl Component for TemplateEditor {
    type Message = Msg;
    type Properties = TemplateEditorProps;

    fn create(_ctx: &Context<Self>) -> Self {
        TemplateEditor::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render || self.loaded {
            return;
        }
        self.loaded = true;

        let props = ctx.props();
        let link = ctx.link().clone();
        match props.template_id.clone() {
            Some(id) => {
                let store = props.store.clone();
                let duration = props.toast_duration_ms;
                spawn_local(async move {
                    match store.get(&id).await {
                        Ok(template) => link.send_message(Msg::SetTemplate(template)),
                        Err(err) => {
                            info!("opening a new draft: {err}");
                            helpers::show_toast("Template not found. A new one was created.", duration);
                            link.send_message(Msg::SetTemplate(Template::new_draft()));
                        }
                    }
                });
            }
            None => link.send_message(Msg::SetTemplate(Template::new_draft())),
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        helpers::set_window_dirty_flag(false);
    }
}
