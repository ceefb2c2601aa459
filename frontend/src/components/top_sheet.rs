use log::warn;
use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

/// Overlay panel toggled through its `show` class.
pub struct TopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

const SHOW_CLASS: &str = "show";

pub fn open_top_sheet(sheet_ref: &NodeRef) {
    if let Some(sheet) = sheet_ref.cast::<web_sys::HtmlElement>() {
        if let Err(err) = sheet.class_list().add_1(SHOW_CLASS) {
            warn!("could not open sheet: {err:?}");
        }
    }
}

pub fn close_top_sheet(sheet_ref: &NodeRef) {
    if let Some(sheet) = sheet_ref.cast::<web_sys::HtmlElement>() {
        if let Err(err) = sheet.class_list().remove_1(SHOW_CLASS) {
            warn!("could not close sheet: {err:?}");
        }
    }
}
