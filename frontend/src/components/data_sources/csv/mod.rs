//! Contact list picker for the upload step.
//!
//! Reads the chosen file as text in the browser and hands a [`ContactFile`]
//! to the parent; parsing happens in the wizard draft.

use gloo_file::futures::read_as_text;
use log::{debug, error};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::datasource::ContactFile;

#[derive(Properties, PartialEq)]
pub struct CsvDataSourceProps {
    /// File currently attached to the draft.
    #[prop_or_default]
    pub file: Option<ContactFile>,
    pub on_file: Callback<ContactFile>,
    pub on_clear: Callback<()>,
}

pub enum Msg {
    OpenPicker,
    FileSelected(web_sys::File),
    ReadFailed(String),
}

pub struct CsvDataSourceComponent {
    input_ref: NodeRef,
    error: Option<String>,
}

impl Component for CsvDataSourceComponent {
    type Message = Msg;
    type Properties = CsvDataSourceProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            input_ref: NodeRef::default(),
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::OpenPicker => {
                if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                    input.click();
                }
                false
            }
            Msg::FileSelected(file) => {
                self.error = None;
                let file = gloo_file::File::from(file);
                let on_file = ctx.props().on_file.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match read_as_text(&file).await {
                        Ok(text) => {
                            debug!("read {} ({} bytes)", file.name(), file.size());
                            let mut contact_file = ContactFile::new(file.name(), text);
                            contact_file.size_bytes = file.size();
                            on_file.emit(contact_file);
                        }
                        Err(err) => {
                            error!("could not read {}: {err}", file.name());
                            link.send_message(Msg::ReadFailed(err.to_string()));
                        }
                    }
                });
                true
            }
            Msg::ReadFailed(reason) => {
                self.error = Some(reason);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let onchange = link.batch_callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            input.set_value("");
            file.map(Msg::FileSelected)
        });

        html! {
            <div class="card">
                <input
                    ref={self.input_ref.clone()}
                    type="file"
                    accept=".csv"
                    style="display:none;"
                    {onchange}
                />
                {
                    match &props.file {
                        Some(file) => {
                            let on_clear = props.on_clear.reform(|_: MouseEvent| ());
                            html! {
                                <div style="display:flex;align-items:center;gap:12px;">
                                    <i class="material-icons">{"table_chart"}</i>
                                    <span>{ format!("{} ({} KB)", file.name, file.size_kb()) }</span>
                                    <button class="btn danger" onclick={on_clear}>{"Remove"}</button>
                                </div>
                            }
                        }
                        None => html! {
                            <button class="btn" onclick={link.callback(|_| Msg::OpenPicker)}>
                                <i class="material-icons">{"upload_file"}</i>
                                <span>{" Upload a CSV file"}</span>
                            </button>
                        },
                    }
                }
                <ul class="issues">
                    <li>{"The first column must contain phone numbers with country code (e.g. +1234567890)"}</li>
                    <li>{"The first row must contain column headers"}</li>
                    <li>{"Additional columns should match the variables in your template ({{1}}, {{2}}, etc.)"}</li>
                </ul>
                {
                    match &self.error {
                        Some(reason) => html! { <p class="notice">{ format!("Could not read the file: {reason}") }</p> },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}
