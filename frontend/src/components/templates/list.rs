use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use common::model::template::{Template, TemplateCategory, TemplateFilter, TemplateStatus};
use common::services::InMemoryTemplateStore;

use crate::components::card_grid::CardGrid;
use crate::components::templates::status_class;

#[derive(Properties, PartialEq)]
pub struct TemplateListProps {
    pub store: InMemoryTemplateStore,
    /// `None` opens the editor on a new draft.
    pub on_edit: Callback<Option<String>>,
}

pub enum Msg {
    SetSearch(String),
    SetStatus(Option<TemplateStatus>),
    SetCategory(Option<TemplateCategory>),
}

pub struct TemplateList {
    filter: TemplateFilter,
}

impl Component for TemplateList {
    type Message = Msg;
    type Properties = TemplateListProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            filter: TemplateFilter::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetSearch(search) => self.filter.search = search,
            Msg::SetStatus(status) => self.filter.status = status,
            Msg::SetCategory(category) => self.filter.category = category,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let templates = props.store.snapshot();
        let visible = self.filter.apply(&templates);

        let on_new = props.on_edit.reform(|_: MouseEvent| None);

        html! {
            <div>
                <div style="display:flex;align-items:center;justify-content:space-between;">
                    <div>
                        <h1>{"Templates"}</h1>
                        <p>{"Create and manage your WhatsApp message templates"}</p>
                    </div>
                    <button class="btn primary" onclick={on_new}>{"Create Template"}</button>
                </div>

                <div style="display:flex;gap:12px;">
                    <input
                        type="search"
                        placeholder="Search templates"
                        value={self.filter.search.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::SetSearch(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                    <select onchange={link.callback(|e: Event| {
                        let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                        Msg::SetStatus(TemplateStatus::from_code(&value))
                    })}>
                        <option value="all" selected={self.filter.status.is_none()}>{"All Status"}</option>
                        { for TemplateStatus::all().into_iter().map(|status| html! {
                            <option value={status.code()} selected={self.filter.status == Some(status)}>
                                { status.label() }
                            </option>
                        }) }
                    </select>
                    <select onchange={link.callback(|e: Event| {
                        let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                        Msg::SetCategory(TemplateCategory::from_code(&value))
                    })}>
                        <option value="all" selected={self.filter.category.is_none()}>{"All Categories"}</option>
                        { for TemplateCategory::all().into_iter().map(|category| html! {
                            <option value={category.code()} selected={self.filter.category == Some(category)}>
                                { category.label() }
                            </option>
                        }) }
                    </select>
                </div>

                {
                    if visible.is_empty() {
                        html! { <p>{"No templates match your filters."}</p> }
                    } else {
                        html! {
                            <CardGrid columns={3}>
                                { for visible.into_iter().map(|template| template_card(template, &props.on_edit)) }
                            </CardGrid>
                        }
                    }
                }
            </div>
        }
    }
}

fn template_card(template: &Template, on_edit: &Callback<Option<String>>) -> Html {
    let id = template.id.clone();
    let onclick = on_edit.reform(move |_: MouseEvent| Some(id.clone()));
    let variables = template.variable_count();

    html! {
        <div class="card" key={template.id.clone()}>
            <div style="display:flex;justify-content:space-between;">
                <strong>{ template.name.clone() }</strong>
                <span class={status_class(template.status)}>{ template.status.label() }</span>
            </div>
            <p style="font-size:12px;color:#6b7280;">
                { format!("{} · {} · {}", template.category.label(), template.language.label(), template.created_at) }
            </p>
            <p style="font-size:13px;">{ template.body_text().unwrap_or_default().to_string() }</p>
            <div style="display:flex;justify-content:space-between;align-items:center;">
                <span style="font-size:12px;">
                    { match variables {
                        0 => "No variables".to_string(),
                        1 => "1 variable".to_string(),
                        n => format!("{n} variables"),
                    } }
                </span>
                <button class="btn" {onclick}>{"Edit"}</button>
            </div>
        </div>
    }
}
