use num_format::{Locale, ToFormattedString};
use yew::prelude::*;

use common::model::dashboard::DashboardSummary;
use common::model::template::{Template, TemplateStatus};
use common::services::{mock_campaigns, InMemoryTemplateStore};

use crate::app::Page;
use crate::components::card_grid::CardGrid;
use crate::components::templates::status_class;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub store: InMemoryTemplateStore,
    pub whatsapp_connected: bool,
    pub on_connect: Callback<()>,
    pub on_navigate: Callback<Page>,
}

/// Landing page: connection prompt, analytics, recent templates and quick
/// actions.
pub struct Dashboard {
    summary: DashboardSummary,
}

impl Component for Dashboard {
    type Message = ();
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            summary: DashboardSummary::collect(&ctx.props().store.snapshot(), &mock_campaigns()),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.summary = DashboardSummary::collect(&ctx.props().store.snapshot(), &mock_campaigns());
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let summary = &self.summary;
        let navigate = |page: Page| {
            let on_navigate = props.on_navigate.clone();
            Callback::from(move |_: MouseEvent| on_navigate.emit(page.clone()))
        };

        html! {
            <>
                if !props.whatsapp_connected {
                    <div class="card" style="margin-bottom:24px;">
                        <h3>{"Connect your WhatsApp Business Account"}</h3>
                        <p>{"Connect your WhatsApp Business Account to send messages, create templates, and engage with your customers."}</p>
                        <button class="btn primary" onclick={props.on_connect.reform(|_: MouseEvent| ())}>
                            {"Connect WhatsApp"}
                        </button>
                    </div>
                }

                <h3>{"Analytics"}</h3>
                <CardGrid columns={4}>
                    { stats_card("Messages Sent", summary.sent.to_formatted_string(&Locale::en)) }
                    { stats_card("Delivery Rate", format!("{:.1}%", summary.delivery_rate())) }
                    { stats_card("Read Rate", format!("{:.1}%", summary.read_rate())) }
                    { stats_card("Approved Templates", format!(
                        "{} / {}",
                        summary.templates.get(TemplateStatus::Approved),
                        summary.templates.total()
                    )) }
                </CardGrid>

                <div class="card" style="margin-top:24px;">
                    <div style="display:flex;justify-content:space-between;align-items:center;">
                        <h3>{"Recent Templates"}</h3>
                        <button class="btn" onclick={navigate(Page::Templates)}>{"View all"}</button>
                    </div>
                    <p style="color:#6b7280;font-size:13px;">
                        { for TemplateStatus::all().into_iter().map(|status| html! {
                            <span style="margin-right:12px;">
                                { format!("{}: {}", status.label(), summary.templates.get(status)) }
                            </span>
                        }) }
                    </p>
                    if summary.recent_templates.is_empty() {
                        <p>{"No templates submitted yet."}</p>
                    } else {
                        { for summary.recent_templates.iter().map(template_row) }
                    }
                    <button class="btn" onclick={navigate(Page::Editor(None))}>{"Create new template"}</button>
                </div>

                <h3 style="margin-top:24px;">{"Quick Actions"}</h3>
                <CardGrid columns={2}>
                    <div class="card" style="cursor:pointer;" onclick={navigate(Page::Editor(None))}>
                        <h4>{"Create Template"}</h4>
                        <p>{"Design a new message template for your business communications"}</p>
                    </div>
                    <div class="card" style="cursor:pointer;" onclick={navigate(Page::BulkMessaging)}>
                        <h4>{"Send Bulk Messages"}</h4>
                        <p>{"Upload a CSV and send personalized messages to multiple recipients"}</p>
                    </div>
                </CardGrid>
            </>
        }
    }
}

fn stats_card(title: &'static str, value: String) -> Html {
    html! {
        <div class="card">
            <div style="color:#6b7280;font-size:13px;">{ title }</div>
            <div style="font-size:28px;font-weight:600;">{ value }</div>
        </div>
    }
}

fn template_row(template: &Template) -> Html {
    let verb = match template.status {
        TemplateStatus::Approved => "Approved on",
        TemplateStatus::Rejected => "Rejected on",
        TemplateStatus::Pending | TemplateStatus::Draft => "Submitted on",
    };

    html! {
        <div key={template.id.clone()} style="display:flex;justify-content:space-between;padding:8px 0;border-bottom:1px solid #e5e7eb;">
            <div>
                <div>{ template.name.clone() }</div>
                <div style="color:#6b7280;font-size:12px;">{ format!("{verb} {}", template.created_at) }</div>
            </div>
            <span class={status_class(template.status)}>{ template.status.label() }</span>
        </div>
    }
}
