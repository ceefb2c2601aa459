use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use common::model::csv::CsvPreview;
use common::model::template::{Template, TemplateFilter};
use common::submission::SubmitStatus;
use common::wizard::{CampaignDraft, WizardStep};

use crate::components::campaigns::history::CampaignHistory;
use crate::components::card_grid::CardGrid;
use crate::components::data_sources::csv::CsvDataSourceComponent;

use super::messages::Msg;
use super::state::CampaignWizard;

pub fn view(wizard: &CampaignWizard, ctx: &Context<CampaignWizard>) -> Html {
    let link = ctx.link();
    let draft = &wizard.draft;
    let templates = TemplateFilter::approved()
        .apply(&ctx.props().store.snapshot())
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();

    let content = match draft.step() {
        WizardStep::Template => template_step(link, draft, &templates),
        WizardStep::Upload => upload_step(link, draft),
        WizardStep::Review => review_step(draft, &templates),
    };

    html! {
        <div>
            <h1>{"Bulk Messaging"}</h1>
            <p>{"Send template messages to multiple contacts at once"}</p>
            <div class="card">
                { step_indicator(link, draft) }
                { content }
                if let Some(notice) = &wizard.notice {
                    <p class="notice">{ notice.clone() }</p>
                }
                { status_banner(draft.submit_status()) }
                { navigation(link, draft) }
            </div>
            <CampaignHistory campaigns={wizard.history.clone()} />
        </div>
    }
}

fn step_indicator(link: &Scope<CampaignWizard>, draft: &CampaignDraft) -> Html {
    html! {
        <div class="steps">
            { for WizardStep::all().into_iter().map(|step| {
                let class = classes!(
                    "step",
                    (step == draft.step()).then_some("active"),
                    (!draft.can_enter(step)).then_some("locked"),
                );
                html! {
                    <div {class} onclick={link.callback(move |_| Msg::JumpTo(step))}>
                        { format!("{}. {}", step.index() + 1, step.label()) }
                    </div>
                }
            }) }
        </div>
    }
}

fn template_step(link: &Scope<CampaignWizard>, draft: &CampaignDraft, templates: &[Template]) -> Html {
    html! {
        <div>
            <label>
                {"Campaign Name"}
                <input
                    type="text"
                    placeholder="e.g. May 2025 Promotion"
                    value={draft.campaign_name().to_string()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetName(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
            <h3>{"Select a Template"}</h3>
            <CardGrid columns={3}>
                { for templates.iter().map(|template| {
                    let id = template.id.clone();
                    let selected = draft.selected_template_id() == Some(template.id.as_str());
                    html! {
                        <div
                            key={template.id.clone()}
                            class={classes!("card", selected.then_some("selected"))}
                            style="cursor:pointer;"
                            onclick={link.callback(move |_| Msg::SelectTemplate(id.clone()))}
                        >
                            <strong>{ template.name.clone() }</strong>
                            <span class="badge approved" style="margin-left:8px;">{ template.status.label() }</span>
                            <p style="font-size:12px;color:#6b7280;">{ template.category.label() }</p>
                        </div>
                    }
                }) }
            </CardGrid>
        </div>
    }
}

fn upload_step(link: &Scope<CampaignWizard>, draft: &CampaignDraft) -> Html {
    html! {
        <div>
            <h3>{"Upload Contact List"}</h3>
            <p>{"Upload a CSV file with phone numbers and variables for your template"}</p>
            <CsvDataSourceComponent
                file={draft.contact_file().cloned()}
                on_file={link.callback(Msg::FileLoaded)}
                on_clear={link.callback(|_| Msg::ClearFile)}
            />
            if !draft.preview().is_empty() {
                <h4>{"Preview"}</h4>
                { preview_table(draft.preview()) }
            }
        </div>
    }
}

fn review_step(draft: &CampaignDraft, templates: &[Template]) -> Html {
    let preview = draft.preview();
    let template = draft
        .selected_template_id()
        .and_then(|id| templates.iter().find(|t| t.id == id));
    let file = draft.contact_file();

    let columns = preview.infer_columns();
    let issues = preview.inspect();
    let variable_mismatch = template.and_then(|t| {
        let expected = t.variable_count();
        let provided = columns.len().saturating_sub(1);
        (provided < expected).then(|| {
            format!("The template uses {expected} variables but the file only has {provided} extra columns")
        })
    });

    html! {
        <div>
            <h3>{"Review Campaign"}</h3>
            <dl>
                <dt>{"Campaign Name"}</dt>
                <dd>{ draft.campaign_name().to_string() }</dd>
                <dt>{"Template"}</dt>
                <dd>{ template.map(|t| t.name.clone()).unwrap_or_default() }</dd>
                <dt>{"Contact List"}</dt>
                <dd>{ file.map(|f| format!("{} ({} KB)", f.name, f.size_kb())).unwrap_or_default() }</dd>
                <dt>{"Estimated Recipients"}</dt>
                <dd>{ preview.estimated_recipients() }</dd>
            </dl>
            if !columns.is_empty() {
                <p style="font-size:13px;">
                    { columns.iter().map(|c| format!("{}: {}", c.title, c.placeholder_type.label())).collect::<Vec<_>>().join(" · ") }
                </p>
            }
            { preview_table(preview) }
            if !issues.is_empty() || variable_mismatch.is_some() {
                <ul class="issues">
                    { for issues.iter().map(|issue| html! { <li>{ issue.to_string() }</li> }) }
                    if let Some(mismatch) = variable_mismatch {
                        <li>{ mismatch }</li>
                    }
                </ul>
            }
        </div>
    }
}

fn preview_table(preview: &CsvPreview) -> Html {
    let Some(header) = preview.header() else {
        return html! {};
    };
    html! {
        <table class="preview">
            <thead>
                <tr>{ for header.iter().map(|cell| html! { <th>{ cell.clone() }</th> }) }</tr>
            </thead>
            <tbody>
                { for preview.data_rows().iter().map(|row| html! {
                    <tr>{ for row.iter().map(|cell| html! { <td>{ cell.clone() }</td> }) }</tr>
                }) }
            </tbody>
        </table>
    }
}

fn status_banner(status: &SubmitStatus) -> Html {
    match status {
        SubmitStatus::Idle => html! {},
        SubmitStatus::Loading => html! { <p>{"Sending campaign..."}</p> },
        SubmitStatus::Success => html! {
            <p class="badge approved">{"Campaign submitted successfully! Your messages are being sent."}</p>
        },
        SubmitStatus::Error(reason) => html! {
            <p class="notice">{ format!("There was an error submitting your campaign: {reason}") }</p>
        },
    }
}

fn navigation(link: &Scope<CampaignWizard>, draft: &CampaignDraft) -> Html {
    let loading = draft.submit_status().is_loading();
    let done = draft.submit_status() == &SubmitStatus::Success;

    html! {
        <div style="display:flex;justify-content:space-between;margin-top:16px;">
            <button
                class="btn"
                disabled={draft.step() == WizardStep::Template || loading}
                onclick={link.callback(|_| Msg::Back)}
            >
                {"Back"}
            </button>
            if draft.step() == WizardStep::Review {
                <button
                    class="btn primary"
                    disabled={loading || done}
                    onclick={link.callback(|_| Msg::Submit)}
                >
                    { if loading { "Sending..." } else { "Send Campaign" } }
                </button>
            } else {
                <button class="btn primary" onclick={link.callback(|_| Msg::Next)}>
                    {"Next"}
                </button>
            }
        </div>
    }
}
