//! View for the template editor.
//!
//! Left column: metadata, one card per section, advisory issues. The preview
//! tab renders the template as a WhatsApp bubble.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use common::model::section::{
    ButtonGroup, ButtonType, ContentSection, HeaderFormat, HeaderFormatKind, SectionKind,
    SectionPatch, UrlKind,
};
use common::model::template::{Language, Template, TemplateCategory};
use common::model::validation::{BODY_MAX, BUTTON_TEXT_MAX, FOOTER_MAX, HEADER_TEXT_MAX};

use crate::components::templates::status_class;
use crate::components::top_sheet::TopSheet;

use super::helpers::whatsapp_to_html;
use super::messages::Msg;
use super::state::{Tab, TemplateEditor};

pub fn view(component: &TemplateEditor, ctx: &Context<TemplateEditor>) -> Html {
    let link = ctx.link();
    let Some(template) = &component.template else {
        return html! { <p>{"Loading template..."}</p> };
    };

    html! {
        <div class="template-editor">
            { build_toolbar(component, ctx, template) }
            { build_metadata(link, template) }
            { build_tab_bar(component, link) }
            {
                match component.active_tab {
                    Tab::Editor => build_editor_tab(component, link, template),
                    Tab::Preview => build_preview(template),
                }
            }
            { asset_input(component, link, template) }
            { asset_dialog(component, link, template) }
        </div>
    }
}

fn build_toolbar(component: &TemplateEditor, ctx: &Context<TemplateEditor>, template: &Template) -> Html {
    let link = ctx.link();
    let on_close = ctx.props().on_close.reform(|_: MouseEvent| ());
    html! {
        <div style="display:flex;align-items:center;gap:8px;margin-bottom:12px;">
            <button class="btn" onclick={on_close}>{"← Templates"}</button>
            <h1 style="flex:1;">{"Template Editor"}</h1>
            <span class={status_class(template.status)}>{ template.status.label() }</span>
            <button class="btn" disabled={component.busy} onclick={link.callback(|_| Msg::Save)}>
                {"Save"}
            </button>
            <button class="btn primary" disabled={component.busy} onclick={link.callback(|_| Msg::SubmitForApproval)}>
                {"Submit for approval"}
            </button>
        </div>
    }
}

fn build_metadata(link: &Scope<TemplateEditor>, template: &Template) -> Html {
    html! {
        <div class="card" style="display:grid;grid-template-columns:2fr 1fr 1fr;gap:12px;">
            <label>
                {"Template Name"}
                <input
                    type="text"
                    placeholder="e.g. order_confirmation"
                    value={template.name.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetName(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
            <label>
                {"Category"}
                <select onchange={link.batch_callback(|e: Event| {
                    let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                    TemplateCategory::from_code(&value).map(Msg::SetCategory)
                })}>
                    { for TemplateCategory::all().into_iter().map(|category| html! {
                        <option value={category.code()} selected={template.category == category}>
                            { category.label() }
                        </option>
                    }) }
                </select>
            </label>
            <label>
                {"Language"}
                <select onchange={link.batch_callback(|e: Event| {
                    let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                    Language::from_code(&value).map(Msg::SetLanguage)
                })}>
                    { for Language::all().into_iter().map(|language| html! {
                        <option value={language.code()} selected={template.language == language}>
                            { language.label() }
                        </option>
                    }) }
                </select>
            </label>
        </div>
    }
}

/// Editor / Preview tabs, with a red dot while there are unsaved edits.
fn build_tab_bar(component: &TemplateEditor, link: &Scope<TemplateEditor>) -> Html {
    let tab = |target: Tab, label: &'static str, dot: bool| {
        html! {
            <button
                class={classes!("tab-btn", (component.active_tab == target).then_some("active"))}
                onclick={link.callback(move |_| Msg::SetTab(target))}
                style="position: relative;"
            >
                { label }
                if dot {
                    <span
                        title="Unsaved changes"
                        style="position:absolute;top:4px;right:2px;width:8px;height:8px;background:#e53935;border-radius:50%;"
                    />
                }
            </button>
        }
    };

    html! {
        <div class="tab-bar">
            { tab(Tab::Editor, "Editor", component.is_dirty()) }
            { tab(Tab::Preview, "Preview", false) }
        </div>
    }
}

fn build_editor_tab(component: &TemplateEditor, link: &Scope<TemplateEditor>, template: &Template) -> Html {
    let missing: Vec<SectionKind> = SectionKind::all()
        .into_iter()
        .filter(|kind| !template.has_section(*kind))
        .collect();
    let issues = component.issues();

    html! {
        <div>
            { for template.sections.iter().enumerate().map(|(index, section)| section_card(link, index, section)) }

            if !missing.is_empty() {
                <div style="display:flex;gap:8px;margin:12px 0;">
                    { for missing.into_iter().map(|kind| html! {
                        <button class="btn" onclick={link.callback(move |_| Msg::AddSection(kind))}>
                            { format!("+ {}", kind.label()) }
                        </button>
                    }) }
                </div>
            }

            if !issues.is_empty() {
                <ul class="issues">
                    { for issues.iter().map(|issue| html! { <li>{ issue.to_string() }</li> }) }
                </ul>
            }
        </div>
    }
}

fn section_card(link: &Scope<TemplateEditor>, index: usize, section: &ContentSection) -> Html {
    let kind = section.kind();
    let body = match section {
        ContentSection::Header { format } => header_editor(link, index, format),
        ContentSection::Body { text } => html! {
            <>
                { text_editor(link, index, text, BODY_MAX, 6) }
                <button class="btn" onclick={link.callback(move |_| Msg::InsertVariable(index))}>
                    {"+ Add variable"}
                </button>
            </>
        },
        ContentSection::Footer { text } => text_editor(link, index, text, FOOTER_MAX, 1),
        ContentSection::Buttons { group } => buttons_editor(link, index, group),
    };

    html! {
        <div class="card" style="margin-bottom:12px;">
            <div style="display:flex;justify-content:space-between;align-items:center;">
                <strong>{ kind.label() }</strong>
                if kind != SectionKind::Body {
                    <button class="btn danger" onclick={link.callback(move |_| Msg::RemoveSection(index))}>
                        <i class="material-icons">{"delete"}</i>
                    </button>
                }
            </div>
            { body }
        </div>
    }
}

fn counter(len: usize, max: usize) -> Html {
    let style = if len > max { "color:#b91c1c;font-size:12px;" } else { "color:#6b7280;font-size:12px;" };
    html! { <span style={style}>{ format!("{len}/{max}") }</span> }
}

fn text_editor(link: &Scope<TemplateEditor>, index: usize, text: &str, max: usize, rows: u32) -> Html {
    html! {
        <div>
            <textarea
                rows={rows.to_string()}
                style="width:100%;"
                value={text.to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                    Msg::Patch(index, SectionPatch::Text(value))
                })}
            />
            { counter(text.chars().count(), max) }
        </div>
    }
}

fn header_editor(link: &Scope<TemplateEditor>, index: usize, format: &HeaderFormat) -> Html {
    let current = format.kind();
    let selector = html! {
        <select onchange={link.batch_callback(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            HeaderFormatKind::from_code(&value).map(|kind| Msg::ChangeHeaderFormat(index, kind))
        })}>
            { for HeaderFormatKind::all().into_iter().map(|kind| html! {
                <option value={kind.code()} selected={kind == current}>{ kind.label() }</option>
            }) }
        </select>
    };

    let details = match format {
        HeaderFormat::None => html! {},
        HeaderFormat::Text { text } => html! {
            <div>
                <input
                    type="text"
                    style="width:100%;"
                    value={text.clone()}
                    oninput={link.callback(move |e: InputEvent| {
                        let value = e.target_unchecked_into::<HtmlInputElement>().value();
                        Msg::Patch(index, SectionPatch::Text(value))
                    })}
                />
                { counter(text.chars().count(), HEADER_TEXT_MAX) }
            </div>
        },
        HeaderFormat::Image(media) | HeaderFormat::Video(media) | HeaderFormat::Document(media) => html! {
            <div style="display:flex;flex-direction:column;gap:6px;">
                <div style="display:flex;gap:8px;align-items:center;">
                    <button class="btn" onclick={link.callback(move |_| Msg::OpenAssetPicker(index))}>
                        {"Upload sample"}
                    </button>
                    {
                        match &media.asset {
                            Some(asset) => html! {
                                <a href="#" onclick={link.callback(move |e: MouseEvent| {
                                    e.prevent_default();
                                    Msg::ViewAsset(index)
                                })}>{ asset.file_name.clone() }</a>
                            },
                            None => html! { <span>{"No file selected"}</span> },
                        }
                    }
                </div>
                <input
                    type="url"
                    placeholder="Example media URL"
                    value={media.example.clone()}
                    oninput={link.callback(move |e: InputEvent| {
                        let value = e.target_unchecked_into::<HtmlInputElement>().value();
                        Msg::Patch(index, SectionPatch::HeaderExample(value))
                    })}
                />
            </div>
        },
    };

    html! {
        <div style="display:flex;flex-direction:column;gap:8px;">
            { selector }
            { details }
        </div>
    }
}

fn buttons_editor(link: &Scope<TemplateEditor>, index: usize, group: &ButtonGroup) -> Html {
    let current = group.button_type();
    let selector = html! {
        <select onchange={link.batch_callback(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            ButtonType::from_code(&value).map(|to| Msg::ChangeButtonType(index, to))
        })}>
            { for [ButtonType::QuickReply, ButtonType::Url].into_iter().map(|kind| html! {
                <option value={kind.code()} selected={kind == current}>{ kind.label() }</option>
            }) }
        </select>
    };

    let rows = match group {
        ButtonGroup::QuickReply(buttons) => buttons
            .iter()
            .enumerate()
            .map(|(button, b)| button_row(link, index, button, &b.text, None))
            .collect::<Html>(),
        ButtonGroup::Url(buttons) => buttons
            .iter()
            .enumerate()
            .map(|(button, b)| button_row(link, index, button, &b.text, Some((b.url.as_str(), b.url_kind))))
            .collect::<Html>(),
    };

    html! {
        <div style="display:flex;flex-direction:column;gap:8px;">
            { selector }
            { rows }
            <button
                class="btn"
                disabled={group.is_full()}
                onclick={link.callback(move |_| Msg::AddButton(index))}
            >
                {"+ Add button"}
            </button>
        </div>
    }
}

fn button_row(
    link: &Scope<TemplateEditor>,
    index: usize,
    button: usize,
    text: &str,
    url: Option<(&str, UrlKind)>,
) -> Html {
    let url_fields = match url {
        Some((url, kind)) => html! {
            <>
                <input
                    type="url"
                    placeholder="https://example.com"
                    value={url.to_string()}
                    oninput={link.callback(move |e: InputEvent| {
                        let url = e.target_unchecked_into::<HtmlInputElement>().value();
                        Msg::Patch(index, SectionPatch::ButtonUrl { index: button, url })
                    })}
                />
                <select onchange={link.callback(move |e: Event| {
                    let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                    let kind = if value == "dynamic" { UrlKind::Dynamic } else { UrlKind::Static };
                    Msg::Patch(index, SectionPatch::ButtonUrlKind { index: button, kind })
                })}>
                    <option value="static" selected={kind == UrlKind::Static}>{"Static"}</option>
                    <option value="dynamic" selected={kind == UrlKind::Dynamic}>{"Dynamic"}</option>
                </select>
            </>
        },
        None => html! {},
    };

    html! {
        <div style="display:flex;gap:6px;align-items:center;">
            <input
                type="text"
                placeholder="Button text"
                value={text.to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    let text = e.target_unchecked_into::<HtmlInputElement>().value();
                    Msg::Patch(index, SectionPatch::ButtonText { index: button, text })
                })}
            />
            { counter(text.chars().count(), BUTTON_TEXT_MAX) }
            { url_fields }
            <button class="btn danger" onclick={link.callback(move |_| Msg::RemoveButton(index, button))}>
                <i class="material-icons">{"close"}</i>
            </button>
        </div>
    }
}

/// WhatsApp-style rendering of the whole template.
fn build_preview(template: &Template) -> Html {
    let parts = template.sections.iter().map(|section| match section {
        ContentSection::Header { format } => preview_header(format),
        ContentSection::Body { text } => {
            Html::from_html_unchecked(AttrValue::from(whatsapp_to_html(text)))
        }
        ContentSection::Footer { text } => html! { <p class="footer">{ text.clone() }</p> },
        ContentSection::Buttons { group } => html! {
            <div class="buttons">
                { for group.texts().into_iter().map(|text| html! { <button>{ text.to_string() }</button> }) }
            </div>
        },
    });

    html! {
        <div class="bubble">{ for parts }</div>
    }
}

fn preview_header(format: &HeaderFormat) -> Html {
    match format {
        HeaderFormat::None => html! {},
        HeaderFormat::Text { text } => html! { <strong>{ text.clone() }</strong> },
        HeaderFormat::Image(media) => match &media.asset {
            Some(asset) => html! { <img src={asset.data_url()} style="max-width:100%;border-radius:6px;" /> },
            None => html! { <i class="material-icons">{"image"}</i> },
        },
        HeaderFormat::Video(media) => match &media.asset {
            Some(asset) => html! { <video src={asset.data_url()} controls={true} style="max-width:100%;" /> },
            None => html! { <i class="material-icons">{"movie"}</i> },
        },
        HeaderFormat::Document(media) => html! {
            <div>
                <i class="material-icons">{"description"}</i>
                { media.asset.as_ref().map(|a| a.file_name.clone()).unwrap_or_default() }
            </div>
        },
    }
}

/// Hidden file input shared by every header section.
fn asset_input(component: &TemplateEditor, link: &Scope<TemplateEditor>, template: &Template) -> Html {
    let accept = component
        .asset_section
        .and_then(|index| match template.sections.get(index) {
            Some(ContentSection::Header { format }) => format.kind().accept(),
            _ => None,
        })
        .unwrap_or("*/*");

    html! {
        <input
            ref={component.asset_input_ref.clone()}
            type="file"
            accept={accept}
            style="display:none;"
            onchange={link.batch_callback(|e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let file = input.files().and_then(|files| files.get(0));
                input.set_value("");
                file.map(Msg::AssetSelected)
            })}
        />
    }
}

fn asset_dialog(component: &TemplateEditor, link: &Scope<TemplateEditor>, template: &Template) -> Html {
    let selected = component.asset_section.and_then(|index| match template.sections.get(index) {
        Some(ContentSection::Header { format }) => {
            format.media().and_then(|m| m.asset.clone()).map(|asset| (index, asset))
        }
        _ => None,
    });

    html! {
        <TopSheet node_ref={component.asset_dialog_ref.clone()}>
            <div style="position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.85);z-index:9999;display:flex;flex-direction:column;align-items:center;justify-content:center;">
                <button
                    onclick={link.callback(|_| Msg::CloseAssetDialog)}
                    style="position:absolute;top:24px;right:32px;padding:0.5rem 1rem;font-size:1.5rem;background:#fff;border:none;border-radius:4px;cursor:pointer;"
                >
                    { "✕" }
                </button>
                {
                    match selected {
                        Some((index, asset)) => html! {
                            <>
                                if asset.mime_type.starts_with("image/") {
                                    <img src={asset.data_url()} style="max-width:400px;max-height:400px;margin-bottom:24px;" />
                                } else {
                                    <span style="color:#fff;margin-bottom:24px;">{ asset.file_name.clone() }</span>
                                }
                                <button
                                    class="btn danger"
                                    onclick={link.batch_callback(move |_| vec![
                                        Msg::Patch(index, SectionPatch::HeaderAsset(None)),
                                        Msg::CloseAssetDialog,
                                    ])}
                                >
                                    {"Remove"}
                                </button>
                            </>
                        },
                        None => html! { <span style="color:#fff;">{"No file selected"}</span> },
                    }
                }
            </div>
        </TopSheet>
    }
}
