//! Update function for the template editor component.
//!
//! A single Elm-style `update` receives the `TemplateEditor` state, the
//! `Context` and a `Msg`, applies the message and returns whether the view
//! should re-render.
//!
//! Key behaviors
//! - Section edits go through the `Template` editing operations, which drop
//!   anything that would break the section rules.
//! - Every applied edit compares the md5 fingerprint with the saved one and
//!   publishes the dirty flag.
//! - Header assets: file -> bytes -> base64 -> `AssetRef` on the media header,
//!   viewed in the asset sheet.
//! - Saving writes to the shared `TemplateRepository`; submitting for approval
//!   flips the status to pending right away and reverts it to draft when the
//!   approval service fails.
//! - Outcomes are reported to the user with toasts.

use base64::{engine::general_purpose, Engine as _};
use gloo_file::futures::read_as_bytes;
use log::{debug, error, warn};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ServiceError;
use common::model::section::{AssetRef, ContentSection, SectionPatch};
use common::model::template::{Template, TemplateStatus};
use common::services::{MockTemplateApproval, TemplateApproval, TemplateRepository};

use crate::components::top_sheet::{close_top_sheet, open_top_sheet};

use super::helpers::{set_window_dirty_flag, show_toast, today};
use super::messages::Msg;
use super::state::TemplateEditor;

/// Central update function for the component.
///
/// Contract
/// - Mutates `component` based on `msg`.
/// - May dispatch further messages via `ctx.link()` once async work settles.
/// - Returns `true` to re-render the view, `false` when the message changed
///   nothing visible.
pub fn update(component: &mut TemplateEditor, ctx: &Context<TemplateEditor>, msg: Msg) -> bool {
    let toast_ms = ctx.props().toast_duration_ms;

    match msg {
        Msg::SetTab(tab) => {
            component.active_tab = tab;
            true
        }
        Msg::SetTemplate(template) => {
            component.saved_fingerprint = Some(template.fingerprint());
            component.template = Some(template);
            set_window_dirty_flag(false);
            true
        }
        Msg::Save => {
            let Some(template) = component.template.as_mut() else {
                return false;
            };
            if template.created_at.is_empty() {
                template.created_at = today();
            }
            let template = template.clone();
            let store = ctx.props().store.clone();
            let link = ctx.link().clone();
            component.busy = true;
            spawn_local(async move {
                let fingerprint = template.fingerprint();
                match store.save(template).await {
                    Ok(()) => link.send_message(Msg::Saved(fingerprint)),
                    Err(err) => link.send_message(Msg::ServiceFailed(err)),
                }
            });
            true
        }
        Msg::Saved(fingerprint) => {
            component.busy = false;
            component.saved_fingerprint = Some(fingerprint);
            set_window_dirty_flag(component.is_dirty());
            show_toast("Template saved.", toast_ms);
            true
        }
        Msg::SubmitForApproval => {
            let Some(template) = component.template.as_mut() else {
                return false;
            };
            if template.created_at.is_empty() {
                template.created_at = today();
            }
            template.submit_for_approval();
            let mut submitted = template.clone();
            let store = ctx.props().store.clone();
            let link = ctx.link().clone();
            component.busy = true;
            spawn_local(async move {
                let result = async move {
                    submitted.status = MockTemplateApproval.submit(&submitted).await?;
                    store.save(submitted.clone()).await?;
                    Ok::<_, ServiceError>(submitted)
                }
                .await;
                link.send_message(Msg::ApprovalResolved(result));
            });
            true
        }
        Msg::ApprovalResolved(Ok(template)) => {
            component.busy = false;
            component.saved_fingerprint = Some(template.fingerprint());
            component.template = Some(template);
            set_window_dirty_flag(false);
            show_toast("Template submitted for approval.", toast_ms);
            true
        }
        Msg::ApprovalResolved(Err(err)) => {
            if let Some(template) = component.template.as_mut() {
                template.status = TemplateStatus::Draft;
            }
            update(component, ctx, Msg::ServiceFailed(err))
        }
        Msg::ServiceFailed(err) => {
            error!("template service failed: {err}");
            component.busy = false;
            show_toast(&format!("Could not save the template: {err}"), toast_ms);
            true
        }
        Msg::OpenAssetPicker(section) => {
            component.asset_section = Some(section);
            if let Some(input) = component.asset_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            true
        }
        Msg::AssetSelected(file) => {
            let Some(section) = component.asset_section else {
                return false;
            };
            let file = gloo_file::File::from(file);
            let link = ctx.link().clone();
            spawn_local(async move {
                match read_as_bytes(&file).await {
                    Ok(bytes) => {
                        let asset = AssetRef {
                            id: uuid::Uuid::new_v4().to_string(),
                            file_name: file.name(),
                            mime_type: file.raw_mime_type(),
                            data_base64: general_purpose::STANDARD.encode(&bytes),
                        };
                        link.send_message(Msg::Patch(section, SectionPatch::HeaderAsset(Some(asset))));
                    }
                    Err(err) => error!("could not read {}: {err}", file.name()),
                }
            });
            false
        }
        Msg::ViewAsset(section) => {
            component.asset_section = Some(section);
            open_top_sheet(&component.asset_dialog_ref);
            true
        }
        Msg::CloseAssetDialog => {
            close_top_sheet(&component.asset_dialog_ref);
            true
        }
        edit => {
            let Some(template) = component.template.as_mut() else {
                return false;
            };
            let changed = apply_edit(template, edit, toast_ms);
            if changed {
                set_window_dirty_flag(component.is_dirty());
            }
            changed
        }
    }
}

/// Structural and field edits on the loaded template.
fn apply_edit(template: &mut Template, msg: Msg, toast_ms: u32) -> bool {
    match msg {
        Msg::SetName(name) => {
            template.name = name;
            true
        }
        Msg::SetCategory(category) => {
            template.category = category;
            true
        }
        Msg::SetLanguage(language) => {
            template.language = language;
            true
        }
        Msg::AddSection(kind) => template.add_section(kind),
        Msg::RemoveSection(index) => {
            if matches!(template.sections.get(index), Some(ContentSection::Body { .. })) {
                show_toast("A template needs a body.", toast_ms);
                return false;
            }
            template.remove_section(index).is_some()
        }
        Msg::Patch(index, patch) => template.update_section(index, patch),
        Msg::InsertVariable(index) => {
            let Some(ContentSection::Body { text }) = template.sections.get(index) else {
                return false;
            };
            let Some(next) = template.next_variable() else {
                warn!("body already uses the highest variable number");
                return false;
            };
            let text = format!("{text}{{{{{next}}}}}");
            template.update_section(index, SectionPatch::Text(text))
        }
        Msg::ChangeHeaderFormat(index, kind) => template.change_header_format(index, kind),
        Msg::AddButton(index) => {
            let added = template.add_button(index);
            if !added {
                debug!("button not added to section {index}");
            }
            added
        }
        Msg::RemoveButton(index, button) => template.remove_button(index, button),
        Msg::ChangeButtonType(index, to) => template.change_button_type(index, to),
        _ => false,
    }
}
