//! Update function for the bulk messaging wizard.
//!
//! Input messages are forwarded to `CampaignDraft`, which owns every
//! transition rule; a refused transition is shown as a notice. Submitting
//! hands the payload to the `CampaignService` on a spawned task and answers
//! with `SubmitFinished`. A successful answer arms a timer that sends
//! `AutoReset` with the same ticket, and the draft decides whether that reset
//! still applies.

use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::services::CampaignService;

use super::messages::Msg;
use super::state::CampaignWizard;

/// Applies `msg` to the wizard.
///
/// # Returns
/// `true` when the view should re-render.
pub fn update(wizard: &mut CampaignWizard, ctx: &Context<CampaignWizard>, msg: Msg) -> bool {
    let draft = &mut wizard.draft;
    match msg {
        Msg::SetName(name) => {
            draft.set_campaign_name(name);
            wizard.notice = None;
        }
        Msg::SelectTemplate(id) => {
            draft.select_template(Some(id));
            wizard.notice = None;
        }
        Msg::FileLoaded(file) => {
            draft.attach_file(file);
            wizard.notice = None;
        }
        Msg::ClearFile => draft.clear_file(),
        Msg::Next => wizard.notice = draft.advance().err().map(|err| err.to_string()),
        Msg::Back => {
            draft.back();
            wizard.notice = None;
        }
        Msg::JumpTo(step) => wizard.notice = draft.jump_to(step).err().map(|err| err.to_string()),
        Msg::Submit => match draft.begin_submit() {
            Ok((ticket, submission)) => {
                wizard.notice = None;
                let service = wizard.service.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = service.submit(&submission).await;
                    link.send_message(Msg::SubmitFinished(ticket, result));
                });
            }
            Err(err) => wizard.notice = Some(err.to_string()),
        },
        Msg::SubmitFinished(ticket, result) => {
            let succeeded = result.is_ok();
            if !draft.finish_submit(ticket, result) {
                return false;
            }
            if succeeded {
                let delay = ctx.props().config.reset_delay_ms;
                let link = ctx.link().clone();
                spawn_local(async move {
                    TimeoutFuture::new(delay).await;
                    link.send_message(Msg::AutoReset(ticket));
                });
            }
        }
        Msg::AutoReset(ticket) => return draft.auto_reset(ticket),
        Msg::HistoryLoaded(campaigns) => wizard.history = campaigns,
    }
    true
}
