//! Bulk messaging wizard: template, contact list, review.
//!
//! All transition rules live in [`common::wizard::CampaignDraft`]; this
//! component only forwards user input and runs the submission and the reset
//! timer.

use log::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::config::DashboardConfig;
use common::services::{CampaignService, InMemoryTemplateStore};

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::CampaignWizard;

#[derive(Properties, PartialEq, Clone)]
pub struct CampaignWizardProps {
    pub store: InMemoryTemplateStore,
    pub config: DashboardConfig,
}

impl Component for CampaignWizard {
    type Message = Msg;
    type Properties = CampaignWizardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let wizard = CampaignWizard::new(&ctx.props().config);

        let service = wizard.service.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match service.history().await {
                Ok(campaigns) => link.send_message(Msg::HistoryLoaded(campaigns)),
                Err(err) => error!("could not load campaign history: {err}"),
            }
        });

        wizard
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
