use num_format::{Locale, ToFormattedString};
use yew::prelude::*;

use common::model::campaign::{Campaign, CampaignState};

#[derive(Properties, PartialEq)]
pub struct CampaignHistoryProps {
    pub campaigns: Vec<Campaign>,
}

/// Table of past bulk sends with delivery and read rates.
pub struct CampaignHistory;

impl Component for CampaignHistory {
    type Message = ();
    type Properties = CampaignHistoryProps;

    fn create(_ctx: &Context<Self>) -> Self {
        CampaignHistory
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let campaigns = &ctx.props().campaigns;
        if campaigns.is_empty() {
            return html! { <p>{"No campaigns yet."}</p> };
        }

        html! {
            <div class="card" style="margin-top:24px;">
                <h2>{"Recent Campaigns"}</h2>
                <table class="preview">
                    <thead>
                        <tr>
                            <th>{"Campaign"}</th>
                            <th>{"Template"}</th>
                            <th>{"Sent"}</th>
                            <th>{"Delivered"}</th>
                            <th>{"Read"}</th>
                            <th>{"Failed"}</th>
                            <th>{"Status"}</th>
                            <th>{"Date"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for campaigns.iter().map(campaign_row) }
                    </tbody>
                </table>
            </div>
        }
    }
}

fn campaign_row(campaign: &Campaign) -> Html {
    let badge = match campaign.state {
        CampaignState::Completed => "badge approved",
        CampaignState::InProgress | CampaignState::Scheduled => "badge pending",
        CampaignState::Failed => "badge rejected",
    };

    html! {
        <tr key={campaign.id.clone()}>
            <td>{ campaign.name.clone() }</td>
            <td>{ campaign.template.clone() }</td>
            <td>{ campaign.sent.to_formatted_string(&Locale::en) }</td>
            <td>
                { campaign.delivered.to_formatted_string(&Locale::en) }
                <span style="color:#6b7280;">{ format!(" ({:.1}%)", campaign.delivery_rate()) }</span>
            </td>
            <td>
                { campaign.read.to_formatted_string(&Locale::en) }
                <span style="color:#6b7280;">{ format!(" ({:.1}%)", campaign.read_rate()) }</span>
            </td>
            <td>{ campaign.failed.to_formatted_string(&Locale::en) }</td>
            <td><span class={badge}>{ campaign.state.label() }</span></td>
            <td>{ campaign.created_at.clone() }</td>
        </tr>
    }
}
