use common::config::DashboardConfig;
use common::model::campaign::Campaign;
use common::wizard::CampaignDraft;

use crate::services::DelayedCampaignService;

pub struct CampaignWizard {
    pub draft: CampaignDraft,
    /// Why the last transition was refused.
    pub notice: Option<String>,
    pub history: Vec<Campaign>,
    pub service: DelayedCampaignService,
}

impl CampaignWizard {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            draft: CampaignDraft::new(config),
            notice: None,
            history: Vec::new(),
            service: DelayedCampaignService::new(config),
        }
    }
}
