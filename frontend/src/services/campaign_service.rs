use common::config::DashboardConfig;
use common::error::ServiceError;
use common::model::campaign::Campaign;
use common::requests::CampaignSubmission;
use common::services::{CampaignService, MockCampaignService};
use gloo_timers::future::TimeoutFuture;
use log::warn;

/// Mock submission endpoint that answers after the configured latency and
/// dumps the payload to the console.
#[derive(Clone)]
pub struct DelayedCampaignService {
    delay_ms: u32,
    inner: MockCampaignService,
}

impl DelayedCampaignService {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            delay_ms: config.submit_delay_ms,
            inner: MockCampaignService::default(),
        }
    }
}

impl CampaignService for DelayedCampaignService {
    async fn submit(&self, submission: &CampaignSubmission) -> Result<(), ServiceError> {
        TimeoutFuture::new(self.delay_ms).await;
        match serde_json::to_string_pretty(submission) {
            Ok(payload) => gloo_console::log!(payload),
            Err(err) => warn!("could not serialize submission: {err}"),
        }
        self.inner.submit(submission).await
    }

    async fn history(&self) -> Result<Vec<Campaign>, ServiceError> {
        self.inner.history().await
    }
}
