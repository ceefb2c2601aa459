use serde::{Deserialize, Serialize};

use crate::model::datasource::ContactFile;

/// Payload handed to the campaign submission service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSubmission {
    pub campaign_name: String,
    pub template_id: String,
    pub contact_file: ContactFile,
}
