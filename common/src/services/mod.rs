//! Collaborators the dashboard talks to.
//!
//! Everything behind these traits is mocked in this crate; the frontend swaps
//! in browser-backed versions where it has them. The async traits are meant
//! for a single-threaded executor and carry no `Send` bounds.

mod auth;
mod in_memory;

pub use auth::AuthSession;
pub use in_memory::{
    InMemorySessionStore, InMemoryTemplateStore, MockCampaignService, MockTemplateApproval,
    mock_campaigns, mock_templates,
};

use crate::error::ServiceError;
use crate::model::campaign::Campaign;
use crate::model::template::{Template, TemplateStatus};
use crate::model::user::User;
use crate::requests::CampaignSubmission;

/// Persists the signed-in user across reloads.
pub trait SessionStore {
    fn load(&self) -> Option<User>;
    fn save(&self, user: &User) -> Result<(), ServiceError>;
    fn clear(&self);
}

#[allow(async_fn_in_trait)]
pub trait TemplateRepository {
    async fn get(&self, id: &str) -> Result<Template, ServiceError>;
    /// Inserts or replaces by id.
    async fn save(&self, template: Template) -> Result<(), ServiceError>;
    async fn list(&self) -> Result<Vec<Template>, ServiceError>;
}

#[allow(async_fn_in_trait)]
pub trait TemplateApproval {
    /// Hands a template to the provider and returns the status it reports.
    async fn submit(&self, template: &Template) -> Result<TemplateStatus, ServiceError>;
}

#[allow(async_fn_in_trait)]
pub trait CampaignService {
    async fn submit(&self, submission: &CampaignSubmission) -> Result<(), ServiceError>;
    async fn history(&self) -> Result<Vec<Campaign>, ServiceError>;
}
