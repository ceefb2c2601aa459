use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::error::ServiceError;
use crate::model::campaign::{Campaign, CampaignState};
use crate::model::section::ContentSection;
use crate::model::template::{Language, Template, TemplateCategory, TemplateStatus};
use crate::model::user::User;
use crate::requests::CampaignSubmission;
use crate::services::{CampaignService, SessionStore, TemplateApproval, TemplateRepository};

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    user: Rc<RefCell<Option<User>>>,
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    fn save(&self, user: &User) -> Result<(), ServiceError> {
        *self.user.borrow_mut() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) {
        self.user.borrow_mut().take();
    }
}

/// Template list shared by the list screen, the editor and the wizard.
///
/// Clones share the same backing vector.
#[derive(Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: Rc<RefCell<Vec<Template>>>,
}

impl PartialEq for InMemoryTemplateStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.templates, &other.templates)
    }
}

impl InMemoryTemplateStore {
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            templates: Rc::new(RefCell::new(templates)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(mock_templates())
    }

    /// Synchronous read used while rendering.
    pub fn snapshot(&self) -> Vec<Template> {
        self.templates.borrow().clone()
    }
}

impl TemplateRepository for InMemoryTemplateStore {
    async fn get(&self, id: &str) -> Result<Template, ServiceError> {
        self.templates
            .borrow()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("template {id}")))
    }

    async fn save(&self, template: Template) -> Result<(), ServiceError> {
        let mut templates = self.templates.borrow_mut();
        match templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => {
                debug!("storing new template {}", template.id);
                templates.push(template);
            }
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Template>, ServiceError> {
        Ok(self.snapshot())
    }
}

/// Accepts every template for review.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct MockTemplateApproval;

impl TemplateApproval for MockTemplateApproval {
    async fn submit(&self, template: &Template) -> Result<TemplateStatus, ServiceError> {
        info!("template {} sent for approval", template.id);
        Ok(TemplateStatus::Pending)
    }
}

/// Records submissions instead of sending anything. Set `failure` to make
/// every submission fail with that error.
#[derive(Clone, Default)]
pub struct MockCampaignService {
    pub failure: Option<ServiceError>,
    submitted: Rc<RefCell<Vec<CampaignSubmission>>>,
}

impl MockCampaignService {
    pub fn failing(error: ServiceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn submitted(&self) -> Vec<CampaignSubmission> {
        self.submitted.borrow().clone()
    }
}

impl CampaignService for MockCampaignService {
    async fn submit(&self, submission: &CampaignSubmission) -> Result<(), ServiceError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.submitted.borrow_mut().push(submission.clone());
        Ok(())
    }

    async fn history(&self) -> Result<Vec<Campaign>, ServiceError> {
        Ok(mock_campaigns())
    }
}

fn seed(
    id: &str,
    name: &str,
    category: TemplateCategory,
    status: TemplateStatus,
    created_at: &str,
    body: &str,
) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        category,
        language: Language::English,
        status,
        created_at: created_at.to_string(),
        sections: vec![ContentSection::Body {
            text: body.to_string(),
        }],
    }
}

/// Templates the dashboard starts with.
pub fn mock_templates() -> Vec<Template> {
    use TemplateCategory::{Marketing, Utility};
    use TemplateStatus::{Approved, Pending, Rejected};

    vec![
        seed("1", "Welcome Message", Marketing, Approved, "2025-05-10",
            "Hi {{1}}, welcome to {{2}}! Reply to this message if you need anything."),
        seed("2", "Order Confirmation", Utility, Approved, "2025-05-08",
            "Hi {{1}}, your order {{2}} is confirmed and will ship soon."),
        seed("3", "Special Promotion", Marketing, Pending, "2025-05-12",
            "Hi {{1}}, enjoy *{{2}}* off your next purchase this week only."),
        seed("4", "Appointment Reminder", Utility, Rejected, "2025-05-05",
            "Hi {{1}}, this is a reminder of your appointment on {{2}}."),
        seed("5", "Payment Confirmation", Utility, Approved, "2025-05-02",
            "Hi {{1}}, we received your payment of {{2}}. Thank you!"),
        seed("6", "Feedback Request", Marketing, Approved, "2025-04-28",
            "Hi {{1}}, how was your experience with us? We'd love to hear from you."),
        seed("7", "Shipping Update", Utility, Pending, "2025-05-11",
            "Hi {{1}}, your order {{2}} is on its way. Track it here: {{3}}"),
    ]
}

/// Past bulk sends shown under the wizard.
pub fn mock_campaigns() -> Vec<Campaign> {
    let campaign = |id: &str,
                    name: &str,
                    template: &str,
                    (sent, delivered, read, failed): (u32, u32, u32, u32),
                    state: CampaignState,
                    created_at: &str| Campaign {
        id: id.to_string(),
        name: name.to_string(),
        template: template.to_string(),
        sent,
        delivered,
        read,
        failed,
        state,
        created_at: created_at.to_string(),
    };

    vec![
        campaign("1", "Welcome Campaign May 2025", "Welcome Message",
            (500, 485, 350, 15), CampaignState::Completed, "2025-05-15"),
        campaign("2", "Order Updates May 2025", "Order Confirmation",
            (250, 248, 200, 2), CampaignState::Completed, "2025-05-10"),
        campaign("3", "Feedback Campaign May 2025", "Feedback Request",
            (100, 20, 10, 0), CampaignState::InProgress, "2025-05-18"),
    ]
}
