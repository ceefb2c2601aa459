//! Bulk messaging wizard.
//!
//! A linear three-step flow: pick a template and name the campaign, upload a
//! contact list, then review and submit. [`CampaignDraft`] owns the working
//! state and only moves forward through guarded transitions.

mod draft;
mod step;

pub use draft::CampaignDraft;
pub use step::WizardStep;
