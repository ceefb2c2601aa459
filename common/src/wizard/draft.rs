use log::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::error::{ServiceError, WizardError};
use crate::model::csv::{CsvPreview, PREVIEW_ROWS};
use crate::model::datasource::ContactFile;
use crate::requests::CampaignSubmission;
use crate::submission::{SubmissionTicket, SubmitStatus};
use crate::wizard::step::WizardStep;

/// Working state of the bulk messaging wizard.
///
/// Fields are private so the preview can only ever be derived from the
/// attached contact file, and the step only moves through the guarded
/// transitions below.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDraft {
    step: WizardStep,
    campaign_name: String,
    selected_template_id: Option<String>,
    contact_file: Option<ContactFile>,
    preview: CsvPreview,
    submit_status: SubmitStatus,
    /// Bumped on every reset; submission tickets from older generations are
    /// ignored.
    generation: u64,
    preview_rows: usize,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        Self::with_preview_rows(PREVIEW_ROWS)
    }
}

impl CampaignDraft {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_preview_rows(config.preview_rows)
    }

    fn with_preview_rows(preview_rows: usize) -> Self {
        Self {
            step: WizardStep::default(),
            campaign_name: String::new(),
            selected_template_id: None,
            contact_file: None,
            preview: CsvPreview::default(),
            submit_status: SubmitStatus::Idle,
            generation: 0,
            preview_rows,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn campaign_name(&self) -> &str {
        &self.campaign_name
    }

    pub fn selected_template_id(&self) -> Option<&str> {
        self.selected_template_id.as_deref()
    }

    pub fn contact_file(&self) -> Option<&ContactFile> {
        self.contact_file.as_ref()
    }

    pub fn preview(&self) -> &CsvPreview {
        &self.preview
    }

    pub fn submit_status(&self) -> &SubmitStatus {
        &self.submit_status
    }

    pub fn set_campaign_name(&mut self, name: impl Into<String>) {
        self.campaign_name = name.into();
    }

    pub fn select_template(&mut self, template_id: Option<String>) {
        self.selected_template_id = template_id;
    }

    /// Stores the picked file and re-derives the preview from it.
    pub fn attach_file(&mut self, file: ContactFile) {
        self.preview = file.preview(self.preview_rows);
        self.contact_file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.contact_file = None;
        self.preview = CsvPreview::default();
    }

    /// Checks the guard for leaving `step` forward.
    fn guard(&self, step: WizardStep) -> Result<(), WizardError> {
        match step {
            WizardStep::Template => {
                if self.campaign_name.trim().is_empty() {
                    Err(WizardError::MissingCampaignName)
                } else if self.selected_template_id.is_none() {
                    Err(WizardError::MissingTemplate)
                } else {
                    Ok(())
                }
            }
            WizardStep::Upload => {
                if self.contact_file.is_none() {
                    Err(WizardError::MissingContactFile)
                } else {
                    Ok(())
                }
            }
            WizardStep::Review => Err(WizardError::AlreadyAtLastStep),
        }
    }

    /// Moves one step forward if the current step is complete.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if let Err(err) = self.guard(self.step) {
            debug!("wizard stays on {:?}: {}", self.step, err);
            return Err(err);
        }
        let next = self.step.next().ok_or(WizardError::AlreadyAtLastStep)?;
        self.step = next;
        Ok(next)
    }

    /// Moves one step back. Does nothing on the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Whether the step indicator may jump to `target` from here.
    pub fn can_enter(&self, target: WizardStep) -> bool {
        self.check_path(target).is_ok()
    }

    fn check_path(&self, target: WizardStep) -> Result<(), WizardError> {
        WizardStep::all()
            .into_iter()
            .filter(|s| s.index() >= self.step.index() && s.index() < target.index())
            .try_for_each(|s| self.guard(s))
    }

    /// Jumps to any earlier step, or to a later one when every step in
    /// between is complete. The draft is unchanged on error.
    pub fn jump_to(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        self.check_path(target)?;
        self.step = target;
        Ok(target)
    }

    /// Starts a submission from the review step.
    ///
    /// Flips the status to `Loading` and returns the ticket to resolve it with
    /// along with the payload for the submission service.
    pub fn begin_submit(&mut self) -> Result<(SubmissionTicket, CampaignSubmission), WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::NotInReview);
        }
        if self.submit_status.is_loading() {
            return Err(WizardError::SubmissionInFlight);
        }
        self.guard(WizardStep::Template)?;
        self.guard(WizardStep::Upload)?;

        let (Some(template_id), Some(contact_file)) =
            (self.selected_template_id.clone(), self.contact_file.clone())
        else {
            return Err(WizardError::MissingContactFile);
        };

        let submission = CampaignSubmission {
            campaign_name: self.campaign_name.clone(),
            template_id,
            contact_file,
        };
        self.submit_status = SubmitStatus::Loading;
        info!(
            "submitting campaign '{}' with template {}",
            submission.campaign_name, submission.template_id
        );
        Ok((
            SubmissionTicket {
                generation: self.generation,
            },
            submission,
        ))
    }

    /// Records the service's answer. Returns `false` when the ticket is stale
    /// (the wizard was reset meanwhile) or nothing is in flight.
    pub fn finish_submit(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<(), ServiceError>,
    ) -> bool {
        if !self.is_current(ticket) || !self.submit_status.is_loading() {
            warn!("dropping stale submission result for generation {}", ticket.generation);
            return false;
        }
        self.submit_status = match result {
            Ok(()) => SubmitStatus::Success,
            Err(err) => SubmitStatus::Error(err.to_string()),
        };
        true
    }

    /// Whether `ticket` was issued since the last reset.
    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Delayed reset after a successful send. Only resets when `ticket` is
    /// still current and its submission is still the one reported as a
    /// success; returns whether the draft was reset.
    pub fn auto_reset(&mut self, ticket: SubmissionTicket) -> bool {
        if !self.is_current(ticket) || self.submit_status != SubmitStatus::Success {
            debug!("skipping auto reset for generation {}", ticket.generation);
            return false;
        }
        info!("resetting wizard after successful submission");
        self.reset();
        true
    }

    /// Back to an empty first step. Pending submissions are abandoned.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::with_preview_rows(self.preview_rows);
        self.generation = generation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contacts() -> ContactFile {
        ContactFile::new("contacts.csv", "phone,var1\n123,John\n456,Jane")
    }

    fn ready_for_upload() -> CampaignDraft {
        let mut draft = CampaignDraft::default();
        draft.set_campaign_name("Promo");
        draft.select_template(Some("1".into()));
        draft
    }

    fn in_review() -> CampaignDraft {
        let mut draft = ready_for_upload();
        draft.attach_file(contacts());
        draft.advance().unwrap();
        draft.advance().unwrap();
        draft
    }

    // ========================================================================
    // Guards
    // ========================================================================

    #[test]
    fn empty_name_blocks_template_step() {
        let mut draft = CampaignDraft::default();
        draft.select_template(Some("1".into()));
        assert_eq!(draft.advance(), Err(WizardError::MissingCampaignName));
        assert_eq!(draft.step(), WizardStep::Template);
    }

    #[test]
    fn blank_name_counts_as_empty() {
        let mut draft = CampaignDraft::default();
        draft.set_campaign_name("   ");
        draft.select_template(Some("1".into()));
        assert_eq!(draft.advance(), Err(WizardError::MissingCampaignName));
    }

    #[test]
    fn missing_template_blocks_template_step() {
        let mut draft = CampaignDraft::default();
        draft.set_campaign_name("Promo");
        assert_eq!(draft.advance(), Err(WizardError::MissingTemplate));
        assert_eq!(draft.step(), WizardStep::Template);
    }

    #[test]
    fn missing_file_blocks_upload_step() {
        let mut draft = ready_for_upload();
        assert_eq!(draft.advance(), Ok(WizardStep::Upload));
        assert_eq!(draft.advance(), Err(WizardError::MissingContactFile));
        assert_eq!(draft.step(), WizardStep::Upload);
    }

    #[test]
    fn successive_advances_reach_review() {
        let mut draft = ready_for_upload();
        draft.attach_file(contacts());
        draft.advance().unwrap();
        draft.advance().unwrap();
        assert_eq!(draft.advance(), Err(WizardError::AlreadyAtLastStep));
        assert_eq!(draft.step(), WizardStep::Review);
    }

    // ========================================================================
    // Backward navigation and jumps
    // ========================================================================

    #[test]
    fn back_is_unconditional() {
        let mut draft = in_review();
        draft.clear_file();
        assert_eq!(draft.back(), WizardStep::Upload);
        assert_eq!(draft.back(), WizardStep::Template);
        assert_eq!(draft.back(), WizardStep::Template);
    }

    #[test]
    fn jump_back_is_always_allowed() {
        let mut draft = in_review();
        assert_eq!(draft.jump_to(WizardStep::Template), Ok(WizardStep::Template));
        assert!(draft.can_enter(WizardStep::Review));
        assert_eq!(draft.jump_to(WizardStep::Review), Ok(WizardStep::Review));
    }

    #[test]
    fn jump_forward_past_incomplete_step_is_refused() {
        let mut draft = ready_for_upload();
        assert!(draft.can_enter(WizardStep::Upload));
        assert!(!draft.can_enter(WizardStep::Review));
        assert_eq!(
            draft.jump_to(WizardStep::Review),
            Err(WizardError::MissingContactFile)
        );
        assert_eq!(draft.step(), WizardStep::Template);
    }

    // ========================================================================
    // Preview derivation
    // ========================================================================

    #[test]
    fn preview_follows_attached_file() {
        let mut draft = CampaignDraft::default();
        draft.attach_file(contacts());
        assert_eq!(draft.preview().estimated_recipients(), 2);
        draft.attach_file(ContactFile::new("other.csv", "phone\n1\n2\n3"));
        assert_eq!(draft.preview().estimated_recipients(), 3);
        draft.clear_file();
        assert!(draft.preview().is_empty());
    }

    #[test]
    fn preview_uses_configured_row_limit() {
        let config = DashboardConfig {
            preview_rows: 2,
            ..DashboardConfig::default()
        };
        let mut draft = CampaignDraft::new(&config);
        draft.attach_file(contacts());
        assert_eq!(draft.preview().row_count(), 2);
    }

    // ========================================================================
    // Submission
    // ========================================================================

    #[test]
    fn submit_outside_review_is_refused() {
        let mut draft = ready_for_upload();
        assert_eq!(draft.begin_submit().unwrap_err(), WizardError::NotInReview);
        assert_eq!(draft.submit_status(), &SubmitStatus::Idle);
    }

    #[test]
    fn submit_loading_then_success() {
        let mut draft = in_review();
        let (ticket, payload) = draft.begin_submit().unwrap();
        assert_eq!(payload.campaign_name, "Promo");
        assert_eq!(payload.template_id, "1");
        assert_eq!(draft.submit_status(), &SubmitStatus::Loading);
        assert_eq!(
            draft.begin_submit().unwrap_err(),
            WizardError::SubmissionInFlight
        );

        assert!(draft.finish_submit(ticket, Ok(())));
        assert_eq!(draft.submit_status(), &SubmitStatus::Success);
        assert!(!draft.finish_submit(ticket, Ok(())));
    }

    #[test]
    fn failed_submit_keeps_draft_for_retry() {
        let mut draft = in_review();
        let (ticket, _) = draft.begin_submit().unwrap();
        draft.finish_submit(ticket, Err(ServiceError::Unavailable("timeout".into())));
        assert_eq!(
            draft.submit_status(),
            &SubmitStatus::Error("Service unavailable: timeout".into())
        );
        assert_eq!(draft.step(), WizardStep::Review);
        assert!(draft.begin_submit().is_ok());
    }

    #[test]
    fn reset_clears_everything_and_drops_in_flight_ticket() {
        let mut draft = in_review();
        let (ticket, _) = draft.begin_submit().unwrap();
        assert!(draft.is_current(ticket));
        draft.reset();
        assert!(!draft.is_current(ticket));

        assert_eq!(draft.step(), WizardStep::Template);
        assert_eq!(draft.campaign_name(), "");
        assert_eq!(draft.selected_template_id(), None);
        assert!(draft.contact_file().is_none());
        assert!(draft.preview().is_empty());
        assert_eq!(draft.submit_status(), &SubmitStatus::Idle);

        assert!(!draft.finish_submit(ticket, Ok(())));
        assert_eq!(draft.submit_status(), &SubmitStatus::Idle);
    }
}
