use serde::Serialize;

/// Outcome of the wizard's submit action, as displayed by the banner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl SubmitStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmitStatus::Loading)
    }
}

/// Handle of an in-flight submission.
///
/// A ticket only resolves the draft generation it was issued for, so a
/// response that arrives after the wizard was reset is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub(crate) generation: u64,
}
