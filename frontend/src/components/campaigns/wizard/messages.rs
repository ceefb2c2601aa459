use common::error::ServiceError;
use common::model::campaign::Campaign;
use common::model::datasource::ContactFile;
use common::submission::SubmissionTicket;
use common::wizard::WizardStep;

pub enum Msg {
    SetName(String),
    SelectTemplate(String),
    FileLoaded(ContactFile),
    ClearFile,
    Next,
    Back,
    JumpTo(WizardStep),
    Submit,
    SubmitFinished(SubmissionTicket, Result<(), ServiceError>),
    /// Fired `reset_delay_ms` after a successful submission.
    AutoReset(SubmissionTicket),
    HistoryLoaded(Vec<Campaign>),
}
