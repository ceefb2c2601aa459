use thiserror::Error;

/// Reasons a wizard transition or submission was refused. The draft is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Enter a campaign name to continue")]
    MissingCampaignName,

    #[error("Select a template to continue")]
    MissingTemplate,

    #[error("Upload a contact list to continue")]
    MissingContactFile,

    #[error("Already at the last step")]
    AlreadyAtLastStep,

    #[error("Campaigns can only be submitted from the review step")]
    NotInReview,

    #[error("A submission is already in progress")]
    SubmissionInFlight,
}

/// Failures reported by the collaborator services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
