pub mod editor;
pub mod list;

use common::model::template::TemplateStatus;

/// CSS class of the status badge.
pub fn status_class(status: TemplateStatus) -> &'static str {
    match status {
        TemplateStatus::Draft => "badge draft",
        TemplateStatus::Pending => "badge pending",
        TemplateStatus::Approved => "badge approved",
        TemplateStatus::Rejected => "badge rejected",
    }
}
