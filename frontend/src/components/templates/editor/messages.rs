use common::error::ServiceError;
use common::model::section::{ButtonType, HeaderFormatKind, SectionKind, SectionPatch};
use common::model::template::{Language, Template, TemplateCategory};

use super::state::Tab;

pub enum Msg {
    SetTab(Tab),
    SetTemplate(Template),
    SetName(String),
    SetCategory(TemplateCategory),
    SetLanguage(Language),
    AddSection(SectionKind),
    RemoveSection(usize),
    Patch(usize, SectionPatch),
    /// Appends the next free `{{n}}` to the body at the given index.
    InsertVariable(usize),
    ChangeHeaderFormat(usize, HeaderFormatKind),
    AddButton(usize),
    RemoveButton(usize, usize),
    ChangeButtonType(usize, ButtonType),
    OpenAssetPicker(usize),
    AssetSelected(web_sys::File),
    ViewAsset(usize),
    CloseAssetDialog,
    Save,
    Saved(String),
    SubmitForApproval,
    ApprovalResolved(Result<Template, ServiceError>),
    ServiceFailed(ServiceError),
}
