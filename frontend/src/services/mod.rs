mod campaign_service;
mod session_store;

pub use campaign_service::DelayedCampaignService;
pub use session_store::LocalStorageSessionStore;

pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}
