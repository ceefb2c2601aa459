use common::error::ServiceError;
use common::model::user::User;
use common::services::SessionStore;
use log::warn;

use super::local_storage;

/// Keeps the signed-in user as JSON under a single local storage key.
#[derive(Clone, PartialEq)]
pub struct LocalStorageSessionStore {
    key: String,
}

impl LocalStorageSessionStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn load(&self) -> Option<User> {
        let raw = local_storage()?.get_item(&self.key).ok()??;
        serde_json::from_str(&raw)
            .map_err(|err| warn!("discarding stored session: {err}"))
            .ok()
    }

    fn save(&self, user: &User) -> Result<(), ServiceError> {
        let storage =
            local_storage().ok_or_else(|| ServiceError::Storage("local storage unavailable".into()))?;
        let raw = serde_json::to_string(user).map_err(|err| ServiceError::Storage(err.to_string()))?;
        storage
            .set_item(&self.key, &raw)
            .map_err(|_| ServiceError::Storage(format!("could not write '{}'", self.key)))
    }

    fn clear(&self) {
        let Some(storage) = local_storage() else {
            warn!("local storage unavailable, session '{}' not cleared", self.key);
            return;
        };
        if let Err(err) = storage.remove_item(&self.key) {
            warn!("could not remove session '{}': {err:?}", self.key);
        }
    }
}
