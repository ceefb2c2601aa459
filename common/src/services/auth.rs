use log::info;

use crate::error::ServiceError;
use crate::model::user::{RegisterData, User};
use crate::services::SessionStore;

const MOCK_USER_ID: &str = "123";

/// Signed-in state of the dashboard, mirrored into a [`SessionStore`].
///
/// Identity is mocked: any credentials sign in, and nothing leaves the
/// browser.
#[derive(Clone)]
pub struct AuthSession<S: SessionStore> {
    store: S,
    user: Option<User>,
}

impl<S: SessionStore> AuthSession<S> {
    pub fn new(store: S) -> Self {
        Self { store, user: None }
    }

    /// Picks up the user persisted by a previous visit, if any.
    pub fn restore(store: S) -> Self {
        let user = store.load();
        Self { store, user }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, email: &str, _password: &str) -> Result<&User, ServiceError> {
        let user = User {
            id: MOCK_USER_ID.to_string(),
            name: "Demo User".to_string(),
            email: email.to_string(),
            business_name: "Demo Business".to_string(),
            whatsapp_connected: false,
        };
        info!("signed in as {email}");
        self.persist(user)
    }

    pub fn register(&mut self, data: RegisterData) -> Result<&User, ServiceError> {
        let user = User {
            id: MOCK_USER_ID.to_string(),
            name: data.name,
            email: data.email,
            business_name: data.business_name,
            whatsapp_connected: false,
        };
        info!("registered {}", user.email);
        self.persist(user)
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.store.clear();
    }

    pub fn connect_whatsapp(&mut self) -> Result<&User, ServiceError> {
        let Some(user) = self.user.clone() else {
            return Err(ServiceError::NotFound("no signed-in user".into()));
        };
        self.persist(User {
            whatsapp_connected: true,
            ..user
        })
    }

    fn persist(&mut self, user: User) -> Result<&User, ServiceError> {
        self.store.save(&user)?;
        Ok(self.user.insert(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemorySessionStore;

    #[test]
    fn login_persists_mock_user() {
        let store = InMemorySessionStore::default();
        let mut session = AuthSession::new(store.clone());
        assert!(!session.is_authenticated());

        let user = session.login("ana@shop.io", "secret").unwrap();
        assert_eq!(user.id, "123");
        assert_eq!(user.business_name, "Demo Business");
        assert_eq!(store.load().unwrap().email, "ana@shop.io");
    }

    #[test]
    fn restore_reads_previous_session() {
        let store = InMemorySessionStore::default();
        AuthSession::new(store.clone())
            .register(RegisterData {
                name: "Ana".into(),
                email: "ana@shop.io".into(),
                password: "secret".into(),
                business_name: "Ana's Shop".into(),
            })
            .unwrap();

        let session = AuthSession::restore(store);
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Ana"));
    }

    #[test]
    fn connect_whatsapp_requires_user() {
        let store = InMemorySessionStore::default();
        let mut session = AuthSession::new(store.clone());
        assert!(session.connect_whatsapp().is_err());

        session.login("ana@shop.io", "secret").unwrap();
        assert!(session.connect_whatsapp().unwrap().whatsapp_connected);
        assert!(store.load().unwrap().whatsapp_connected);
    }

    #[test]
    fn logout_clears_store() {
        let store = InMemorySessionStore::default();
        let mut session = AuthSession::new(store.clone());
        session.login("ana@shop.io", "secret").unwrap();
        session.logout();
        assert!(session.user().is_none());
        assert!(store.load().is_none());
    }
}
