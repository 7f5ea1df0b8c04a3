//! Authentication session management with persistent storage.
//!
//! The session mirrors three storage keys (`token`, `user`, `userRole`) that
//! the HTTP client also reads and clears directly.

use serde::de::DeserializeOwned;
use smartshelf_shared::{keys, AccountUser, LoginResponse, Role};

use crate::storage::{self, SharedStorage, Storage, StorageError};
use crate::{log_debug, log_error, log_warn};

/// Client-held authentication state.
#[derive(Debug)]
pub struct SessionStore {
    storage: SharedStorage,
    token: Option<String>,
    user: Option<serde_json::Value>,
    role: Option<String>,
    initialized: bool,
}

impl SessionStore {
    /// Empty, uninitialized session over `storage`.
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            storage,
            token: None,
            user: None,
            role: None,
            initialized: false,
        }
    }

    /// Session restored from storage.
    pub fn load(storage: SharedStorage) -> Self {
        let mut session = Self::new(storage);
        session.initialize();
        session
    }

    /// Restore from storage once; later calls are no-ops.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        let storage = self.storage.as_ref();
        self.token = read_string(storage, keys::TOKEN);
        self.user = load_user(storage);
        self.role = read_string(storage, keys::USER_ROLE);
        self.initialized = true;
        log_debug!("session initialized (authenticated: {})", self.is_authenticated());
    }

    /// Replace the whole session and persist it.
    pub fn set_auth(&mut self, token: impl Into<String>, user: serde_json::Value, role: impl Into<String>) {
        self.token = Some(token.into());
        self.user = Some(user);
        self.role = Some(role.into());
        self.initialized = true;

        let storage = self.storage.as_ref();
        if let Some(token) = &self.token {
            report(keys::TOKEN, storage.set_item(keys::TOKEN, token));
        }
        if let Some(user) = &self.user {
            report(keys::USER, storage::save_json(storage, keys::USER, user));
        }
        if let Some(role) = &self.role {
            report(keys::USER_ROLE, storage.set_item(keys::USER_ROLE, role));
        }
    }

    /// Adopt a successful login response.
    pub fn apply_login(&mut self, login: LoginResponse) {
        self.set_auth(login.token, login.user, login.role);
    }

    /// Forget the session in memory and in storage.
    pub fn clear_auth(&mut self) {
        self.token = None;
        self.user = None;
        self.role = None;
        self.initialized = true;

        for key in keys::AUTH {
            report(key, self.storage.remove_item(key));
        }
    }

    /// True iff a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The raw profile record as the backend returned it.
    pub fn user(&self) -> Option<&serde_json::Value> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn role_kind(&self) -> Option<Role> {
        self.role.as_deref().map(Role::from)
    }

    /// The profile record decoded into `T`; `None` (with a warning) on mismatch.
    pub fn user_as<T: DeserializeOwned>(&self) -> Option<T> {
        let user = self.user.as_ref()?;
        match T::deserialize(user) {
            Ok(value) => Some(value),
            Err(e) => {
                log_warn!("stored user does not match expected shape: {e}");
                None
            }
        }
    }

    /// Validated account fields of the signed-in user.
    pub fn account(&self) -> Option<AccountUser> {
        self.user_as()
    }
}

fn read_string(storage: &dyn Storage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            log_warn!("failed to read {key}: {e}");
            None
        }
    }
}

/// Malformed user JSON is dropped from storage so it cannot fail again.
fn load_user(storage: &dyn Storage) -> Option<serde_json::Value> {
    match storage::load_json::<serde_json::Value>(storage, keys::USER) {
        Ok(Some(serde_json::Value::Null)) | Ok(None) => None,
        Ok(Some(user)) => Some(user),
        Err(e @ StorageError::Malformed { .. }) => {
            log_warn!("Failed to parse stored user data: {e}");
            report(keys::USER, storage.remove_item(keys::USER));
            None
        }
        Err(e) => {
            log_warn!("failed to read {}: {e}", keys::USER);
            None
        }
    }
}

fn report(key: &str, result: Result<(), StorageError>) {
    if let Err(e) = result {
        log_error!("failed to persist {key}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn manager_user() -> serde_json::Value {
        json!({"online_id": 7, "email": "mia@smartshelf.test", "name": "Mia", "employee_id": 3})
    }

    #[test]
    fn set_then_clear_toggles_authentication() {
        let storage = MemoryStorage::shared();
        let mut session = SessionStore::new(storage.clone());
        assert!(!session.is_initialized());
        assert!(!session.is_authenticated());

        session.set_auth("jwt-1", manager_user(), "manager");
        assert!(session.is_authenticated());
        assert!(session.is_initialized());
        assert_eq!(storage.get_item(keys::TOKEN).unwrap().as_deref(), Some("jwt-1"));
        assert_eq!(storage.get_item(keys::USER_ROLE).unwrap().as_deref(), Some("manager"));
        assert_eq!(session.role_kind(), Some(Role::Manager));

        session.clear_auth();
        assert!(!session.is_authenticated());
        assert!(session.is_initialized());
        assert_eq!(session.user(), None);
        for key in keys::AUTH {
            assert_eq!(storage.get_item(key).unwrap(), None);
        }
    }

    #[test]
    fn load_restores_a_persisted_session() {
        let storage = MemoryStorage::shared();
        SessionStore::new(storage.clone()).set_auth("jwt-2", manager_user(), "manager");

        let session = SessionStore::load(storage);
        assert_eq!(session.token(), Some("jwt-2"));
        assert_eq!(session.role(), Some("manager"));
        let account = session.account().unwrap();
        assert_eq!(account.online_id, 7);
        assert_eq!(account.employee_id, Some(3));
        assert_eq!(account.customer_id, None);
    }

    #[test]
    fn malformed_user_is_discarded() {
        let storage = MemoryStorage::shared();
        storage.set_item(keys::TOKEN, "jwt-3").unwrap();
        storage.set_item(keys::USER, "{\"online_id\": 7,").unwrap();
        storage.set_item(keys::USER_ROLE, "customer").unwrap();

        let session = SessionStore::load(storage.clone());
        assert!(session.is_authenticated());
        assert_eq!(session.user(), None);
        assert_eq!(session.role(), Some("customer"));
        assert_eq!(storage.get_item(keys::USER).unwrap(), None);
    }

    #[test]
    fn initialize_runs_once() {
        let storage = MemoryStorage::shared();
        let mut session = SessionStore::new(storage.clone());
        session.initialize();
        assert!(!session.is_authenticated());

        storage.set_item(keys::TOKEN, "late").unwrap();
        session.initialize();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn unexpected_user_shape_yields_no_account() {
        let storage = MemoryStorage::shared();
        let mut session = SessionStore::new(storage);
        session.set_auth("jwt-4", json!({"nickname": "x"}), "customer");
        assert!(session.user().is_some());
        assert_eq!(session.account(), None);
    }
}
