use std::sync::Arc;

use tracing::debug;

use crate::db::models::{NewUser, UserRecord};
use crate::db::sqlite::UserStorage;
use crate::error::StoreError;

/// Source of the current session identity, if any.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<String>;
}

/// No session is ever established; `current_user` is always `None`.
pub struct NoSession;

impl SessionProvider for NoSession {
    fn current_user(&self) -> Option<String> {
        None
    }
}

/// Fixed session identity, configured once at construction.
pub struct StaticSession(String);

impl StaticSession {
    pub fn new(user: impl Into<String>) -> Self {
        Self(user.into())
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Domain-level access to users, composed from pooled storage and a
/// session source injected at construction.
pub struct UserRepository {
    storage: UserStorage,
    session: Arc<dyn SessionProvider>,
}

impl UserRepository {
    pub fn new(storage: UserStorage, session: Arc<dyn SessionProvider>) -> Self {
        Self { storage, session }
    }

    /// All users in insertion (id) order.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.storage.list_all().await
    }

    pub async fn add_user(&self, user: NewUser) -> Result<i64, StoreError> {
        self.storage.insert(user).await
    }

    pub async fn find_user(&self, name: &str) -> Result<Option<UserRecord>, StoreError> {
        self.storage.find_by_name(name).await
    }

    /// Whether `username` matches the current session identity.
    /// An absent session means nobody is validated, not a fault.
    pub async fn validate_user(&self, username: &str) -> Result<bool, StoreError> {
        match self.session.current_user() {
            Some(current) => Ok(current == username),
            None => {
                debug!(username, "no session established; validation denied");
                Ok(false)
            }
        }
    }

    pub fn storage(&self) -> &UserStorage {
        &self.storage
    }
}
