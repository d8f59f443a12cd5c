use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted user row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// Input shape for creating a user; the store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
}

impl NewUser {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }
}

impl From<UserRecord> for NewUser {
    fn from(r: UserRecord) -> Self {
        Self {
            name: r.name,
            email: r.email,
        }
    }
}
