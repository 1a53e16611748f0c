use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ObjectId;

/// A console administrator. The password is a salted hash and never leaves
/// the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: ObjectId,
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update for an administrator. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminPatch {
    pub fullname: Option<String>,
    pub email: Option<String>,
    /// Already hashed.
    pub password: Option<String>,
}

impl AdminPatch {
    pub fn is_empty(&self) -> bool {
        self.fullname.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// An end-user account of the residency service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: ObjectId,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A residency application filed by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resident {
    pub id: ObjectId,
    pub user_id: ObjectId,
    /// When the application was filed.
    pub date: DateTime<Utc>,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    User,
    Resident,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub payload: Map<String, Value>,
    pub date: DateTime<Utc>,
}

/// Records that point at an owning user account.
pub trait OwnedByUser {
    fn user_id(&self) -> &ObjectId;
}

impl OwnedByUser for Resident {
    fn user_id(&self) -> &ObjectId {
        &self.user_id
    }
}

impl OwnedByUser for Notification {
    fn user_id(&self) -> &ObjectId {
        &self.user_id
    }
}

/// A record with its user reference expanded. `user` is `None` when the
/// reference does not resolve.
#[derive(Debug, Clone, Serialize)]
pub struct Populated<T> {
    pub record: T,
    pub user: Option<User>,
}
