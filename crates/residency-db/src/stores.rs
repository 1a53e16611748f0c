//! Narrow store interfaces the dashboard is written against.
//!
//! Every method is a single read or write. Expanding a record's user
//! reference is the caller's job (fetch the record, then `find_users`).

use std::sync::Arc;

use anyhow::Result;
use residency_types::ObjectId;
use residency_types::models::{Admin, AdminPatch, Notification, NotificationKind, Resident, User};

use crate::Database;

pub trait AdminStore: Send + Sync {
    fn list_admins(&self) -> Result<Vec<Admin>>;
    fn find_admin(&self, id: &ObjectId) -> Result<Option<Admin>>;
    fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>>;
    fn admin_exists(&self, id: &ObjectId) -> Result<bool>;
    fn update_admin(&self, id: &ObjectId, patch: &AdminPatch) -> Result<()>;
    fn delete_admin(&self, id: &ObjectId) -> Result<()>;
    fn insert_admin(&self, admin: &Admin) -> Result<()>;
}

pub trait UserStore: Send + Sync {
    fn list_users(&self) -> Result<Vec<User>>;
    fn count_users(&self) -> Result<u64>;
    /// Users whose id is in `ids`. Unknown ids are skipped.
    fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>>;
    fn insert_user(&self, user: &User) -> Result<()>;
}

pub trait ResidentStore: Send + Sync {
    /// All residents, newest application first.
    fn list_residents(&self) -> Result<Vec<Resident>>;
    fn count_residents(&self) -> Result<u64>;
    fn find_resident(&self, id: &ObjectId) -> Result<Option<Resident>>;
    fn insert_resident(&self, resident: &Resident) -> Result<()>;
}

pub trait NotificationStore: Send + Sync {
    fn list_notifications(&self) -> Result<Vec<Notification>>;
    fn insert_notification(&self, notification: &Notification) -> Result<()>;
}

/// One of the two notification collections backed by a shared database.
pub struct NotificationFeed {
    db: Arc<Database>,
    kind: NotificationKind,
}

impl NotificationFeed {
    pub fn new(db: Arc<Database>, kind: NotificationKind) -> Self {
        Self { db, kind }
    }

    fn table(&self) -> &'static str {
        match self.kind {
            NotificationKind::User => "user_notifications",
            NotificationKind::Resident => "resident_notifications",
        }
    }
}

impl NotificationStore for NotificationFeed {
    fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.db.list_notifications_in(self.table())
    }

    fn insert_notification(&self, notification: &Notification) -> Result<()> {
        self.db.insert_notification_in(self.table(), notification)
    }
}
