use std::sync::Arc;

use anyhow::{Result, anyhow};
use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use residency_db::{AdminStore, Database, NotificationFeed, NotificationStore, ResidentStore, UserStore};
use residency_types::models::NotificationKind;

pub type AppState = Arc<AppStateInner>;

/// Everything a dashboard handler can reach. Stores sit behind traits so a
/// handler only ever sees fetch/update/delete calls.
pub struct AppStateInner {
    pub admins: Arc<dyn AdminStore>,
    pub users: Arc<dyn UserStore>,
    pub residents: Arc<dyn ResidentStore>,
    pub user_notifications: Arc<dyn NotificationStore>,
    pub resident_notifications: Arc<dyn NotificationStore>,
    pub session_secret: String,
}

impl AppStateInner {
    pub fn from_database(db: Arc<Database>, session_secret: String) -> Self {
        Self {
            admins: db.clone(),
            users: db.clone(),
            residents: db.clone(),
            user_notifications: Arc::new(NotificationFeed::new(db.clone(), NotificationKind::User)),
            resident_notifications: Arc::new(NotificationFeed::new(db, NotificationKind::Resident)),
            session_secret,
        }
    }
}

/// Salted Argon2id hash in PHC string form.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Password hashing failed: {}", e))?;
    Ok(hash.to_string())
}
