#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{Map, Value};
use tower::ServiceExt;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use residency_api::auth::{AppState, AppStateInner, hash_password};
use residency_api::flash;
use residency_api::routes::build_router;
use residency_api::session::{SESSION_COOKIE, issue_session_token};
use residency_db::{AdminStore, Database, NotificationStore, ResidentStore, UserStore};
use residency_types::ObjectId;
use residency_types::api::Flash;
use residency_types::models::{Admin, AdminPatch, Notification, Resident, User};

pub const SECRET: &str = "test-secret";
pub const ADMIN_PASSWORD: &str = "original-pass";

pub struct TestApp {
    pub db: Arc<Database>,
    pub router: Router,
    pub admin: Admin,
    pub cookie: String,
}

/// Router over an in-memory database with one signed-in admin.
pub fn test_app() -> TestApp {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let admin = create_test_admin(&db, "Layla Hassan", "layla@gmail.com");
    let state: AppState = Arc::new(AppStateInner::from_database(db.clone(), SECRET.to_string()));
    TestApp {
        db,
        router: build_router(state),
        cookie: session_cookie(&admin),
        admin,
    }
}

pub fn create_test_admin(db: &Database, fullname: &str, email: &str) -> Admin {
    let admin = Admin {
        id: ObjectId::new(),
        fullname: fullname.to_string(),
        email: email.to_string(),
        password: hash_password(ADMIN_PASSWORD).unwrap(),
        created_at: Utc::now(),
    };
    db.insert_admin(&admin).unwrap();
    admin
}

pub fn create_test_user(db: &Database, fullname: &str) -> User {
    let user = User {
        id: ObjectId::new(),
        fullname: fullname.to_string(),
        email: "applicant@gmail.com".to_string(),
        phone: Some("0551234567".to_string()),
        created_at: Utc::now(),
    };
    db.insert_user(&user).unwrap();
    user
}

pub fn create_test_resident(db: &Database, user_id: &ObjectId, date: DateTime<Utc>) -> Resident {
    let mut fields = Map::new();
    fields.insert("nationality".to_string(), Value::String("Jordanian".to_string()));
    let resident = Resident {
        id: ObjectId::new(),
        user_id: user_id.clone(),
        date,
        fields,
    };
    db.insert_resident(&resident).unwrap();
    resident
}

pub fn notification(user_id: &ObjectId, title: &str) -> Notification {
    let mut payload = Map::new();
    payload.insert("title".to_string(), Value::String(title.to_string()));
    Notification {
        id: ObjectId::new(),
        user_id: user_id.clone(),
        payload,
        date: Utc::now(),
    }
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn session_cookie(admin: &Admin) -> String {
    format!("{}={}", SESSION_COOKIE, issue_session_token(SECRET, admin).unwrap())
}

pub async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(router: &Router, uri: &str, cookie: &str, body: &str) -> Response<Body> {
    post(router, uri, cookie, Some("application/x-www-form-urlencoded"), body).await
}

pub async fn post(
    router: &Router,
    uri: &str,
    cookie: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Value of a cookie set by the response, if any. Removal cookies show up
/// with an empty value.
pub fn set_cookie<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| {
            let rest = &v[prefix.len()..];
            rest.split(';').next().unwrap_or("")
        })
}

pub fn flash_of(response: &Response<Body>) -> Option<Flash> {
    set_cookie(response, flash::FLASH_COOKIE).and_then(flash::decode)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// -- Store doubles --

/// Every call fails, as if the database were unreachable. With
/// `sessions_pass` set, the session gate's admin lookup still succeeds so
/// the handler's own store calls are reached.
pub struct FailingStore {
    pub sessions_pass: bool,
}

fn offline<T>() -> Result<T> {
    Err(anyhow!("store offline"))
}

impl AdminStore for FailingStore {
    fn list_admins(&self) -> Result<Vec<Admin>> {
        offline()
    }
    fn find_admin(&self, _id: &ObjectId) -> Result<Option<Admin>> {
        offline()
    }
    fn find_admin_by_email(&self, _email: &str) -> Result<Option<Admin>> {
        offline()
    }
    fn admin_exists(&self, _id: &ObjectId) -> Result<bool> {
        if self.sessions_pass {
            Ok(true)
        } else {
            offline()
        }
    }
    fn update_admin(&self, _id: &ObjectId, _patch: &AdminPatch) -> Result<()> {
        offline()
    }
    fn delete_admin(&self, _id: &ObjectId) -> Result<()> {
        offline()
    }
    fn insert_admin(&self, _admin: &Admin) -> Result<()> {
        offline()
    }
}

impl UserStore for FailingStore {
    fn list_users(&self) -> Result<Vec<User>> {
        offline()
    }
    fn count_users(&self) -> Result<u64> {
        offline()
    }
    fn find_users(&self, _ids: &[ObjectId]) -> Result<Vec<User>> {
        offline()
    }
    fn insert_user(&self, _user: &User) -> Result<()> {
        offline()
    }
}

impl ResidentStore for FailingStore {
    fn list_residents(&self) -> Result<Vec<Resident>> {
        offline()
    }
    fn count_residents(&self) -> Result<u64> {
        offline()
    }
    fn find_resident(&self, _id: &ObjectId) -> Result<Option<Resident>> {
        offline()
    }
    fn insert_resident(&self, _resident: &Resident) -> Result<()> {
        offline()
    }
}

impl NotificationStore for FailingStore {
    fn list_notifications(&self) -> Result<Vec<Notification>> {
        offline()
    }
    fn insert_notification(&self, _notification: &Notification) -> Result<()> {
        offline()
    }
}

/// Router whose every store call past the session gate fails.
pub fn failing_app() -> (Router, String) {
    failing_app_with(FailingStore { sessions_pass: true })
}

pub fn failing_app_with(store: FailingStore) -> (Router, String) {
    let store = Arc::new(store);
    let state: AppState = Arc::new(AppStateInner {
        admins: store.clone(),
        users: store.clone(),
        residents: store.clone(),
        user_notifications: store.clone(),
        resident_notifications: store,
        session_secret: SECRET.to_string(),
    });
    let admin = Admin {
        id: ObjectId::new(),
        fullname: "Layla Hassan".to_string(),
        email: "layla@gmail.com".to_string(),
        password: String::new(),
        created_at: Utc::now(),
    };
    (build_router(state), session_cookie(&admin))
}

/// Backed by a real database except that every user lookup fails, so
/// listings load and then fail while expanding their user references.
pub fn users_offline_app() -> TestApp {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let admin = create_test_admin(&db, "Layla Hassan", "layla@gmail.com");
    let mut inner = AppStateInner::from_database(db.clone(), SECRET.to_string());
    inner.users = Arc::new(FailingStore { sessions_pass: true }) as Arc<dyn UserStore>;
    TestApp {
        db,
        router: build_router(Arc::new(inner)),
        cookie: session_cookie(&admin),
        admin,
    }
}

/// Counts resident lookups and otherwise defers to the database.
pub struct RecordingResidents {
    pub inner: Arc<Database>,
    pub lookups: AtomicUsize,
}

impl RecordingResidents {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ResidentStore for RecordingResidents {
    fn list_residents(&self) -> Result<Vec<Resident>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.list_residents()
    }
    fn count_residents(&self) -> Result<u64> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.count_residents()
    }
    fn find_resident(&self, id: &ObjectId) -> Result<Option<Resident>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_resident(id)
    }
    fn insert_resident(&self, resident: &Resident) -> Result<()> {
        self.inner.insert_resident(resident)
    }
}

/// Like [`test_app`], with resident lookups recorded.
pub fn recording_app() -> (TestApp, Arc<RecordingResidents>) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let admin = create_test_admin(&db, "Layla Hassan", "layla@gmail.com");
    let residents = Arc::new(RecordingResidents {
        inner: db.clone(),
        lookups: AtomicUsize::new(0),
    });
    let mut inner = AppStateInner::from_database(db.clone(), SECRET.to_string());
    inner.residents = residents.clone() as Arc<dyn ResidentStore>;
    let app = TestApp {
        db,
        router: build_router(Arc::new(inner)),
        cookie: session_cookie(&admin),
        admin,
    };
    (app, residents)
}
