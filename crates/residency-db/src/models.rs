//! Database row types. These map directly to SQLite rows and are converted
//! into the `residency-types` models at the store boundary.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, SecondsFormat, Utc};
use residency_types::ObjectId;
use residency_types::models::{Admin, Notification, Resident, User};
use serde_json::{Map, Value};

pub struct AdminRow {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

pub struct UserRow {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: String,
}

pub struct ResidentRow {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub fields: String,
}

pub struct NotificationRow {
    pub id: String,
    pub user_id: String,
    pub payload: String,
    pub date: String,
}

impl TryFrom<AdminRow> for Admin {
    type Error = anyhow::Error;

    fn try_from(row: AdminRow) -> Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            fullname: row.fullname,
            email: row.email,
            password: row.password,
            created_at: parse_time(&row.created_at)?,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            fullname: row.fullname,
            email: row.email,
            phone: row.phone,
            created_at: parse_time(&row.created_at)?,
        })
    }
}

impl TryFrom<ResidentRow> for Resident {
    type Error = anyhow::Error;

    fn try_from(row: ResidentRow) -> Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            user_id: parse_id(&row.user_id)?,
            date: parse_time(&row.date)?,
            fields: parse_object(&row.fields)?,
        })
    }
}

impl TryFrom<NotificationRow> for Notification {
    type Error = anyhow::Error;

    fn try_from(row: NotificationRow) -> Result<Self> {
        Ok(Self {
            id: parse_id(&row.id)?,
            user_id: parse_id(&row.user_id)?,
            payload: parse_object(&row.payload)?,
            date: parse_time(&row.date)?,
        })
    }
}

/// Fixed-width UTC timestamps, so text order is time order.
pub(crate) fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse(raw).ok_or_else(|| anyhow!("Corrupt id in database: {}", raw))
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    let t = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Corrupt timestamp in database: {}", raw))?;
    Ok(t.with_timezone(&Utc))
}

fn parse_object(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("Expected a JSON object, found {}", other)),
    }
}
