use crate::models::{AdminRow, NotificationRow, ResidentRow, UserRow, format_time};
use crate::stores::{AdminStore, ResidentStore, UserStore};
use crate::Database;
use anyhow::Result;
use residency_types::ObjectId;
use residency_types::models::{Admin, AdminPatch, Notification, Resident, User};
use rusqlite::{Connection, Row};
use tracing::debug;

impl AdminStore for Database {
    fn list_admins(&self) -> Result<Vec<Admin>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, fullname, email, password, created_at FROM admins ORDER BY created_at",
            )?;
            let rows = stmt
                .query_map([], admin_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter().map(Admin::try_from).collect()
        })
    }

    fn find_admin(&self, id: &ObjectId) -> Result<Option<Admin>> {
        self.with_conn(|conn| query_admin(conn, "id", id.as_str()))
    }

    fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
        self.with_conn(|conn| query_admin(conn, "email", email))
    }

    fn admin_exists(&self, id: &ObjectId) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row("SELECT 1 FROM admins WHERE id = ?1", [id.as_str()], |row| {
                    row.get::<_, i64>(0)
                })
                .optional()?;
            Ok(found.is_some())
        })
    }

    fn update_admin(&self, id: &ObjectId, patch: &AdminPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<&str> = Vec::new();
        for (column, value) in [
            ("fullname = ?", &patch.fullname),
            ("email = ?", &patch.email),
            ("password = ?", &patch.password),
        ] {
            if let Some(v) = value {
                sets.push(column);
                values.push(v);
            }
        }
        values.push(id.as_str());

        let sql = format!("UPDATE admins SET {} WHERE id = ?", sets.join(", "));
        self.with_conn(|conn| {
            let changed = conn.execute(&sql, rusqlite::params_from_iter(values))?;
            debug!("Updated admin {} ({} row)", id, changed);
            Ok(())
        })
    }

    fn delete_admin(&self, id: &ObjectId) -> Result<()> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM admins WHERE id = ?1", [id.as_str()])?;
            debug!("Deleted admin {} ({} row)", id, removed);
            Ok(())
        })
    }

    fn insert_admin(&self, admin: &Admin) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO admins (id, fullname, email, password, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                (
                    admin.id.as_str(),
                    &admin.fullname,
                    &admin.email,
                    &admin.password,
                    format_time(&admin.created_at),
                ),
            )?;
            Ok(())
        })
    }
}

impl UserStore for Database {
    fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, fullname, email, phone, created_at FROM users ORDER BY created_at",
            )?;
            let rows = stmt
                .query_map([], user_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter().map(User::try_from).collect()
        })
    }

    fn count_users(&self) -> Result<u64> {
        self.with_conn(|conn| count(conn, "users"))
    }

    fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "SELECT id, fullname, email, phone, created_at FROM users WHERE id IN ({})",
                placeholders.join(", ")
            );

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(rusqlite::params_from_iter(ids.iter().map(ObjectId::as_str)), user_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter().map(User::try_from).collect()
        })
    }

    fn insert_user(&self, user: &User) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, fullname, email, phone, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                (
                    user.id.as_str(),
                    &user.fullname,
                    &user.email,
                    &user.phone,
                    format_time(&user.created_at),
                ),
            )?;
            Ok(())
        })
    }
}

impl ResidentStore for Database {
    fn list_residents(&self) -> Result<Vec<Resident>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, user_id, date, fields FROM residents ORDER BY date DESC")?;
            let rows = stmt
                .query_map([], resident_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter().map(Resident::try_from).collect()
        })
    }

    fn count_residents(&self) -> Result<u64> {
        self.with_conn(|conn| count(conn, "residents"))
    }

    fn find_resident(&self, id: &ObjectId) -> Result<Option<Resident>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, user_id, date, fields FROM residents WHERE id = ?1")?;
            stmt.query_row([id.as_str()], resident_row)
                .optional()?
                .map(Resident::try_from)
                .transpose()
        })
    }

    fn insert_resident(&self, resident: &Resident) -> Result<()> {
        let fields = serde_json::to_string(&resident.fields)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO residents (id, user_id, date, fields) VALUES (?1, ?2, ?3, ?4)",
                (
                    resident.id.as_str(),
                    resident.user_id.as_str(),
                    format_time(&resident.date),
                    &fields,
                ),
            )?;
            Ok(())
        })
    }
}

impl Database {
    // -- Notifications (table chosen by `NotificationFeed`) --

    pub(crate) fn list_notifications_in(&self, table: &'static str) -> Result<Vec<Notification>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT id, user_id, payload, date FROM {} ORDER BY date", table);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(NotificationRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        payload: row.get(2)?,
                        date: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter().map(Notification::try_from).collect()
        })
    }

    pub(crate) fn insert_notification_in(
        &self,
        table: &'static str,
        notification: &Notification,
    ) -> Result<()> {
        let payload = serde_json::to_string(&notification.payload)?;
        self.with_conn(|conn| {
            let sql = format!(
                "INSERT INTO {} (id, user_id, payload, date) VALUES (?1, ?2, ?3, ?4)",
                table
            );
            conn.execute(
                &sql,
                (
                    notification.id.as_str(),
                    notification.user_id.as_str(),
                    &payload,
                    format_time(&notification.date),
                ),
            )?;
            Ok(())
        })
    }
}

fn query_admin(conn: &Connection, column: &'static str, value: &str) -> Result<Option<Admin>> {
    let sql = format!(
        "SELECT id, fullname, email, password, created_at FROM admins WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row([value], admin_row)
        .optional()?
        .map(Admin::try_from)
        .transpose()
}

fn count(conn: &Connection, table: &'static str) -> Result<u64> {
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
    Ok(n as u64)
}

fn admin_row(row: &Row<'_>) -> rusqlite::Result<AdminRow> {
    Ok(AdminRow {
        id: row.get(0)?,
        fullname: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn user_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        fullname: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn resident_row(row: &Row<'_>) -> rusqlite::Result<ResidentRow> {
    Ok(ResidentRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        fields: row.get(3)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
