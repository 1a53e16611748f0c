use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Reference columns (`user_id`) carry no foreign-key constraint: records
/// whose user has gone away are still listed, just without the user.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS admins (
            id          TEXT PRIMARY KEY,
            fullname    TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            fullname    TEXT NOT NULL,
            email       TEXT NOT NULL,
            phone       TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS residents (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            date        TEXT NOT NULL,
            fields      TEXT NOT NULL DEFAULT '{}'
        );

        CREATE INDEX IF NOT EXISTS idx_residents_date
            ON residents(date);

        CREATE TABLE IF NOT EXISTS user_notifications (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            payload     TEXT NOT NULL DEFAULT '{}',
            date        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS resident_notifications (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            payload     TEXT NOT NULL DEFAULT '{}',
            date        TEXT NOT NULL
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
