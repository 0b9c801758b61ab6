use anyhow::Result;
use chrono::DateTime;
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::{path::Path, str::FromStr};

use super::traits::Storage;
use crate::types::{fold_username, AccessRestriction, RepositoryRecord, User};

const DB_SCHEMA_VERSION: i64 = 1;

const REPOSITORY_COLUMNS: &str = "name, description, owner, last_change_ms, has_commits, \
     access_restriction, use_tickets, use_docs, is_frozen";

#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
}

fn conversion_error(
    column: usize,
    kind: Type,
    message: String,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        kind,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

fn map_repository_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RepositoryRecord> {
    let name: String = row.get(0)?;
    let description: String = row.get(1)?;
    let owner: String = row.get(2)?;

    let last_change_ms: i64 = row.get(3)?;
    let last_change = DateTime::from_timestamp_millis(last_change_ms).ok_or_else(|| {
        conversion_error(
            3,
            Type::Integer,
            format!("last_change_ms out of range: {last_change_ms}"),
        )
    })?;

    let has_commits: i64 = row.get(4)?;

    let access_str: String = row.get(5)?;
    let access_restriction = AccessRestriction::from_str(&access_str)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(err)))?;

    let use_tickets: i64 = row.get(6)?;
    let use_docs: i64 = row.get(7)?;
    let is_frozen: i64 = row.get(8)?;

    Ok(RepositoryRecord {
        name,
        description,
        owner,
        last_change,
        has_commits: has_commits != 0,
        access_restriction,
        use_tickets: use_tickets != 0,
        use_docs: use_docs != 0,
        is_frozen: is_frozen != 0,
    })
}

fn db_list_repositories(conn: &Connection) -> rusqlite::Result<Vec<RepositoryRecord>> {
    let sql = format!("SELECT {REPOSITORY_COLUMNS} FROM repositories ORDER BY rowid");
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt
        .query_map([], map_repository_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_load_repository(conn: &Connection, name: &str) -> rusqlite::Result<Option<RepositoryRecord>> {
    let sql = format!("SELECT {REPOSITORY_COLUMNS} FROM repositories WHERE name = ?1");
    conn.query_row(&sql, params![name], map_repository_row)
        .optional()
}

fn db_save_repository(conn: &Connection, record: &RepositoryRecord) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO repositories (
            name, description, owner, last_change_ms, has_commits,
            access_restriction, use_tickets, use_docs, is_frozen
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(name) DO UPDATE SET
            description = excluded.description,
            owner = excluded.owner,
            last_change_ms = excluded.last_change_ms,
            has_commits = excluded.has_commits,
            access_restriction = excluded.access_restriction,
            use_tickets = excluded.use_tickets,
            use_docs = excluded.use_docs,
            is_frozen = excluded.is_frozen
        "#,
        params![
            record.name,
            record.description,
            record.owner,
            record.last_change.timestamp_millis(),
            record.has_commits as i64,
            record.access_restriction.as_str(),
            record.use_tickets as i64,
            record.use_docs as i64,
            record.is_frozen as i64
        ],
    )?;
    Ok(())
}

fn db_remove_repository(conn: &Connection, name: &str) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM repositories WHERE name = ?1", params![name])
}

fn db_load_user(conn: &Connection, username: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT username, can_admin FROM users WHERE username_key = ?1",
        params![fold_username(username)],
        |row| {
            let username: String = row.get(0)?;
            let can_admin: i64 = row.get(1)?;
            Ok(User {
                username,
                can_admin: can_admin != 0,
            })
        },
    )
    .optional()
}

fn db_save_user(conn: &Connection, user: &User) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO users (username_key, username, can_admin) VALUES (?1, ?2, ?3)
                 ON CONFLICT(username_key) DO UPDATE SET can_admin=excluded.can_admin",
        params![fold_username(&user.username), user.username, user.can_admin as i64],
    )?;
    Ok(())
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        if version == 0 {
            log::info!(
                "SQLite schema migration: {} -> {}",
                version,
                DB_SCHEMA_VERSION
            );
            conn.execute_batch(
                r#"
            CREATE TABLE repositories (
                name TEXT PRIMARY KEY,
                description TEXT NOT NULL DEFAULT '',
                owner TEXT NOT NULL DEFAULT '',
                last_change_ms INTEGER NOT NULL,
                has_commits INTEGER NOT NULL,
                access_restriction TEXT NOT NULL
                    CHECK (access_restriction IN ('NONE', 'PUSH', 'CLONE', 'VIEW')),
                use_tickets INTEGER NOT NULL DEFAULT 0,
                use_docs INTEGER NOT NULL DEFAULT 0,
                is_frozen INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE users (
                username_key TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                can_admin INTEGER NOT NULL DEFAULT 0
            );
            "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl Storage for SqliteStorage {
    fn list_repositories(&self) -> Result<Vec<RepositoryRecord>> {
        let rows = self.with_conn(db_list_repositories)?;
        Ok(rows)
    }

    fn load_repository(&self, name: &str) -> Result<Option<RepositoryRecord>> {
        let row = self.with_conn(|conn| db_load_repository(conn, name))?;
        Ok(row)
    }

    fn save_repository(&self, record: &RepositoryRecord) -> Result<()> {
        self.with_conn(|conn| db_save_repository(conn, record))?;
        Ok(())
    }

    fn remove_repository(&self, name: &str) -> Result<bool> {
        let removed = self.with_conn(|conn| db_remove_repository(conn, name))?;
        Ok(removed > 0)
    }

    fn load_user(&self, username: &str) -> Result<Option<User>> {
        let user = self.with_conn(|conn| db_load_user(conn, username))?;
        Ok(user)
    }

    fn save_user(&self, user: &User) -> Result<()> {
        self.with_conn(|conn| db_save_user(conn, user))?;
        Ok(())
    }
}
