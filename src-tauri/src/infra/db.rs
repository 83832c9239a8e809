//! Database sessions: PostgreSQL (sqlx) and embedded SQLite (rusqlite).

use crate::domain::{NewRecord, Record, RecordFilter};
use crate::error::AppError;
use rusqlite::functions::FunctionFlags;
use rusqlite::params;
use serde::Serialize;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection as _, Row};
use std::path::Path;

const PG_SCHEMA: &str =
    "CREATE TABLE IF NOT EXISTS records (id SERIAL PRIMARY KEY, name VARCHAR(255), age INTEGER)";

const SQLITE_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS records (id INTEGER PRIMARY KEY AUTOINCREMENT, name VARCHAR(255), age INTEGER)";

// Unset parameters disable their criterion; no ORDER BY, rows come back in table order.
const PG_SELECT: &str = r"SELECT id, name, age FROM records
    WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')
      AND ($2::int IS NULL OR age >= $2)
      AND ($3::int IS NULL OR age <= $3)";

// SQLite's LIKE folds ASCII only; `casefold` lowercases the full Unicode range.
const SQLITE_SELECT: &str = r"SELECT id, name, age FROM records
    WHERE (?1 IS NULL OR casefold(name) LIKE casefold(?1) ESCAPE '\')
      AND (?2 IS NULL OR age >= ?2)
      AND (?3 IS NULL OR age <= ?3)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Postgres,
    Sqlite,
}

/// One live database session. Owned by the record view; closed exactly once.
pub enum Session {
    Postgres(PgConnection),
    Sqlite(rusqlite::Connection),
}

impl Session {
    pub async fn connect_postgres(options: &PgConnectOptions) -> Result<Self, sqlx::Error> {
        let conn = PgConnection::connect_with(options).await?;
        Ok(Session::Postgres(conn))
    }

    /// Open (or create) an embedded database file.
    pub fn open_sqlite(db_path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = rusqlite::Connection::open(db_path)?;
        register_functions(&conn)?;
        Ok(Session::Sqlite(conn))
    }

    pub fn kind(&self) -> SessionKind {
        match self {
            Session::Postgres(_) => SessionKind::Postgres,
            Session::Sqlite(_) => SessionKind::Sqlite,
        }
    }

    /// Create the `records` table if it does not exist yet.
    pub async fn ensure_schema(&mut self) -> Result<(), AppError> {
        match self {
            Session::Postgres(conn) => {
                sqlx::query(PG_SCHEMA).execute(&mut *conn).await?;
            }
            Session::Sqlite(conn) => {
                conn.execute(SQLITE_SCHEMA, [])?;
            }
        }
        Ok(())
    }

    pub async fn fetch_records(
        &mut self,
        filter: Option<&RecordFilter>,
    ) -> Result<Vec<Record>, AppError> {
        let pattern = filter.and_then(|f| f.name_pattern());
        let min_age = filter.and_then(|f| f.min_age);
        let max_age = filter.and_then(|f| f.max_age);

        match self {
            Session::Postgres(conn) => {
                let rows = sqlx::query(PG_SELECT)
                    .bind(pattern)
                    .bind(min_age)
                    .bind(max_age)
                    .fetch_all(&mut *conn)
                    .await?;
                let mut out = Vec::with_capacity(rows.len());
                for row in rows {
                    out.push(Record {
                        id: row.try_get("id")?,
                        name: row.try_get("name")?,
                        age: row.try_get("age")?,
                    });
                }
                Ok(out)
            }
            Session::Sqlite(conn) => sqlite_fetch(conn, pattern.as_deref(), min_age, max_age),
        }
    }

    /// Insert a row and return the id the database assigned.
    pub async fn insert_record(&mut self, rec: &NewRecord) -> Result<i32, AppError> {
        match self {
            Session::Postgres(conn) => {
                let row = sqlx::query("INSERT INTO records (name, age) VALUES ($1, $2) RETURNING id")
                    .bind(rec.name.as_deref())
                    .bind(rec.age)
                    .fetch_one(&mut *conn)
                    .await?;
                Ok(row.try_get("id")?)
            }
            Session::Sqlite(conn) => Ok(conn.query_row(
                "INSERT INTO records (name, age) VALUES (?1, ?2) RETURNING id",
                params![rec.name, rec.age],
                |r| r.get(0),
            )?),
        }
    }

    /// Returns the number of rows changed.
    pub async fn update_record(&mut self, id: i32, rec: &NewRecord) -> Result<u64, AppError> {
        match self {
            Session::Postgres(conn) => {
                let done = sqlx::query("UPDATE records SET name = $1, age = $2 WHERE id = $3")
                    .bind(rec.name.as_deref())
                    .bind(rec.age)
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
                Ok(done.rows_affected())
            }
            Session::Sqlite(conn) => {
                let changed = conn.execute(
                    "UPDATE records SET name = ?1, age = ?2 WHERE id = ?3",
                    params![rec.name, rec.age, id],
                )?;
                Ok(changed as u64)
            }
        }
    }

    /// Returns the number of rows removed.
    pub async fn delete_record(&mut self, id: i32) -> Result<u64, AppError> {
        match self {
            Session::Postgres(conn) => {
                let done = sqlx::query("DELETE FROM records WHERE id = $1")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
                Ok(done.rows_affected())
            }
            Session::Sqlite(conn) => {
                let changed = conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
                Ok(changed as u64)
            }
        }
    }

    pub async fn close(self) -> Result<(), AppError> {
        match self {
            Session::Postgres(conn) => conn.close().await?,
            Session::Sqlite(conn) => conn.close().map_err(|(_, e)| AppError::from(e))?,
        }
        Ok(())
    }
}

fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

fn sqlite_fetch(
    conn: &rusqlite::Connection,
    pattern: Option<&str>,
    min_age: Option<i32>,
    max_age: Option<i32>,
) -> Result<Vec<Record>, AppError> {
    let mut stmt = conn.prepare(SQLITE_SELECT)?;
    let rows = stmt.query_map(params![pattern, min_age, max_age], |row| {
        Ok(Record {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// In-memory embedded session with the schema in place (for tests).
pub fn open_test_session() -> Session {
    let conn = rusqlite::Connection::open_in_memory().expect("open in-memory db");
    register_functions(&conn).expect("register sql functions");
    conn.execute(SQLITE_SCHEMA, []).expect("create records table");
    Session::Sqlite(conn)
}
