//! Raw key-value backends behind [`RecordStore`](super::RecordStore).
//!
//! # Responsibility
//! - Move serialized strings in and out of one flat namespace.
//! - Report availability failures as `StoreError`; never interpret payloads.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of the underlying namespace (quota, disabled storage, I/O).
#[derive(Debug)]
pub enum StoreError {
    Unavailable(String),
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Flat string namespace keyed by collection name.
pub trait KeyValueBackend {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>>;
    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove_raw(&self, key: &str) -> StoreResult<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for &B {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read_raw(key)
    }

    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write_raw(key, value)
    }

    fn remove_raw(&self, key: &str) -> StoreResult<()> {
        (**self).remove_raw(key)
    }
}

/// In-memory namespace for tests and ephemeral sessions.
///
/// Single-threaded by construction; `set_unavailable(true)` makes every
/// call fail the way a disabled or full browser store would.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<BTreeMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Returns the stored string under `key`, bypassing availability checks.
    pub fn raw_entry(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.get() {
            return Err(StoreError::Unavailable("memory backend disabled".to_string()));
        }
        Ok(())
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_available()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> StoreResult<()> {
        self.check_available()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// SQLite-backed namespace stored in the `kv_entries` table.
///
/// Expects a connection returned by `db::open_db*` (migrations applied).
pub struct SqliteBackend<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBackend<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueBackend for SqliteBackend<'_> {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}
