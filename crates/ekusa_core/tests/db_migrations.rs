use ekusa_core::db::migrations::latest_version;
use ekusa_core::db::{open_db, open_db_in_memory, DbError};
use ekusa_core::{RecordStore, SqliteBackend};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn namespace_survives_reopen_of_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ekusa.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = RecordStore::new(SqliteBackend::new(&conn));
        store.save("deleted_members", &vec!["1".to_string()]);
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = RecordStore::new(SqliteBackend::new(&conn));
    let removed: Vec<String> = store.load("deleted_members", Vec::new());
    assert_eq!(removed, vec!["1".to_string()]);
}

#[test]
fn opening_namespace_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
