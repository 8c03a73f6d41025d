use rusqlite::Connection;
use userbase_core::db::migrations::{latest_version, schema_version};
use userbase_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "users");
}

#[test]
fn opening_same_store_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.sqlite");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first).unwrap(), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_version());
    assert_table_exists(&conn_second, "users");
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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

// The schema carries its own CHECK constraints, so rows written past the
// model validation (raw SQL, other tools) are still rejected.
#[test]
fn schema_checks_reject_invalid_rows_from_raw_sql() {
    let conn = open_db_in_memory().unwrap();

    let bad_age = conn.execute(
        "INSERT INTO users (email, name, surname, age) VALUES ('a@b.com', 'a', 'b', 17);",
        [],
    );
    assert!(bad_age.is_err());

    let bad_email = conn.execute(
        "INSERT INTO users (email, name, surname, age) VALUES ('not-an-email', 'a', 'b', 30);",
        [],
    );
    assert!(bad_email.is_err());

    let accepted = conn.execute(
        "INSERT INTO users (email, name, surname, age) VALUES ('a@b.com', 'a', 'b', 30);",
        [],
    );
    assert_eq!(accepted.unwrap(), 1);
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
