use article_core::db::migrations::latest_version;
use article_core::db::{open_db, open_db_in_memory, open_pool, open_pool_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_articles_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "articles");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("articles.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO articles (title, content, author, published_at) VALUES ('t', 'c', 'a', 0);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let rows: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM articles;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

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

#[test]
fn created_at_and_updated_at_default_to_now() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO articles (title, content, author, published_at) VALUES ('t', 'c', 'a', 0);",
        [],
    )
    .unwrap();

    let (created_at, updated_at): (i64, i64) = conn
        .query_row("SELECT created_at, updated_at FROM articles;", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    let now_ms = chrono::Utc::now().timestamp_millis();
    assert!((now_ms - created_at).abs() < 5_000, "created_at={created_at} now={now_ms}");
    assert!((now_ms - updated_at).abs() < 5_000, "updated_at={updated_at} now={now_ms}");
}

#[test]
fn file_pool_shares_one_migrated_database() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path().join("pool.db"), 4).unwrap();

    let first = pool.get().unwrap();
    first
        .execute(
            "INSERT INTO articles (title, content, author, published_at) VALUES ('t', 'c', 'a', 0);",
            [],
        )
        .unwrap();

    let second = pool.get().unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let rows: i64 = second
        .query_row("SELECT COUNT(*) FROM articles;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn in_memory_pool_is_migrated() {
    let pool = open_pool_in_memory().unwrap();
    let conn = pool.get().unwrap();
    assert_table_exists(&conn, "articles");
}

#[test]
fn in_memory_pool_connection_is_never_reaped() {
    let pool = open_pool_in_memory().unwrap();

    assert_eq!(pool.max_size(), 1);
    assert_eq!(pool.max_lifetime(), None);
    assert_eq!(pool.idle_timeout(), None);
}

#[test]
fn in_memory_pool_keeps_data_across_checkouts() {
    let pool = open_pool_in_memory().unwrap();

    let conn = pool.get().unwrap();
    conn.execute(
        "INSERT INTO articles (title, content, author, published_at) VALUES ('t', 'c', 'a', 0);",
        [],
    )
    .unwrap();
    drop(conn);

    let conn = pool.get().unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM articles;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn file_pool_clamps_size_to_one() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path().join("small.db"), 0).unwrap();
    assert_eq!(pool.max_size(), 1);
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
