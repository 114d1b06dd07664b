// ABOUTME: Escaping and input-handling tests for the SQLite table dump
// ABOUTME: Checks hostile values stay data on reload and bad source paths fail cleanly

use rusqlite::Connection;
use sqlite_table_dump::sqlite::{self, converter, reader};
use sqlite_table_dump::{dump, DumpError, DumpOptions};
use std::fs;
use std::path::Path;

/// Dump a single-table database and reload it into an empty copy of the schema
fn dump_and_reload(dir: &Path, ddl: &str, rows: &[&str]) -> (String, Connection) {
    let source = dir.join("source.db");
    let conn = Connection::open(&source).unwrap();
    conn.execute_batch(ddl).unwrap();
    for text in rows {
        conn.execute("INSERT INTO NOTE (Body) VALUES (?1)", [text])
            .unwrap();
    }
    drop(conn);

    let output = dir.join("dump.sql");
    dump(&source, &output, &DumpOptions::default()).unwrap();
    let script = fs::read_to_string(&output).unwrap();

    let target = Connection::open(dir.join("target.db")).unwrap();
    target.execute_batch(ddl).unwrap();
    target.execute_batch(&script).unwrap();

    (script, target)
}

fn bodies(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("SELECT Body FROM NOTE ORDER BY Id").unwrap();
    let rows = stmt.query_map([], |row| row.get::<_, String>(0)).unwrap();
    rows.collect::<Result<Vec<_>, _>>().unwrap()
}

// ============================================================================
// Value Literal Escaping Tests
// ============================================================================

#[test]
fn test_injection_payloads_reload_as_data() {
    let dir = tempfile::tempdir().unwrap();
    let payloads = [
        "'); DROP TABLE NOTE; --",
        "x', 'y",
        "''''",
        "O'Brien's \"quoted\" note",
        "trailing quote'",
    ];

    let (script, target) = dump_and_reload(
        dir.path(),
        "CREATE TABLE NOTE (Id INTEGER PRIMARY KEY, Body TEXT NOT NULL);",
        &payloads,
    );

    assert_eq!(script.lines().count(), payloads.len());
    assert_eq!(bodies(&target), payloads);
}

#[test]
fn test_every_quote_is_doubled() {
    for text in ["'", "a'b'c", "''", "no quotes"] {
        let literal = String::from_utf8(converter::value_to_literal(
            &rusqlite::types::Value::Text(text.to_string()),
        ))
        .unwrap();
        let inner = &literal[1..literal.len() - 1];

        assert!(literal.starts_with('\'') && literal.ends_with('\''));
        assert_eq!(inner.matches('\'').count(), text.matches('\'').count() * 2);
        assert_eq!(inner.replace("''", "'"), text);
    }
}

#[test]
fn test_null_text_is_not_confused_with_null() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.db");
    let conn = Connection::open(&source).unwrap();
    conn.execute_batch(
        "CREATE TABLE NOTE (Id INTEGER PRIMARY KEY, Body TEXT);
         INSERT INTO NOTE VALUES (1, 'NULL');
         INSERT INTO NOTE VALUES (2, NULL);",
    )
    .unwrap();
    drop(conn);

    let output = dir.path().join("dump.sql");
    dump(&source, &output, &DumpOptions::default()).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("VALUES('1','NULL');"));
    assert!(text.contains("VALUES('2',NULL);"));
}

#[test]
fn test_non_utf8_text_is_written_byte_exact() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.db");
    let conn = Connection::open(&source).unwrap();
    conn.execute_batch(
        "CREATE TABLE NOTE (Id INTEGER PRIMARY KEY, Body TEXT);
         INSERT INTO NOTE VALUES (1, CAST(X'C328' AS TEXT));
         INSERT INTO NOTE VALUES (2, CAST(X'FF27FE' AS TEXT));",
    )
    .unwrap();
    let stored: Vec<u8> = conn
        .query_row("SELECT CAST(Body AS BLOB) FROM NOTE WHERE Id = 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(stored, vec![0xC3, 0x28]);
    drop(conn);

    let output = dir.path().join("dump.sql");
    dump(&source, &output, &DumpOptions::default()).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(b"INSERT INTO NOTE (Id, Body) VALUES('1','\xC3\x28');\n");
    expected.extend_from_slice(b"INSERT INTO NOTE (Id, Body) VALUES('2','\xFF''\xFE');\n");
    assert_eq!(fs::read(&output).unwrap(), expected);
}

// ============================================================================
// Identifier Handling Tests
// ============================================================================

#[test]
fn test_keyword_table_names_are_quoted_in_internal_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE \"group\" (\"order\" INTEGER, \"from\" TEXT);
         INSERT INTO \"group\" VALUES (1, 'x');",
    )
    .unwrap();

    let schema = reader::table_schema(&conn, "group").unwrap();
    let count = reader::for_each_row(&conn, &schema, |values| {
        assert_eq!(values.len(), 2);
        Ok(())
    })
    .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_hostile_table_name_is_not_executed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hostile.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE users (id INTEGER); INSERT INTO users VALUES (1);")
        .unwrap();

    let result = reader::table_columns(&conn, "users\"); DROP TABLE users; --");
    assert!(matches!(result, Err(DumpError::Schema { .. })));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

// ============================================================================
// Source Path Tests
// ============================================================================

#[test]
fn test_nonexistent_paths_are_rejected() {
    for path in [
        "/nonexistent/path/database.db",
        "../../../nonexistent/secret.db",
        "~/definitely-not-here.db",
    ] {
        let result = sqlite::validate_sqlite_path(Path::new(path));
        assert!(
            matches!(result, Err(DumpError::Connection { .. })),
            "Missing path should be rejected: {}",
            path
        );
    }
}

#[test]
fn test_directory_instead_of_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = sqlite::open_sqlite(dir.path());
    assert!(
        matches!(result, Err(DumpError::Connection { .. })),
        "Directory should be rejected as SQLite file"
    );
}

#[test]
fn test_error_messages_name_the_path() {
    let err = sqlite::open_sqlite(Path::new("/nonexistent/HealthTracker.db")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/HealthTracker.db"));
}
