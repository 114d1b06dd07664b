// ABOUTME: SQLite source database access for the table dump
// ABOUTME: Provides path validation and read-only connections

pub mod converter;
pub mod reader;

use crate::error::{DumpError, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// Validate the path of a source database
///
/// Checks that the path is non-empty, exists and names a regular file.
/// The file name itself is not constrained: migration tooling produces
/// databases with arbitrary extensions.
///
/// # Returns
///
/// Canonicalized absolute path if valid, `DumpError::Connection` otherwise
pub fn validate_sqlite_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(DumpError::connection(
            path,
            "database path cannot be empty",
            None,
        ));
    }

    // Canonicalize to resolve symlinks and relative paths
    // This also validates that the file exists
    let canonical = path.canonicalize().map_err(|e| {
        DumpError::connection(
            path,
            format!("file may not exist or may not be readable ({})", e),
            None,
        )
    })?;

    if !canonical.is_file() {
        return Err(DumpError::connection(
            path,
            "not a regular file (may be a directory)",
            None,
        ));
    }

    tracing::debug!("Validated SQLite path: {}", canonical.display());

    Ok(canonical)
}

/// Open a SQLite database in read-only mode
///
/// The dump never writes to its source, so the connection is opened with
/// `SQLITE_OPEN_READ_ONLY`. A trivial query is run straight away so that a
/// corrupt or non-database file fails here rather than halfway through the
/// dump.
///
/// # Examples
///
/// ```no_run
/// # use sqlite_table_dump::sqlite::open_sqlite;
/// # fn example() -> sqlite_table_dump::error::Result<()> {
/// let conn = open_sqlite("HealthTracker.db".as_ref())?;
/// # Ok(())
/// # }
/// ```
pub fn open_sqlite(path: &Path) -> Result<Connection> {
    let canonical = validate_sqlite_path(path)?;

    tracing::info!("Opening SQLite database: {}", canonical.display());

    let conn = Connection::open_with_flags(
        &canonical,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| DumpError::connection(&canonical, "could not open database", Some(e)))?;

    // Verify we can query the database
    let version: String = conn
        .query_row("SELECT sqlite_version()", [], |row| row.get(0))
        .map_err(|e| {
            DumpError::connection(
                &canonical,
                "database may be corrupted or not a SQLite file",
                Some(e),
            )
        })?;

    // sqlite_version() touches no pages, so force a read of the catalog too
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(|e| {
        DumpError::connection(
            &canonical,
            "database may be corrupted or not a SQLite file",
            Some(e),
        )
    })?;

    tracing::debug!("Opened SQLite {} database", version);

    Ok(conn)
}

/// Quote an identifier for use inside a query sent to SQLite
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
