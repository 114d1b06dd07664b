// ABOUTME: SQLite catalog enumeration and table data reading
// ABOUTME: Lists user tables, introspects column order, and streams rows

use super::quote_ident;
use crate::error::{DumpError, Result};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

/// A table name plus its columns in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<String>,
}

/// List all user tables in a SQLite database
///
/// Queries `sqlite_master` for user-created tables, excluding the
/// `sqlite_*` tables SQLite maintains itself (`sqlite_sequence`,
/// `sqlite_stat1`, ...).
///
/// Tables come back in whatever order the catalog yields them. Callers
/// wanting a stable order sort the result.
///
/// # Examples
///
/// ```no_run
/// # use sqlite_table_dump::sqlite::{open_sqlite, reader::list_tables};
/// # fn example() -> sqlite_table_dump::error::Result<()> {
/// let conn = open_sqlite("database.db".as_ref())?;
/// for table in list_tables(&conn)? {
///     println!("Table: {}", table);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    tracing::debug!("Listing tables from SQLite database");

    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master \
             WHERE type='table' \
             AND name NOT LIKE 'sqlite_%'",
        )
        .map_err(DumpError::catalog)?;

    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(DumpError::catalog)?
        .collect::<Result<Vec<String>, _>>()
        .map_err(DumpError::catalog)?;

    tracing::info!("Found {} user tables in SQLite database", tables.len());

    Ok(tables)
}

/// Introspect the column names of a table in declaration order
///
/// Uses `PRAGMA table_info`. A table with no visible columns is reported
/// as a schema error since SQLite returns nothing at all for a table that
/// does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let query = format!("PRAGMA table_info({})", quote_ident(table));

    let mut stmt = conn
        .prepare(&query)
        .map_err(|e| DumpError::table(table, e))?;

    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| DumpError::table(table, e))?
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| DumpError::table(table, e))?;

    if columns.is_empty() {
        return Err(DumpError::table(
            table,
            rusqlite::Error::QueryReturnedNoRows,
        ));
    }

    tracing::debug!(
        "Table '{}' has {} columns: {:?}",
        table,
        columns.len(),
        columns
    );

    Ok(columns)
}

/// Introspect a table into a [`TableSchema`]
pub fn table_schema(conn: &Connection, table: &str) -> Result<TableSchema> {
    Ok(TableSchema {
        name: table.to_string(),
        columns: table_columns(conn, table)?,
    })
}

/// Stream every row of a table through `visit`
///
/// The query projects exactly `schema.columns` in that order, so the
/// values handed to `visit` line up positionally with the column list.
/// Rows are never collected; each one is borrowed straight from the
/// statement. Errors returned by `visit` abort the scan and propagate
/// unchanged.
///
/// Returns the number of rows visited.
pub fn for_each_row<F>(conn: &Connection, schema: &TableSchema, mut visit: F) -> Result<usize>
where
    F: FnMut(&[ValueRef<'_>]) -> Result<()>,
{
    let table = schema.name.as_str();
    let projection = schema
        .columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!("SELECT {} FROM {}", projection, quote_ident(table));

    let mut stmt = conn
        .prepare(&query)
        .map_err(|e| DumpError::table(table, e))?;
    let column_count = stmt.column_count();

    let mut rows = stmt.query([]).map_err(|e| DumpError::table(table, e))?;
    let mut count = 0usize;

    while let Some(row) = rows.next().map_err(|e| DumpError::table(table, e))? {
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            values.push(row.get_ref(idx).map_err(|e| DumpError::table(table, e))?);
        }
        visit(&values)?;
        count += 1;
    }

    Ok(count)
}
