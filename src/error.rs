// ABOUTME: Error taxonomy for the table dump
// ABOUTME: Separates connection, schema introspection, and output I/O failures

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while dumping a database.
///
/// None of these are recovered locally. A failure aborts the run and any
/// statements written before it stay in the output file.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The source database could not be opened or is not a usable SQLite file
    #[error("failed to open source database '{}': {message}", .path.display())]
    Connection {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Catalog enumeration, column introspection or the row query failed
    #[error("{}", schema_message(.table))]
    Schema {
        table: Option<String>,
        #[source]
        source: rusqlite::Error,
    },

    /// The output could not be created, written or flushed
    #[error("failed to write dump output '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn schema_message(table: &Option<String>) -> String {
    match table {
        Some(table) => format!("failed to read schema or rows of table '{}'", table),
        None => "failed to enumerate tables from the catalog".to_string(),
    }
}

impl DumpError {
    pub(crate) fn connection(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: Option<rusqlite::Error>,
    ) -> Self {
        DumpError::Connection {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    pub(crate) fn catalog(source: rusqlite::Error) -> Self {
        DumpError::Schema {
            table: None,
            source,
        }
    }

    pub(crate) fn table(table: &str, source: rusqlite::Error) -> Self {
        DumpError::Schema {
            table: Some(table.to_string()),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DumpError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = DumpError> = std::result::Result<T, E>;
