// ABOUTME: Exports SQLite table data as one INSERT statement per row
// ABOUTME: Skips excluded tables and streams rows straight to the output writer

use crate::error::{DumpError, Result};
use crate::filters::ExclusionSet;
use crate::sqlite::{converter, open_sqlite, reader};
use rusqlite::Connection;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Options controlling which tables are dumped and in what order
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    pub exclusions: ExclusionSet,
    /// Emit tables sorted by name instead of in catalog order
    pub sort_tables: bool,
}

/// What a dump run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Dumped tables with the number of statements written for each
    pub tables: Vec<(String, usize)>,
    /// Tables present in the catalog but skipped by the exclusion set
    pub skipped: Vec<String>,
}

impl DumpSummary {
    pub fn rows_written(&self) -> usize {
        self.tables.iter().map(|(_, rows)| rows).sum()
    }

    pub fn rows_for(&self, table: &str) -> Option<usize> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, rows)| *rows)
    }
}

/// Dumps the tables of one open database
pub struct TableDumper<'a> {
    conn: &'a Connection,
    options: &'a DumpOptions,
}

impl<'a> TableDumper<'a> {
    pub fn new(conn: &'a Connection, options: &'a DumpOptions) -> Self {
        Self { conn, options }
    }

    /// Tables from the catalog in the order they will be visited
    pub fn catalog_tables(&self) -> Result<Vec<String>> {
        let mut tables = reader::list_tables(self.conn)?;
        if self.options.sort_tables {
            tables.sort();
        }
        Ok(tables)
    }

    /// Write every eligible row to `writer`
    ///
    /// `output` only labels I/O errors. Nothing is flushed here; the caller
    /// owns the writer.
    pub fn dump_to<W: Write>(&self, writer: &mut W, output: &Path) -> Result<DumpSummary> {
        let mut summary = DumpSummary::default();

        for table in self.catalog_tables()? {
            if self.options.exclusions.is_excluded(&table) {
                tracing::debug!("Skipping excluded table '{}'", table);
                summary.skipped.push(table);
                continue;
            }

            let rows = self.dump_table(&table, writer, output)?;
            tracing::info!("Dumped {} rows from table '{}'", rows, table);
            summary.tables.push((table, rows));
        }

        Ok(summary)
    }

    fn dump_table<W: Write>(&self, table: &str, writer: &mut W, output: &Path) -> Result<usize> {
        let schema = reader::table_schema(self.conn, table)?;
        let columns = converter::join_columns(&schema.columns);

        reader::for_each_row(self.conn, &schema, |values| {
            let mut stmt = converter::format_insert_refs(table, &columns, values.iter().copied());
            stmt.push(b'\n');
            writer.write_all(&stmt).map_err(|e| DumpError::io(output, e))
        })
    }
}

/// Dump the database at `source` into a new file at `output`
///
/// The output file is created or truncated. On failure everything written
/// so far is flushed and left in place; the source connection and the file
/// are released on every path.
pub fn dump(source: &Path, output: &Path, options: &DumpOptions) -> Result<DumpSummary> {
    tracing::info!("Database file: {}", source.display());
    tracing::info!("Dump file:     {}", output.display());

    let conn = open_sqlite(source)?;
    let file = File::create(output).map_err(|e| DumpError::io(output, e))?;
    let mut writer = BufWriter::new(file);

    let result = TableDumper::new(&conn, options).dump_to(&mut writer, output);
    let flushed = writer.flush().map_err(|e| DumpError::io(output, e));

    let summary = result?;
    flushed?;

    tracing::info!(
        "Wrote {} INSERT statements from {} tables ({} excluded)",
        summary.rows_written(),
        summary.tables.len(),
        summary.skipped.len()
    );

    Ok(summary)
}
