// ABOUTME: SQLite value to SQL literal conversion
// ABOUTME: Builds one INSERT statement per row with quote-doubling escapes

use rusqlite::types::{Value, ValueRef};

/// Render a single SQLite value as a SQL literal
///
/// - NULL → `NULL` (unquoted)
/// - INTEGER → `'42'`
/// - REAL → `'100.5'`, integral reals keep a trailing `.0`
/// - TEXT → `'O''Brien'`, every single quote doubled
/// - BLOB → `X'48656C6C6F'`
///
/// Numbers are quoted like text. SQLite's type affinity restores them on
/// reload, and one quoting rule for everything keeps escaping trivially
/// correct.
///
/// TEXT is copied byte for byte. SQLite does not enforce UTF-8, so a stored
/// value that is not valid UTF-8 comes out exactly as stored rather than
/// with replacement characters.
///
/// # Examples
///
/// ```
/// # use sqlite_table_dump::sqlite::converter::sqlite_value_to_literal;
/// use rusqlite::types::ValueRef;
/// assert_eq!(sqlite_value_to_literal(ValueRef::Integer(1)), b"'1'");
/// assert_eq!(sqlite_value_to_literal(ValueRef::Text(b"O'Brien")), b"'O''Brien'");
/// assert_eq!(sqlite_value_to_literal(ValueRef::Null), b"NULL");
/// ```
pub fn sqlite_value_to_literal(value: ValueRef<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    push_literal(&mut out, value);
    out
}

/// Owned-value variant of [`sqlite_value_to_literal`]
pub fn value_to_literal(value: &Value) -> Vec<u8> {
    sqlite_value_to_literal(ValueRef::from(value))
}

fn push_literal(out: &mut Vec<u8>, value: ValueRef<'_>) {
    match value {
        ValueRef::Null => out.extend_from_slice(b"NULL"),
        ValueRef::Integer(i) => push_quoted(out, i.to_string().as_bytes()),
        ValueRef::Real(f) => push_quoted(out, format_real(f).as_bytes()),
        ValueRef::Text(bytes) => push_quoted(out, bytes),
        ValueRef::Blob(bytes) => {
            out.extend_from_slice(b"X'");
            out.extend_from_slice(hex::encode_upper(bytes).as_bytes());
            out.push(b'\'');
        }
    }
}

fn push_quoted(out: &mut Vec<u8>, text: &[u8]) {
    out.reserve(text.len() + 2);
    out.push(b'\'');
    for &b in text {
        if b == b'\'' {
            out.extend_from_slice(b"''");
        } else {
            out.push(b);
        }
    }
    out.push(b'\'');
}

/// Format a REAL so that it still reads as a real number
///
/// Rust prints `3.0_f64` as `3`; the trailing `.0` is put back so the dump
/// distinguishes integral reals from integers. Large and tiny magnitudes
/// are written out in full positional form (`1e20` becomes
/// `100000000000000000000.0`), which SQLite parses back to the same value.
pub fn format_real(f: f64) -> String {
    let s = f.to_string();
    if f.is_finite() && !s.contains(['.', 'e', 'E']) {
        format!("{}.0", s)
    } else {
        s
    }
}

/// Build an `INSERT` statement for one row
///
/// `columns` is the pre-joined column list (`id, name`) so the same text is
/// reused for every row of a table. The result has no trailing newline.
///
/// # Examples
///
/// ```
/// # use sqlite_table_dump::sqlite::converter::format_insert;
/// use rusqlite::types::Value;
/// let stmt = format_insert(
///     "USERS",
///     "id, name",
///     &[Value::Integer(2), Value::Null],
/// );
/// assert_eq!(stmt, b"INSERT INTO USERS (id, name) VALUES('2',NULL);");
/// ```
pub fn format_insert(table: &str, columns: &str, values: &[Value]) -> Vec<u8> {
    format_insert_refs(table, columns, values.iter().map(ValueRef::from))
}

/// Build an `INSERT` statement from borrowed values straight off a row
pub fn format_insert_refs<'a>(
    table: &str,
    columns: &str,
    values: impl IntoIterator<Item = ValueRef<'a>>,
) -> Vec<u8> {
    let header = format!("INSERT INTO {} ({}) VALUES(", table, columns);
    let mut stmt = Vec::with_capacity(header.len() + 64);
    stmt.extend_from_slice(header.as_bytes());
    for (idx, value) in values.into_iter().enumerate() {
        if idx > 0 {
            stmt.push(b',');
        }
        push_literal(&mut stmt, value);
    }
    stmt.extend_from_slice(b");");
    stmt
}

/// Join column names the way they appear in the generated statements
pub fn join_columns<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
