// ABOUTME: Table exclusion policy for the dump
// ABOUTME: Names tables a fresh target database already has seeded by its migrations

use std::collections::BTreeSet;

/// Tables seeded by the migrations that create an empty target database.
///
/// Reloading rows for these into a fresh database would hit UNIQUE
/// violations, so they are left out of the dump by default.
pub const DEFAULT_EXCLUDED_TABLES: &[&str] = &[
    "__EFMigrationsHistory",
    "BLOOD_PRESSURE_BAND",
    "BMI_BAND",
    "SPO2_BAND",
];

/// Immutable set of table names skipped by the dump
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    tables: BTreeSet<String>,
}

impl Default for ExclusionSet {
    /// The built-in migration-seeded tables
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_TABLES.iter().copied())
    }
}

impl ExclusionSet {
    /// Creates a set from arbitrary table names
    pub fn new<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: tables
                .into_iter()
                .map(Into::into)
                .map(|t: String| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Creates an empty set (dump everything)
    pub fn empty() -> Self {
        Self {
            tables: BTreeSet::new(),
        }
    }

    /// Returns a new set with `tables` added to this one
    pub fn with_additional<I, S>(&self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extra = Self::new(tables);
        Self {
            tables: self.tables.union(&extra.tables).cloned().collect(),
        }
    }

    /// Determines if a table is skipped
    pub fn is_excluded(&self, table_name: &str) -> bool {
        self.tables.contains(table_name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Excluded table names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(String::as_str)
    }
}
