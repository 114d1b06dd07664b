// ABOUTME: Library module for sqlite-table-dump
// ABOUTME: Exports the dump operation, exclusion policy, and SQLite helpers for the binary and tests

pub mod config;
pub mod dump;
pub mod error;
pub mod filters;
pub mod sqlite;

pub use dump::{dump, DumpOptions, DumpSummary, TableDumper};
pub use error::DumpError;
pub use filters::ExclusionSet;
