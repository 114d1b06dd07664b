// ABOUTME: CLI entry point for sqlite-table-dump
// ABOUTME: Parses arguments, resolves exclusions, and runs the dump

use clap::Parser;
use sqlite_table_dump::config::{self, CliOverrides};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlite-table-dump")]
#[command(
    about = "Dump SQLite table data as INSERT statements, skipping migration-seeded tables",
    long_about = None
)]
struct Cli {
    /// SQLite database to read
    source: PathBuf,
    /// File to write the INSERT statements to (created or truncated)
    output: PathBuf,
    /// TOML file with exclude_tables, extra_exclude_tables and sort_tables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Replace the exclusion list with these tables (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude_tables: Option<Vec<String>>,
    /// Start from an empty exclusion list instead of the built-in one
    #[arg(long)]
    no_default_exclusions: bool,
    /// Emit tables in name order instead of catalog order
    #[arg(long)]
    sort_tables: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging - default to INFO level if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_config = cli
        .config
        .as_deref()
        .map(config::load_dump_config_from_file)
        .transpose()?;

    let options = config::resolve_options(
        file_config,
        CliOverrides {
            exclude_tables: cli.exclude_tables,
            no_default_exclusions: cli.no_default_exclusions,
            sort_tables: cli.sort_tables,
        },
    );

    tracing::debug!(
        "Excluding tables: {:?}",
        options.exclusions.iter().collect::<Vec<_>>()
    );

    sqlite_table_dump::dump(&cli.source, &cli.output, &options)?;

    Ok(())
}
