// ABOUTME: Parses optional dump configuration files
// ABOUTME: Resolves exclusions and ordering from TOML, CLI flags, and built-in defaults

use crate::dump::DumpOptions;
use crate::filters::ExclusionSet;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DumpConfig {
    /// Replaces the built-in exclusion list when present
    #[serde(default)]
    pub exclude_tables: Option<Vec<String>>,
    /// Added on top of whatever `exclude_tables` resolves to
    #[serde(default)]
    pub extra_exclude_tables: Vec<String>,
    #[serde(default)]
    pub sort_tables: bool,
}

pub fn load_dump_config_from_file(path: &Path) -> Result<DumpConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let parsed: DumpConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse TOML config at {}", path.display()))?;

    tracing::debug!("Loaded dump config from {}: {:?}", path.display(), parsed);

    Ok(parsed)
}

/// Command-line overrides layered over the config file
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub exclude_tables: Option<Vec<String>>,
    pub no_default_exclusions: bool,
    pub sort_tables: bool,
}

/// Resolve the effective dump options
///
/// Precedence, lowest first: built-in exclusions, `--no-default-exclusions`,
/// config `exclude_tables`, config `extra_exclude_tables`, CLI
/// `--exclude-tables`. Sorting is on if either the config or the CLI asks
/// for it.
pub fn resolve_options(config: Option<DumpConfig>, cli: CliOverrides) -> DumpOptions {
    let config = config.unwrap_or_default();

    let mut exclusions = if cli.no_default_exclusions {
        ExclusionSet::empty()
    } else {
        ExclusionSet::default()
    };

    if let Some(tables) = config.exclude_tables {
        exclusions = ExclusionSet::new(tables);
    }
    if !config.extra_exclude_tables.is_empty() {
        exclusions = exclusions.with_additional(config.extra_exclude_tables);
    }
    if let Some(tables) = cli.exclude_tables {
        exclusions = ExclusionSet::new(tables);
    }

    DumpOptions {
        exclusions,
        sort_tables: cli.sort_tables || config.sort_tables,
    }
}
