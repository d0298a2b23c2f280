//! Configuration file loading for nativeplan.
//!
//! Discovers and loads `nativeplan-config.toml` next to the descriptor.
//! Config entries extend the builtin resolver knowledge; CLI flags extend
//! the config entries.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use nativeplan_domain::{ExclusiveGroup, ResolverConfig};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "nativeplan-config.toml";

/// Top-level configuration from nativeplan-config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NativeplanConfig {
    pub resolver: ResolverSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverSection {
    /// Extra runtime driver patterns (`group:artifact` globs).
    pub drivers: Vec<String>,

    /// Extra persistence layer markers.
    pub persistence_markers: Vec<String>,

    pub exclusive_groups: Vec<ExclusiveGroupEntry>,

    /// Drop the builtin driver and marker lists instead of extending them.
    pub replace_defaults: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExclusiveGroupEntry {
    pub name: String,
    pub members: Vec<String>,
}

/// Discover the nativeplan-config.toml file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<NativeplanConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<NativeplanConfig> {
    let config: NativeplanConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<NativeplanConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(NativeplanConfig::default()),
    }
}

/// Builder for merging the config file with CLI arguments into a
/// [`ResolverConfig`].
pub struct ConfigMerger {
    config: NativeplanConfig,
}

impl ConfigMerger {
    pub fn new(config: NativeplanConfig) -> Self {
        Self { config }
    }

    /// Builtin defaults, then config file entries, then CLI patterns.
    /// Duplicates are dropped and first-seen order is kept.
    pub fn merge_resolve_args(self, cli_drivers: &[String], cli_markers: &[String]) -> ResolverConfig {
        let section = self.config.resolver;
        let mut resolver = ResolverConfig::default();

        if section.replace_defaults {
            resolver.driver_patterns.clear();
            resolver.persistence_markers.clear();
        }
        resolver.extend_drivers(section.drivers);
        resolver.extend_drivers(cli_drivers.iter().cloned());
        resolver.extend_persistence_markers(section.persistence_markers);
        resolver.extend_persistence_markers(cli_markers.iter().cloned());

        for entry in section.exclusive_groups {
            // A config group with a builtin name replaces the builtin members.
            resolver.exclusive_groups.retain(|g| g.name != entry.name);
            resolver.exclusive_groups.push(ExclusiveGroup {
                name: entry.name,
                members: entry.members,
            });
        }
        resolver
    }
}
