use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::{Pattern, glob};
use nativeplan_types::descriptor::BuildDescriptor;
use thiserror::Error;
use tracing::debug;

/// File name of the default descriptor in a directory.
pub const DESCRIPTOR_FILE_NAME: &str = "nativeplan.toml";

/// Suffix of named variant descriptors, e.g. `sqlite.nativeplan.toml`.
pub const VARIANT_SUFFIX: &str = ".nativeplan.toml";

/// Variant name given to `nativeplan.toml`.
pub const DEFAULT_VARIANT: &str = "default";

#[derive(Debug, Clone)]
pub struct LoadedDescriptor {
    pub path: Utf8PathBuf,
    pub variant: String,
    pub descriptor: Result<BuildDescriptor, DescriptorLoadError>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("toml parse error: {message}")]
    Toml { message: String },

    #[error("variant error: {message}")]
    Variant { message: String },
}

pub fn parse_descriptor(contents: &str) -> anyhow::Result<BuildDescriptor> {
    let descriptor: BuildDescriptor = toml::from_str(contents).context("invalid descriptor TOML")?;
    Ok(descriptor)
}

pub fn load_descriptor(path: &Utf8Path) -> anyhow::Result<BuildDescriptor> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    parse_descriptor(&contents).with_context(|| format!("parse descriptor {}", path))
}

/// Find every descriptor variant in `dir`, sorted by path.
///
/// Variant names must be unique and non-empty. Entries breaking that rule
/// carry a [`DescriptorLoadError::Variant`] instead of a descriptor, so no two
/// plans ever share an output directory.
pub fn discover_variants(dir: &Utf8Path) -> anyhow::Result<Vec<LoadedDescriptor>> {
    // The directory itself may contain glob metacharacters.
    let pattern = format!("{}/*{VARIANT_SUFFIX}", Pattern::escape(dir.as_str()));

    debug!(pattern = %pattern, "scanning for descriptor variants");

    let mut paths: Vec<Utf8PathBuf> = Vec::new();
    for entry in glob(&pattern).context("glob *.nativeplan.toml")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        paths.push(Utf8PathBuf::from(path));
    }

    let default = dir.join(DESCRIPTOR_FILE_NAME);
    if default.is_file() {
        paths.push(default);
    }

    let mut out: Vec<LoadedDescriptor> = paths
        .into_iter()
        .map(|path| match variant_name(&path) {
            Some(variant) => {
                let descriptor = read_tolerant(&path);
                LoadedDescriptor {
                    path,
                    variant,
                    descriptor,
                }
            }
            None => LoadedDescriptor {
                variant: path.file_name().unwrap_or_default().to_string(),
                descriptor: Err(DescriptorLoadError::Variant {
                    message: format!("{path}: empty variant name before '{VARIANT_SUFFIX}'"),
                }),
                path,
            },
        })
        .collect();

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    reject_duplicate_variants(&mut out);
    Ok(out)
}

/// Every entry sharing its variant name with another is turned into an error.
fn reject_duplicate_variants(entries: &mut [LoadedDescriptor]) {
    let names: Vec<String> = entries.iter().map(|e| e.variant.clone()).collect();
    for entry in entries.iter_mut() {
        let count = names.iter().filter(|n| **n == entry.variant).count();
        if count > 1 {
            entry.descriptor = Err(DescriptorLoadError::Variant {
                message: format!(
                    "{}: variant '{}' is defined by {} files",
                    entry.path, entry.variant, count
                ),
            });
        }
    }
}

fn read_tolerant(path: &Utf8Path) -> Result<BuildDescriptor, DescriptorLoadError> {
    match fs::read_to_string(path) {
        Ok(s) => toml::from_str::<BuildDescriptor>(&s).map_err(|e| DescriptorLoadError::Toml {
            message: e.to_string(),
        }),
        Err(e) => Err(DescriptorLoadError::Io {
            message: e.to_string(),
        }),
    }
}

/// `None` for `.nativeplan.toml`, which names no variant.
fn variant_name(path: &Utf8Path) -> Option<String> {
    let file = path.file_name().unwrap_or_default();
    if file == DESCRIPTOR_FILE_NAME {
        return Some(DEFAULT_VARIANT.to_string());
    }
    match file.strip_suffix(VARIANT_SUFFIX) {
        Some("") => None,
        Some(name) => Some(name.to_string()),
        None => Some(DEFAULT_VARIANT.to_string()),
    }
}
