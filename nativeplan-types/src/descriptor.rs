use crate::capability::PluginDeclaration;
use crate::coordinate::Coordinate;
use crate::scope::Scope;
use crate::toolchain::ToolchainSpec;
use serde::{Deserialize, Serialize};

/// The declarative input to a single resolution.
///
/// A descriptor is built once per invocation and never mutated; resolving the
/// same descriptor twice yields the same plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildDescriptor {
    #[serde(default)]
    pub project: ProjectInfo,

    #[serde(default)]
    pub repositories: Vec<String>,

    #[serde(default)]
    pub plugins: Vec<PluginDeclaration>,

    /// Explicit bill-of-materials imports.
    #[serde(default)]
    pub boms: Vec<Coordinate>,

    #[serde(default)]
    pub dependencies: Vec<DependencyDeclaration>,

    pub toolchain: ToolchainSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<NativeImageConfig>,

    #[serde(default)]
    pub toggles: Vec<FeatureToggle>,

    #[serde(default)]
    pub test: TestSpec,

    /// The compile-only classpath inherits annotation-processor entries.
    #[serde(default = "default_true")]
    pub compile_only_extends_annotation_processor: bool,
}

fn default_true() -> bool {
    true
}

impl BuildDescriptor {
    pub fn new(toolchain: ToolchainSpec) -> Self {
        Self {
            project: ProjectInfo::default(),
            repositories: vec![],
            plugins: vec![],
            boms: vec![],
            dependencies: vec![],
            toolchain,
            native: None,
            toggles: vec![],
            test: TestSpec::default(),
            compile_only_extends_annotation_processor: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyDeclaration {
    pub coordinate: Coordinate,
    pub scope: Scope,
}

impl DependencyDeclaration {
    pub fn new(coordinate: impl Into<Coordinate>, scope: Scope) -> Self {
        Self {
            coordinate: coordinate.into(),
            scope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NativeImageConfig {
    #[serde(default = "default_binary_name")]
    pub binary_name: String,

    /// Passed through in order; some flags are positionally significant.
    #[serde(default)]
    pub build_args: Vec<String>,
}

fn default_binary_name() -> String {
    "main".to_string()
}

impl Default for NativeImageConfig {
    fn default() -> Self {
        Self {
            binary_name: default_binary_name(),
            build_args: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureToggle {
    pub name: String,
    pub enabled: bool,
}

impl FeatureToggle {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestSpec {
    /// Test runner platform, e.g. `junit-platform`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}
