use crate::capability::{Capability, PluginDeclaration};
use crate::coordinate::Coordinate;
use crate::descriptor::{ProjectInfo, TestSpec};
use crate::scope::Scope;
use crate::toolchain::ToolchainSpec;
use serde::{Deserialize, Serialize};

/// Resolved, ordered set of dependencies and flags ready for a build engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub schema: String,

    /// Deterministic id derived from the plan body.
    #[serde(default)]
    pub plan_id: String,

    #[serde(default)]
    pub project: ProjectInfo,

    #[serde(default)]
    pub repositories: Vec<String>,

    pub toolchain: ToolchainSpec,

    #[serde(default)]
    pub plugins: Vec<PluginDeclaration>,

    /// Capabilities enabled by the plugins, in first-contributed order.
    #[serde(default)]
    pub capabilities: Vec<Capability>,

    #[serde(default)]
    pub boms: Vec<Coordinate>,

    /// Scope order first, declaration order second.
    #[serde(default)]
    pub dependencies: Vec<PlannedDependency>,

    #[serde(default)]
    pub classpaths: Classpaths,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<NativePlan>,

    /// Names of enabled feature toggles, in declaration order.
    #[serde(default)]
    pub toggles: Vec<String>,

    #[serde(default)]
    pub test: TestSpec,

    pub summary: PlanSummary,
}

impl BuildPlan {
    pub fn new(project: ProjectInfo, toolchain: ToolchainSpec) -> Self {
        Self {
            schema: crate::schema::NATIVEPLAN_PLAN_V1.to_string(),
            plan_id: String::new(),
            project,
            repositories: vec![],
            toolchain,
            plugins: vec![],
            capabilities: vec![],
            boms: vec![],
            dependencies: vec![],
            classpaths: Classpaths::default(),
            native: None,
            toggles: vec![],
            test: TestSpec::default(),
            summary: PlanSummary::default(),
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Dependencies of one scope, in declaration order.
    pub fn dependencies_in(&self, scope: Scope) -> impl Iterator<Item = &PlannedDependency> {
        self.dependencies.iter().filter(move |d| d.scope == scope)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedDependency {
    pub coordinate: Coordinate,
    pub scope: Scope,

    /// Version is supplied by a bill-of-materials.
    #[serde(default)]
    pub managed: bool,
}

/// Materialized classpath views, each a list of coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classpaths {
    #[serde(default)]
    pub compile: Vec<Coordinate>,

    #[serde(default)]
    pub runtime: Vec<Coordinate>,

    #[serde(default)]
    pub annotation_processor: Vec<Coordinate>,

    #[serde(default)]
    pub test_compile: Vec<Coordinate>,

    #[serde(default)]
    pub test_runtime: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativePlan {
    pub binary_name: String,

    /// Build arguments exactly as declared.
    #[serde(default)]
    pub build_args: Vec<String>,

    /// Full flag list handed to `native-image`.
    #[serde(default)]
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub dependencies_total: u64,
    pub managed_total: u64,

    #[serde(default)]
    pub by_scope: ScopeCounts,

    pub native: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeCounts {
    pub compile: u64,
    pub runtime_only: u64,
    pub compile_only: u64,
    pub annotation_processor: u64,
    pub test: u64,
}

impl ScopeCounts {
    pub fn increment(&mut self, scope: Scope) {
        match scope {
            Scope::Compile => self.compile += 1,
            Scope::RuntimeOnly => self.runtime_only += 1,
            Scope::CompileOnly => self.compile_only += 1,
            Scope::AnnotationProcessor => self.annotation_processor += 1,
            Scope::Test => self.test += 1,
        }
    }

    pub fn get(&self, scope: Scope) -> u64 {
        match scope {
            Scope::Compile => self.compile,
            Scope::RuntimeOnly => self.runtime_only,
            Scope::CompileOnly => self.compile_only,
            Scope::AnnotationProcessor => self.annotation_processor,
            Scope::Test => self.test,
        }
    }
}
