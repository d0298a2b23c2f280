use crate::capabilities::enabled_capabilities;
use crate::checks::{self, CheckContext};
use crate::config::ResolverConfig;
use crate::error::ResolutionError;
use nativeplan_types::coordinate::Coordinate;
use nativeplan_types::descriptor::{
    BuildDescriptor, DependencyDeclaration, FeatureToggle, NativeImageConfig,
};
use nativeplan_types::plan::{BuildPlan, Classpaths, NativePlan, PlanSummary, PlannedDependency};
use nativeplan_types::scope::Scope;
use nativeplan_types::toolchain::ToolchainSpec;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

pub struct Resolver {
    config: ResolverConfig,
    checks: Vec<Box<dyn checks::Check>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            checks: checks::builtin_checks(),
        }
    }

    pub fn with_checks(config: ResolverConfig, checks: Vec<Box<dyn checks::Check>>) -> Self {
        Self { config, checks }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Validate `descriptor` and assemble its build plan.
    ///
    /// Pure: the same descriptor and config always produce an identical plan,
    /// including its id.
    pub fn resolve(&self, descriptor: &BuildDescriptor) -> Result<BuildPlan, ResolutionError> {
        let capabilities = enabled_capabilities(descriptor);
        let ctx = CheckContext {
            descriptor,
            config: &self.config,
            capabilities: &capabilities,
        };

        for check in &self.checks {
            debug!(check = check.id(), "running check");
            if let Err(err) = check.check(&ctx) {
                debug!(check = check.id(), code = err.code(), "resolution failed");
                return Err(err);
            }
        }

        let mut plan = BuildPlan::new(descriptor.project.clone(), descriptor.toolchain);
        plan.repositories = descriptor.repositories.clone();
        plan.plugins = descriptor.plugins.clone();
        plan.capabilities = capabilities;
        plan.boms = descriptor.boms.clone();
        plan.dependencies = order_dependencies(&descriptor.dependencies);
        plan.classpaths = materialize_classpaths(
            &plan.dependencies,
            descriptor.compile_only_extends_annotation_processor,
        );
        plan.native = descriptor.native.as_ref().map(native_plan);
        plan.toggles = descriptor
            .toggles
            .iter()
            .filter(|t| t.enabled)
            .map(|t| t.name.clone())
            .collect();
        plan.test = descriptor.test.clone();
        plan.summary = summarize(&plan);

        // Deterministic id over everything else in the plan.
        plan.plan_id = deterministic_plan_id(&plan).to_string();

        debug!(
            plan_id = %plan.plan_id,
            dependencies = plan.summary.dependencies_total,
            "resolved build plan"
        );
        Ok(plan)
    }
}

/// Resolve with the default configuration.
pub fn resolve(descriptor: &BuildDescriptor) -> Result<BuildPlan, ResolutionError> {
    Resolver::default().resolve(descriptor)
}

/// Resolve bare declarations without plugins, boms, or project metadata.
///
/// Without a bill-of-materials every declaration must carry a version.
pub fn resolve_declarations(
    declarations: &[DependencyDeclaration],
    toolchain: ToolchainSpec,
    native: Option<&NativeImageConfig>,
    toggles: &[FeatureToggle],
) -> Result<BuildPlan, ResolutionError> {
    let mut descriptor = BuildDescriptor::new(toolchain);
    descriptor.dependencies = declarations.to_vec();
    descriptor.native = native.cloned();
    descriptor.toggles = toggles.to_vec();
    resolve(&descriptor)
}

fn order_dependencies(declarations: &[DependencyDeclaration]) -> Vec<PlannedDependency> {
    let mut out: Vec<PlannedDependency> = declarations
        .iter()
        .map(|d| PlannedDependency {
            coordinate: d.coordinate.clone(),
            scope: d.scope,
            managed: d.coordinate.is_managed(),
        })
        .collect();
    // Stable: declaration order survives within a scope.
    out.sort_by_key(|d| d.scope);
    out
}

fn materialize_classpaths(deps: &[PlannedDependency], extends_processor: bool) -> Classpaths {
    let mut compile_scopes = vec![Scope::Compile, Scope::CompileOnly];
    if extends_processor {
        compile_scopes.push(Scope::AnnotationProcessor);
    }

    Classpaths {
        compile: collect(deps, &compile_scopes),
        runtime: collect(deps, &[Scope::Compile, Scope::RuntimeOnly]),
        annotation_processor: collect(deps, &[Scope::AnnotationProcessor]),
        test_compile: collect(deps, &[Scope::Compile, Scope::Test]),
        test_runtime: collect(deps, &[Scope::Compile, Scope::RuntimeOnly, Scope::Test]),
    }
}

fn collect(deps: &[PlannedDependency], scopes: &[Scope]) -> Vec<Coordinate> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for d in deps.iter().filter(|d| scopes.contains(&d.scope)) {
        let identity = d.coordinate.identity();
        if !seen.contains(&identity) {
            seen.push(identity);
            out.push(d.coordinate.clone());
        }
    }
    out
}

fn native_plan(cfg: &NativeImageConfig) -> NativePlan {
    let mut flags = cfg.build_args.clone();
    flags.push("-o".to_string());
    flags.push(cfg.binary_name.clone());
    NativePlan {
        binary_name: cfg.binary_name.clone(),
        build_args: cfg.build_args.clone(),
        flags,
    }
}

fn summarize(plan: &BuildPlan) -> PlanSummary {
    let mut summary = PlanSummary {
        dependencies_total: plan.dependencies.len() as u64,
        managed_total: plan.dependencies.iter().filter(|d| d.managed).count() as u64,
        native: plan.native.is_some(),
        ..Default::default()
    };
    for d in &plan.dependencies {
        summary.by_scope.increment(d.scope);
    }
    summary
}

fn deterministic_plan_id(plan: &BuildPlan) -> Uuid {
    // Deterministic ID: v5(namespace, sha256(plan body))
    const NAMESPACE: Uuid = Uuid::from_bytes([
        0x6e, 0x61, 0x74, 0x69, 0x76, 0x65, 0x4c, 0x70, 0x8a, 0x6e, 0x2d, 0x31, 0x9f, 0x0c, 0x44,
        0x7b,
    ]);

    let mut body = plan.clone();
    body.plan_id.clear();
    Uuid::new_v5(&NAMESPACE, plan_fingerprint(&body).as_bytes())
}

fn plan_fingerprint(plan: &BuildPlan) -> String {
    // serde_json::Value keeps object keys sorted, which makes this canonical.
    let canonical = serde_json::to_value(plan).unwrap_or_default();
    let s = serde_json::to_string(&canonical).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;
    use nativeplan_types::capability::{Capability, PluginDeclaration};
    use nativeplan_types::toolchain::Vendor;
    use pretty_assertions::assert_eq;

    fn graal_21() -> ToolchainSpec {
        ToolchainSpec {
            language_version: 21,
            vendor: Vendor::Graalvm,
        }
    }

    fn managed(deps: &[(&str, Scope)]) -> BuildDescriptor {
        let mut d = BuildDescriptor::new(graal_21());
        d.plugins = vec![PluginDeclaration::new("io.spring.dependency-management")];
        d.dependencies = deps
            .iter()
            .map(|(c, s)| DependencyDeclaration::new(*c, *s))
            .collect();
        d
    }

    fn identities(coords: &[Coordinate]) -> Vec<String> {
        coords.iter().map(Coordinate::identity).collect()
    }

    #[test]
    fn dependencies_are_ordered_by_scope_then_declaration() {
        let d = managed(&[
            ("t:junit", Scope::Test),
            ("r:h2", Scope::RuntimeOnly),
            ("c:web", Scope::Compile),
            ("r:sqlite", Scope::RuntimeOnly),
            ("c:jpa", Scope::Compile),
        ]);
        let plan = resolve(&d).expect("resolve");
        let order: Vec<_> = plan
            .dependencies
            .iter()
            .map(|p| p.coordinate.identity())
            .collect();
        assert_eq!(order, vec!["c:web", "c:jpa", "r:h2", "r:sqlite", "t:junit"]);
    }

    #[test]
    fn compile_classpath_inherits_annotation_processors() {
        let d = managed(&[
            ("org.projectlombok:lombok", Scope::CompileOnly),
            ("org.projectlombok:lombok", Scope::AnnotationProcessor),
            ("org.mapstruct:mapstruct-processor", Scope::AnnotationProcessor),
        ]);
        let plan = resolve(&d).expect("resolve");
        assert_eq!(
            identities(&plan.classpaths.compile),
            vec!["org.projectlombok:lombok", "org.mapstruct:mapstruct-processor"]
        );
        assert!(plan.classpaths.runtime.is_empty());

        let mut d = d;
        d.compile_only_extends_annotation_processor = false;
        let plan = resolve(&d).expect("resolve");
        assert_eq!(
            identities(&plan.classpaths.compile),
            vec!["org.projectlombok:lombok"]
        );
    }

    #[test]
    fn runtime_classpath_excludes_compile_only() {
        let d = managed(&[
            ("c:web", Scope::Compile),
            ("x:lombok", Scope::CompileOnly),
            ("r:h2", Scope::RuntimeOnly),
            ("t:junit", Scope::Test),
        ]);
        let plan = resolve(&d).expect("resolve");
        assert_eq!(identities(&plan.classpaths.runtime), vec!["c:web", "r:h2"]);
        assert_eq!(
            identities(&plan.classpaths.test_runtime),
            vec!["c:web", "r:h2", "t:junit"]
        );
        assert_eq!(
            identities(&plan.classpaths.test_compile),
            vec!["c:web", "t:junit"]
        );
    }

    #[test]
    fn native_flags_keep_declared_order_and_name_binary() {
        let mut d = managed(&[]);
        d.native = Some(NativeImageConfig {
            binary_name: "jpa-app".to_string(),
            build_args: vec![
                "-H:+AllowVMInspection".to_string(),
                "--enable-monitoring".to_string(),
            ],
        });
        let plan = resolve(&d).expect("resolve");
        let native = plan.native.expect("native");
        assert_eq!(
            native.flags,
            vec!["-H:+AllowVMInspection", "--enable-monitoring", "-o", "jpa-app"]
        );
        assert!(plan.summary.native);
    }

    #[test]
    fn summary_counts_scopes_and_managed() {
        let d = managed(&[
            ("c:web", Scope::Compile),
            ("c:jpa:1.0", Scope::Compile),
            ("r:h2", Scope::RuntimeOnly),
        ]);
        let plan = resolve(&d).expect("resolve");
        assert_eq!(plan.summary.dependencies_total, 3);
        assert_eq!(plan.summary.managed_total, 2);
        assert_eq!(plan.summary.by_scope.compile, 2);
        assert_eq!(plan.summary.by_scope.runtime_only, 1);
        assert!(plan.has_capability(Capability::ManagedVersions));
    }

    #[test]
    fn plan_id_is_stable_and_content_sensitive() {
        let d = managed(&[("c:web", Scope::Compile)]);
        let a = resolve(&d).expect("resolve");
        let b = resolve(&d).expect("resolve");
        assert_eq!(a.plan_id, b.plan_id);
        assert!(!a.plan_id.is_empty());

        let other = managed(&[("c:web", Scope::Test)]);
        let c = resolve(&other).expect("resolve");
        assert_ne!(a.plan_id, c.plan_id);
    }

    #[test]
    fn resolve_declarations_requires_versions() {
        let decls = vec![DependencyDeclaration::new("com.h2database:h2", Scope::RuntimeOnly)];
        let err = resolve_declarations(&decls, graal_21(), None, &[]).expect_err("unmanaged");
        assert_eq!(err.code(), codes::MALFORMED_COORDINATE);

        let decls = vec![DependencyDeclaration::new(
            "com.h2database:h2:2.2.224",
            Scope::RuntimeOnly,
        )];
        let plan = resolve_declarations(&decls, graal_21(), None, &[]).expect("resolve");
        assert_eq!(plan.summary.managed_total, 0);
    }

    #[test]
    fn custom_check_list_is_honoured() {
        let resolver = Resolver::with_checks(ResolverConfig::default(), vec![]);
        let d = BuildDescriptor::new(ToolchainSpec {
            language_version: 4,
            vendor: Vendor::Oracle,
        });
        assert!(resolver.resolve(&d).is_ok());
        assert!(Resolver::default().resolve(&d).is_err());
    }

    #[test]
    fn resolver_exposes_its_config() {
        let mut config = ResolverConfig::default();
        config.extend_drivers(["com.example:acme-jdbc"]);
        let resolver = Resolver::new(config.clone());
        assert_eq!(resolver.config(), &config);
        assert!(resolver.config().is_driver("com.example:acme-jdbc"));
        assert_eq!(Resolver::default().config(), &ResolverConfig::default());
    }

    #[test]
    fn disabled_toggles_are_left_out_of_the_plan() {
        let mut d = managed(&[]);
        d.toggles = vec![
            FeatureToggle::new("custom.on", true),
            FeatureToggle::new("custom.off", false),
        ];
        let plan = resolve(&d).expect("resolve");
        assert_eq!(plan.toggles, vec!["custom.on"]);
    }
}
