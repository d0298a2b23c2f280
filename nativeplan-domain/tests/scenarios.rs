//! End-to-end resolution scenarios for a Spring Boot + JPA native-image build.

use nativeplan_domain::{codes, resolve, resolve_declarations, ResolutionError, Resolver};
use nativeplan_types::capability::{Capability, PluginDeclaration};
use nativeplan_types::descriptor::{
    BuildDescriptor, DependencyDeclaration, FeatureToggle, NativeImageConfig,
};
use nativeplan_types::scope::Scope;
use nativeplan_types::toolchain::{ToolchainSpec, Vendor};
use pretty_assertions::assert_eq;

fn toolchain(vendor: Vendor) -> ToolchainSpec {
    ToolchainSpec {
        language_version: 21,
        vendor,
    }
}

fn jfr_native() -> NativeImageConfig {
    NativeImageConfig {
        binary_name: "main".to_string(),
        build_args: vec![
            "-H:+AllowVMInspection".to_string(),
            "--enable-monitoring".to_string(),
        ],
    }
}

/// The full application descriptor: boot, dependency management, hibernate
/// enhancement, native image, JFR flags.
fn jpa_application() -> BuildDescriptor {
    let mut d = BuildDescriptor::new(toolchain(Vendor::Graalvm));
    d.repositories = vec!["maven-central".to_string()];
    d.plugins = vec![
        PluginDeclaration::new("java"),
        PluginDeclaration::new("org.springframework.boot").with_version("3.2.3"),
        PluginDeclaration::new("io.spring.dependency-management").with_version("1.1.4"),
        PluginDeclaration::new("org.hibernate.orm").with_version("6.4.2.Final"),
        PluginDeclaration::new("org.graalvm.buildtools.native").with_version("0.9.28"),
    ];
    d.dependencies = vec![
        DependencyDeclaration::new(
            "org.springframework.boot:spring-boot-starter-actuator",
            Scope::Compile,
        ),
        DependencyDeclaration::new(
            "org.springframework.boot:spring-boot-starter-data-jpa",
            Scope::Compile,
        ),
        DependencyDeclaration::new("org.springframework.boot:spring-boot-starter-web", Scope::Compile),
        DependencyDeclaration::new("io.micrometer:micrometer-tracing-bridge-brave", Scope::Compile),
        DependencyDeclaration::new("io.micrometer:micrometer-registry-prometheus", Scope::Compile),
        DependencyDeclaration::new("org.projectlombok:lombok", Scope::CompileOnly),
        DependencyDeclaration::new("org.projectlombok:lombok", Scope::AnnotationProcessor),
        DependencyDeclaration::new("com.h2database:h2", Scope::RuntimeOnly),
        DependencyDeclaration::new("org.xerial:sqlite-jdbc", Scope::RuntimeOnly),
        DependencyDeclaration::new("org.springframework.boot:spring-boot-starter-test", Scope::Test),
    ];
    d.native = Some(jfr_native());
    d.toggles = vec![FeatureToggle::new(
        "hibernate.enhancement.association_management",
        true,
    )];
    d
}

#[test]
fn full_application_resolves() {
    let plan = resolve(&jpa_application()).expect("resolve");
    assert_eq!(plan.summary.dependencies_total, 10);
    assert_eq!(plan.summary.managed_total, 10);
    assert_eq!(
        plan.capabilities,
        vec![
            Capability::JavaCompile,
            Capability::BootPackaging,
            Capability::ManagedVersions,
            Capability::BytecodeEnhancement,
            Capability::NativeImage,
        ]
    );
    assert_eq!(
        plan.toggles,
        vec!["hibernate.enhancement.association_management"]
    );
}

#[test]
fn h2_and_sqlite_runtime_drivers_keep_declaration_order() {
    let decls = vec![
        DependencyDeclaration::new("com.h2database:h2:2.2.224", Scope::RuntimeOnly),
        DependencyDeclaration::new("org.xerial:sqlite-jdbc:3.45.1.0", Scope::RuntimeOnly),
    ];
    let plan = resolve_declarations(&decls, toolchain(Vendor::Graalvm), Some(&jfr_native()), &[])
        .expect("resolve");

    let drivers: Vec<_> = plan
        .dependencies_in(Scope::RuntimeOnly)
        .map(|d| d.coordinate.identity())
        .collect();
    assert_eq!(drivers, vec!["com.h2database:h2", "org.xerial:sqlite-jdbc"]);
}

#[test]
fn lombok_in_compile_only_and_annotation_processor_is_not_a_conflict() {
    let plan = resolve(&jpa_application()).expect("resolve");
    let lombok: Vec<_> = plan
        .dependencies
        .iter()
        .filter(|d| d.coordinate.artifact == "lombok")
        .map(|d| d.scope)
        .collect();
    assert_eq!(lombok, vec![Scope::CompileOnly, Scope::AnnotationProcessor]);
}

#[test]
fn non_graalvm_vendor_with_native_args_is_unsupported() {
    let decls = vec![DependencyDeclaration::new(
        "org.springframework.boot:spring-boot-starter-web:3.2.3",
        Scope::Compile,
    )];
    let err = resolve_declarations(&decls, toolchain(Vendor::Adoptium), Some(&jfr_native()), &[])
        .expect_err("non graalvm");
    assert_eq!(err.code(), codes::UNSUPPORTED_TOOLCHAIN);
}

#[test]
fn mutually_exclusive_scopes_name_the_coordinate() {
    let mut d = jpa_application();
    d.dependencies.push(DependencyDeclaration::new(
        "com.h2database:h2",
        Scope::CompileOnly,
    ));
    match resolve(&d) {
        Err(ResolutionError::ConflictingScope { coordinate, .. }) => {
            assert_eq!(coordinate, "com.h2database:h2");
        }
        other => panic!("expected conflicting scope, got {other:?}"),
    }
}

#[test]
fn both_tracing_bridges_are_rejected() {
    let mut d = jpa_application();
    d.dependencies.push(DependencyDeclaration::new(
        "io.micrometer:micrometer-tracing-bridge-otel",
        Scope::Compile,
    ));
    let err = resolve(&d).expect_err("two bridges");
    assert_eq!(err.code(), codes::EXCLUSIVE_CAPABILITY);
    assert_eq!(err.offending(), "io.micrometer:micrometer-tracing-bridge-otel");
}

#[test]
fn dropping_every_driver_is_reported() {
    let mut d = jpa_application();
    d.dependencies.retain(|dep| dep.scope != Scope::RuntimeOnly);
    let err = resolve(&d).expect_err("no driver");
    assert_eq!(err.code(), codes::MISSING_DRIVER);
    assert_eq!(
        err.offending(),
        "org.springframework.boot:spring-boot-starter-data-jpa"
    );
}

#[test]
fn enhancement_toggle_without_hibernate_plugin_fails() {
    let mut d = jpa_application();
    d.plugins.retain(|p| p.id != "org.hibernate.orm");
    let err = resolve(&d).expect_err("no enhancement plugin");
    assert_eq!(err.code(), codes::TOGGLE_REQUIRES_PLUGIN);
}

#[test]
fn variant_without_sqlite_or_jfr_also_resolves() {
    let mut d = jpa_application();
    d.dependencies
        .retain(|dep| dep.coordinate.artifact != "sqlite-jdbc");
    d.native = Some(NativeImageConfig::default());

    let plan = Resolver::default().resolve(&d).expect("resolve");
    assert_eq!(plan.summary.by_scope.runtime_only, 1);
    assert_eq!(
        plan.native.expect("native").flags,
        vec!["-o".to_string(), "main".to_string()]
    );
}
