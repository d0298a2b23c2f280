//! Error explanations for the `nativeplan explain` command.
//!
//! Each resolution error code has a description of what was detected, the
//! check that reports it, and how to fix the descriptor.

use nativeplan_domain::codes;

/// Information about one resolution error code.
#[derive(Debug, Clone)]
pub struct ErrorExplanation {
    /// Stable code (e.g., "conflicting_scope").
    pub code: &'static str,
    /// Variant name as it appears in logs (e.g., "ConflictingScope").
    pub name: &'static str,
    pub title: &'static str,
    /// Id of the check that reports this error.
    pub check: &'static str,
    pub description: &'static str,
    pub remediation: &'static str,
}

/// Registry of all error explanations, in check order.
pub static ERROR_REGISTRY: &[ErrorExplanation] = &[
    ErrorExplanation {
        code: codes::MALFORMED_COORDINATE,
        name: "MalformedCoordinate",
        title: "Malformed Coordinate",
        check: "coordinates",
        description: r#"A dependency or bill-of-materials coordinate is not of the form
`group:artifact[:version]`.

Group and artifact must be non-empty and free of whitespace. A version may be
omitted only when a bill-of-materials manages it, which means the
`io.spring.dependency-management` plugin is applied or `boms` is non-empty.
Bill-of-materials imports themselves must always pin a version."#,
        remediation: r#"Fix the coordinate string in the descriptor:
    coordinate = "com.h2database:h2"            # managed version
    coordinate = "com.h2database:h2:2.2.224"    # pinned version

If the version is meant to be managed, apply the dependency-management plugin:
    [[plugins]]
    id = "io.spring.dependency-management""#,
    },
    ErrorExplanation {
        code: codes::DUPLICATE_DECLARATION,
        name: "DuplicateDeclaration",
        title: "Duplicate Declaration",
        check: "scopes",
        description: r#"The same `group:artifact` is declared twice in one scope.

Versions are not part of a coordinate's identity, so `a:b:1.0` and `a:b:2.0`
in the same scope count as a duplicate."#,
        remediation: r#"Remove one of the declarations. If two versions were intended, keep the
one the build should actually use."#,
    },
    ErrorExplanation {
        code: codes::CONFLICTING_SCOPE,
        name: "ConflictingScope",
        title: "Conflicting Scope",
        check: "scopes",
        description: r#"A coordinate is declared in two mutually exclusive scopes.

`compile`, `compile_only` and `runtime_only` each place a dependency on a
different part of the main classpath, so a coordinate may appear in at most one
of them. Pairing any of them with `annotation_processor` or `test` is allowed,
which is how lombok is declared as both `compile_only` and
`annotation_processor`."#,
        remediation: r#"Keep the declaration in the scope the dependency is needed in:
    - database drivers: runtime_only
    - compile-time annotations: compile_only
    - everything needed at both compile and run time: compile"#,
    },
    ErrorExplanation {
        code: codes::EXCLUSIVE_CAPABILITY,
        name: "ExclusiveCapability",
        title: "Exclusive Capability",
        check: "exclusive-groups",
        description: r#"Two dependencies from a mutually exclusive group are declared.

The builtin `tracing-bridge` group allows only one of
`micrometer-tracing-bridge-brave` and `micrometer-tracing-bridge-otel`. More
groups can be declared in `nativeplan-config.toml`."#,
        remediation: r#"Remove all but one member of the group. The error names the second member
found in declaration order."#,
    },
    ErrorExplanation {
        code: codes::UNSUPPORTED_TOOLCHAIN,
        name: "UnsupportedToolchain",
        title: "Unsupported Toolchain",
        check: "toolchain",
        description: r#"The toolchain vendor cannot build this descriptor.

Either the vendor does not ship the requested language version, or native
compilation is requested (a `[native]` section or the
`org.graalvm.buildtools.native` plugin) and the vendor is not GraalVM.

Supported language versions:
    graalvm                                   17 to 25
    oracle, adoptium, azul, amazon, ibm_semeru 8 to 25
    microsoft                                 11 to 25"#,
        remediation: r#"Switch the toolchain to GraalVM for native builds:
    [toolchain]
    language_version = 21
    vendor = "graalvm"

Or drop the `[native]` section and the native plugin for a JVM-only build."#,
    },
    ErrorExplanation {
        code: codes::MISSING_DRIVER,
        name: "MissingDriver",
        title: "Missing Database Driver",
        check: "persistence-driver",
        description: r#"The build has a persistence layer but no database driver on the runtime
classpath.

A persistence layer is detected from a marker dependency such as
`spring-boot-starter-data-jpa` or `hibernate-core`, or from the
`org.hibernate.orm` plugin. A driver declared in a scope other than
`runtime_only` does not count and is listed in the message."#,
        remediation: r#"Declare at least one driver as runtime_only:
    [[dependencies]]
    coordinate = "com.h2database:h2"
    scope = "runtime_only"

Drivers not known to nativeplan can be registered with `--driver` or under
`[resolver] drivers` in nativeplan-config.toml."#,
    },
    ErrorExplanation {
        code: codes::DUPLICATE_TOGGLE,
        name: "DuplicateToggle",
        title: "Duplicate Feature Toggle",
        check: "toggles",
        description: r#"A feature toggle name appears more than once in `[[toggles]]`, so its
final value would depend on declaration order."#,
        remediation: "Keep a single `[[toggles]]` entry per name.",
    },
    ErrorExplanation {
        code: codes::TOGGLE_REQUIRES_PLUGIN,
        name: "ToggleRequiresPlugin",
        title: "Toggle Requires Plugin",
        check: "toggles",
        description: r#"An enabled feature toggle needs a capability no declared plugin provides.

`hibernate.enhancement.*` toggles need bytecode enhancement from the
`org.hibernate.orm` plugin. `native.*` toggles need the
`org.graalvm.buildtools.native` plugin. Disabled toggles are not checked."#,
        remediation: r#"Apply the plugin providing the capability, or set `enabled = false` on the
toggle."#,
    },
];

/// Look up an explanation by code or variant name, ignoring case and
/// accepting hyphens for underscores.
pub fn lookup_error(query: &str) -> Option<&'static ErrorExplanation> {
    let normalized = query.trim().to_lowercase().replace('-', "_");
    let compact = normalized.replace('_', "");

    ERROR_REGISTRY.iter().find(|e| {
        e.code == normalized || e.name.to_lowercase() == compact
    })
}

pub fn list_error_codes() -> Vec<&'static str> {
    ERROR_REGISTRY.iter().map(|e| e.code).collect()
}
