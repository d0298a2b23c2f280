//! Rendering helpers (markdown) for human-readable artifacts.

use nativeplan_types::coordinate::Coordinate;
use nativeplan_types::plan::BuildPlan;
use nativeplan_types::scope::Scope;

pub fn render_plan_md(plan: &BuildPlan) -> String {
    let mut out = String::new();
    out.push_str("# nativeplan plan\n\n");
    if let Some(title) = project_title(plan) {
        out.push_str(&format!("- Project: `{}`\n", title));
    }
    out.push_str(&format!("- Plan id: `{}`\n", plan.plan_id));
    out.push_str(&format!(
        "- Toolchain: {} {}\n",
        plan.toolchain.vendor, plan.toolchain.language_version
    ));
    out.push_str(&format!(
        "- Dependencies: {} (managed {})\n",
        plan.summary.dependencies_total, plan.summary.managed_total
    ));
    let per_scope: Vec<String> = Scope::ALL
        .iter()
        .map(|s| format!("{} {}", s, plan.summary.by_scope.get(*s)))
        .collect();
    out.push_str(&format!("- By scope: {}\n", per_scope.join(", ")));
    out.push_str(&format!(
        "- Native image: {}\n\n",
        if plan.summary.native { "yes" } else { "no" }
    ));

    out.push_str("## Dependencies\n\n");
    if plan.dependencies.is_empty() {
        out.push_str("_No dependencies declared._\n\n");
    } else {
        out.push_str("| # | Scope | Coordinate | Version |\n");
        out.push_str("|---|-------|------------|---------|\n");
        for (i, d) in plan.dependencies.iter().enumerate() {
            let version = match &d.coordinate.version {
                Some(v) => v.clone(),
                None if d.managed => "managed".to_string(),
                None => "-".to_string(),
            };
            out.push_str(&format!(
                "| {} | `{}` | `{}` | {} |\n",
                i + 1,
                d.scope,
                d.coordinate.identity(),
                version
            ));
        }
        out.push('\n');
    }

    out.push_str("## Classpaths\n\n");
    let cp = &plan.classpaths;
    for (name, entries) in [
        ("compile", &cp.compile),
        ("runtime", &cp.runtime),
        ("annotation_processor", &cp.annotation_processor),
        ("test_compile", &cp.test_compile),
        ("test_runtime", &cp.test_runtime),
    ] {
        out.push_str(&format!("- **{}**: {}\n", name, coordinate_list(entries)));
    }
    out.push('\n');

    if let Some(native) = &plan.native {
        out.push_str("## Native image\n\n");
        out.push_str(&format!("- Binary: `{}`\n", native.binary_name));
        out.push_str(&format!("- Flags: `{}`\n\n", native.flags.join(" ")));
    }

    out.push_str("## Capabilities\n\n");
    if plan.capabilities.is_empty() {
        out.push_str("_None._\n");
    } else {
        for c in &plan.capabilities {
            out.push_str(&format!("- `{}`\n", c));
        }
    }
    out.push('\n');

    if !plan.toggles.is_empty() {
        out.push_str("## Toggles\n\n");
        for t in &plan.toggles {
            out.push_str(&format!("- `{}`\n", t));
        }
        out.push('\n');
    }

    out
}

/// Single-line summary printed after a plan is written.
pub fn render_summary_line(variant: &str, plan: &BuildPlan) -> String {
    let native = match &plan.native {
        Some(n) => format!(", native `{}`", n.binary_name),
        None => String::new(),
    };
    format!(
        "{}: {} dependencies ({} managed), {} capabilities{}",
        variant,
        plan.summary.dependencies_total,
        plan.summary.managed_total,
        plan.capabilities.len(),
        native
    )
}

fn project_title(plan: &BuildPlan) -> Option<String> {
    let p = &plan.project;
    let name = p.name.as_deref().or(p.group.as_deref())?;
    Some(match &p.version {
        Some(v) => format!("{name} {v}"),
        None => name.to_string(),
    })
}

fn coordinate_list(entries: &[Coordinate]) -> String {
    if entries.is_empty() {
        return "_empty_".to_string();
    }
    entries
        .iter()
        .map(|c| format!("`{}`", c.identity()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativeplan_types::capability::Capability;
    use nativeplan_types::descriptor::ProjectInfo;
    use nativeplan_types::plan::{NativePlan, PlannedDependency};
    use nativeplan_types::toolchain::{ToolchainSpec, Vendor};
    use pretty_assertions::assert_eq;

    fn sample_plan() -> BuildPlan {
        let mut plan = BuildPlan::new(
            ProjectInfo {
                name: None,
                group: Some("com.example.graal".to_string()),
                version: Some("0.0.1-SNAPSHOT".to_string()),
            },
            ToolchainSpec {
                language_version: 21,
                vendor: Vendor::Graalvm,
            },
        );
        plan.plan_id = "fixed-id".to_string();
        plan.capabilities = vec![Capability::ManagedVersions, Capability::NativeImage];
        plan.dependencies = vec![
            PlannedDependency {
                coordinate: Coordinate::new("org.springframework.boot", "spring-boot-starter-web"),
                scope: Scope::Compile,
                managed: true,
            },
            PlannedDependency {
                coordinate: Coordinate::parse("com.h2database:h2:2.2.224"),
                scope: Scope::RuntimeOnly,
                managed: false,
            },
        ];
        plan.classpaths.runtime = plan
            .dependencies
            .iter()
            .map(|d| d.coordinate.clone())
            .collect();
        plan.native = Some(NativePlan {
            binary_name: "main".to_string(),
            build_args: vec!["--enable-monitoring".to_string()],
            flags: vec![
                "--enable-monitoring".to_string(),
                "-o".to_string(),
                "main".to_string(),
            ],
        });
        plan.summary.dependencies_total = 2;
        plan.summary.managed_total = 1;
        plan.summary.by_scope.increment(Scope::Compile);
        plan.summary.by_scope.increment(Scope::RuntimeOnly);
        plan.summary.native = true;
        plan
    }

    #[test]
    fn plan_md_lists_dependencies_in_plan_order() {
        let md = render_plan_md(&sample_plan());
        let web = md.find("spring-boot-starter-web").expect("web row");
        let h2 = md.find("com.h2database:h2").expect("h2 row");
        assert!(web < h2);
        assert!(md.contains("| 1 | `compile` | `org.springframework.boot:spring-boot-starter-web` | managed |"));
        assert!(md.contains("| 2 | `runtime_only` | `com.h2database:h2` | 2.2.224 |"));
    }

    #[test]
    fn plan_md_shows_header_and_native_flags() {
        let md = render_plan_md(&sample_plan());
        assert!(md.starts_with("# nativeplan plan\n\n- Project: `com.example.graal 0.0.1-SNAPSHOT`\n"));
        assert!(md.contains("- Toolchain: graalvm 21\n"));
        assert!(md.contains("- Flags: `--enable-monitoring -o main`\n"));
        assert!(md.contains("- `native_image`\n"));
        assert!(md.contains("- **compile**: _empty_\n"));
    }

    #[test]
    fn empty_plan_renders_placeholders() {
        let plan = BuildPlan::new(
            ProjectInfo::default(),
            ToolchainSpec {
                language_version: 17,
                vendor: Vendor::Graalvm,
            },
        );
        let md = render_plan_md(&plan);
        assert!(md.contains("_No dependencies declared._"));
        assert!(md.contains("- Native image: no\n"));
        assert!(!md.contains("## Native image"));
        assert!(!md.contains("## Toggles"));
        assert!(!md.contains("- Project:"));
    }

    #[test]
    fn summary_line_mentions_native_binary() {
        assert_eq!(
            render_summary_line("default", &sample_plan()),
            "default: 2 dependencies (1 managed), 2 capabilities, native `main`"
        );
    }
}
