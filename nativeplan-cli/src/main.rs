mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fs_err as fs;
use nativeplan_descriptor::{DEFAULT_VARIANT, DESCRIPTOR_FILE_NAME, LoadedDescriptor};
use nativeplan_domain::{ResolutionError, Resolver, builtin_check_metas};
use nativeplan_render::{render_plan_md, render_summary_line};
use nativeplan_types::plan::BuildPlan;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "nativeplan",
    version,
    about = "Deterministic build-plan resolver for GraalVM native-image builds."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a build descriptor into plan.json and plan.md.
    Resolve(ResolveArgs),
    /// Explain a resolution error code and how to fix it.
    Explain(ExplainArgs),
    /// List the checks run during resolution, in order.
    ListChecks(ListChecksArgs),
}

#[derive(Debug, Parser)]
struct ResolveArgs {
    /// Descriptor file (default: ./nativeplan.toml).
    #[arg(long, conflicts_with = "dir")]
    descriptor: Option<Utf8PathBuf>,

    /// Resolve every `*.nativeplan.toml` variant in this directory.
    #[arg(long)]
    dir: Option<Utf8PathBuf>,

    /// Output directory (default: target/nativeplan; variants get a subdirectory).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Extra runtime driver pattern (`group:artifact`, globs allowed).
    #[arg(long = "driver")]
    drivers: Vec<String>,

    /// Extra persistence layer marker pattern.
    #[arg(long = "persistence-marker")]
    persistence_markers: Vec<String>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Error code or name to explain (e.g., "conflicting_scope", "MissingDriver").
    code: String,
}

#[derive(Debug, Parser)]
struct ListChecksArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            eprintln!("error: {:#}", e);
            if e.downcast_ref::<ResolutionError>().is_some() {
                // The descriptor itself has to change.
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Explain(args) => cmd_explain(args),
        Command::ListChecks(args) => cmd_list_checks(args),
    }
}

/// One resolved variant and where its artifacts went.
struct Written {
    variant: String,
    out_dir: Utf8PathBuf,
    plan: BuildPlan,
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let (config_dir, variants) = match &args.dir {
        Some(dir) => {
            let variants = nativeplan_descriptor::discover_variants(dir)
                .with_context(|| format!("discover descriptors in {}", dir))?;
            if variants.is_empty() {
                anyhow::bail!("no {} or *.nativeplan.toml found in {}", DESCRIPTOR_FILE_NAME, dir);
            }
            (dir.clone(), variants)
        }
        None => {
            let path = args
                .descriptor
                .clone()
                .unwrap_or_else(|| Utf8PathBuf::from(DESCRIPTOR_FILE_NAME));
            let descriptor = nativeplan_descriptor::load_descriptor(&path)?;
            let dir = parent_dir(&path);
            let loaded = LoadedDescriptor {
                path,
                variant: DEFAULT_VARIANT.to_string(),
                descriptor: Ok(descriptor),
            };
            (dir, vec![loaded])
        }
    };

    let file_config = config::load_or_default(&config_dir)
        .context("load nativeplan-config.toml config")?;
    let resolver = Resolver::new(
        ConfigMerger::new(file_config).merge_resolve_args(&args.drivers, &args.persistence_markers),
    );
    let merged = resolver.config();
    debug!(
        drivers = merged.driver_patterns.len(),
        markers = merged.persistence_markers.len(),
        groups = merged.exclusive_groups.len(),
        "merged resolver config"
    );

    let base_out = args
        .out_dir
        .clone()
        .unwrap_or_else(|| Utf8PathBuf::from("target").join("nativeplan"));
    let per_variant_dirs = args.dir.is_some();

    let mut written = Vec::new();
    let mut first_failure: Option<anyhow::Error> = None;

    for loaded in variants {
        let out_dir = if per_variant_dirs {
            base_out.join(&loaded.variant)
        } else {
            base_out.clone()
        };

        let result = loaded
            .descriptor
            .map_err(anyhow::Error::new)
            .and_then(|d| resolver.resolve(&d).map_err(anyhow::Error::new))
            .with_context(|| format!("variant '{}' ({})", loaded.variant, loaded.path));

        match result {
            Ok(plan) => {
                write_plan(&out_dir, &plan)?;
                written.push(Written {
                    variant: loaded.variant,
                    out_dir,
                    plan,
                });
            }
            Err(e) => {
                // Keep resolving the other variants; report the first failure.
                warn!("{:#}", e);
                first_failure.get_or_insert(e);
            }
        }
    }

    print_written(&written, args.format)?;

    match first_failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn parent_dir(path: &Utf8Path) -> Utf8PathBuf {
    match path.parent() {
        Some(p) if !p.as_str().is_empty() => p.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    }
}

fn write_plan(out_dir: &Utf8Path, plan: &BuildPlan) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir))?;
    write_json(&out_dir.join("plan.json"), plan)?;
    fs::write(out_dir.join("plan.md"), render_plan_md(plan))?;
    info!("wrote plan to {}", out_dir);
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn print_written(written: &[Written], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for w in written {
                println!("{} -> {}", render_summary_line(&w.variant, &w.plan), w.out_dir);
            }
        }
        OutputFormat::Json => {
            let items: Vec<_> = written
                .iter()
                .map(|w| {
                    serde_json::json!({
                        "variant": w.variant,
                        "plan_id": w.plan.plan_id,
                        "out_dir": w.out_dir,
                        "dependencies_total": w.plan.summary.dependencies_total,
                        "managed_total": w.plan.summary.managed_total,
                        "native": w.plan.summary.native,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{list_error_codes, lookup_error};

    let Some(entry) = lookup_error(&args.code) else {
        let available = list_error_codes().join(", ");
        anyhow::bail!(
            "Unknown error code: '{}'\n\nAvailable codes: {}",
            args.code,
            available
        );
    };

    println!("================================================================================");
    println!("ERROR: {}", entry.title);
    println!("================================================================================");
    println!();
    println!("Code:   {}", entry.code);
    println!("Name:   {}", entry.name);
    println!("Check:  {}", entry.check);
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", entry.description);
    println!();

    println!("REMEDIATION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", entry.remediation);
    println!();

    Ok(())
}

fn cmd_list_checks(args: ListChecksArgs) -> anyhow::Result<()> {
    let metas = builtin_check_metas();
    match args.format {
        OutputFormat::Text => {
            println!("Checks, in evaluation order:\n");
            println!("  {:<20} {:<46} TITLE", "ID", "CODES");
            println!("  {:<20} {:<46} -----", "--", "-----");
            for m in &metas {
                println!("  {:<20} {:<46} {}", m.id, m.codes.join(", "), m.title);
            }
            println!();
            println!("Use 'nativeplan explain <code>' for details.");
        }
        OutputFormat::Json => {
            let checks: Vec<_> = metas
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "id": m.id,
                        "title": m.title,
                        "codes": m.codes,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&checks)?);
        }
    }
    Ok(())
}
