//! Domain logic: turn a build descriptor into a deterministic build plan.
//!
//! This crate owns *whether* a descriptor is consistent and *what* the plan
//! looks like. It performs no I/O; loading descriptors is the job of
//! `nativeplan-descriptor` and executing plans belongs to an external build
//! engine.

mod capabilities;
mod checks;
mod config;
mod error;
mod resolver;

pub use capabilities::{enabled_capabilities, plugin_capabilities};
pub use checks::{builtin_check_metas, builtin_checks, Check, CheckContext, CheckMeta};
pub use config::{ExclusiveGroup, ResolverConfig, ToggleRequirement};
pub use error::{codes, ResolutionError};
pub use resolver::{resolve, resolve_declarations, Resolver};
