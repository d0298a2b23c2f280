//! Shared DTOs (schemas-as-code) for the nativeplan workspace.
//!
//! # Design constraints
//! - Descriptor types are deserialized from user-authored TOML.
//! - Plan types are serialized to disk and consumed by build engines.
//! - Prefer adding optional fields over changing semantics.

pub mod capability;
pub mod coordinate;
pub mod descriptor;
pub mod plan;
pub mod scope;
pub mod toolchain;

/// Schema identifiers.
pub mod schema {
    pub const NATIVEPLAN_PLAN_V1: &str = "nativeplan.plan.v1";
}
