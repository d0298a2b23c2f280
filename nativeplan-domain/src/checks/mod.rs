use crate::config::ResolverConfig;
use crate::error::{codes, ResolutionError};
use nativeplan_types::capability::Capability;
use nativeplan_types::descriptor::BuildDescriptor;

mod coordinates;
mod driver;
mod exclusive;
mod scopes;
mod toggles;
mod toolchain;

/// Everything a check may look at. Checks never mutate the descriptor.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub descriptor: &'a BuildDescriptor,
    pub config: &'a ResolverConfig,
    pub capabilities: &'a [Capability],
}

impl CheckContext<'_> {
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

pub trait Check {
    fn id(&self) -> &'static str;

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), ResolutionError>;
}

/// Static description of a builtin check, for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckMeta {
    pub id: &'static str,
    pub title: &'static str,
    pub codes: &'static [&'static str],
}

/// Builtin checks in evaluation order. The first failure wins.
pub fn builtin_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(coordinates::CoordinateCheck),
        Box::new(scopes::ScopeCheck),
        Box::new(exclusive::ExclusiveGroupCheck),
        Box::new(toolchain::ToolchainCheck),
        Box::new(driver::PersistenceDriverCheck),
        Box::new(toggles::ToggleCheck),
    ]
}

pub fn builtin_check_metas() -> Vec<CheckMeta> {
    vec![
        CheckMeta {
            id: coordinates::CoordinateCheck::ID,
            title: "Coordinates are well formed and versioned",
            codes: &[codes::MALFORMED_COORDINATE],
        },
        CheckMeta {
            id: scopes::ScopeCheck::ID,
            title: "Each coordinate has one consistent scope",
            codes: &[codes::DUPLICATE_DECLARATION, codes::CONFLICTING_SCOPE],
        },
        CheckMeta {
            id: exclusive::ExclusiveGroupCheck::ID,
            title: "Mutually exclusive dependencies are not combined",
            codes: &[codes::EXCLUSIVE_CAPABILITY],
        },
        CheckMeta {
            id: toolchain::ToolchainCheck::ID,
            title: "Toolchain vendor supports the language version and native image",
            codes: &[codes::UNSUPPORTED_TOOLCHAIN],
        },
        CheckMeta {
            id: driver::PersistenceDriverCheck::ID,
            title: "Persistence layer has a runtime-only database driver",
            codes: &[codes::MISSING_DRIVER],
        },
        CheckMeta {
            id: toggles::ToggleCheck::ID,
            title: "Feature toggles are unique and backed by a plugin",
            codes: &[codes::DUPLICATE_TOGGLE, codes::TOGGLE_REQUIRES_PLUGIN],
        },
    ]
}
