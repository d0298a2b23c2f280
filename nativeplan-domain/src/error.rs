use nativeplan_types::capability::Capability;
use nativeplan_types::scope::Scope;
use nativeplan_types::toolchain::Vendor;
use thiserror::Error;

/// Stable machine-readable tokens, one per [`ResolutionError`] variant.
pub mod codes {
    pub const MALFORMED_COORDINATE: &str = "malformed_coordinate";
    pub const DUPLICATE_DECLARATION: &str = "duplicate_declaration";
    pub const CONFLICTING_SCOPE: &str = "conflicting_scope";
    pub const EXCLUSIVE_CAPABILITY: &str = "exclusive_capability";
    pub const UNSUPPORTED_TOOLCHAIN: &str = "unsupported_toolchain";
    pub const MISSING_DRIVER: &str = "missing_driver";
    pub const DUPLICATE_TOGGLE: &str = "duplicate_toggle";
    pub const TOGGLE_REQUIRES_PLUGIN: &str = "toggle_requires_plugin";

    pub const ALL: &[&str] = &[
        MALFORMED_COORDINATE,
        DUPLICATE_DECLARATION,
        CONFLICTING_SCOPE,
        EXCLUSIVE_CAPABILITY,
        UNSUPPORTED_TOOLCHAIN,
        MISSING_DRIVER,
        DUPLICATE_TOGGLE,
        TOGGLE_REQUIRES_PLUGIN,
    ];
}

/// Why a descriptor could not be resolved into a plan.
///
/// Resolution is deterministic, so none of these are retryable: the same
/// descriptor fails the same way until it is corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("malformed coordinate '{coordinate}' in {location}: {reason}")]
    MalformedCoordinate {
        coordinate: String,
        location: String,
        reason: String,
    },

    #[error("'{coordinate}' is declared more than once in scope {scope}")]
    DuplicateDeclaration { coordinate: String, scope: Scope },

    #[error("'{coordinate}' is declared in mutually exclusive scopes {first} and {second}")]
    ConflictingScope {
        coordinate: String,
        first: Scope,
        second: Scope,
    },

    #[error("at most one member of '{group}' may be declared, found '{first}' and '{second}'")]
    ExclusiveCapability {
        group: String,
        first: String,
        second: String,
    },

    #[error("unsupported toolchain {vendor} {language_version}: {reason}")]
    UnsupportedToolchain {
        vendor: Vendor,
        language_version: u32,
        reason: String,
    },

    #[error(
        "persistence layer '{required_by}' needs a runtime_only database driver{}",
        misplaced_suffix(.misplaced)
    )]
    MissingDriver {
        required_by: String,
        /// Drivers found in scopes other than `runtime_only`.
        misplaced: Vec<String>,
    },

    #[error("feature toggle '{name}' is declared more than once")]
    DuplicateToggle { name: String },

    #[error("feature toggle '{toggle}' requires a plugin providing {capability}")]
    ToggleRequiresPlugin {
        toggle: String,
        capability: Capability,
    },
}

fn misplaced_suffix(misplaced: &[String]) -> String {
    if misplaced.is_empty() {
        String::new()
    } else {
        format!(" (declared outside runtime_only: {})", misplaced.join(", "))
    }
}

impl ResolutionError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolutionError::MalformedCoordinate { .. } => codes::MALFORMED_COORDINATE,
            ResolutionError::DuplicateDeclaration { .. } => codes::DUPLICATE_DECLARATION,
            ResolutionError::ConflictingScope { .. } => codes::CONFLICTING_SCOPE,
            ResolutionError::ExclusiveCapability { .. } => codes::EXCLUSIVE_CAPABILITY,
            ResolutionError::UnsupportedToolchain { .. } => codes::UNSUPPORTED_TOOLCHAIN,
            ResolutionError::MissingDriver { .. } => codes::MISSING_DRIVER,
            ResolutionError::DuplicateToggle { .. } => codes::DUPLICATE_TOGGLE,
            ResolutionError::ToggleRequiresPlugin { .. } => codes::TOGGLE_REQUIRES_PLUGIN,
        }
    }

    /// The declaration a user has to edit to fix the descriptor.
    pub fn offending(&self) -> String {
        match self {
            ResolutionError::MalformedCoordinate { coordinate, .. }
            | ResolutionError::DuplicateDeclaration { coordinate, .. }
            | ResolutionError::ConflictingScope { coordinate, .. } => coordinate.clone(),
            ResolutionError::ExclusiveCapability { second, .. } => second.clone(),
            ResolutionError::UnsupportedToolchain {
                vendor,
                language_version,
                ..
            } => format!("toolchain {vendor} {language_version}"),
            ResolutionError::MissingDriver { required_by, .. } => required_by.clone(),
            ResolutionError::DuplicateToggle { name } => name.clone(),
            ResolutionError::ToggleRequiresPlugin { toggle, .. } => toggle.clone(),
        }
    }
}
