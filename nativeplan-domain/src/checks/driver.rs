use crate::capabilities::providing_plugin;
use crate::checks::{Check, CheckContext};
use crate::error::ResolutionError;
use nativeplan_types::capability::Capability;
use nativeplan_types::scope::Scope;

/// A persistence layer needs a database driver on the runtime-only path.
///
/// Drivers stay off the compile classpath so no code depends on them
/// directly; a driver declared in another scope is reported, not accepted.
pub struct PersistenceDriverCheck;

impl PersistenceDriverCheck {
    pub const ID: &'static str = "persistence-driver";
}

impl Check for PersistenceDriverCheck {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), ResolutionError> {
        let deps = &ctx.descriptor.dependencies;

        let required_by = deps
            .iter()
            .map(|d| d.coordinate.identity())
            .find(|id| ctx.config.is_persistence_marker(id))
            .or_else(|| {
                if ctx.has(Capability::BytecodeEnhancement) {
                    providing_plugin(ctx.descriptor, Capability::BytecodeEnhancement)
                        .map(str::to_string)
                } else {
                    None
                }
            });

        let Some(required_by) = required_by else {
            return Ok(());
        };

        let has_runtime_driver = deps.iter().any(|d| {
            d.scope == Scope::RuntimeOnly && ctx.config.is_driver(&d.coordinate.identity())
        });
        if has_runtime_driver {
            return Ok(());
        }

        let mut misplaced: Vec<String> = Vec::new();
        for d in deps {
            let identity = d.coordinate.identity();
            if ctx.config.is_driver(&identity) && !misplaced.contains(&identity) {
                misplaced.push(identity);
            }
        }

        Err(ResolutionError::MissingDriver {
            required_by,
            misplaced,
        })
    }
}
