use crate::checks::{Check, CheckContext};
use crate::error::ResolutionError;
use nativeplan_types::scope::Scope;
use std::collections::HashMap;

pub struct ScopeCheck;

impl ScopeCheck {
    pub const ID: &'static str = "scopes";
}

impl Check for ScopeCheck {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), ResolutionError> {
        let mut seen: HashMap<String, Vec<Scope>> = HashMap::new();

        // Walk in declaration order so the reported pair is the first one a
        // reader meets in the descriptor.
        for decl in &ctx.descriptor.dependencies {
            let identity = decl.coordinate.identity();
            let scopes = seen.entry(identity.clone()).or_default();

            if scopes.contains(&decl.scope) {
                return Err(ResolutionError::DuplicateDeclaration {
                    coordinate: identity,
                    scope: decl.scope,
                });
            }

            if let Some(first) = scopes.iter().find(|s| s.conflicts_with(decl.scope)) {
                return Err(ResolutionError::ConflictingScope {
                    coordinate: identity,
                    first: *first,
                    second: decl.scope,
                });
            }

            scopes.push(decl.scope);
        }
        Ok(())
    }
}
