use crate::checks::{Check, CheckContext};
use crate::config::glob_match;
use crate::error::ResolutionError;

pub struct ExclusiveGroupCheck;

impl ExclusiveGroupCheck {
    pub const ID: &'static str = "exclusive-groups";
}

impl Check for ExclusiveGroupCheck {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), ResolutionError> {
        for group in &ctx.config.exclusive_groups {
            let mut found: Vec<String> = Vec::new();
            for decl in &ctx.descriptor.dependencies {
                let identity = decl.coordinate.identity();
                if found.contains(&identity) {
                    continue;
                }
                if group.members.iter().any(|m| glob_match(m, &identity)) {
                    found.push(identity);
                }
            }

            if let [first, second, ..] = found.as_slice() {
                return Err(ResolutionError::ExclusiveCapability {
                    group: group.name.clone(),
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        }
        Ok(())
    }
}
