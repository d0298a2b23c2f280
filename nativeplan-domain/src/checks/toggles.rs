use crate::checks::{Check, CheckContext};
use crate::config::glob_match;
use crate::error::ResolutionError;
use std::collections::HashSet;

pub struct ToggleCheck;

impl ToggleCheck {
    pub const ID: &'static str = "toggles";
}

impl Check for ToggleCheck {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), ResolutionError> {
        let mut names = HashSet::new();
        for toggle in &ctx.descriptor.toggles {
            if !names.insert(toggle.name.as_str()) {
                return Err(ResolutionError::DuplicateToggle {
                    name: toggle.name.clone(),
                });
            }
        }

        // Disabled toggles never need backing.
        for toggle in ctx.descriptor.toggles.iter().filter(|t| t.enabled) {
            for req in &ctx.config.toggle_requirements {
                if glob_match(&req.pattern, &toggle.name) && !ctx.has(req.capability) {
                    return Err(ResolutionError::ToggleRequiresPlugin {
                        toggle: toggle.name.clone(),
                        capability: req.capability,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::graal_descriptor;
    use crate::config::ResolverConfig;
    use nativeplan_types::capability::Capability;
    use nativeplan_types::descriptor::{BuildDescriptor, FeatureToggle};

    const ASSOC: &str = "hibernate.enhancement.association_management";

    fn run(d: &BuildDescriptor, caps: &[Capability]) -> Result<(), ResolutionError> {
        let cfg = ResolverConfig::default();
        ToggleCheck.check(&CheckContext {
            descriptor: d,
            config: &cfg,
            capabilities: caps,
        })
    }

    #[test]
    fn enhancement_toggle_needs_hibernate_plugin() {
        let mut d = graal_descriptor(&[]);
        d.toggles = vec![FeatureToggle::new(ASSOC, true)];
        assert_eq!(
            run(&d, &[]),
            Err(ResolutionError::ToggleRequiresPlugin {
                toggle: ASSOC.to_string(),
                capability: Capability::BytecodeEnhancement,
            })
        );
        assert!(run(&d, &[Capability::BytecodeEnhancement]).is_ok());
    }

    #[test]
    fn disabled_toggle_needs_nothing() {
        let mut d = graal_descriptor(&[]);
        d.toggles = vec![FeatureToggle::new(ASSOC, false)];
        assert!(run(&d, &[]).is_ok());
    }

    #[test]
    fn duplicate_toggle_names_fail() {
        let mut d = graal_descriptor(&[]);
        d.toggles = vec![
            FeatureToggle::new("custom.flag", true),
            FeatureToggle::new("custom.flag", false),
        ];
        assert_eq!(
            run(&d, &[]),
            Err(ResolutionError::DuplicateToggle {
                name: "custom.flag".to_string(),
            })
        );
    }
}
