use crate::checks::{Check, CheckContext};
use crate::error::ResolutionError;
use nativeplan_types::capability::Capability;
use nativeplan_types::coordinate::Coordinate;

pub struct CoordinateCheck;

impl CoordinateCheck {
    pub const ID: &'static str = "coordinates";
}

impl Check for CoordinateCheck {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), ResolutionError> {
        for bom in &ctx.descriptor.boms {
            let reason = segment_problem(bom).or_else(|| match bom.version.as_deref() {
                None => Some("bill-of-materials imports must pin a version".to_string()),
                Some(v) => version_problem(v),
            });
            if let Some(reason) = reason {
                return Err(malformed(bom, "boms", reason));
            }
        }

        let managed = ctx.has(Capability::ManagedVersions);
        for decl in &ctx.descriptor.dependencies {
            let c = &decl.coordinate;
            let reason = segment_problem(c).or_else(|| match c.version.as_deref() {
                None if !managed => Some(
                    "version omitted and no bill-of-materials manages it".to_string(),
                ),
                None => None,
                Some(v) => version_problem(v),
            });
            if let Some(reason) = reason {
                return Err(malformed(c, &format!("scope {}", decl.scope), reason));
            }
        }
        Ok(())
    }
}

fn malformed(c: &Coordinate, location: &str, reason: String) -> ResolutionError {
    ResolutionError::MalformedCoordinate {
        coordinate: c.to_string(),
        location: location.to_string(),
        reason,
    }
}

fn segment_problem(c: &Coordinate) -> Option<String> {
    for (name, value) in [("group", &c.group), ("artifact", &c.artifact)] {
        if value.is_empty() {
            return Some(format!("empty {name}"));
        }
        if value.contains(':') || value.chars().any(char::is_whitespace) {
            return Some(format!("{name} '{value}' contains ':' or whitespace"));
        }
    }
    None
}

fn version_problem(version: &str) -> Option<String> {
    if version.is_empty() {
        Some("empty version".to_string())
    } else if version.contains(':') || version.chars().any(char::is_whitespace) {
        Some(format!("version '{version}' contains ':' or whitespace"))
    } else {
        None
    }
}
