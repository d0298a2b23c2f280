use crate::checks::{Check, CheckContext};
use crate::error::ResolutionError;
use nativeplan_types::capability::Capability;

pub struct ToolchainCheck;

impl ToolchainCheck {
    pub const ID: &'static str = "toolchain";
}

impl Check for ToolchainCheck {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), ResolutionError> {
        let toolchain = ctx.descriptor.toolchain;
        let vendor = toolchain.vendor;

        if !vendor.supports(toolchain.language_version) {
            let range = vendor.supported_versions();
            return Err(ResolutionError::UnsupportedToolchain {
                vendor,
                language_version: toolchain.language_version,
                reason: format!(
                    "{vendor} ships language versions {} to {}",
                    range.start(),
                    range.end()
                ),
            });
        }

        let native_requested =
            ctx.descriptor.native.is_some() || ctx.has(Capability::NativeImage);
        if native_requested && !vendor.ships_native_image() {
            return Err(ResolutionError::UnsupportedToolchain {
                vendor,
                language_version: toolchain.language_version,
                reason: "native-image compilation requires a GraalVM toolchain".to_string(),
            });
        }
        Ok(())
    }
}
