use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// JDK distribution vendor requested for the compile toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    #[serde(alias = "graal_vm", alias = "GRAAL_VM")]
    Graalvm,
    Oracle,
    #[serde(alias = "temurin")]
    Adoptium,
    Azul,
    #[serde(alias = "corretto")]
    Amazon,
    Microsoft,
    IbmSemeru,
}

impl Vendor {
    /// Language versions this vendor ships a JDK for.
    pub fn supported_versions(self) -> RangeInclusive<u32> {
        match self {
            Vendor::Graalvm => 17..=25,
            Vendor::Microsoft => 11..=25,
            Vendor::Oracle
            | Vendor::Adoptium
            | Vendor::Azul
            | Vendor::Amazon
            | Vendor::IbmSemeru => 8..=25,
        }
    }

    pub fn supports(self, language_version: u32) -> bool {
        self.supported_versions().contains(&language_version)
    }

    /// Only GraalVM distributions ship the `native-image` compiler.
    pub fn ships_native_image(self) -> bool {
        matches!(self, Vendor::Graalvm)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vendor::Graalvm => "graalvm",
            Vendor::Oracle => "oracle",
            Vendor::Adoptium => "adoptium",
            Vendor::Azul => "azul",
            Vendor::Amazon => "amazon",
            Vendor::Microsoft => "microsoft",
            Vendor::IbmSemeru => "ibm_semeru",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainSpec {
    pub language_version: u32,
    pub vendor: Vendor,
}
