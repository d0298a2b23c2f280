use serde::{Deserialize, Serialize};
use std::fmt;

/// A build ability contributed by a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    JavaCompile,
    BootPackaging,
    ManagedVersions,
    NativeImage,
    BytecodeEnhancement,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::JavaCompile => "java_compile",
            Capability::BootPackaging => "boot_packaging",
            Capability::ManagedVersions => "managed_versions",
            Capability::NativeImage => "native_image",
            Capability::BytecodeEnhancement => "bytecode_enhancement",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plugin applied to the build, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginDeclaration {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PluginDeclaration {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}
