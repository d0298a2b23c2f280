use nativeplan_types::capability::Capability;
use nativeplan_types::descriptor::BuildDescriptor;
use tracing::debug;

/// Capabilities a plugin id contributes. Unknown plugins contribute none.
pub fn plugin_capabilities(id: &str) -> &'static [Capability] {
    match id {
        "java" | "java-library" | "application" => &[Capability::JavaCompile],
        "org.springframework.boot" => &[Capability::BootPackaging],
        "io.spring.dependency-management" => &[Capability::ManagedVersions],
        "org.graalvm.buildtools.native" => &[Capability::NativeImage],
        "org.hibernate.orm" => &[Capability::BytecodeEnhancement],
        _ => &[],
    }
}

/// Evaluate the plugin list once, in declaration order.
///
/// A non-empty `boms` list enables managed versions even without the
/// dependency-management plugin.
pub fn enabled_capabilities(descriptor: &BuildDescriptor) -> Vec<Capability> {
    let mut out = Vec::new();
    for plugin in &descriptor.plugins {
        let caps = plugin_capabilities(&plugin.id);
        if caps.is_empty() {
            debug!(plugin = %plugin.id, "plugin contributes no known capability");
        }
        for cap in caps {
            if !out.contains(cap) {
                out.push(*cap);
            }
        }
    }

    if !descriptor.boms.is_empty() && !out.contains(&Capability::ManagedVersions) {
        out.push(Capability::ManagedVersions);
    }
    out
}

/// First declared plugin contributing `capability`.
pub(crate) fn providing_plugin(descriptor: &BuildDescriptor, capability: Capability) -> Option<&str> {
    descriptor
        .plugins
        .iter()
        .find(|p| plugin_capabilities(&p.id).contains(&capability))
        .map(|p| p.id.as_str())
}
