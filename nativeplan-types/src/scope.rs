use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase in which a dependency is made available.
///
/// Variant order is the canonical plan order: dependencies in a resolved plan
/// are grouped by scope in this order, then by declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[serde(alias = "implementation")]
    Compile,
    #[serde(alias = "runtimeOnly", alias = "runtime-only")]
    RuntimeOnly,
    #[serde(alias = "compileOnly", alias = "compile-only")]
    CompileOnly,
    #[serde(alias = "annotationProcessor", alias = "annotation-processor")]
    AnnotationProcessor,
    #[serde(alias = "testImplementation")]
    Test,
}

impl Scope {
    pub const ALL: [Scope; 5] = [
        Scope::Compile,
        Scope::RuntimeOnly,
        Scope::CompileOnly,
        Scope::AnnotationProcessor,
        Scope::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::RuntimeOnly => "runtime_only",
            Scope::CompileOnly => "compile_only",
            Scope::AnnotationProcessor => "annotation_processor",
            Scope::Test => "test",
        }
    }

    /// Whether a coordinate may not be declared in both `self` and `other`.
    ///
    /// Only the three main-classpath scopes exclude each other. Annotation
    /// processors and test dependencies live on separate paths.
    pub fn conflicts_with(self, other: Scope) -> bool {
        self != other && self.is_main_classpath() && other.is_main_classpath()
    }

    fn is_main_classpath(self) -> bool {
        matches!(
            self,
            Scope::Compile | Scope::RuntimeOnly | Scope::CompileOnly
        )
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
