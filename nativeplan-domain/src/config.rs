use nativeplan_types::capability::Capability;

/// Knowledge the resolver needs about the dependency ecosystem.
///
/// All patterns are globs (`*`, `?`) matched against `group:artifact`, except
/// toggle patterns which match toggle names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Runtime database drivers that satisfy a persistence layer.
    pub driver_patterns: Vec<String>,

    /// Dependencies whose presence means the build has a persistence layer.
    pub persistence_markers: Vec<String>,

    pub exclusive_groups: Vec<ExclusiveGroup>,

    pub toggle_requirements: Vec<ToggleRequirement>,
}

/// A set of dependencies of which at most one may be declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveGroup {
    pub name: String,
    pub members: Vec<String>,
}

impl ExclusiveGroup {
    pub fn new(name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Enabled toggles matching `pattern` need `capability` from some plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequirement {
    pub pattern: String,
    pub capability: Capability,
}

const DEFAULT_DRIVERS: &[&str] = &[
    "com.h2database:h2",
    "org.xerial:sqlite-jdbc",
    "org.postgresql:postgresql",
    "com.mysql:mysql-connector-j",
    "mysql:mysql-connector-java",
    "org.mariadb.jdbc:mariadb-java-client",
    "com.oracle.database.jdbc:ojdbc*",
    "com.microsoft.sqlserver:mssql-jdbc",
    "org.hsqldb:hsqldb",
    "org.apache.derby:derby",
];

const DEFAULT_PERSISTENCE_MARKERS: &[&str] = &[
    "org.springframework.boot:spring-boot-starter-data-jpa",
    "org.springframework.boot:spring-boot-starter-jdbc",
    "org.springframework.data:spring-data-jpa",
    "org.hibernate.orm:hibernate-core",
    "org.hibernate:hibernate-core",
];

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            driver_patterns: DEFAULT_DRIVERS.iter().map(|s| s.to_string()).collect(),
            persistence_markers: DEFAULT_PERSISTENCE_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclusive_groups: vec![ExclusiveGroup::new(
                "tracing-bridge",
                &[
                    "io.micrometer:micrometer-tracing-bridge-brave",
                    "io.micrometer:micrometer-tracing-bridge-otel",
                ],
            )],
            toggle_requirements: vec![
                ToggleRequirement {
                    pattern: "hibernate.enhancement.*".to_string(),
                    capability: Capability::BytecodeEnhancement,
                },
                ToggleRequirement {
                    pattern: "native.*".to_string(),
                    capability: Capability::NativeImage,
                },
            ],
        }
    }
}

impl ResolverConfig {
    pub fn is_driver(&self, identity: &str) -> bool {
        any_match(&self.driver_patterns, identity)
    }

    pub fn is_persistence_marker(&self, identity: &str) -> bool {
        any_match(&self.persistence_markers, identity)
    }

    /// Append patterns that are not already present, keeping order.
    pub fn extend_drivers<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.driver_patterns, patterns);
    }

    pub fn extend_persistence_markers<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.persistence_markers, patterns);
    }
}

fn extend_unique<I, S>(target: &mut Vec<String>, patterns: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for p in patterns {
        let p = p.into();
        if !target.contains(&p) {
            target.push(p);
        }
    }
}

fn any_match(patterns: &[String], text: &str) -> bool {
    patterns.iter().any(|p| glob_match(p, text))
}

pub(crate) fn glob_match(pat: &str, text: &str) -> bool {
    let p = pat.as_bytes();
    let t = text.as_bytes();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == b'*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                b'*' => dp[i - 1][j] || dp[i][j - 1],
                b'?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_match_handles_star_and_question() {
        assert!(glob_match("a*b", "ab"));
        assert!(glob_match("a*b", "acb"));
        assert!(!glob_match("a?b", "ab"));
        assert!(glob_match("a?b", "acb"));
        assert!(glob_match(
            "com.oracle.database.jdbc:ojdbc*",
            "com.oracle.database.jdbc:ojdbc11"
        ));
        assert!(!glob_match("hibernate.enhancement.*", "native.jfr"));
    }

    #[test]
    fn default_config_knows_h2_and_sqlite() {
        let cfg = ResolverConfig::default();
        assert!(cfg.is_driver("com.h2database:h2"));
        assert!(cfg.is_driver("org.xerial:sqlite-jdbc"));
        assert!(!cfg.is_driver("org.projectlombok:lombok"));
        assert!(cfg.is_persistence_marker("org.springframework.boot:spring-boot-starter-data-jpa"));
    }

    #[test]
    fn extend_drivers_skips_duplicates() {
        let mut cfg = ResolverConfig::default();
        let before = cfg.driver_patterns.len();
        cfg.extend_drivers(["com.h2database:h2", "io.r2dbc:r2dbc-h2"]);
        assert_eq!(cfg.driver_patterns.len(), before + 1);
        assert!(cfg.is_driver("io.r2dbc:r2dbc-h2"));
    }
}
