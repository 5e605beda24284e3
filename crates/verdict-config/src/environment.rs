use serde::Deserialize;

/// Variable consulted for the runtime environment name when none is pinned
pub const DEFAULT_ENVIRONMENT_VARIABLE: &str = "APP_ENV";

/// Where the runtime environment name comes from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Process variable read on every payload build
    #[serde(default = "default_variable")]
    pub variable: String,
    /// Fixed environment name; takes precedence over `variable`
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            variable: default_variable(),
            name: None,
        }
    }
}

fn default_variable() -> String {
    DEFAULT_ENVIRONMENT_VARIABLE.to_owned()
}
