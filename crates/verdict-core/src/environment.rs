use std::fmt;
use std::sync::Arc;

use verdict_config::{DEFAULT_ENVIRONMENT_VARIABLE, EnvironmentConfig};

/// Source of the current runtime environment name
///
/// Consulted every time a payload is built, so changes to the underlying
/// value are picked up by the next build.
pub trait Environment: Send + Sync + fmt::Debug {
    fn name(&self) -> Option<String>;
}

/// Reads the environment name from a process variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEnvironment {
    variable: String,
}

impl ProcessEnvironment {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl Default for ProcessEnvironment {
    fn default() -> Self {
        Self::new(DEFAULT_ENVIRONMENT_VARIABLE)
    }
}

impl Environment for ProcessEnvironment {
    fn name(&self) -> Option<String> {
        std::env::var(&self.variable).ok()
    }
}

/// A pinned environment name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedEnvironment(Option<String>);

impl FixedEnvironment {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    /// No environment name at all
    pub const fn unset() -> Self {
        Self(None)
    }
}

impl Environment for FixedEnvironment {
    fn name(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Pinned name if configured, otherwise the configured process variable
pub fn from_config(config: &EnvironmentConfig) -> Arc<dyn Environment> {
    match &config.name {
        Some(name) => Arc::new(FixedEnvironment::new(name.clone())),
        None => Arc::new(ProcessEnvironment::new(config.variable.clone())),
    }
}
