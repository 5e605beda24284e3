use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use verdict_config::{ConfigOverrides, ResponderConfig};

use crate::environment::{self, Environment, ProcessEnvironment};
use crate::{ErrorResponder, ErrorSource};

/// The current responder configuration for a request-handling context
///
/// Clones share one configuration, so [`configure`](Self::configure) on any
/// clone is seen by responders built or re-derived afterwards through every
/// other clone. Concurrent overrides race per key; the last write wins.
#[derive(Debug, Clone)]
pub struct ResponderScope {
    config: Arc<RwLock<ResponderConfig>>,
    environment: Arc<dyn Environment>,
}

impl Default for ResponderScope {
    fn default() -> Self {
        Self::new(ResponderConfig::default())
    }
}

impl ResponderScope {
    /// Scope reading the environment name from `APP_ENV`
    pub fn new(config: ResponderConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            environment: Arc::new(ProcessEnvironment::default()),
        }
    }

    /// Scope described by a configuration file
    pub fn from_config(config: &verdict_config::Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config.responder.clone())),
            environment: environment::from_config(&config.environment),
        }
    }

    /// Replace the environment name source
    #[must_use]
    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Arc::new(environment);
        self
    }

    /// Merge overrides into the shared configuration
    ///
    /// Payloads that were already built are left as they are.
    pub fn configure(&self, overrides: ConfigOverrides) {
        if overrides.is_empty() {
            return;
        }

        let applied = self
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(overrides);

        tracing::debug!(keys = ?applied, "applied responder configuration overrides");
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> ResponderConfig {
        self.read().clone()
    }

    /// Current environment name, read fresh
    pub fn environment_name(&self) -> Option<String> {
        self.environment.name()
    }

    pub fn responder(&self, error: impl ErrorSource + 'static) -> ErrorResponder {
        ErrorResponder::new(self, error)
    }

    /// Responder for the synthetic "Unknown error"
    #[track_caller]
    pub fn unknown(&self) -> ErrorResponder {
        ErrorResponder::unknown(self)
    }

    #[track_caller]
    pub fn build(&self, error: Option<Box<dyn ErrorSource>>) -> ErrorResponder {
        ErrorResponder::build(self, error)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, ResponderConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedEnvironment;

    #[test]
    fn clones_share_configuration() {
        let scope = ResponderScope::default();
        let other = scope.clone().with_environment(FixedEnvironment::new("test"));

        other.configure(ConfigOverrides::default().fallback_status(418));

        assert_eq!(scope.config().fallback_status, 418);
        assert_eq!(other.environment_name().as_deref(), Some("test"));
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let scope = ResponderScope::default();
        scope.configure(ConfigOverrides::default());
        assert_eq!(scope.config(), ResponderConfig::default());
    }

    #[test]
    fn from_file_configuration() {
        let config = verdict_config::Config::parse(
            r#"
            [responder]
            fallback_error_code = "INTERNAL"

            [environment]
            name = "development"
            "#,
        )
        .unwrap();

        let scope = ResponderScope::from_config(&config);
        assert_eq!(scope.config().fallback_error_code, "INTERNAL");
        assert_eq!(scope.environment_name().as_deref(), Some("development"));
    }
}
