use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code used when an error carries no code of its own
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

/// Rules for turning an application error into a status code and payload
///
/// Every field accepts both its `snake_case` name and the `camelCase`
/// name used by JSON overrides (`codeStatusMap`, `errorCodeKey`, ...).
/// Keys this type does not know about are kept in [`Self::extra`] rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Error code to HTTP status
    #[serde(alias = "codeStatusMap")]
    pub code_status_map: BTreeMap<String, u16>,
    /// Field read off an incoming error to discover its code
    #[serde(alias = "errorCodeKey")]
    pub error_code_key: String,
    /// Code used when the error does not carry one
    #[serde(alias = "fallbackErrorCode")]
    pub fallback_error_code: String,
    /// Status used when a code has no entry in the map
    #[serde(alias = "fallbackStatus")]
    pub fallback_status: u16,
    /// Environments in which stack traces are exposed
    ///
    /// Membership is decided by key presence only; `staging = false`
    /// still enables stacks for `staging`.
    #[serde(alias = "stackEnvironments")]
    pub stack_environments: BTreeMap<String, bool>,
    /// Unrecognized keys, carried along untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            code_status_map: BTreeMap::from([(UNKNOWN_ERROR.to_owned(), 500)]),
            error_code_key: "code".to_owned(),
            fallback_error_code: UNKNOWN_ERROR.to_owned(),
            fallback_status: 500,
            stack_environments: BTreeMap::from([("development".to_owned(), true)]),
            extra: BTreeMap::new(),
        }
    }
}

impl ResponderConfig {
    /// Status for an error code
    ///
    /// A missing entry, or an entry of `0`, resolves to the fallback status.
    pub fn status_for(&self, code: &str) -> u16 {
        self.code_status_map
            .get(code)
            .copied()
            .filter(|status| *status != 0)
            .unwrap_or(self.fallback_status)
    }

    /// Whether stack traces are exposed in the named environment
    pub fn stack_enabled(&self, environment: Option<&str>) -> bool {
        environment.is_some_and(|name| self.stack_environments.contains_key(name))
    }

    /// Merge overrides into this configuration
    ///
    /// Each key present in `overrides` replaces the whole value under that
    /// key; keys that are absent stay as they were. Unknown keys are stored
    /// in [`Self::extra`]. Returns the names of the keys that were written.
    pub fn apply(&mut self, overrides: ConfigOverrides) -> Vec<String> {
        let mut applied = Vec::new();

        if let Some(map) = overrides.code_status_map {
            self.code_status_map = map;
            applied.push("code_status_map".to_owned());
        }
        if let Some(key) = overrides.error_code_key {
            self.error_code_key = key;
            applied.push("error_code_key".to_owned());
        }
        if let Some(code) = overrides.fallback_error_code {
            self.fallback_error_code = code;
            applied.push("fallback_error_code".to_owned());
        }
        if let Some(status) = overrides.fallback_status {
            self.fallback_status = status;
            applied.push("fallback_status".to_owned());
        }
        if let Some(environments) = overrides.stack_environments {
            self.stack_environments = environments;
            applied.push("stack_environments".to_owned());
        }

        for (key, value) in overrides.extra {
            tracing::warn!(key = %key, "accepting unrecognized responder configuration key");
            self.extra.insert(key.clone(), value);
            applied.push(key);
        }

        applied
    }
}

/// Partial [`ResponderConfig`] used to override the current configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConfigOverrides {
    #[serde(default, alias = "codeStatusMap", skip_serializing_if = "Option::is_none")]
    pub code_status_map: Option<BTreeMap<String, u16>>,
    #[serde(default, alias = "errorCodeKey", skip_serializing_if = "Option::is_none")]
    pub error_code_key: Option<String>,
    #[serde(default, alias = "fallbackErrorCode", skip_serializing_if = "Option::is_none")]
    pub fallback_error_code: Option<String>,
    #[serde(default, alias = "fallbackStatus", skip_serializing_if = "Option::is_none")]
    pub fallback_status: Option<u16>,
    #[serde(default, alias = "stackEnvironments", skip_serializing_if = "Option::is_none")]
    pub stack_environments: Option<BTreeMap<String, bool>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ConfigOverrides {
    #[must_use]
    pub fn code_status_map<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u16)>,
        K: Into<String>,
    {
        self.code_status_map = Some(entries.into_iter().map(|(code, status)| (code.into(), status)).collect());
        self
    }

    #[must_use]
    pub fn error_code_key(mut self, key: impl Into<String>) -> Self {
        self.error_code_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn fallback_error_code(mut self, code: impl Into<String>) -> Self {
        self.fallback_error_code = Some(code.into());
        self
    }

    #[must_use]
    pub const fn fallback_status(mut self, status: u16) -> Self {
        self.fallback_status = Some(status);
        self
    }

    /// Enable stack traces for exactly these environments
    #[must_use]
    pub fn stack_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stack_environments = Some(environments.into_iter().map(|name| (name.into(), true)).collect());
        self
    }

    /// Add a key this crate does not interpret
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.code_status_map.is_none()
            && self.error_code_key.is_none()
            && self.fallback_error_code.is_none()
            && self.fallback_status.is_none()
            && self.stack_environments.is_none()
            && self.extra.is_empty()
    }
}
