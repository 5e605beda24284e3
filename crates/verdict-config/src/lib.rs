#![allow(clippy::must_use_candidate)]

mod env;
pub mod environment;
mod loader;
pub mod responder;

use serde::Deserialize;

pub use environment::*;
pub use responder::*;

/// Top-level verdict configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Error code, status and stack rules
    #[serde(default)]
    pub responder: ResponderConfig,
    /// Runtime environment detection
    #[serde(default)]
    pub environment: EnvironmentConfig,
}
