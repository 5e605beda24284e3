//! Turn application errors into consistent HTTP error responses
//!
//! An [`ErrorResponder`] resolves an error to a machine-readable code, an
//! HTTP status and a JSON [`Payload`], using the configuration held by a
//! [`ResponderScope`], and writes them to any [`ResponseSink`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod environment;
mod payload;
mod responder;
mod scope;
mod sink;
mod source;

pub use environment::{Environment, FixedEnvironment, ProcessEnvironment};
pub use payload::{ErrorBody, Payload};
pub use responder::ErrorResponder;
pub use scope::ResponderScope;
pub use sink::{JsonBody, ResponseSink};
pub use source::{AppError, ErrorSource, UNKNOWN_ERROR_MESSAGE, cause_chain, is_present};
pub use verdict_config::{ConfigOverrides, ResponderConfig, UNKNOWN_ERROR};
