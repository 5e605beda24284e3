//! axum integration for verdict error responses

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod reply;
mod writer;

pub use error::SinkError;
pub use reply::{ErrorReply, reply};
pub use writer::{PendingBody, ResponseWriter};
