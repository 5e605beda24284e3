use std::fmt;

use crate::{AppError, ErrorBody, ErrorSource, JsonBody, Payload, ResponderScope, ResponseSink};

/// One error occurrence, resolved to an error code, a status and a payload
///
/// The code comes from the error's `error_code_key` field (or the fallback
/// code), and the status from the code. Changing the code re-derives the
/// status and payload; changing the status touches nothing else.
pub struct ErrorResponder {
    scope: ResponderScope,
    error: Box<dyn ErrorSource>,
    error_code: String,
    status: u16,
    payload: Payload,
}

impl ErrorResponder {
    pub fn new(scope: &ResponderScope, error: impl ErrorSource + 'static) -> Self {
        Self::from_boxed(scope, Box::new(error))
    }

    /// Responder for the synthetic "Unknown error"
    #[track_caller]
    pub fn unknown(scope: &ResponderScope) -> Self {
        Self::new(scope, AppError::unknown())
    }

    /// Responder for an optional error, substituting "Unknown error" for `None`
    #[track_caller]
    pub fn build(scope: &ResponderScope, error: Option<Box<dyn ErrorSource>>) -> Self {
        match error {
            Some(error) => Self::from_boxed(scope, error),
            None => Self::unknown(scope),
        }
    }

    fn from_boxed(scope: &ResponderScope, error: Box<dyn ErrorSource>) -> Self {
        let (error_code, status) = {
            let config = scope.read();
            let error_code = error
                .field(&config.error_code_key)
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| config.fallback_error_code.clone());
            let status = config.status_for(&error_code);
            (error_code, status)
        };

        let payload = render_payload(scope, error.as_ref(), &error_code);

        tracing::debug!(code = %error_code, status, "built error responder");

        Self {
            scope: scope.clone(),
            error,
            error_code,
            status,
            payload,
        }
    }

    /// Replace the error code, re-deriving the status and payload
    pub fn set_error_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.error_code = code.into();
        self.status = self.scope.read().status_for(&self.error_code);
        self.payload = render_payload(&self.scope, self.error.as_ref(), &self.error_code);
        self
    }

    /// Replace the status; the error code and payload are unaffected
    pub const fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.set_error_code(code);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    pub const fn status(&self) -> u16 {
        self.status
    }

    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn error(&self) -> &dyn ErrorSource {
        self.error.as_ref()
    }

    /// Status and payload, consuming the responder
    pub fn into_parts(self) -> (u16, Payload) {
        (self.status, self.payload)
    }

    /// Write the status and payload to `sink`
    ///
    /// # Errors
    ///
    /// Returns whatever the sink reports when accepting the status or the body
    pub fn send<S: ResponseSink>(&self, sink: S) -> Result<&Self, S::Error> {
        tracing::trace!(code = %self.error_code, status = self.status, "sending error response");

        sink.status(self.status)?.json(&self.payload)?;
        Ok(self)
    }
}

impl fmt::Debug for ErrorResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorResponder")
            .field("error_code", &self.error_code)
            .field("status", &self.status)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

fn render_payload(scope: &ResponderScope, error: &dyn ErrorSource, code: &str) -> Payload {
    let environment = scope.environment_name();
    let expose_stack = scope.read().stack_enabled(environment.as_deref());

    Payload {
        error: ErrorBody {
            code: code.to_owned(),
            message: error.message(),
            stack: if expose_stack { error.stack() } else { None },
        },
    }
}
