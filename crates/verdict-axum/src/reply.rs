use axum::response::{IntoResponse, Response};
use http::StatusCode;
use verdict_core::{ErrorResponder, ErrorSource, ResponderScope};

use crate::ResponseWriter;

/// An [`ErrorResponder`] returned from an axum handler
///
/// ```ignore
/// async fn show(State(scope): State<ResponderScope>) -> Result<Json<Order>, ErrorReply> {
///     let order = load().map_err(|e| reply(&scope, e))?;
///     Ok(Json(order))
/// }
/// ```
#[derive(Debug)]
pub struct ErrorReply(pub ErrorResponder);

impl ErrorReply {
    pub const fn responder(&self) -> &ErrorResponder {
        &self.0
    }

    pub fn responder_mut(&mut self) -> &mut ErrorResponder {
        &mut self.0
    }
}

impl From<ErrorResponder> for ErrorReply {
    fn from(responder: ErrorResponder) -> Self {
        Self(responder)
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        let mut writer = ResponseWriter::new();

        match self.0.send(&mut writer) {
            Ok(_) => writer
                .into_response()
                .unwrap_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    code = self.0.error_code(),
                    status = self.0.status(),
                    "failed to write error response"
                );
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Build a reply for `error` in `scope`
pub fn reply(scope: &ResponderScope, error: impl ErrorSource + 'static) -> ErrorReply {
    ErrorReply(scope.responder(error))
}
