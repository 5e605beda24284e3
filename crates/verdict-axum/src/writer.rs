use axum::body::Body;
use axum::response::Response;
use http::{HeaderValue, StatusCode, header};
use verdict_core::{JsonBody, Payload, ResponseSink};

use crate::SinkError;

/// Sink that assembles an axum [`Response`]
///
/// Holds at most one response; writing a second one fails with
/// [`SinkError::AlreadySent`].
#[derive(Debug, Default)]
pub struct ResponseWriter {
    response: Option<Response>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_sent(&self) -> bool {
        self.response.is_some()
    }

    /// The assembled response, if one was written
    pub fn into_response(self) -> Option<Response> {
        self.response
    }
}

/// Status accepted, body pending
#[derive(Debug)]
pub struct PendingBody<'a> {
    writer: &'a mut ResponseWriter,
    status: StatusCode,
}

impl<'a> ResponseSink for &'a mut ResponseWriter {
    type Error = SinkError;
    type Body = PendingBody<'a>;

    fn status(self, status: u16) -> Result<Self::Body, Self::Error> {
        if self.is_sent() {
            return Err(SinkError::AlreadySent);
        }

        let status = StatusCode::from_u16(status).map_err(|_| SinkError::InvalidStatus(status))?;

        Ok(PendingBody { writer: self, status })
    }
}

impl JsonBody for PendingBody<'_> {
    type Error = SinkError;

    fn json(self, payload: &Payload) -> Result<(), Self::Error> {
        let body = serde_json::to_vec(payload)?;

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        self.writer.response = Some(response);
        Ok(())
    }
}
