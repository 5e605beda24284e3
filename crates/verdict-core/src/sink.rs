//! Destination for a rendered error response
//!
//! Modeled on the two-step `status(code).json(body)` shape of an HTTP
//! response: setting the status yields a body writer, and writing the body
//! performs the transmission.

use crate::Payload;

/// Accepts the status code of a response
pub trait ResponseSink {
    type Error;
    type Body: JsonBody<Error = Self::Error>;

    fn status(self, status: u16) -> Result<Self::Body, Self::Error>;
}

/// Accepts the JSON body of a response and transmits it
pub trait JsonBody {
    type Error;

    fn json(self, payload: &Payload) -> Result<(), Self::Error>;
}
