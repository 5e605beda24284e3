use std::io::{self, Write};

use verdict_core::{JsonBody, Payload, ResponseSink};

/// Writes `HTTP <status>` followed by the pretty-printed payload
#[derive(Debug)]
pub struct TextSink<W> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ResponseSink for TextSink<W> {
    type Error = io::Error;
    type Body = Self;

    fn status(mut self, status: u16) -> Result<Self::Body, Self::Error> {
        writeln!(self.out, "HTTP {status}")?;
        Ok(self)
    }
}

impl<W: Write> JsonBody for TextSink<W> {
    type Error = io::Error;

    fn json(mut self, payload: &Payload) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut self.out, payload)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
