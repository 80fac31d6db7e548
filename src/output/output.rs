use std::io::Write;

use super::encoder::Encoder;
use super::writer::Writer;
use crate::error::Result;
use crate::record::Event;

pub struct Output<W> {
    writer: Box<dyn Writer<W>>,
    encoder: Box<dyn Encoder>,
}

impl<W: Write> Output<W> {
    pub fn new(writer: Box<dyn Writer<W>>, encoder: Box<dyn Encoder>) -> Self {
        Self { writer, encoder }
    }

    /// Encodes and writes `event`. Returns `false` if the encoder had
    /// nothing to write for it.
    pub fn write(&mut self, event: &Event) -> Result<bool> {
        let buf = match self.encoder.encode(event)? {
            Some(buf) => buf,
            None => return Ok(false),
        };

        self.writer
            .write(&buf)
            .map_err(|e| ("writer failed", e))?;

        Ok(true)
    }

    pub fn into_inner(self) -> Result<W> {
        Ok(self.writer.into_inner()?)
    }
}
