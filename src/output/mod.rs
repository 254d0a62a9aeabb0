//! Block serialization: GFF3 (always) and a legacy text index (`--legacy`).

pub mod gff;
pub mod legacy;

use std::io::{BufWriter, Write};

use itoa::Buffer;

use crate::error::LcbError;

/// A thin itoa-buffered writer shared by both output formats.
pub(crate) struct IntWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: Buffer,
}

impl<W: Write> IntWriter<W> {
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: Buffer::new(),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcbError> {
        self.writer.write_all(bytes).map_err(LcbError::Io)
    }

    pub fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<(), LcbError> {
        let s = self.itoa_buf.format(n);
        self.writer.write_all(s.as_bytes()).map_err(LcbError::Io)
    }

    pub fn flush(&mut self) -> Result<(), LcbError> {
        self.writer.flush().map_err(LcbError::Io)
    }
}
