//! GFF3 block writer.
//!
//! One feature row per `BlockInstance`; coordinates are 1-based inclusive
//! per the GFF3 convention, converted from the sweep's 0-based, half-open,
//! signed-by-strand coordinates.

use std::io::Write;

use crate::buffers::output_buffer_size;
use crate::emitter::BlockInstance;
use crate::error::Result;
use crate::output::IntWriter;

pub struct GffWriter<W: Write> {
    inner: IntWriter<W>,
}

impl<W: Write> GffWriter<W> {
    pub fn new(output: W, low_memory: bool) -> Self {
        Self {
            inner: IntWriter::with_capacity(output_buffer_size(low_memory), output),
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.inner.write_bytes(b"##gff-version 3\n")
    }

    /// `chr_description` resolves `block.chr` to the FASTA description
    /// used as the GFF `seqid` column.
    pub fn write_block(
        &mut self,
        block: &BlockInstance,
        chr_description: &str,
    ) -> Result<()> {
        let strand = if block.signed_id >= 0 { b'+' } else { b'-' };
        self.inner.write_bytes(chr_description.as_bytes())?;
        self.inner.write_bytes(b"\tlcb-find\tblock\t")?;
        self.inner.write_int(block.start + 1)?;
        self.inner.write_bytes(b"\t")?;
        self.inner.write_int(block.end)?;
        self.inner.write_bytes(b"\t.\t")?;
        self.inner.write_bytes(&[strand])?;
        self.inner.write_bytes(b"\t.\tid=")?;
        self.inner.write_int(block.signed_id.abs())?;
        self.inner.write_bytes(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_strand_row() {
        let mut out = Vec::new();
        {
            let mut writer = GffWriter::new(&mut out, false);
            writer.write_header().unwrap();
            let block = BlockInstance { signed_id: 1, chr: 0, start: 0, end: 10 };
            writer.write_block(&block, "chr1").unwrap();
            writer.flush().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("chr1\tlcb-find\tblock\t1\t10\t.\t+\t.\tid=1\n"));
    }

    #[test]
    fn test_reverse_strand_row_uses_minus() {
        let mut out = Vec::new();
        {
            let mut writer = GffWriter::new(&mut out, false);
            let block = BlockInstance { signed_id: -2, chr: 1, start: 5, end: 15 };
            writer.write_block(&block, "chr2").unwrap();
            writer.flush().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("chr2\tlcb-find\tblock\t6\t15\t.\t-\t.\tid=2\n"));
    }
}
