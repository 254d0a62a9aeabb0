//! Legacy `blocks_coords.txt` index (`--legacy`).
//!
//! Groups the flat `BlockInstance` list back into per-chromosome sections,
//! each row sorted by start. No surviving reference implementation of this
//! format shipped with the source this crate was distilled from, so its
//! exact shape is an open question resolved here (see DESIGN.md): one
//! section per chromosome (by first appearance), each row
//! `start\tend\tblock_id`.

use std::collections::BTreeMap;
use std::io::Write;

use crate::buffers::output_buffer_size;
use crate::emitter::BlockInstance;
use crate::error::Result;
use crate::output::IntWriter;

pub struct LegacyWriter<W: Write> {
    inner: IntWriter<W>,
}

impl<W: Write> LegacyWriter<W> {
    pub fn new(output: W, low_memory: bool) -> Self {
        Self {
            inner: IntWriter::with_capacity(output_buffer_size(low_memory), output),
        }
    }

    /// Writes every block, grouped by chromosome and sorted by start,
    /// looking up each section's header through `chr_description`.
    pub fn write_blocks(
        &mut self,
        blocks: &[BlockInstance],
        chr_description: impl Fn(u32) -> String,
    ) -> Result<()> {
        let mut by_chr: BTreeMap<u32, Vec<&BlockInstance>> = BTreeMap::new();
        for block in blocks {
            by_chr.entry(block.chr).or_default().push(block);
        }

        for (chr, mut rows) in by_chr {
            rows.sort_by_key(|b| b.start);
            self.inner.write_bytes(b">")?;
            self.inner.write_bytes(chr_description(chr).as_bytes())?;
            self.inner.write_bytes(b"\n")?;
            for row in rows {
                self.inner.write_int(row.start)?;
                self.inner.write_bytes(b"\t")?;
                self.inner.write_int(row.end)?;
                self.inner.write_bytes(b"\t")?;
                self.inner.write_int(row.signed_id)?;
                self.inner.write_bytes(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}
