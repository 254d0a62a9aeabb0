//! Loads the pre-built binary junction graph.
//!
//! The graph is a flat stream of fixed-width `(i64, u32, u32)` little-endian
//! records, `(signed vertex_id, chr, pos)`, in chromosome-major,
//! position-major order. Loading is two passes: the first counts
//! occurrences per absolute vertex id so the abundance filter (`-a`) can
//! drop over-represented junctions before they ever reach
//! [`crate::junction::JunctionStore`]; the second yields the filtered
//! records in order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;
use rustc_hash::FxHashMap;

use crate::buffers::DEFAULT_INPUT_BUFFER;
use crate::error::{LcbError, Result};

const RECORD_LEN: usize = 16;

/// One decoded junction record: `(chr, pos, signed vertex_id)`.
pub type JunctionTriple = (u32, u32, i64);

/// Reads the whole graph file, counts abundance, and returns the triples
/// that survive the `abundance_threshold` filter, still in arrival order.
pub fn load_filtered(path: &Path, abundance_threshold: usize) -> Result<Vec<JunctionTriple>> {
    let bytes = read_all(path)?;
    if bytes.len() % RECORD_LEN != 0 {
        return Err(LcbError::BadGraph(format!(
            "junction graph {} is truncated: {} bytes is not a multiple of {RECORD_LEN}",
            path.display(),
            bytes.len()
        )));
    }

    let record_count = bytes.len() / RECORD_LEN;
    let mut counts: FxHashMap<i64, usize> = FxHashMap::default();
    for i in 0..record_count {
        let (_, _, vertex_id) = decode(&bytes, i)?;
        *counts.entry(vertex_id.abs()).or_insert(0) += 1;
    }

    let mut out = Vec::with_capacity(record_count);
    for i in 0..record_count {
        let (chr, pos, vertex_id) = decode(&bytes, i)?;
        if counts[&vertex_id.abs()] < abundance_threshold {
            out.push((chr, pos, vertex_id));
        }
    }
    Ok(out)
}

fn decode(bytes: &[u8], record_idx: usize) -> Result<JunctionTriple> {
    let base = record_idx * RECORD_LEN;
    let vertex_id = i64::from_le_bytes(bytes[base..base + 8].try_into().unwrap());
    let chr = u32::from_le_bytes(bytes[base + 8..base + 12].try_into().unwrap());
    let pos = u32::from_le_bytes(bytes[base + 12..base + 16].try_into().unwrap());
    if vertex_id == 0 {
        return Err(LcbError::BadGraph(format!(
            "junction record {record_idx} has vertex_id == 0"
        )));
    }
    Ok((chr, pos, vertex_id))
}

/// Memory-maps the file when it's large enough to be worth it, otherwise
/// reads it straight into a buffer.
fn read_all(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();

    if len as usize > DEFAULT_INPUT_BUFFER {
        // SAFETY: the file is not expected to be mutated concurrently with
        // this read; the graph builder has already finished writing it.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(mmap.to_vec())
    } else {
        let mut buf = Vec::with_capacity(len as usize);
        let mut file = file;
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
