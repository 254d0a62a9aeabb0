//! Per-chromosome junction storage.
//!
//! Owns, for every chromosome, the ordered list of junction occurrences
//! (vertices of the compacted de Bruijn graph) along with the chain that
//! links each occurrence to the next occurrence of the same vertex anywhere
//! in the dataset. This is the one piece of shared, read-only state that
//! every sweep worker reads without synchronization once construction is
//! complete.

use rustc_hash::FxHashMap;

use crate::error::{LcbError, Result};

const NO_LINK: u32 = u32::MAX;

/// One occurrence of a vertex on a chromosome, in increasing `pos` order.
#[derive(Debug, Clone)]
pub struct JunctionRecord {
    pub pos: u32,
    pub vertex_id: i64,
    pub ch: u8,
    pub rev_ch: u8,
    next_chr: u32,
    next_idx: u32,
    invert: bool,
    pointer_idx: u32,
}

impl JunctionRecord {
    fn has_next(&self) -> bool {
        self.next_idx != NO_LINK
    }
}

/// Owns the full set of junction occurrences across all chromosomes.
pub struct JunctionStore {
    k: usize,
    per_chr: Vec<Vec<JunctionRecord>>,
    chr_descriptions: Vec<String>,
    max_vertex_id: i64,
}

fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => b'N',
    }
}

impl JunctionStore {
    /// Build the store from arrival-ordered `(chr, pos, signed vertex_id)`
    /// triples plus each chromosome's uppercased nucleotide sequence.
    ///
    /// Records must arrive in chromosome-major, position-major order (the
    /// contract the graph loader guarantees); this is what lets the
    /// previous-occurrence chain be built in a single forward pass.
    pub fn build(
        k: usize,
        records: impl IntoIterator<Item = (u32, u32, i64)>,
        sequences: &[Vec<u8>],
        chr_descriptions: Vec<String>,
    ) -> Result<Self> {
        let mut per_chr: Vec<Vec<JunctionRecord>> =
            sequences.iter().map(|_| Vec::new()).collect();
        let mut max_vertex_id = 0i64;

        struct Prev {
            vertex_id: i64,
            chr: u32,
            idx: u32,
        }
        let mut prev_by_vertex: FxHashMap<i64, Prev> = FxHashMap::default();

        for (chr, pos, vertex_id) in records {
            if vertex_id == 0 {
                return Err(LcbError::BadGraph(
                    "junction record with vertex_id == 0".to_string(),
                ));
            }

            let chr_usize = chr as usize;
            let seq = sequences.get(chr_usize).ok_or_else(|| {
                LcbError::BadGraph(format!("junction references unknown chromosome {chr}"))
            })?;

            if pos as usize >= seq.len() {
                return Err(LcbError::BadGraph(format!(
                    "junction position {pos} is beyond chromosome {chr} length {}",
                    seq.len()
                )));
            }

            let ch = seq.get(pos as usize + k).copied().unwrap_or(b'N');
            let rev_ch = if pos > 0 {
                complement(seq[pos as usize - 1])
            } else {
                b'N'
            };

            let abs_id = vertex_id.abs();
            max_vertex_id = max_vertex_id.max(abs_id);

            let idx = per_chr[chr_usize].len() as u32;
            let pointer_idx = match prev_by_vertex.get(&abs_id) {
                Some(prev) => {
                    let invert = prev.vertex_id != vertex_id;
                    let prev_rec = &mut per_chr[prev.chr as usize][prev.idx as usize];
                    prev_rec.next_chr = chr;
                    prev_rec.next_idx = idx;
                    prev_rec.invert = invert;
                    prev_rec.pointer_idx + 1
                }
                None => 0,
            };

            per_chr[chr_usize].push(JunctionRecord {
                pos,
                vertex_id,
                ch,
                rev_ch,
                next_chr: NO_LINK,
                next_idx: NO_LINK,
                invert: false,
                pointer_idx,
            });

            prev_by_vertex.insert(
                abs_id,
                Prev {
                    vertex_id,
                    chr,
                    idx,
                },
            );
        }

        Ok(Self {
            k,
            per_chr,
            chr_descriptions,
            max_vertex_id,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn chr_count(&self) -> usize {
        self.per_chr.len()
    }

    pub fn chr_size(&self, chr: u32) -> usize {
        self.per_chr[chr as usize].len()
    }

    pub fn chr_description(&self, chr: u32) -> &str {
        &self.chr_descriptions[chr as usize]
    }

    pub fn max_vertex_id(&self) -> i64 {
        self.max_vertex_id
    }

    /// Raw (unsigned-by-strand) vertex id stored at `(chr, idx)`.
    pub fn vertex_at(&self, chr: u32, idx: u32) -> i64 {
        self.per_chr[chr as usize][idx as usize].vertex_id
    }

    pub fn pointer_index(&self, chr: u32, idx: u32) -> u32 {
        self.per_chr[chr as usize][idx as usize].pointer_idx
    }

    pub(crate) fn record(&self, chr: u32, idx: u32) -> &JunctionRecord {
        &self.per_chr[chr as usize][idx as usize]
    }

    pub(crate) fn next_link(&self, chr: u32, idx: u32) -> Option<(u32, u32, bool)> {
        let rec = self.record(chr, idx);
        if rec.has_next() {
            Some((rec.next_chr, rec.next_idx, rec.invert))
        } else {
            None
        }
    }
}
