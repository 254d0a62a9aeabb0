//! Sequence-order cursor over a single chromosome's junction occurrences.
//!
//! Wraps an index into `JunctionStore::chr_size` so walking backward past
//! position zero, or forward past the last occurrence, lands on a single
//! sentinel instead of panicking. Internally the position is an `i64`
//! specifically so that sentinel (`-1`) is representable without an `Option`
//! wrapper at every call site, matching how the forward-pointer chain in
//! `JunctionRecord` is walked.

use crate::junction::JunctionStore;

const INVALID: i64 = -1;

/// A strand-aware position within one chromosome's occurrence list.
///
/// `reverse == true` walks the chromosome from its last occurrence toward
/// its first; "next in sequence" and "previous in sequence" are defined
/// relative to that walking direction, not to increasing `idx`.
#[derive(Debug, Clone, Copy)]
pub struct ChrCursor {
    chr: u32,
    idx: i64,
    reverse: bool,
}

impl ChrCursor {
    pub fn new(chr: u32, idx: u32, reverse: bool) -> Self {
        Self {
            chr,
            idx: idx as i64,
            reverse,
        }
    }

    pub fn invalid(chr: u32, reverse: bool) -> Self {
        Self {
            chr,
            idx: INVALID,
            reverse,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.idx != INVALID
    }

    pub fn chr(&self) -> u32 {
        self.chr
    }

    pub fn idx(&self) -> u32 {
        debug_assert!(self.is_valid());
        self.idx as u32
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Advances one occurrence in the cursor's walking direction, in place.
    pub fn inc_in_sequence(&mut self, store: &JunctionStore) {
        if !self.is_valid() {
            return;
        }
        let step: i64 = if self.reverse { -1 } else { 1 };
        let next = self.idx + step;
        if next < 0 || next as usize >= store.chr_size(self.chr) {
            self.idx = INVALID;
        } else {
            self.idx = next;
        }
    }

    /// Steps one occurrence against the cursor's walking direction, in place.
    pub fn dec_in_sequence(&mut self, store: &JunctionStore) {
        if !self.is_valid() {
            return;
        }
        let step: i64 = if self.reverse { 1 } else { -1 };
        let next = self.idx + step;
        if next < 0 || next as usize >= store.chr_size(self.chr) {
            self.idx = INVALID;
        } else {
            self.idx = next;
        }
    }

    /// Returns the cursor at the next occurrence of this vertex anywhere in
    /// the dataset, respecting the chain's recorded orientation flip.
    pub fn next(&self, store: &JunctionStore) -> Option<ChrCursor> {
        if !self.is_valid() {
            return None;
        }
        let (next_chr, next_idx, invert) = store.next_link(self.chr, self.idx as u32)?;
        let reverse = if invert { !self.reverse } else { self.reverse };
        Some(ChrCursor::new(next_chr, next_idx, reverse))
    }

    /// Signed sequence-order coordinate: raw `pos` on the positive strand,
    /// `-(pos + k)` on the negative strand, so that arithmetic comparing
    /// positions across strands (gap computation, emission) stays uniform.
    pub fn position(&self, store: &JunctionStore) -> i64 {
        let pos = store.record(self.chr, self.idx()).pos as i64;
        if self.reverse {
            -(pos + store.k() as i64)
        } else {
            pos
        }
    }

    pub fn previous_position(&self, store: &JunctionStore) -> Option<i64> {
        let mut probe = *self;
        probe.dec_in_sequence(store);
        if probe.is_valid() {
            Some(probe.position(store))
        } else {
            None
        }
    }

    pub fn vertex_id(&self, store: &JunctionStore) -> i64 {
        let raw = store.vertex_at(self.chr, self.idx());
        if self.reverse {
            -raw
        } else {
            raw
        }
    }

    /// Base immediately beyond the junction's k-mer in the walking
    /// direction: the forward strand's `ch` when walking forward, its
    /// complement (the record's `rev_ch`) when walking in reverse.
    pub fn char(&self, store: &JunctionStore) -> u8 {
        let rec = store.record(self.chr, self.idx());
        if self.reverse {
            rec.rev_ch
        } else {
            rec.ch
        }
    }

    pub fn pointer_index(&self, store: &JunctionStore) -> u32 {
        store.pointer_index(self.chr, self.idx())
    }

    pub fn is_positive_strand(&self) -> bool {
        !self.reverse
    }
}
