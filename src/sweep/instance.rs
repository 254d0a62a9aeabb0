//! Open and terminated alignment instances.
//!
//! An `Instance` tracks one candidate locally collinear block while it is
//! still being extended by the sweep. Both `start_pos`/`end_pos` use the
//! signed coordinate convention from [`crate::cursor::ChrCursor::position`]
//! so comparisons across the two participating chromosomes never need to
//! branch on strand.

/// A candidate block, open or terminated.
#[derive(Debug, Clone)]
pub struct Instance {
    pub chr: [u32; 2],
    pub start_pos: [i64; 2],
    pub end_pos: [i64; 2],
    pub score: i64,
    /// Set once some later junction has extended this instance. A purged
    /// instance with `has_next == true` is a dead end and is dropped
    /// silently rather than emitted.
    pub has_next: bool,
    /// True when the two sides advanced through identical junction
    /// characters on their last extension, the condition the fast path in
    /// `find_predecessor` tries before falling back to a windowed scan of
    /// the presence bitset.
    pub parallel_end: bool,
    /// Junction ordinal and strand this instance is currently indexed under
    /// in its `(strand, chr[1])` presence bitset, kept alongside the
    /// instance itself so purge can clear the right bit without a reverse
    /// lookup from position back to ordinal.
    pub end_idx: u32,
    pub end_reverse: bool,
}

impl Instance {
    pub fn singleton(chr: [u32; 2], pos: [i64; 2], end_idx: u32, end_reverse: bool) -> Self {
        Self {
            chr,
            start_pos: pos,
            end_pos: pos,
            score: 0,
            has_next: false,
            parallel_end: true,
            end_idx,
            end_reverse,
        }
    }

    pub fn extend(
        prev: &Instance,
        pos: [i64; 2],
        score: i64,
        parallel_end: bool,
        end_idx: u32,
        end_reverse: bool,
    ) -> Self {
        Self {
            chr: prev.chr,
            start_pos: prev.start_pos,
            end_pos: pos,
            score,
            has_next: false,
            parallel_end,
            end_idx,
            end_reverse,
        }
    }

    /// Both sides must cover at least `min_block_size` bases to be reported.
    pub fn valid(&self, min_block_size: i64) -> bool {
        (self.end_pos[0] - self.start_pos[0]).abs() >= min_block_size
            && (self.end_pos[1] - self.start_pos[1]).abs() >= min_block_size
    }
}
