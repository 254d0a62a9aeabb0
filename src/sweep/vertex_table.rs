//! Per-worker vertex -> open-bucket lookup.
//!
//! Instead of a hashmap keyed by vertex id, this is a dense array indexed by
//! absolute vertex id (cheap since vertex ids are dense small integers
//! assigned by the graph builder), split into a positive-strand and
//! negative-strand half. Each worker owns one instance; there is no
//! cross-worker sharing.

/// What a vertex table cell remembers about the bucket currently open on
/// that vertex: enough to recompute a `(chr, idx)` instance's position in
/// the bucket without storing a pointer.
#[derive(Debug, Clone, Copy)]
pub struct VertexTableEntry {
    pub pointer_idx: u32,
    pub slot_id: usize,
}

pub struct VertexTable {
    pos: Vec<Option<VertexTableEntry>>,
    neg: Vec<Option<VertexTableEntry>>,
}

impl VertexTable {
    pub fn new(max_vertex_id: i64) -> Self {
        let len = (max_vertex_id + 1) as usize;
        Self {
            pos: vec![None; len],
            neg: vec![None; len],
        }
    }

    fn half(&self, signed_vertex: i64) -> &[Option<VertexTableEntry>] {
        if signed_vertex >= 0 {
            &self.pos
        } else {
            &self.neg
        }
    }

    fn half_mut(&mut self, signed_vertex: i64) -> &mut [Option<VertexTableEntry>] {
        if signed_vertex >= 0 {
            &mut self.pos
        } else {
            &mut self.neg
        }
    }

    pub fn get(&self, signed_vertex: i64) -> Option<VertexTableEntry> {
        self.half(signed_vertex)[signed_vertex.unsigned_abs() as usize]
    }

    pub fn set(&mut self, signed_vertex: i64, entry: VertexTableEntry) {
        let idx = signed_vertex.unsigned_abs() as usize;
        self.half_mut(signed_vertex)[idx] = Some(entry);
    }

    /// Clears the cell only if it still points at `slot_id`. A later
    /// vertex occurrence may already have overwritten it.
    pub fn clear_if_matches(&mut self, signed_vertex: i64, slot_id: usize) {
        let idx = signed_vertex.unsigned_abs() as usize;
        let half = self.half_mut(signed_vertex);
        if matches!(half[idx], Some(e) if e.slot_id == slot_id) {
            half[idx] = None;
        }
    }
}
