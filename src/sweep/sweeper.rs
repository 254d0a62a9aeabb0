//! The per-chromosome sweep: walks one reference chromosome's junctions,
//! extending or opening instances against every other chromosome, and
//! purging (and, where valid, emitting) instances once they fall more than
//! `max_branch_size` behind the sweep's current position.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::config::RunConfig;
use crate::cursor::ChrCursor;
use crate::emitter::{self, BlockInstance};
use crate::junction::JunctionStore;
use crate::sweep::compat::{compatible, Compat, Successor};
use crate::sweep::instance::Instance;
use crate::sweep::instance_set::InstanceSet;
use crate::sweep::vertex_table::{VertexTable, VertexTableEntry};

/// One arena slot: the bucket of instances opened when the sweep's
/// reference cursor sat on `vertex_id`, plus the chain metadata needed to
/// resolve a `(chr, idx)` lookup into a bucket offset.
struct BucketSlot {
    vertex_id: i64,
    pointer_idx: u32,
    bucket: Vec<Instance>,
}

pub struct Sweeper<'a> {
    store: &'a JunctionStore,
    config: &'a RunConfig,
    vertex_table: VertexTable,
    pos_sets: Vec<InstanceSet>,
    neg_sets: Vec<InstanceSet>,
    slots: Vec<Option<BucketSlot>>,
    free_slots: Vec<usize>,
    purge: VecDeque<usize>,
    next_block_id: &'a AtomicI64,
}

impl<'a> Sweeper<'a> {
    /// `next_block_id` is shared across every worker's `Sweeper` so that
    /// block ids stay globally unique no matter how many chromosomes are
    /// swept concurrently; see `worker_pool::run`.
    pub fn new(store: &'a JunctionStore, config: &'a RunConfig, next_block_id: &'a AtomicI64) -> Self {
        let pos_sets = (0..store.chr_count())
            .map(|c| InstanceSet::new(store.chr_size(c as u32)))
            .collect();
        let neg_sets = (0..store.chr_count())
            .map(|c| InstanceSet::new(store.chr_size(c as u32)))
            .collect();
        Self {
            store,
            config,
            vertex_table: VertexTable::new(store.max_vertex_id()),
            pos_sets,
            neg_sets,
            slots: Vec::new(),
            free_slots: Vec::new(),
            purge: VecDeque::new(),
            next_block_id,
        }
    }

    fn set_for(&mut self, reverse: bool, chr: u32) -> &mut InstanceSet {
        if reverse {
            &mut self.neg_sets[chr as usize]
        } else {
            &mut self.pos_sets[chr as usize]
        }
    }

    fn set_for_ref(&self, reverse: bool, chr: u32) -> &InstanceSet {
        if reverse {
            &self.neg_sets[chr as usize]
        } else {
            &self.pos_sets[chr as usize]
        }
    }

    fn alloc_slot(&mut self, vertex_id: i64, pointer_idx: u32) -> usize {
        if let Some(id) = self.free_slots.pop() {
            let slot = self.slots[id].as_mut().expect("free slot must be occupied");
            slot.vertex_id = vertex_id;
            slot.pointer_idx = pointer_idx;
            slot.bucket.clear();
            id
        } else {
            let id = self.slots.len();
            self.slots.push(Some(BucketSlot {
                vertex_id,
                pointer_idx,
                bucket: Vec::new(),
            }));
            id
        }
    }

    /// Resolves a `(chr, idx, strand)` triple to the bucket slot and offset
    /// of the instance whose second endpoint currently sits there, if any.
    fn fetch(&self, chr: u32, idx: u32, reverse: bool) -> Option<(usize, usize)> {
        let raw = self.store.vertex_at(chr, idx);
        let v = if reverse { -raw } else { raw };
        let entry = self.vertex_table.get(v)?;
        let ptr = self.store.pointer_index(chr, idx);
        if ptr <= entry.pointer_idx {
            return None;
        }
        let offset = (ptr - entry.pointer_idx - 1) as usize;
        let slot = self.slots[entry.slot_id].as_ref()?;
        if offset < slot.bucket.len() {
            Some((entry.slot_id, offset))
        } else {
            None
        }
    }

    /// Finds the best compatible predecessor instance for extending with
    /// `(it, jt)`, trying the exact-continuation fast path before falling
    /// back to a scan of the presence bitset's window.
    fn find_predecessor(
        &self,
        it: &ChrCursor,
        it_prev: Option<ChrCursor>,
        jt: &ChrCursor,
    ) -> Option<(usize, usize, i64, Instance)> {
        let max_branch = self.config.max_branch_size;
        let succ = [
            Successor {
                chr: it.chr(),
                position: it.position(self.store),
                previous_position: it_prev.map(|c| c.position(self.store)),
            },
            Successor {
                chr: jt.chr(),
                position: jt.position(self.store),
                previous_position: jt.previous_position(self.store),
            },
        ];

        if let Some(it_prev) = it_prev {
            let mut jt_prev = *jt;
            jt_prev.dec_in_sequence(self.store);
            if jt_prev.is_valid()
                && it_prev.vertex_id(self.store) == jt_prev.vertex_id(self.store)
                && it_prev.char(self.store) == jt_prev.char(self.store)
            {
                if let Some((slot_id, offset)) =
                    self.fetch(jt_prev.chr(), jt_prev.idx(), jt_prev.reverse())
                {
                    let candidate = self.slots[slot_id].as_ref().unwrap().bucket[offset].clone();
                    if let Compat::Accept { increment } = compatible(&candidate, succ, max_branch)
                    {
                        return Some((slot_id, offset, candidate.score + increment, candidate));
                    }
                }
            }
        }

        let reverse = jt.reverse();
        let chr = jt.chr();
        let window = self
            .set_for_ref(reverse, chr)
            .window_indices(jt.idx(), max_branch, reverse);

        let mut best: Option<(usize, usize, i64, Instance)> = None;
        for idx in window {
            if idx == jt.idx() {
                continue;
            }
            if let Some((slot_id, offset)) = self.fetch(chr, idx, reverse) {
                let candidate = self.slots[slot_id].as_ref().unwrap().bucket[offset].clone();
                if let Compat::Accept { increment } = compatible(&candidate, succ, max_branch) {
                    // Ties keep the later candidate in scan order.
                    let total = candidate.score + increment;
                    let better = best.as_ref().map(|b| total >= b.2).unwrap_or(true);
                    if better {
                        best = Some((slot_id, offset, total, candidate));
                    }
                }
            }
        }
        best
    }

    /// Runs the sweep over `chr` and returns every block it terminated.
    pub fn sweep(&mut self, chr: u32) -> Vec<BlockInstance> {
        let mut blocks = Vec::new();
        let mut it = ChrCursor::new(chr, 0, false);
        let mut it_prev: Option<ChrCursor> = None;

        while it.is_valid() {
            let v = it.vertex_id(self.store);
            let pointer_idx = it.pointer_index(self.store);
            let slot_id = self.alloc_slot(v, pointer_idx);
            self.vertex_table.set(
                v,
                VertexTableEntry {
                    pointer_idx,
                    slot_id,
                },
            );
            self.purge.push_back(slot_id);

            let mut jt = it;
            while let Some(next) = jt.next(self.store) {
                jt = next;

                let found = self.find_predecessor(&it, it_prev, &jt);
                let new_inst = match found {
                    Some((slot_id2, offset, new_score, predecessor)) => {
                        self.slots[slot_id2]
                            .as_mut()
                            .unwrap()
                            .bucket[offset]
                            .has_next = true;
                        Instance::extend(
                            &predecessor,
                            [it.position(self.store), jt.position(self.store)],
                            new_score,
                            it.char(self.store) == jt.char(self.store),
                            jt.idx(),
                            jt.reverse(),
                        )
                    }
                    None => Instance::singleton(
                        [it.chr(), jt.chr()],
                        [it.position(self.store), jt.position(self.store)],
                        jt.idx(),
                        jt.reverse(),
                    ),
                };
                self.slots[slot_id].as_mut().unwrap().bucket.push(new_inst);
                self.set_for(jt.reverse(), jt.chr()).add(jt.idx());
            }

            self.purge_upto(it.position(self.store), v, &mut blocks);
            it_prev = Some(it);
            it.inc_in_sequence(self.store);
        }

        self.purge_upto(i64::MAX, i64::MIN, &mut blocks);
        blocks
    }

    fn purge_upto(&mut self, last_pos: i64, current_vid: i64, blocks: &mut Vec<BlockInstance>) {
        let min_block_size = self.config.min_block_size;
        let max_branch = self.config.max_branch_size;

        while let Some(&slot_id) = self.purge.front() {
            let (bucket_len, vertex_id) = {
                let slot = self.slots[slot_id].as_ref().unwrap();
                (slot.bucket.len(), slot.vertex_id)
            };

            if bucket_len > 0 {
                let front_end = self.slots[slot_id].as_ref().unwrap().bucket[0].end_pos[0];
                if last_pos != i64::MAX && last_pos.saturating_sub(front_end) < max_branch {
                    break;
                }

                let bucket = std::mem::take(&mut self.slots[slot_id].as_mut().unwrap().bucket);
                for inst in &bucket {
                    if inst.valid(min_block_size) && !inst.has_next {
                        let block_id = self.next_block_id.fetch_add(1, Ordering::Relaxed);
                        let [a, b] = emitter::emit(inst, block_id, self.store.k());
                        blocks.push(a);
                        blocks.push(b);
                    }
                    self.set_for(inst.end_reverse, inst.chr[1])
                        .erase_if_set(inst.end_idx);
                }
                self.vertex_table.clear_if_matches(vertex_id, slot_id);
                self.free_slots.push(slot_id);
                self.purge.pop_front();
            } else if vertex_id != current_vid {
                self.vertex_table.clear_if_matches(vertex_id, slot_id);
                self.free_slots.push(slot_id);
                self.purge.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chr_store() -> JunctionStore {
        // Two identical 12-base sequences sharing vertices 1..4 at matching
        // offsets, k = 3, so every junction lines up and the whole
        // chromosome should collapse into one block per strand pairing.
        let seq = b"ACGTACGTACGT".to_vec();
        let records = vec![
            (0u32, 0u32, 1i64),
            (0, 3, 2),
            (0, 6, 3),
            (0, 9, 4),
            (1, 0, 1),
            (1, 3, 2),
            (1, 6, 3),
            (1, 9, 4),
        ];
        JunctionStore::build(3, records, &[seq.clone(), seq], vec!["a".into(), "b".into()]).unwrap()
    }

    #[test]
    fn test_sweep_emits_matching_block_for_identical_chromosomes() {
        let store = two_chr_store();
        let config = RunConfig::new(3, 1, 200, 150, 1, false).unwrap();
        let next_block_id = AtomicI64::new(1);
        let mut sweeper = Sweeper::new(&store, &config, &next_block_id);
        let blocks = sweeper.sweep(0);
        assert!(!blocks.is_empty());
        assert!(blocks.iter().any(|b| b.chr == 0));
        assert!(blocks.iter().any(|b| b.chr == 1));
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let store = two_chr_store();
        let config = RunConfig::new(3, 1, 200, 150, 1, false).unwrap();
        let counter1 = AtomicI64::new(1);
        let counter2 = AtomicI64::new(1);
        let mut s1 = Sweeper::new(&store, &config, &counter1);
        let mut s2 = Sweeper::new(&store, &config, &counter2);
        let b1 = s1.sweep(0);
        let b2 = s2.sweep(0);
        assert_eq!(b1.len(), b2.len());
    }

    #[test]
    fn test_sweep_respects_min_block_size() {
        let store = two_chr_store();
        let config = RunConfig::new(3, 10_000, 200, 150, 1, false).unwrap();
        let next_block_id = AtomicI64::new(1);
        let mut sweeper = Sweeper::new(&store, &config, &next_block_id);
        let blocks = sweeper.sweep(0);
        assert!(blocks.is_empty());
    }

    fn three_chr_store() -> JunctionStore {
        // Each reference chromosome only links forward to later occurrences
        // of the same vertex, so chr0 as reference pairs with chr1/chr2 and
        // chr1 as reference (swept fresh, standing in for a second worker)
        // pairs with chr2 on its own.
        let seq = b"ACGTACGTACGT".to_vec();
        let records = vec![
            (0u32, 0u32, 1i64), (0, 4, 2), (0, 8, 3),
            (1, 0, 1), (1, 4, 2), (1, 8, 3),
            (2, 0, 1), (2, 4, 2), (2, 8, 3),
        ];
        JunctionStore::build(
            3,
            records,
            &[seq.clone(), seq.clone(), seq],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_block_ids_stay_unique_across_sweepers_sharing_a_counter() {
        let store = three_chr_store();
        let config = RunConfig::new(3, 1, 200, 150, 1, false).unwrap();
        let next_block_id = AtomicI64::new(1);

        let mut s1 = Sweeper::new(&store, &config, &next_block_id);
        let b1 = s1.sweep(0);
        assert!(!b1.is_empty());

        let mut s2 = Sweeper::new(&store, &config, &next_block_id);
        let b2 = s2.sweep(1);
        assert!(!b2.is_empty());

        let s1_ids: std::collections::BTreeSet<i64> = b1.iter().map(|b| b.signed_id.abs()).collect();
        let s2_ids: std::collections::BTreeSet<i64> = b2.iter().map(|b| b.signed_id.abs()).collect();
        assert!(s1_ids.is_disjoint(&s2_ids));
    }
}
