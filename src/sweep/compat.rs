//! The compatibility predicate that decides whether a successor pair of
//! junctions may extend an open instance, and by how much its score grows.

use crate::sweep::instance::Instance;

/// One side of a prospective extension: where it would land, and where the
/// side's previous occurrence in sequence order sits (if any).
#[derive(Debug, Clone, Copy)]
pub struct Successor {
    pub chr: u32,
    pub position: i64,
    pub previous_position: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compat {
    Reject,
    Accept { increment: i64 },
}

/// Evaluates the compatibility rule for extending `candidate`
/// with successors `succ[0]` (reference side) and `succ[1]` (other side).
pub fn compatible(candidate: &Instance, succ: [Successor; 2], max_branch_size: i64) -> Compat {
    let g0 = (candidate.end_pos[0] - succ[0].position).abs();
    let g1 = (candidate.end_pos[1] - succ[1].position).abs();

    let exact = candidate.parallel_end
        && succ[0].previous_position == Some(candidate.end_pos[0])
        && succ[1].previous_position == Some(candidate.end_pos[1]);
    let within_bubble = g0 < max_branch_size && g1 < max_branch_size;

    if !exact && !within_bubble {
        return Compat::Reject;
    }

    if succ[0].chr == succ[1].chr {
        let min1 = candidate.start_pos[1].abs().min(candidate.end_pos[1].abs());
        let max1 = candidate.start_pos[1].abs().max(candidate.end_pos[1].abs());
        let lo0 = candidate.start_pos[0].min(candidate.end_pos[0]);
        let hi0 = candidate.start_pos[0].max(candidate.end_pos[0]);
        let overlaps_from_side1 = min1 >= lo0 && min1 <= hi0;
        let overlaps_from_side0 = candidate.start_pos[0] >= min1 && candidate.start_pos[0] <= max1;
        if overlaps_from_side1 || overlaps_from_side0 {
            return Compat::Reject;
        }
    }

    if exact {
        Compat::Accept { increment: g0 }
    } else {
        Compat::Accept { increment: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_instance() -> Instance {
        Instance {
            chr: [0, 1],
            start_pos: [0, 0],
            end_pos: [100, 100],
            score: 5,
            has_next: false,
            parallel_end: true,
            end_idx: 0,
            end_reverse: false,
        }
    }

    #[test]
    fn test_within_bubble_scores_one() {
        let inst = base_instance();
        let succ = [
            Successor { chr: 0, position: 110, previous_position: Some(105) },
            Successor { chr: 1, position: 115, previous_position: Some(108) },
        ];
        assert_eq!(compatible(&inst, succ, 200), Compat::Accept { increment: 1 });
    }

    #[test]
    fn test_exact_continuation_scores_gap() {
        let mut inst = base_instance();
        inst.parallel_end = true;
        let succ = [
            Successor { chr: 0, position: 130, previous_position: Some(100) },
            Successor { chr: 1, position: 140, previous_position: Some(100) },
        ];
        assert_eq!(compatible(&inst, succ, 10), Compat::Accept { increment: 30 });
    }

    #[test]
    fn test_gap_too_large_rejects() {
        let inst = base_instance();
        let succ = [
            Successor { chr: 0, position: 1000, previous_position: None },
            Successor { chr: 1, position: 1000, previous_position: None },
        ];
        assert_eq!(compatible(&inst, succ, 50), Compat::Reject);
    }

    #[test]
    fn test_self_overlap_on_same_chromosome_rejects() {
        let inst = Instance {
            chr: [2, 2],
            start_pos: [0, 50],
            end_pos: [100, 150],
            score: 1,
            has_next: false,
            parallel_end: true,
            end_idx: 0,
            end_reverse: false,
        };
        let succ = [
            Successor { chr: 2, position: 110, previous_position: Some(105) },
            Successor { chr: 2, position: 160, previous_position: Some(155) },
        ];
        assert_eq!(compatible(&inst, succ, 200), Compat::Reject);
    }
}
