//! Turns terminated instances into block rows with real strand and
//! orientation recovered from the signed coordinate convention.

use crate::sweep::instance::Instance;

/// One side of a reported locally collinear block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInstance {
    /// Positive on the block's forward-strand participant, negative (same
    /// magnitude) on its reverse-strand participant. Two rows sharing a
    /// `block_id.abs()` form one block.
    pub signed_id: i64,
    pub chr: u32,
    pub start: i64,
    pub end: i64,
}

/// Emits the two rows for a terminated instance, minting `block_id` as the
/// shared positive id. `k` is the junction k-mer length, needed to turn a
/// junction-relative end coordinate into a base-pair-inclusive one.
pub fn emit(instance: &Instance, block_id: i64, k: usize) -> [BlockInstance; 2] {
    let k = k as i64;
    std::array::from_fn(|l| {
        let chr = instance.chr[l];
        let end_pos = instance.end_pos[l];
        let start_pos = instance.start_pos[l];
        if end_pos >= 0 {
            BlockInstance {
                signed_id: block_id,
                chr,
                start: start_pos,
                end: end_pos + k,
            }
        } else {
            BlockInstance {
                signed_id: -block_id,
                chr,
                start: -end_pos - k,
                end: -start_pos,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_forward_strand_both_sides() {
        let inst = Instance {
            chr: [0, 1],
            start_pos: [10, 20],
            end_pos: [110, 120],
            score: 50,
            has_next: false,
            parallel_end: true,
            end_idx: 0,
            end_reverse: false,
        };
        let [a, b] = emit(&inst, 7, 25);
        assert_eq!(a, BlockInstance { signed_id: 7, chr: 0, start: 10, end: 135 });
        assert_eq!(b, BlockInstance { signed_id: 7, chr: 1, start: 20, end: 145 });
    }

    #[test]
    fn test_emit_negative_strand_side_flips_id_sign() {
        let inst = Instance {
            chr: [0, 1],
            start_pos: [-200, 20],
            end_pos: [-120, 120],
            score: 50,
            has_next: false,
            parallel_end: true,
            end_idx: 0,
            end_reverse: false,
        };
        let [a, b] = emit(&inst, 3, 25);
        assert_eq!(a.signed_id, -3);
        assert_eq!(a.start, 120 - 25);
        assert_eq!(a.end, 200);
        assert_eq!(b.signed_id, 3);
    }
}
