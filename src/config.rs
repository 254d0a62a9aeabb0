//! Run configuration for the LCB finder.
//!
//! Every tunable here changes the semantics of the sweep (k-mer length, branch and
//! block size thresholds, abundance filter) or is read exactly once at
//! startup (thread count, legacy output). All of them are threaded through
//! explicitly as a `RunConfig` rather than stored in statics, since the
//! sweep already carries a `JunctionStore` reference through every layer and
//! a second implicit global would only invite the two going out of sync.

use crate::error::{LcbError, Result};

/// All CLI-tunable parameters for a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Junction k-mer length. Must be odd.
    pub k: usize,
    /// Minimum total block length (M).
    pub min_block_size: i64,
    /// Maximum allowed gap when extending within a bubble (B).
    pub max_branch_size: i64,
    /// Junctions occurring at least this many times are dropped by the loader.
    pub abundance_threshold: usize,
    /// Worker thread count for the sweep.
    pub threads: usize,
    /// Also emit the legacy `blocks_coords.txt` index.
    pub legacy: bool,
}

impl RunConfig {
    pub fn new(
        k: usize,
        min_block_size: i64,
        max_branch_size: i64,
        abundance_threshold: usize,
        threads: usize,
        legacy: bool,
    ) -> Result<Self> {
        if k % 2 == 0 {
            return Err(LcbError::BadArg(format!("value of k must be odd, got {k}")));
        }

        if threads == 0 {
            return Err(LcbError::BadArg("thread count must be >= 1".to_string()));
        }

        Ok(Self {
            k,
            min_block_size,
            max_branch_size,
            abundance_threshold,
            threads,
            legacy,
        })
    }
}
