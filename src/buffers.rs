//! Buffer size constants for I/O.
//!
//! These constants control memory usage vs I/O throughput tradeoffs.
//! The default sizes balance good performance with reasonable memory usage.

/// Default output buffer size (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Low-memory output buffer size (256 KB).
pub const LOW_MEMORY_OUTPUT_BUFFER: usize = 256 * 1024;

/// Default input buffer size (256 KB). Used for both the FASTA and the
/// binary junction-graph readers.
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Default line/record buffer capacity (1 KB).
pub const DEFAULT_LINE_BUFFER: usize = 1024;

/// Returns the appropriate output buffer size based on low_memory flag.
#[inline]
pub const fn output_buffer_size(low_memory: bool) -> usize {
    if low_memory {
        LOW_MEMORY_OUTPUT_BUFFER
    } else {
        DEFAULT_OUTPUT_BUFFER
    }
}
