#![allow(clippy::too_many_arguments)]

//! Finds locally collinear blocks, pairs of approximately colinear
//! stretches of sequence, across chromosomes, from a pre-built compacted
//! de Bruijn junction graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use lcb_find::config::RunConfig;
//! use lcb_find::{fasta, graph, junction::JunctionStore, worker_pool};
//! use std::path::Path;
//!
//! let config = RunConfig::new(25, 50, 200, 150, 4, false).unwrap();
//! let records = graph::load_filtered(Path::new("graph.bin"), config.abundance_threshold).unwrap();
//! let fasta_records = fasta::load_all(&[Path::new("genome.fa")]).unwrap();
//! let sequences: Vec<_> = fasta_records.iter().map(|r| r.sequence.clone()).collect();
//! let descriptions: Vec<_> = fasta_records.into_iter().map(|r| r.description).collect();
//! let store = JunctionStore::build(config.k, records, &sequences, descriptions).unwrap();
//! let blocks = worker_pool::run(&store, &config);
//! ```

pub mod buffers;
pub mod config;
pub mod cursor;
pub mod emitter;
pub mod error;
pub mod fasta;
pub mod graph;
pub mod junction;
pub mod output;
pub mod sweep;
pub mod worker_pool;

pub use config::RunConfig;
pub use emitter::BlockInstance;
pub use error::{LcbError, Result};
pub use junction::JunctionStore;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::RunConfig;
    pub use crate::emitter::BlockInstance;
    pub use crate::error::{LcbError, Result};
    pub use crate::junction::JunctionStore;
    pub use crate::worker_pool;
}
