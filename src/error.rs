//! Error types for the LCB finder.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading input or running the sweep.
#[derive(Error, Debug)]
pub enum LcbError {
    #[error("{0}")]
    BadArg(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("bad graph: {0}")]
    BadGraph(String),

    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LcbError>;
