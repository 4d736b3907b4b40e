//! Errors raised while reading and summarising `.dat` files.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("file `{}` does not exist", path.display())]
    MissingFile { path: PathBuf },

    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("nothing to aggregate: {0}")]
    EmptyInput(String),

    #[error("worker task failed: {0}")]
    Task(String),

    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
