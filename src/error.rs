// Error types for loading the datasets

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while loading the input tables
///
/// Any of these aborts the run before a single query executes.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },
}
