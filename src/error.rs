use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by extraction, the transform pipeline, and the file-based
/// analysis operations.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The row source could not be reached at all. Fatal for the whole run.
    #[error("row source unreachable: {0}")]
    Connection(String),

    /// A windowed query (or column discovery) failed. Fatal for that table.
    #[error("query failed: {0}")]
    Query(String),

    /// A record lacks an expected field. Callers treat this as "does not
    /// match" during aggregation and partitioning, never as fatal.
    #[error("record is missing field `{0}`")]
    MissingField(String),

    /// Copying a referenced blob failed; the record would otherwise be
    /// written with a dangling reference, so the table's export aborts.
    #[error("relocating blob {src} -> {dest}")]
    Relocation {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DumpError>;
