//! Error taxonomy for the search/fetch/persist workflow.
//!
//! Every variant is recoverable: the event loop catches these at the boundary
//! of the triggering action, writes the message into the session and keeps
//! going. Only a missing search credential at startup is fatal, and that is
//! handled before the terminal is even set up.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Network/API/parse problems while searching. The user may retry.
    #[error("search failed: {0}")]
    Search(String),

    /// The external download/transcode tool errored out.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The tool reported success but wrote no file with the target extension.
    #[error("fetch produced no {format} file in {}", dir.display())]
    FetchMissing { dir: PathBuf, format: String },

    /// The tool wrote more than one candidate file; refusing to guess.
    #[error("fetch produced {count} {format} files in {}, expected exactly one", dir.display())]
    FetchAmbiguous {
        dir: PathBuf,
        format: String,
        count: usize,
    },

    /// Moving a fetched file into the library failed. The temporary file is
    /// still there, so the track stays playable and the move can be retried.
    #[error("persist failed: {0}")]
    Persist(String),
}
