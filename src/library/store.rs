use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::WorkflowError;
use crate::fetch::FetchedTrack;

/// Moves fetched tracks into the library directory and remembers what was
/// persisted during this session.
///
/// At most one persist runs per track; no two sessions share temporary
/// files, so there is nothing to lock here.
pub struct LibraryStore {
    directory: PathBuf,
    persisted: Vec<PathBuf>,
}

impl LibraryStore {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            persisted: Vec::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Paths persisted so far this session, oldest first.
    pub fn persisted(&self) -> &[PathBuf] {
        &self.persisted
    }

    /// Move `track`'s file into the library directory, creating it if
    /// missing and preserving the original filename.
    ///
    /// On failure the temporary file is left intact, so the track stays
    /// playable and the move can simply be retried.
    pub fn persist(&mut self, track: &FetchedTrack) -> Result<PathBuf, WorkflowError> {
        let file_name = track.local_path.file_name().ok_or_else(|| {
            WorkflowError::Persist(format!("{} has no file name", track.local_path.display()))
        })?;

        fs::create_dir_all(&self.directory).map_err(|e| {
            WorkflowError::Persist(format!("create {}: {e}", self.directory.display()))
        })?;

        let destination = self.directory.join(file_name);
        move_file(&track.local_path, &destination)
            .map_err(|e| WorkflowError::Persist(format!("move to {}: {e}", destination.display())))?;

        // The per-fetch working directory is empty now; drop it quietly.
        // remove_dir refuses non-empty directories, so this can't eat
        // anything unexpected.
        if let Some(parent) = track.local_path.parent() {
            let _ = fs::remove_dir(parent);
        }

        self.persisted.push(destination.clone());
        Ok(destination)
    }
}

/// Rename when possible; fall back to copy+remove, since a rename fails when
/// temp and destination sit on different filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            if let Err(e) = fs::copy(from, to) {
                // Don't leave a half-written destination file around.
                let _ = fs::remove_file(to);
                return Err(e);
            }
            fs::remove_file(from)
        }
    }
}
