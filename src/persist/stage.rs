//! All-or-nothing publishing of persisted tables.
//!
//! Batches are first written to `.tmp` siblings inside the output directory,
//! then renamed into place only once every file has been written. A failure
//! before commit leaves no partial output behind.

use std::fs;
use std::path::PathBuf;

use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};

use super::feather::write_feather;

/// Staged writer that publishes a set of Feather files atomically per file.
#[derive(Debug)]
pub struct StagedPersist {
    dir: PathBuf,
    /// Pairs of (temp path, final path) awaiting commit.
    staged: Vec<(PathBuf, PathBuf)>,
}

impl StagedPersist {
    /// Create a staged writer targeting an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingOutputDir`] if `dir` is not a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(Error::MissingOutputDir { path: dir });
        }
        Ok(Self {
            dir,
            staged: Vec::new(),
        })
    }

    /// Encode a batch to `<dir>/<file_name>.tmp`, to be published on commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be written.
    pub fn stage(&mut self, file_name: &str, batch: &RecordBatch) -> Result<()> {
        let final_path = self.dir.join(file_name);
        let temp_path = self.dir.join(format!("{file_name}.tmp"));
        write_feather(&temp_path, batch)?;
        self.staged.push((temp_path, final_path));
        Ok(())
    }

    /// Rename every staged file into place, in stage order.
    ///
    /// Returns the published paths. On failure the remaining temp files are
    /// removed on drop, leaving only the files renamed before the failure.
    ///
    /// # Errors
    ///
    /// Returns an error if a rename fails.
    pub fn commit(mut self) -> Result<Vec<PathBuf>> {
        let mut published = Vec::with_capacity(self.staged.len());
        while !self.staged.is_empty() {
            let (temp_path, final_path) = self.staged.remove(0);
            if let Err(e) = fs::rename(&temp_path, &final_path) {
                // Keep the failed pair staged so drop removes its temp file.
                self.staged.insert(0, (temp_path, final_path));
                return Err(e.into());
            }
            published.push(final_path);
        }
        Ok(published)
    }
}

impl Drop for StagedPersist {
    fn drop(&mut self) {
        for (temp_path, _) in &self.staged {
            let _ = fs::remove_file(temp_path);
        }
    }
}
