//! On-disk cache for downloaded datasets.
//!
//! Each dataset occupies one directory under the cache root holding the raw
//! ARFF payload and a small JSON metadata file. The metadata file is written
//! last, so an interrupted store leaves a cache miss rather than a half entry.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::types::CachedDescription;

/// File name of the raw ARFF payload inside a cache entry.
const ARFF_FILE: &str = "dataset.arff";
/// File name of the metadata JSON inside a cache entry.
const DESCRIPTION_FILE: &str = "description.json";

/// Default cache root under the platform cache directory.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("traer")
        .join("openml")
}

/// Fetch cache rooted at an explicit directory.
#[derive(Debug, Clone)]
pub struct FetchCache {
    root: PathBuf,
}

impl FetchCache {
    /// Create a cache rooted at `root`. The directory is created lazily on
    /// the first store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the entry for one dataset version.
    #[must_use]
    pub fn entry_dir(&self, name: &str, version: u32) -> PathBuf {
        self.root.join(format!("{name}-v{version}"))
    }

    /// Whether a complete entry exists for the dataset.
    #[must_use]
    pub fn contains(&self, name: &str, version: u32) -> bool {
        let dir = self.entry_dir(name, version);
        dir.join(ARFF_FILE).is_file() && dir.join(DESCRIPTION_FILE).is_file()
    }

    /// Store a downloaded dataset.
    ///
    /// The ARFF payload lands first and the metadata file last; readers treat
    /// an entry without metadata as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry directory cannot be created or written.
    pub fn store(&self, description: &CachedDescription, arff: &str) -> Result<()> {
        let dir = self.entry_dir(&description.name, description.version);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(ARFF_FILE), arff)?;
        let json = serde_json::to_string_pretty(description)?;
        fs::write(dir.join(DESCRIPTION_FILE), json)?;
        Ok(())
    }

    /// Load a cached dataset entry.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing or the metadata does not
    /// parse. Call [`FetchCache::contains`] first to avoid the missing case.
    pub fn load(&self, name: &str, version: u32) -> Result<(CachedDescription, String)> {
        let dir = self.entry_dir(name, version);
        let json = fs::read_to_string(dir.join(DESCRIPTION_FILE))?;
        let description: CachedDescription = serde_json::from_str(&json)?;
        let arff = fs::read_to_string(dir.join(ARFF_FILE))?;
        Ok((description, arff))
    }
}
