//! MNIST digits fetcher.
//!
//! Fetches the `mnist_784` dataset (version 1) from the OpenML catalog,
//! narrows the label column to `i8`, and optionally persists both tables as
//! Feather files with fixed names.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::openml::OpenMlClient;
use crate::persist::{features_to_batch, labels_to_batch, StagedPersist};
use crate::table::{split_table, FeatureTable, LabelColumn};

/// Dataset name in the OpenML catalog.
pub const DATASET_NAME: &str = "mnist_784";
/// Dataset version pinned by this fetcher.
pub const DATASET_VERSION: u32 = 1;
/// File name of the persisted feature table.
pub const FEATURE_FILE: &str = "mnist_784_X.feather";
/// File name of the persisted label column.
pub const LABEL_FILE: &str = "mnist_784_y.feather";

/// Fetcher for the MNIST digits dataset.
///
/// The fetcher always targets [`DATASET_NAME`] at [`DATASET_VERSION`];
/// downloads land in the cache directory given at construction.
#[derive(Debug)]
pub struct DigitsFetcher {
    client: OpenMlClient,
}

impl DigitsFetcher {
    /// Create a fetcher caching downloads under `cache_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be constructed.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            client: OpenMlClient::new(cache_dir)?,
        })
    }

    /// Use a preconfigured catalog client.
    #[must_use]
    pub fn with_client(client: OpenMlClient) -> Self {
        Self { client }
    }

    /// The underlying catalog client.
    #[must_use]
    pub fn client(&self) -> &OpenMlClient {
        &self.client
    }

    /// Fetch the digits dataset as a feature table and an `i8` label column.
    ///
    /// With `persist_dir` set, the feature table is written to
    /// [`FEATURE_FILE`] and the labels to [`LABEL_FILE`] inside that
    /// directory. Both files are staged as temp files and renamed into place
    /// only after both have been written, so a failure leaves no partial
    /// output.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unreachable, the dataset is
    /// unknown, the payload does not parse, a label falls outside the `i8`
    /// range, or `persist_dir` is not an existing directory.
    pub fn fetch(&self, persist_dir: Option<&Path>) -> Result<(FeatureTable, LabelColumn)> {
        let dataset = self.client.fetch_dataset(DATASET_NAME, DATASET_VERSION)?;
        let target = dataset
            .description
            .default_target_attribute
            .as_deref()
            .ok_or_else(|| Error::Metadata {
                message: format!("dataset {DATASET_NAME} advertises no target attribute"),
            })?;
        let (features, labels) = split_table(&dataset.table, target)?;

        if let Some(dir) = persist_dir {
            let mut staged = StagedPersist::new(dir)?;
            staged.stage(FEATURE_FILE, &features_to_batch(&features)?)?;
            staged.stage(LABEL_FILE, &labels_to_batch(&labels)?)?;
            staged.commit()?;
        }

        Ok((features, labels))
    }
}
