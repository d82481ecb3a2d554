//! OpenML catalog HTTP client.
//!
//! Resolves a dataset by name and version through the JSON catalog, downloads
//! the ARFF payload, and keeps completed downloads in a [`FetchCache`].

use std::path::PathBuf;

use crate::arff::{self, ArffTable};
use crate::error::{Error, Result};

use super::cache::FetchCache;
use super::types::{
    CachedDescription, DatasetDescription, DatasetSummary, DescriptionResponse, ListResponse,
};

/// Base URL of the public OpenML service.
pub const DEFAULT_API_BASE: &str = "https://www.openml.org";

/// A dataset as it comes off the catalog: parsed ARFF plus the metadata that
/// located it.
#[derive(Debug)]
pub struct RawDataset {
    /// Catalog metadata for the download.
    pub description: CachedDescription,
    /// Parsed ARFF payload.
    pub table: ArffTable,
}

/// HTTP client for the OpenML catalog with an on-disk fetch cache.
pub struct OpenMlClient {
    api_base: String,
    cache: FetchCache,
    client: reqwest::blocking::Client,
}

impl OpenMlClient {
    /// Create a client caching downloads under `cache_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("traer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http {
                url: DEFAULT_API_BASE.to_string(),
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cache: FetchCache::new(cache_dir),
            client,
        })
    }

    /// Override the catalog base URL.
    #[must_use]
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// The fetch cache backing this client.
    #[must_use]
    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// Fetch a dataset by name and version, serving from the cache when a
    /// complete entry exists.
    ///
    /// A fresh download is parsed before it is stored, so a payload that does
    /// not parse never poisons the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unreachable, the dataset is
    /// unknown, or the payload does not parse as ARFF.
    pub fn fetch_dataset(&self, name: &str, version: u32) -> Result<RawDataset> {
        if self.cache.contains(name, version) {
            let (description, arff) = self.cache.load(name, version)?;
            println!(
                "  Using cached {name} v{version} from {}",
                self.cache.root().display()
            );
            let table = arff::parse(&arff)?;
            return Ok(RawDataset { description, table });
        }

        let summary = self.find_dataset(name, version)?;
        let detail = self.fetch_description(summary.did)?;
        let description = CachedDescription {
            did: summary.did,
            name: summary.name,
            version: summary.version,
            url: detail.url,
            default_target_attribute: detail.default_target_attribute,
        };

        println!("  Downloading {name} v{version} from {}", description.url);
        let arff = self.download_text(&description.url)?;
        let table = arff::parse(&arff)?;
        self.cache.store(&description, &arff)?;
        println!("  Loaded {} rows from {name}", table.n_rows());

        Ok(RawDataset { description, table })
    }

    /// Resolve a dataset name and version to its catalog entry.
    fn find_dataset(&self, name: &str, version: u32) -> Result<DatasetSummary> {
        let url = format!(
            "{}/api/v1/json/data/list/data_name/{name}/limit/2/status/active/data_version/{version}",
            self.api_base
        );
        let response = self.get(&url)?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            // The catalog answers empty list queries with 412.
            if status == 404 || status == 412 {
                return Err(Error::DatasetNotFound {
                    name: name.to_string(),
                    version,
                });
            }
            return Err(Error::CatalogStatus { status, url });
        }

        let body: ListResponse = response.json().map_err(|e| Error::Http {
            url: url.clone(),
            message: format!("Failed to parse catalog listing: {e}"),
        })?;
        body.data
            .dataset
            .into_iter()
            .next()
            .ok_or_else(|| Error::DatasetNotFound {
                name: name.to_string(),
                version,
            })
    }

    /// Fetch the full description for a dataset id.
    fn fetch_description(&self, did: u64) -> Result<DatasetDescription> {
        let url = format!("{}/api/v1/json/data/{did}", self.api_base);
        let response = self.get(&url)?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(Error::CatalogStatus { status, url });
        }

        let body: DescriptionResponse = response.json().map_err(|e| Error::Http {
            url: url.clone(),
            message: format!("Failed to parse dataset description: {e}"),
        })?;
        Ok(body.description)
    }

    /// Download a text payload.
    fn download_text(&self, url: &str) -> Result<String> {
        let response = self.get(url)?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(Error::CatalogStatus {
                status,
                url: url.to_string(),
            });
        }
        response.text().map_err(|e| Error::Http {
            url: url.to_string(),
            message: format!("Failed to read dataset body: {e}"),
        })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        self.client.get(url).send().map_err(|e| Error::Http {
            url: url.to_string(),
            message: format!("Request failed: {e}"),
        })
    }
}

impl std::fmt::Debug for OpenMlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenMlClient")
            .field("api_base", &self.api_base)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
