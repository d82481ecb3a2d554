//! Wire and cache types for the OpenML JSON API.

use serde::{Deserialize, Serialize};

/// Top-level payload of the dataset list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    pub data: DataList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataList {
    pub dataset: Vec<DatasetSummary>,
}

/// One catalog entry from the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DatasetSummary {
    pub did: u64,
    pub name: String,
    pub version: u32,
}

/// Top-level payload of the dataset description endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DescriptionResponse {
    #[serde(rename = "data_set_description")]
    pub description: DatasetDescription,
}

/// Dataset description fields the fetcher consumes.
///
/// The endpoint returns many more fields; everything not needed for the
/// download is ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DatasetDescription {
    /// Direct download URL for the ARFF payload.
    pub url: String,
    #[serde(default)]
    pub default_target_attribute: Option<String>,
}

/// Metadata persisted next to a cached ARFF download.
///
/// This is the cache's own schema, not an OpenML wire format. It records
/// enough to serve later fetches without touching the catalog again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedDescription {
    /// OpenML dataset id.
    pub did: u64,
    /// Dataset name as listed in the catalog.
    pub name: String,
    /// Dataset version.
    pub version: u32,
    /// URL the ARFF payload was downloaded from.
    pub url: String,
    /// Target attribute advertised by the catalog, when present.
    pub default_target_attribute: Option<String>,
}
