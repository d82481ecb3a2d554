//! OpenML catalog access: name resolution, ARFF download, and fetch caching.

mod cache;
mod client;
mod types;


pub use cache::{default_cache_dir, FetchCache};
pub use client::{OpenMlClient, RawDataset, DEFAULT_API_BASE};
pub use types::CachedDescription;
