//! Fetch the OpenML `mnist_784` dataset into typed, columnar tables.
//!
//! This crate resolves the dataset through the OpenML JSON catalog, caches
//! the raw download on disk, and hands back a dense feature matrix together
//! with the label column narrowed to `i8`:
//! - Catalog client with an explicit, per-client cache directory
//! - ARFF reader for dense and sparse payloads
//! - Optional Feather persistence with all-or-nothing publishing
//!
//! # Example
//!
//! ```no_run
//! use traer::{default_cache_dir, DigitsFetcher};
//!
//! # fn main() -> traer::Result<()> {
//! let fetcher = DigitsFetcher::new(default_cache_dir())?;
//! let (features, labels) = fetcher.fetch(None)?;
//! println!("{} rows x {} features", features.n_rows(), features.n_cols());
//! println!("first label: {}", labels.values()[0]);
//! # Ok(())
//! # }
//! ```

pub mod arff;
pub mod digits;
pub mod error;
pub mod openml;
pub mod persist;
pub mod table;

pub use digits::DigitsFetcher;
pub use error::{Error, Result};
pub use openml::{default_cache_dir, OpenMlClient};
pub use table::{FeatureTable, LabelColumn};
