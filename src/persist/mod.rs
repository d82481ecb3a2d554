//! Columnar persistence: Feather encoding plus staged, all-or-nothing
//! publishing.

mod feather;
mod stage;


pub use feather::{features_to_batch, labels_to_batch, read_feather, write_feather};
pub use stage::StagedPersist;
