//! ARFF tabular format reader
//!
//! ARFF (Attribute-Relation File Format) is the tabular wire format served
//! by the OpenML catalog: a header declaring the relation and its attributes
//! followed by a `@data` section of dense or sparse rows.

mod header;
mod reader;


pub use header::{ArffAttribute, AttributeKind};
pub use reader::{parse, ArffColumn, ArffTable};
