//! Feather encoding for feature and label tables.
//!
//! Feather v2 is the Arrow IPC file format, so encoding goes through plain
//! Arrow record batches and the IPC file writer.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::ipc::reader::FileReader;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::table::{FeatureTable, LabelColumn};

/// Convert a feature table into a record batch of non-nullable `Float64`
/// columns, one per feature.
pub fn features_to_batch(features: &FeatureTable) -> Result<RecordBatch> {
    let fields: Vec<Field> = features
        .column_names()
        .iter()
        .map(|name| Field::new(name, DataType::Float64, false))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let values = features.values();
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(features.n_cols());
    for column in 0..features.n_cols() {
        let array = Float64Array::from_iter_values(values.column(column).iter().copied());
        arrays.push(Arc::new(array));
    }

    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Convert a label column into a single-column `Int8` record batch named
/// after the source target attribute.
pub fn labels_to_batch(labels: &LabelColumn) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![Field::new(
        labels.name(),
        DataType::Int8,
        false,
    )]));
    let array = Int8Array::from(labels.values().to_vec());
    Ok(RecordBatch::try_new(schema, vec![Arc::new(array)])?)
}

/// Write a record batch to `path` as a Feather file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the batch cannot be
/// encoded.
pub fn write_feather(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = FileWriter::try_new(file, batch.schema_ref())?;
    writer.write(batch)?;
    writer.finish()?;
    Ok(())
}

/// Read a Feather file back into a single record batch.
///
/// Files written by [`write_feather`] hold one batch; multi-batch files are
/// concatenated.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid Arrow IPC
/// file.
pub fn read_feather(path: &Path) -> Result<RecordBatch> {
    let file = File::open(path)?;
    let reader = FileReader::try_new(file, None)?;
    let schema = reader.schema();

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }

    match batches.len() {
        0 => Ok(RecordBatch::new_empty(schema)),
        1 => Ok(batches.remove(0)),
        _ => Ok(arrow::compute::concat_batches(&schema, &batches)?),
    }
}
