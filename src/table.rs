//! In-memory feature and label tables produced from a parsed ARFF dataset.

use ndarray::Array2;

use crate::arff::{ArffColumn, ArffTable};
use crate::error::{Error, Result};

/// Dense numeric feature matrix with one named column per ARFF attribute.
///
/// Rows are observations, columns follow the attribute order of the source
/// dataset with the target attribute removed.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    names: Vec<String>,
    values: Array2<f64>,
}

impl FeatureTable {
    pub(crate) fn new(names: Vec<String>, values: Array2<f64>) -> Self {
        Self { names, values }
    }

    /// Number of observations.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of feature columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }

    /// Column names in table order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// The underlying row-major matrix.
    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

/// Target column narrowed to `i8`, one entry per feature row.
#[derive(Debug, Clone)]
pub struct LabelColumn {
    name: String,
    values: Vec<i8>,
}

impl LabelColumn {
    pub(crate) fn new(name: String, values: Vec<i8>) -> Self {
        Self { name, values }
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name of the source target attribute.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label values in row order.
    #[must_use]
    pub fn values(&self) -> &[i8] {
        &self.values
    }
}

/// Split a parsed ARFF table into a numeric feature matrix and an `i8` label
/// column.
///
/// Every non-target attribute must be numeric. The target attribute must be
/// nominal with categories that parse as integers in the `i8` range; anything
/// wider fails with [`Error::LabelRange`] rather than wrapping.
pub fn split_table(table: &ArffTable, target: &str) -> Result<(FeatureTable, LabelColumn)> {
    let target_index = table.column_index(target).ok_or_else(|| Error::Metadata {
        message: format!("target attribute '{target}' not present in dataset"),
    })?;

    let rows = table.n_rows();
    let feature_count = table.n_cols() - 1;
    let mut names = Vec::with_capacity(feature_count);
    let mut values = Array2::zeros((rows, feature_count));

    let mut out_col = 0;
    for (index, attribute) in table.attributes().iter().enumerate() {
        if index == target_index {
            continue;
        }
        let column = table.column(index).ok_or_else(|| Error::Metadata {
            message: format!("attribute '{}' has no data column", attribute.name),
        })?;
        let ArffColumn::Numeric(cells) = column else {
            return Err(Error::NonNumericFeature {
                name: attribute.name.clone(),
            });
        };
        for (row, cell) in cells.iter().enumerate() {
            values[[row, out_col]] = *cell;
        }
        names.push(attribute.name.clone());
        out_col += 1;
    }

    let labels = extract_labels(table, target, target_index)?;
    if rows != labels.len() {
        return Err(Error::ShapeMismatch {
            feature_rows: rows,
            label_rows: labels.len(),
        });
    }

    Ok((
        FeatureTable::new(names, values),
        LabelColumn::new(target.to_string(), labels),
    ))
}

fn extract_labels(table: &ArffTable, target: &str, target_index: usize) -> Result<Vec<i8>> {
    let column = table.column(target_index).ok_or_else(|| Error::Metadata {
        message: format!("target attribute '{target}' has no data column"),
    })?;
    let ArffColumn::Nominal { categories, codes } = column else {
        return Err(Error::Metadata {
            message: format!("target attribute '{target}' must be nominal, got numeric"),
        });
    };

    let mut labels = Vec::with_capacity(codes.len());
    for (row, code) in codes.iter().enumerate() {
        let code = code.ok_or(Error::MissingLabel { row })?;
        let category = &categories[code as usize];
        let value: i64 = category.parse().map_err(|_| Error::LabelParse {
            value: category.clone(),
            row,
        })?;
        let label = i8::try_from(value).map_err(|_| Error::LabelRange { value, row })?;
        labels.push(label);
    }
    Ok(labels)
}
