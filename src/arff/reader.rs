//! ARFF data-section reader producing column-major tables

use crate::error::{Error, Result};

use super::header::{parse_attribute, parse_relation, split_unquoted, unquote};
use super::header::{ArffAttribute, AttributeKind};

/// A parsed ARFF relation, stored column-major
#[derive(Debug, Clone)]
pub struct ArffTable {
    relation: String,
    attributes: Vec<ArffAttribute>,
    columns: Vec<ArffColumn>,
    rows: usize,
}

/// Values of one ARFF column
#[derive(Debug, Clone)]
pub enum ArffColumn {
    /// Numeric values; missing cells are NaN
    Numeric(Vec<f64>),
    /// Category codes into `categories`; missing cells are `None`
    Nominal { categories: Vec<String>, codes: Vec<Option<u32>> },
}

impl ArffTable {
    /// Relation name from the `@relation` directive
    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Number of data rows
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Number of declared attributes
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.attributes.len()
    }

    /// Declared attributes, in column order
    #[must_use]
    pub fn attributes(&self) -> &[ArffAttribute] {
        &self.attributes
    }

    /// Column data by position
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ArffColumn> {
        self.columns.get(index)
    }

    /// Position of the attribute with the given name
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }
}

impl ArffColumn {
    fn for_attribute(attribute: &ArffAttribute) -> Self {
        match &attribute.kind {
            AttributeKind::Numeric => Self::Numeric(Vec::new()),
            AttributeKind::Nominal(categories) => {
                Self::Nominal { categories: categories.clone(), codes: Vec::new() }
            }
        }
    }

    /// Number of cells in the column
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Nominal { codes, .. } => codes.len(),
        }
    }

    /// Whether the column has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the sparse-format default: 0 for numeric, the first category
    /// for nominal.
    fn push_default(&mut self) {
        match self {
            Self::Numeric(values) => values.push(0.0),
            Self::Nominal { codes, .. } => codes.push(Some(0)),
        }
    }

    /// Append a cell parsed from its textual form.
    fn push_cell(&mut self, cell: &str, line: usize) -> Result<()> {
        self.push_default();
        self.set_last(cell, line)
    }

    /// Replace the most recently appended cell. Used by the sparse-row path
    /// after defaults have been laid down.
    fn set_last(&mut self, cell: &str, line: usize) -> Result<()> {
        match self {
            Self::Numeric(values) => {
                let value = if cell == "?" {
                    f64::NAN
                } else {
                    let cell = unquote(cell);
                    cell.parse::<f64>().map_err(|_| Error::ArffParse {
                        line,
                        message: format!("invalid numeric value '{cell}'"),
                    })?
                };
                if let Some(slot) = values.last_mut() {
                    *slot = value;
                }
            }
            Self::Nominal { categories, codes } => {
                let code = if cell == "?" {
                    None
                } else {
                    let cell = unquote(cell);
                    let index =
                        categories.iter().position(|c| c == cell).ok_or_else(|| {
                            Error::ArffParse {
                                line,
                                message: format!("nominal value '{cell}' is not declared"),
                            }
                        })?;
                    Some(index as u32)
                };
                if let Some(slot) = codes.last_mut() {
                    *slot = code;
                }
            }
        }
        Ok(())
    }
}

/// Parse ARFF text into a column-major table.
///
/// Accepts the header (case-insensitive directives, `%` comments, quoted
/// names) followed by a `@data` section of dense or sparse rows.
pub fn parse(text: &str) -> Result<ArffTable> {
    let mut relation = String::new();
    let mut attributes: Vec<ArffAttribute> = Vec::new();
    let mut columns: Vec<ArffColumn> = Vec::new();
    let mut in_data = false;
    let mut rows = 0usize;
    let mut last_line = 0usize;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if in_data {
            if line.starts_with('@') {
                return Err(Error::ArffParse {
                    line: line_no,
                    message: "directive after @data section".into(),
                });
            }
            if line.starts_with('{') {
                parse_sparse_row(line, line_no, &mut columns)?;
            } else {
                parse_dense_row(line, line_no, &mut columns)?;
            }
            rows += 1;
            continue;
        }

        let (directive, rest) = match line.split_once(char::is_whitespace) {
            Some((directive, rest)) => (directive, rest),
            None => (line, ""),
        };
        match directive.to_ascii_lowercase().as_str() {
            "@relation" => relation = parse_relation(rest, line_no)?,
            "@attribute" => attributes.push(parse_attribute(rest, line_no)?),
            "@data" => {
                if attributes.is_empty() {
                    return Err(Error::ArffParse {
                        line: line_no,
                        message: "@data before any @attribute declaration".into(),
                    });
                }
                columns = attributes.iter().map(ArffColumn::for_attribute).collect();
                in_data = true;
            }
            other => {
                return Err(Error::ArffParse {
                    line: line_no,
                    message: format!("unknown directive '{other}'"),
                })
            }
        }
    }

    if !in_data {
        return Err(Error::ArffParse { line: last_line, message: "missing @data section".into() });
    }

    Ok(ArffTable { relation, attributes, columns, rows })
}

/// Parse one dense row: comma-separated cells, positionally matching the
/// declared attributes.
fn parse_dense_row(line: &str, line_no: usize, columns: &mut [ArffColumn]) -> Result<()> {
    let cells = split_unquoted(line, ',');
    if cells.len() != columns.len() {
        return Err(Error::ArffParse {
            line: line_no,
            message: format!("expected {} values, got {}", columns.len(), cells.len()),
        });
    }
    for (column, cell) in columns.iter_mut().zip(cells) {
        column.push_cell(cell.trim(), line_no)?;
    }
    Ok(())
}

/// Parse one sparse row: `{index value, index value, ...}` with omitted
/// entries taking the sparse default.
fn parse_sparse_row(line: &str, line_no: usize, columns: &mut [ArffColumn]) -> Result<()> {
    let inner = line.strip_prefix('{').and_then(|s| s.strip_suffix('}')).ok_or_else(|| {
        Error::ArffParse { line: line_no, message: "sparse row must be enclosed in braces".into() }
    })?;

    for column in columns.iter_mut() {
        column.push_default();
    }

    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(());
    }

    let n_cols = columns.len();
    for entry in split_unquoted(inner, ',') {
        let entry = entry.trim();
        let (index, value) = entry.split_once(char::is_whitespace).ok_or_else(|| {
            Error::ArffParse {
                line: line_no,
                message: format!("sparse entry '{entry}' must be 'index value'"),
            }
        })?;
        let index: usize = index.parse().map_err(|_| Error::ArffParse {
            line: line_no,
            message: format!("invalid sparse index '{index}'"),
        })?;
        let column = columns.get_mut(index).ok_or_else(|| Error::ArffParse {
            line: line_no,
            message: format!("sparse index {index} out of range for {n_cols} attributes"),
        })?;
        column.set_last(value.trim(), line_no)?;
    }
    Ok(())
}
