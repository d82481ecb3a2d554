//! ARFF header parsing: `@relation` and `@attribute` directives

use crate::error::{Error, Result};

/// Attribute type declared in an ARFF header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    /// `numeric`, `real` or `integer`
    Numeric,
    /// Enumerated categories, e.g. `{0,1,2}`
    Nominal(Vec<String>),
}

/// A single `@attribute` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArffAttribute {
    /// Attribute (column) name
    pub name: String,
    /// Declared value type
    pub kind: AttributeKind,
}

impl ArffAttribute {
    /// Whether the attribute holds numeric values
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }
}

/// Strip one matching pair of single or double quotes, if present.
pub(super) fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse the remainder of an `@relation` line into the relation name.
pub(super) fn parse_relation(rest: &str, line: usize) -> Result<String> {
    let name = unquote(rest.trim());
    if name.is_empty() {
        return Err(Error::ArffParse { line, message: "@relation requires a name".into() });
    }
    Ok(name.to_string())
}

/// Parse the remainder of an `@attribute` line into a declaration.
///
/// The name may be quoted (and then contain spaces); everything after it is
/// the type specification.
pub(super) fn parse_attribute(rest: &str, line: usize) -> Result<ArffAttribute> {
    let rest = rest.trim();
    let (name, spec) = split_name(rest, line)?;
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(Error::ArffParse {
            line,
            message: format!("attribute '{name}' is missing a type"),
        });
    }

    let kind = if spec.starts_with('{') {
        AttributeKind::Nominal(parse_nominal_spec(spec, line)?)
    } else {
        match spec.to_ascii_lowercase().as_str() {
            "numeric" | "real" | "integer" => AttributeKind::Numeric,
            other => {
                return Err(Error::ArffParse {
                    line,
                    message: format!("unsupported attribute type '{other}'"),
                })
            }
        }
    };

    Ok(ArffAttribute { name, kind })
}

/// Split an attribute declaration into its (possibly quoted) name and the
/// trailing type specification.
fn split_name(rest: &str, line: usize) -> Result<(String, &str)> {
    if let Some(quote) = rest.chars().next().filter(|c| *c == '\'' || *c == '"') {
        let inner = &rest[1..];
        let end = inner.find(quote).ok_or_else(|| Error::ArffParse {
            line,
            message: "unterminated quoted attribute name".into(),
        })?;
        return Ok((inner[..end].to_string(), &inner[end + 1..]));
    }
    match rest.split_once(char::is_whitespace) {
        Some((name, spec)) => Ok((name.to_string(), spec)),
        None => Err(Error::ArffParse {
            line,
            message: "@attribute requires a name and a type".into(),
        }),
    }
}

/// Parse a nominal specification `{a,b,c}` into its category list.
fn parse_nominal_spec(spec: &str, line: usize) -> Result<Vec<String>> {
    let inner = spec
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| Error::ArffParse {
            line,
            message: "nominal specification must be enclosed in braces".into(),
        })?;

    let categories: Vec<String> =
        split_unquoted(inner, ',').iter().map(|c| unquote(c.trim()).to_string()).collect();
    if categories.iter().any(String::is_empty) || inner.trim().is_empty() {
        return Err(Error::ArffParse {
            line,
            message: "nominal specification must declare at least one non-empty category".into(),
        });
    }
    Ok(categories)
}

/// Split on `sep`, ignoring separators inside single or double quotes.
pub(super) fn split_unquoted(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '\'' || ch == '"' => quote = Some(ch),
            None if ch == sep => {
                parts.push(&text[start..idx]);
                start = idx + sep.len_utf8();
            }
            None => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
