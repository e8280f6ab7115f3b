//! Field values and indexing flags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KazsearchError, Result};

/// The value held by a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Free text; tokenized into terms when the field is tokenized.
    Text(String),
    /// A raw 64-bit integer used for range comparisons.
    Integer(i64),
}

impl FieldValue {
    /// Get the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Integer(_) => None,
        }
    }

    /// Get the integer content, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Text(_) => None,
        }
    }

    /// Parse a text value as an integer for `field`.
    pub fn parse_integer(field: &str, raw: &str) -> Result<FieldValue> {
        raw.trim()
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|e| KazsearchError::malformed_field(field, raw, e.to_string()))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// How a field participates in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Keep the value verbatim for retrieval by document id.
    pub stored: bool,
    /// Make the value searchable.
    pub indexed: bool,
    /// Run text values through the analyzer. Untokenized text is indexed
    /// verbatim as one term.
    pub tokenized: bool,
}

impl FieldOption {
    /// Stored, indexed and tokenized: the usual text field.
    pub fn text() -> Self {
        FieldOption {
            stored: true,
            indexed: true,
            tokenized: true,
        }
    }

    /// Stored and indexed as a number, never tokenized.
    pub fn integer() -> Self {
        FieldOption {
            stored: true,
            indexed: true,
            tokenized: false,
        }
    }

    /// Stored only.
    pub fn stored_only() -> Self {
        FieldOption {
            stored: true,
            indexed: false,
            tokenized: false,
        }
    }

    /// Infer the usual option for a value.
    pub fn for_value(value: &FieldValue) -> Self {
        match value {
            FieldValue::Text(_) => Self::text(),
            FieldValue::Integer(_) => Self::integer(),
        }
    }
}

/// A named value with its indexing flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// The field value.
    pub value: FieldValue,
    /// The field indexing options.
    pub option: FieldOption,
}

impl Field {
    /// Create a new field with a value and option.
    pub fn new<S: Into<String>>(name: S, value: FieldValue, option: FieldOption) -> Self {
        Field {
            name: name.into(),
            value,
            option,
        }
    }

    /// Create a field with the option inferred from the value type.
    pub fn with_default_option<S: Into<String>>(name: S, value: FieldValue) -> Self {
        let option = FieldOption::for_value(&value);
        Field::new(name, value, option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        let text = FieldValue::from("Астана");
        assert_eq!(text.as_text(), Some("Астана"));
        assert_eq!(text.as_integer(), None);

        let int = FieldValue::from(42);
        assert_eq!(int.as_integer(), Some(42));
        assert_eq!(int.to_string(), "42");
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(
            FieldValue::parse_integer("creationDate", " 1454284800 ").unwrap(),
            FieldValue::Integer(1454284800)
        );

        let err = FieldValue::parse_integer("creationDate", "Feb 1").unwrap_err();
        assert!(matches!(
            err,
            KazsearchError::MalformedFieldValue { ref field, .. } if field == "creationDate"
        ));
    }

    #[test]
    fn test_default_options() {
        let field = Field::with_default_option("title", FieldValue::from("x"));
        assert!(field.option.tokenized);

        let field = Field::with_default_option("creationDate", FieldValue::from(0));
        assert!(field.option.indexed);
        assert!(!field.option.tokenized);
    }
}
