//! Document structure and builder.

use serde::{Deserialize, Serialize};

use crate::document::field::{Field, FieldOption, FieldValue};
use crate::error::Result;

/// A document represents a single item to be indexed.
///
/// Fields keep the order they were added in. A name may repeat; every
/// occurrence is indexed, and the last stored occurrence wins on retrieval.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Document {
    fields: Vec<Field>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Document { fields: Vec::new() }
    }

    /// Append a field.
    pub fn add_field<S: Into<String>>(&mut self, name: S, value: FieldValue, option: FieldOption) {
        self.fields.push(Field::new(name, value, option));
    }

    /// Get the last value of a field.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .rev()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Get all field names, in insertion order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Get all fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }
}

/// A builder for constructing documents in a fluent manner.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        DocumentBuilder {
            document: Document::new(),
        }
    }

    /// Add a field with explicit flags.
    pub fn add_field<S: Into<String>>(
        mut self,
        name: S,
        value: FieldValue,
        option: FieldOption,
    ) -> Self {
        self.document.add_field(name, value, option);
        self
    }

    /// Add a stored, indexed, tokenized text field.
    pub fn add_text<S: Into<String>, T: Into<String>>(self, name: S, value: T) -> Self {
        self.add_field(name, FieldValue::Text(value.into()), FieldOption::text())
    }

    /// Add a stored, indexed integer field.
    pub fn add_integer<S: Into<String>>(self, name: S, value: i64) -> Self {
        self.add_field(name, FieldValue::Integer(value), FieldOption::integer())
    }

    /// Add an integer field from its textual form.
    ///
    /// Fails with `MalformedFieldValue` when `raw` is not a valid `i64`.
    pub fn add_integer_str<S: Into<String>>(self, name: S, raw: &str) -> Result<Self> {
        let name = name.into();
        let value = FieldValue::parse_integer(&name, raw)?;
        Ok(self.add_field(name, value, FieldOption::integer()))
    }

    /// Build the final document.
    pub fn build(self) -> Document {
        self.document
    }
}
