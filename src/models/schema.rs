//! Declarative table schemas
//!
//! A schema lists the non-ID fields of a table in storage order. Each field
//! carries its display header, the prompt shown when asking for a value, and
//! an optional validator. The identifier column is never part of a schema.

use std::fmt;

/// A predicate deciding whether raw input is acceptable for a field
pub trait Validator {
    fn validate(&self, input: &str) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&str) -> bool,
{
    fn validate(&self, input: &str) -> bool {
        self(input)
    }
}

/// One non-ID column of a table
pub struct Field {
    header: String,
    prompt: String,
    validator: Option<Box<dyn Validator>>,
}

impl Field {
    /// A field accepting any string
    pub fn new(header: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            prompt: prompt.into(),
            validator: None,
        }
    }

    /// A field whose input must pass `validator`
    pub fn validated<V>(header: impl Into<String>, prompt: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        Self {
            header: header.into(),
            prompt: prompt.into(),
            validator: Some(Box::new(validator)),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Check input against the validator; fields without one accept anything
    pub fn accepts(&self, input: &str) -> bool {
        self.validator
            .as_ref()
            .map_or(true, |validator| validator.validate(input))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("header", &self.header)
            .field("prompt", &self.prompt)
            .field("validated", &self.has_validator())
            .finish()
    }
}

/// Ordered list of the non-ID fields of a table
#[derive(Debug, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field accepting any string
    pub fn free(mut self, header: &str, prompt: &str) -> Self {
        self.fields.push(Field::new(header, prompt));
        self
    }

    /// Append a validated field
    pub fn field<V>(mut self, header: &str, prompt: &str, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.fields.push(Field::validated(header, prompt, validator));
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Storage column of a field header (the ID is column 0)
    pub fn column_of(&self, header: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| field.header.eq_ignore_ascii_case(header))
            .map(|index| index + 1)
    }

    /// All headers including the leading ID column
    pub fn headers(&self) -> Vec<String> {
        std::iter::once("ID".to_string())
            .chain(self.fields.iter().map(|field| field.header.clone()))
            .collect()
    }
}
