//! Statement parameters.

use std::fmt;

use crate::value::{ParamValue, SqlValue};

/// Parameter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Value flows from the caller to the statement.
    #[default]
    Input,
    /// Value is written by the statement.
    Output,
    /// Value is the stored procedure's return value.
    ReturnValue,
}

/// A dialect-specific wire type name (e.g. `NVarChar`, `DBDate`, `BLOB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendType(pub &'static str);

impl BackendType {
    /// Returns the wire type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A typed, named, direction-aware statement parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    /// Parameter name without the dialect connector.
    pub name: String,
    /// Dialect wire type, `None` for an unconfigured empty parameter.
    pub backend_type: Option<BackendType>,
    /// Bound value.
    pub value: ParamValue,
    /// Parameter direction.
    pub direction: Direction,
    /// Column the parameter was created for.
    pub source_column: String,
    /// Declared size, for sized types.
    pub size: Option<usize>,
}

impl Parameter {
    /// Creates an input parameter with no value bound yet.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source_column: impl Into<String>,
        backend_type: BackendType,
    ) -> Self {
        Self {
            name: name.into(),
            backend_type: Some(backend_type),
            value: ParamValue::Unset,
            direction: Direction::Input,
            source_column: source_column.into(),
            size: None,
        }
    }

    /// Binds a value.
    #[must_use]
    pub fn with_value(mut self, value: ParamValue) -> Self {
        self.value = value;
        self
    }

    /// Sets the direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the declared size.
    #[must_use]
    pub const fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Returns true when the parameter carries the explicit NULL marker.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Returns the bound typed value, if any.
    #[must_use]
    pub const fn sql_value(&self) -> Option<&SqlValue> {
        self.value.as_value()
    }
}

/// An ordered collection of parameters.
///
/// Order matters: for dialects with positional placeholders the n-th
/// parameter binds to the n-th placeholder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Appends a parameter.
    pub fn push(&mut self, param: Parameter) {
        self.params.push(param);
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.params.iter()
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Returns parameter names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }
}

impl FromIterator<Parameter> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
