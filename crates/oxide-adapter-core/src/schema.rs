//! Column metadata consumed by the parameter factory and insert executor.

use std::fmt;

/// Logical column type, independent of any backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Variable length text.
    VarChar,
    /// 32-bit integer.
    Int32,
    /// Double precision float.
    Double,
    /// Date and time.
    DateTime,
    /// Fixed length text.
    Char,
    /// Large text or binary object.
    Blob,
    /// Variable length binary.
    VarBinary,
    /// Fixed point number.
    Decimal,
    /// Boolean bit.
    Bit,
    /// GUID / UUID.
    Guid,
    /// XML document.
    Xml,
    /// A backend type with no logical mapping.
    Other(String),
}

impl ColumnType {
    /// Types accepted when building a parameter from entity metadata.
    pub const INSERTABLE: &'static [Self] = &[
        Self::VarChar,
        Self::Int32,
        Self::Double,
        Self::DateTime,
        Self::Char,
        Self::Blob,
        Self::VarBinary,
        Self::Decimal,
        Self::Bit,
    ];

    /// Returns the logical type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::VarChar => "VarChar",
            Self::Int32 => "Int32",
            Self::Double => "Double",
            Self::DateTime => "DateTime",
            Self::Char => "Char",
            Self::Blob => "Blob",
            Self::VarBinary => "VarBinary",
            Self::Decimal => "Decimal",
            Self::Bit => "Bit",
            Self::Guid => "Guid",
            Self::Xml => "Xml",
            Self::Other(name) => name,
        }
    }

    /// Returns the comma separated list of [`Self::INSERTABLE`] names.
    #[must_use]
    pub fn insertable_names() -> String {
        Self::INSERTABLE
            .iter()
            .map(Self::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One column of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Column name.
    pub name: String,
    /// Logical column type.
    pub column_type: ColumnType,
    /// Whether the column takes part in INSERT statements. Identity and
    /// computed columns are not insertable.
    pub insertable: bool,
}

impl TableColumn {
    /// Creates an insertable column.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            insertable: true,
        }
    }

    /// Marks the column as excluded from INSERT statements.
    #[must_use]
    pub fn generated(mut self) -> Self {
        self.insertable = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder() {
        let id = TableColumn::new("id", ColumnType::Int32).generated();
        assert!(!id.insertable);
        let name = TableColumn::new("name", ColumnType::VarChar);
        assert!(name.insertable);
        assert_eq!(name.column_type.to_string(), "VarChar");
    }

    #[test]
    fn test_insertable_names() {
        let names = ColumnType::insertable_names();
        assert!(names.starts_with("VarChar, Int32"));
        assert!(names.ends_with("Decimal, Bit"));
        assert!(!names.contains("Guid"));
    }

    #[test]
    fn test_other_type_name() {
        assert_eq!(ColumnType::Other("geometry".into()).name(), "geometry");
    }
}
