//! Resource registration: a table, its URL path and its ordered field list, fixed at startup.

use crate::config::validator::{validate_fields, validate_identifier};
use crate::error::ConfigError;

pub const ID_COLUMN: &str = "id";
pub const CREATED_AT_COLUMN: &str = "created_at";
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// Columns owned by the repository; never taken from a request payload.
pub const MANAGED_COLUMNS: [&str; 3] = [ID_COLUMN, CREATED_AT_COLUMN, UPDATED_AT_COLUMN];

pub fn is_managed_column(name: &str) -> bool {
    MANAGED_COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(name))
}

/// Ordered field names as the record spells them, plus their column names (lowercased).
#[derive(Clone, Debug)]
pub struct FieldList {
    fields: Vec<String>,
    columns: Vec<String>,
}

impl FieldList {
    fn new(fields: &[&str]) -> Self {
        FieldList {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            columns: fields.iter().map(|f| f.to_ascii_lowercase()).collect(),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Columns written by UPDATE: everything except `id`.
    pub fn update_columns(&self) -> impl Iterator<Item = &str> {
        self.columns().filter(|c| *c != ID_COLUMN)
    }

    /// Lowercased column name for a field or query key, if registered.
    pub fn column_for(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// The record's own spelling of a column.
    pub fn field_for_column(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .map(|i| self.fields[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct ResourceDef {
    pub path: String,
    pub table: String,
    pub fields: FieldList,
}

impl ResourceDef {
    /// Resource served at `/<table>`.
    pub fn new(table: &str, fields: &[&str]) -> Result<Self, ConfigError> {
        Self::with_path(table, table, fields)
    }

    pub fn with_path(path: &str, table: &str, fields: &[&str]) -> Result<Self, ConfigError> {
        validate_identifier("path", path)?;
        validate_identifier("table", table)?;
        validate_fields(table, fields)?;
        Ok(ResourceDef {
            path: path.to_string(),
            table: table.to_string(),
            fields: FieldList::new(fields),
        })
    }
}
