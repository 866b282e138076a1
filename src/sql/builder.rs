//! Builds SELECT, INSERT, UPDATE, DELETE with named placeholders from a resource definition.
//! Identifiers come from registration only; values always go through placeholders.

use crate::config::{ResourceDef, ID_COLUMN};

/// Quote identifier (safe: only from registration).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// SELECT every row matching `predicate` (a `WHERE ...` fragment, or empty for none), oldest first.
pub fn select_all(resource: &ResourceDef, predicate: &str) -> String {
    let table = quoted(&resource.table);
    if predicate.is_empty() {
        format!("SELECT * FROM {} ORDER BY {}", table, ID_COLUMN)
    } else {
        format!("SELECT * FROM {} {} ORDER BY {}", table, predicate, ID_COLUMN)
    }
}

pub fn select_by_id(resource: &ResourceDef) -> String {
    format!("SELECT * FROM {} WHERE {} = :{}", quoted(&resource.table), ID_COLUMN, ID_COLUMN)
}

/// INSERT over the full registered field list.
pub fn insert(resource: &ResourceDef) -> String {
    let cols: Vec<&str> = resource.fields.columns().collect();
    let placeholders: Vec<String> = cols.iter().map(|c| format!(":{}", c)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(&resource.table),
        cols.join(", "),
        placeholders.join(", ")
    )
}

/// UPDATE by id: SET every registered field except `id`.
pub fn update(resource: &ResourceDef) -> String {
    let sets: Vec<String> = resource
        .fields
        .update_columns()
        .map(|c| format!("{} = :{}", c, c))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = :{}",
        quoted(&resource.table),
        sets.join(", "),
        ID_COLUMN,
        ID_COLUMN
    )
}

pub fn delete(resource: &ResourceDef) -> String {
    format!("DELETE FROM {} WHERE {} = :{}", quoted(&resource.table), ID_COLUMN, ID_COLUMN)
}
