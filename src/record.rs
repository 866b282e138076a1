//! The record capability: serde both ways plus a static field list.
//! Records cross into SQL as JSON objects keyed by column; rows come back the same way.

use crate::config::FieldList;
use crate::error::AppError;
use crate::sql::Bindings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A record shape served by a generic resource.
///
/// `FIELDS` lists the serialized field names in column order and must include `id`, `created_at`
/// and `updated_at`. Column names are the field names lowercased.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    const FIELDS: &'static [&'static str];
}

/// Serialize a record to a JSON object keyed by its own field spelling.
pub fn to_object<R: Record>(record: &R) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(other) => Err(AppError::Internal(format!(
            "record serialized to {} instead of an object",
            json_kind(&other)
        ))),
        Err(e) => Err(AppError::Internal(format!("record serialization: {}", e))),
    }
}

/// Column bindings for every registered field; fields the record does not serialize bind as NULL.
pub fn to_bindings<R: Record>(record: &R, fields: &FieldList) -> Result<Bindings, AppError> {
    let mut bindings: Bindings = to_object(record)?
        .into_iter()
        .filter_map(|(k, v)| fields.column_for(&k).map(|c| (c.to_string(), v)))
        .collect();
    for col in fields.columns() {
        bindings.entry(col).or_insert(Value::Null);
    }
    Ok(bindings)
}

/// Rebuild a record from a row object, renaming columns to the record's field spelling.
pub fn from_row<R: Record>(row: Map<String, Value>, fields: &FieldList) -> Result<R, serde_json::Error> {
    let obj: Map<String, Value> = row
        .into_iter()
        .map(|(col, v)| match fields.field_for_column(&col) {
            Some(field) => (field.to_string(), v),
            None => (col, v),
        })
        .collect();
    serde_json::from_value(Value::Object(obj))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
