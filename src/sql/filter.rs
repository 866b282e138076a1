//! Query-string filters (`?col=<op>,<value>`) compiled to a WHERE fragment with named placeholders.

use crate::config::FieldList;
use crate::sql::params::Bindings;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    /// `col = :col`
    Eql,
    /// `col LIKE :col`, value wrapped in `%`.
    Lik,
}

impl FromStr for FilterOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eql" => Ok(FilterOp::Eql),
            "lik" => Ok(FilterOp::Lik),
            _ => Err(()),
        }
    }
}

impl FilterOp {
    fn predicate(self, column: &str) -> String {
        match self {
            FilterOp::Eql => format!("{} = :{}", column, column),
            FilterOp::Lik => format!("{} LIKE :{}", column, column),
        }
    }

    fn bound_value(self, raw: &str) -> Value {
        match self {
            FilterOp::Eql => Value::String(raw.to_string()),
            FilterOp::Lik => Value::String(format!("%{}%", raw)),
        }
    }
}

/// WHERE fragment plus its bindings. An empty predicate means "no WHERE clause".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterClause {
    pub predicate: String,
    pub bindings: Bindings,
}

impl FilterClause {
    pub fn is_empty(&self) -> bool {
        self.predicate.is_empty()
    }
}

/// Compile query parameters against a resource's columns.
///
/// Keys that are not registered columns, values without a comma, and unknown operators are skipped.
/// Keys are visited in sorted order so the AND chain is stable. A repeated key keeps its first value.
pub fn compile_filters(params: &[(String, String)], fields: &FieldList) -> FilterClause {
    let mut sorted: BTreeMap<&str, &str> = BTreeMap::new();
    for (k, v) in params {
        sorted.entry(k.as_str()).or_insert(v.as_str());
    }
    let mut parts = Vec::new();
    let mut bindings = Bindings::new();

    for (key, raw) in sorted {
        let Some(column) = fields.column_for(key) else {
            tracing::debug!(key, "ignoring filter on unknown column");
            continue;
        };
        // Split on the first comma only; the value may itself contain commas.
        let Some((op, value)) = raw.split_once(',') else { continue };
        let Ok(op) = op.parse::<FilterOp>() else {
            tracing::debug!(key, op, "ignoring unknown filter operator");
            continue;
        };
        if bindings.contains_key(column) {
            continue;
        }
        parts.push(op.predicate(column));
        bindings.insert(column.to_string(), op.bound_value(value));
    }

    if parts.is_empty() {
        return FilterClause::default();
    }
    FilterClause {
        predicate: format!("WHERE {}", parts.join(" AND ")),
        bindings,
    }
}
