//! Named placeholders (`:col`) compiled to positional `$n`, and JSON values bound through the Any driver.

use crate::error::AppError;
use serde_json::{Map, Value};
use sqlx::any::{Any, AnyArguments};
use sqlx::query::Query;

/// Values for named placeholders, keyed by column name. Sorted, so iteration is deterministic.
pub type Bindings = Map<String, Value>;

/// SQL with positional placeholders and its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BoundQuery {
    pub fn query(&self) -> Query<'_, Any, AnyArguments<'_>> {
        self.params
            .iter()
            .fold(sqlx::query(&self.sql), |q, p| BindValue::from_json(p).bind(q))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Rewrite `:name` placeholders to `$1, $2, ...` in order of first appearance.
/// `::type` casts and text inside single-quoted literals are left alone.
/// Every name must have a binding.
pub fn compile_named(sql: &str, bindings: &Bindings) -> Result<BoundQuery, AppError> {
    let mut out = String::with_capacity(sql.len());
    let mut names: Vec<String> = Vec::new();
    let mut params = Vec::new();
    let mut chars = sql.chars().peekable();
    let mut in_literal = false;

    while let Some(c) = chars.next() {
        if in_literal {
            out.push(c);
            if c == '\'' {
                in_literal = false;
            }
            continue;
        }
        match c {
            '\'' => {
                in_literal = true;
                out.push(c);
            }
            ':' if chars.peek() == Some(&':') => {
                out.push_str("::");
                chars.next();
            }
            ':' if chars.peek().copied().is_some_and(is_ident_start) => {
                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if !is_ident_char(n) {
                        break;
                    }
                    name.push(n);
                    chars.next();
                }
                let index = match names.iter().position(|n| *n == name) {
                    Some(i) => i + 1,
                    None => {
                        let value = bindings
                            .get(&name)
                            .ok_or_else(|| AppError::Internal(format!("no value bound for :{}", name)))?;
                        params.push(value.clone());
                        names.push(name);
                        names.len()
                    }
                };
                out.push('$');
                out.push_str(&index.to_string());
            }
            _ => out.push(c),
        }
    }

    Ok(BoundQuery { sql: out, params })
}

/// A value the Any driver can bind. Converts from serde_json::Value.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Text(String),
}

impl BindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => BindValue::Null,
            Value::Bool(b) => BindValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => BindValue::I64(i),
                None => BindValue::F64(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => BindValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => BindValue::Text(v.to_string()),
        }
    }

    pub fn bind<'q>(self, q: Query<'q, Any, AnyArguments<'q>>) -> Query<'q, Any, AnyArguments<'q>> {
        match self {
            BindValue::Null => q.bind(None::<String>),
            BindValue::Bool(b) => q.bind(b),
            BindValue::I64(n) => q.bind(n),
            BindValue::F64(n) => q.bind(n),
            BindValue::Text(s) => q.bind(s),
        }
    }
}
