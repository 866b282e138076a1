//! Identifier checks for resource registration. Table and column names are spliced into SQL text,
//! so only plain identifiers get through.

use crate::config::resource::{CREATED_AT_COLUMN, ID_COLUMN, UPDATED_AT_COLUMN};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static identifier pattern"))
}

pub fn validate_identifier(kind: &'static str, name: &str) -> Result<(), ConfigError> {
    if identifier_re().is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

/// Fields must be identifiers, unique ignoring ASCII case, and include the managed columns.
pub fn validate_fields(table: &str, fields: &[&str]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for f in fields {
        validate_identifier("field", f)?;
        if !seen.insert(f.to_ascii_lowercase()) {
            return Err(ConfigError::DuplicateField {
                table: table.to_string(),
                field: f.to_string(),
            });
        }
    }
    for required in [ID_COLUMN, CREATED_AT_COLUMN, UPDATED_AT_COLUMN] {
        if !seen.contains(required) {
            return Err(ConfigError::MissingField {
                table: table.to_string(),
                field: required,
            });
        }
    }
    Ok(())
}
