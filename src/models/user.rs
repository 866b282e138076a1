use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Record for User {
    const FIELDS: &'static [&'static str] = &["id", "name", "email", "age", "created_at", "updated_at"];
}
