use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Record for Store {
    const FIELDS: &'static [&'static str] = &["id", "name", "description", "created_at", "updated_at"];
}
