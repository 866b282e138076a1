use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Record for Product {
    const FIELDS: &'static [&'static str] = &["id", "name", "price", "stock", "created_at", "updated_at"];
}
