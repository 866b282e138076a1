//! Generic REST-over-SQL resources: one repository/service/router triple serves any record shape
//! from a table name and an ordered field list.

pub mod config;
pub mod error;
pub mod handlers;
pub mod id;
pub mod models;
pub mod record;
pub mod registry;
pub mod repository;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{FieldList, PoolSettings, ResourceDef, Settings};
pub use error::{AppError, ConfigError};
pub use record::Record;
pub use registry::Registry;
pub use repository::{Repository, SqlRepository};
pub use service::GenericService;
pub use sql::{compile_filters, FilterClause};
pub use state::AppState;
pub use store::connect;
