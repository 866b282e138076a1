//! Router pieces: common routes and per-resource CRUD routes.

pub mod common;
pub mod resource;

pub use common::common_routes;
pub use resource::resource_routes;
