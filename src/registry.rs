//! Startup wiring: each registered resource gets its repository, service and routes, sharing one
//! immutable definition. The finished router also carries the common routes and HTTP layers.

use crate::config::{ResourceDef, DEFAULT_BODY_LIMIT};
use crate::error::ConfigError;
use crate::record::Record;
use crate::repository::SqlRepository;
use crate::routes::{common_routes, resource_routes};
use crate::service::GenericService;
use crate::state::AppState;
use axum::Router;
use sqlx::AnyPool;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub struct Registry {
    pool: AnyPool,
    router: Router,
    resources: Vec<Arc<ResourceDef>>,
    body_limit: usize,
}

impl Registry {
    pub fn new(pool: AnyPool) -> Self {
        Registry {
            pool,
            router: Router::new(),
            resources: Vec::new(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Register `R` over `table`, served at `/<table>`.
    pub fn register<R: Record>(self, table: &str) -> Result<Self, ConfigError> {
        let def = ResourceDef::new(table, R::FIELDS)?;
        self.register_resource::<R>(def)
    }

    pub fn register_resource<R: Record>(mut self, def: ResourceDef) -> Result<Self, ConfigError> {
        if self.resources.iter().any(|r| r.path == def.path) {
            return Err(ConfigError::DuplicatePathSegment(def.path));
        }
        let def = Arc::new(def);
        let repo = Arc::new(SqlRepository::<R>::new(self.pool.clone(), def.clone()));
        let service = Arc::new(GenericService::<R>::new(repo, def.clone()));
        tracing::info!(path = %def.path, table = %def.table, fields = def.fields.len(), "registered resource");
        self.router = self.router.merge(resource_routes(service));
        self.resources.push(def);
        Ok(self)
    }

    pub fn resources(&self) -> &[Arc<ResourceDef>] {
        &self.resources
    }

    pub fn into_router(self) -> Router {
        let state = AppState { pool: self.pool };
        self.router
            .merge(common_routes(state))
            .layer(RequestBodyLimitLayer::new(self.body_limit))
            .layer(TraceLayer::new_for_http())
    }
}
