//! CRUD routes for one registered resource, mounted at `/<path>`.

use crate::handlers::resource::{create, delete, list, read, update};
use crate::record::Record;
use crate::service::GenericService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn resource_routes<R: Record>(service: Arc<GenericService<R>>) -> Router {
    let base = format!("/{}", service.resource().path);
    Router::new()
        .route(&base, get(list::<R>).post(create::<R>))
        .route(&format!("{}/", base), get(list::<R>).post(create::<R>))
        .route(
            &format!("{}/:id", base),
            get(read::<R>).put(update::<R>).delete(delete::<R>),
        )
        .with_state(service)
}
