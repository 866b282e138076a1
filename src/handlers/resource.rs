//! Resource CRUD handlers, generic over the record type. HTTP shape only; errors map to status in AppError.

use crate::error::AppError;
use crate::id::parse_id;
use crate::record::Record;
use crate::service::{decode_record, GenericService};
use crate::sql::compile_filters;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

fn require_id(raw: &str) -> Result<String, AppError> {
    parse_id(raw).ok_or_else(|| AppError::BadRequest(format!("invalid id '{}'", raw)))
}

pub async fn list<R: Record>(
    State(service): State<Arc<GenericService<R>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<R>>, AppError> {
    let filter = compile_filters(&params, &service.resource().fields);
    let rows = service.get_all(&filter).await?;
    Ok(Json(rows))
}

pub async fn read<R: Record>(
    State(service): State<Arc<GenericService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<R>, AppError> {
    let id = require_id(&id)?;
    let row = service.get_by_id(&id).await?;
    Ok(Json(row))
}

/// 201 with an empty body; the new id is in `Location`.
pub async fn create<R: Record>(
    State(service): State<Arc<GenericService<R>>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let record: R = decode_record(&body, &service.resource().fields)?;
    let id = service.create(&record).await?;
    let location = format!("/{}/{}", service.resource().path, id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

pub async fn update<R: Record>(
    State(service): State<Arc<GenericService<R>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let id = require_id(&id)?;
    service.update(&id, &body).await?;
    Ok(StatusCode::OK)
}

pub async fn delete<R: Record>(
    State(service): State<Arc<GenericService<R>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = require_id(&id)?;
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
