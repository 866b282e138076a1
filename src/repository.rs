//! Generic repository: one implementation for every record shape, configured by a resource definition.

use crate::config::{ResourceDef, CREATED_AT_COLUMN, ID_COLUMN, UPDATED_AT_COLUMN};
use crate::error::AppError;
use crate::id::{new_id, timestamp_now};
use crate::record::{from_row, to_bindings, Record};
use crate::sql::{self, compile_named, Bindings, BoundQuery, FilterClause};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::any::AnyRow;
use sqlx::AnyPool;
use std::marker::PhantomData;
use std::sync::Arc;

#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Rows matching the filter, in id (creation) order.
    async fn find_all(&self, filter: &FilterClause) -> Result<Vec<R>, AppError>;

    /// Fails with `NotFound` when no row has this id.
    async fn find_by_id(&self, id: &str) -> Result<R, AppError>;

    /// Insert with a fresh id and both timestamps set to now. Returns the new id.
    async fn create(&self, record: &R) -> Result<String, AppError>;

    /// Overwrite every field but `id` and stamp `updated_at`. Zero affected rows is not an error.
    async fn update(&self, id: &str, record: &R) -> Result<(), AppError>;

    /// Zero affected rows is not an error.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

pub struct SqlRepository<R> {
    pool: AnyPool,
    resource: Arc<ResourceDef>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> SqlRepository<R> {
    pub fn new(pool: AnyPool, resource: Arc<ResourceDef>) -> Self {
        SqlRepository {
            pool,
            resource,
            _record: PhantomData,
        }
    }

    pub fn resource(&self) -> &ResourceDef {
        &self.resource
    }

    fn id_bindings(id: &str) -> Bindings {
        let mut b = Bindings::new();
        b.insert(ID_COLUMN.to_string(), Value::String(id.to_string()));
        b
    }

    fn decode(&self, row: &AnyRow) -> Result<R, AppError> {
        from_row(row_to_json(row), &self.resource.fields)
            .map_err(|e| AppError::QueryFailed(sqlx::Error::Decode(Box::new(e))))
    }

    async fn query_many(&self, q: &BoundQuery) -> Result<Vec<R>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = q.query().fetch_all(&self.pool).await.map_err(AppError::QueryFailed)?;
        rows.iter().map(|r| self.decode(r)).collect()
    }

    async fn query_optional(&self, q: &BoundQuery) -> Result<Option<R>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = q.query().fetch_optional(&self.pool).await.map_err(AppError::QueryFailed)?;
        row.as_ref().map(|r| self.decode(r)).transpose()
    }

    async fn execute(&self, q: &BoundQuery) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = q.query().execute(&self.pool).await.map_err(AppError::WriteFailed)?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl<R: Record> Repository<R> for SqlRepository<R> {
    async fn find_all(&self, filter: &FilterClause) -> Result<Vec<R>, AppError> {
        let q = compile_named(&sql::select_all(&self.resource, &filter.predicate), &filter.bindings)?;
        self.query_many(&q).await
    }

    async fn find_by_id(&self, id: &str) -> Result<R, AppError> {
        let q = compile_named(&sql::select_by_id(&self.resource), &Self::id_bindings(id))?;
        self.query_optional(&q)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn create(&self, record: &R) -> Result<String, AppError> {
        let mut bindings = to_bindings(record, &self.resource.fields)?;
        let id = new_id();
        let now = timestamp_now();
        bindings.insert(ID_COLUMN.to_string(), Value::String(id.clone()));
        bindings.insert(CREATED_AT_COLUMN.to_string(), Value::String(now.clone()));
        bindings.insert(UPDATED_AT_COLUMN.to_string(), Value::String(now));
        let q = compile_named(&sql::insert(&self.resource), &bindings)?;
        self.execute(&q).await?;
        tracing::debug!(table = %self.resource.table, id = %id, "created");
        Ok(id)
    }

    async fn update(&self, id: &str, record: &R) -> Result<(), AppError> {
        let mut bindings = to_bindings(record, &self.resource.fields)?;
        bindings.insert(ID_COLUMN.to_string(), Value::String(id.to_string()));
        bindings.insert(UPDATED_AT_COLUMN.to_string(), Value::String(timestamp_now()));
        let q = compile_named(&sql::update(&self.resource), &bindings)?;
        let affected = self.execute(&q).await?;
        if affected == 0 {
            tracing::debug!(table = %self.resource.table, id, "update matched no row");
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let q = compile_named(&sql::delete(&self.resource), &Self::id_bindings(id))?;
        let affected = self.execute(&q).await?;
        if affected == 0 {
            tracing::debug!(table = %self.resource.table, id, "delete matched no row");
        }
        Ok(())
    }
}

/// Row to JSON object keyed by lowercased column name.
fn row_to_json(row: &AnyRow) -> serde_json::Map<String, Value> {
    use sqlx::{Column, Row};
    row.columns()
        .iter()
        .map(|col| {
            let name = col.name();
            (name.to_ascii_lowercase(), cell_to_value(row, name))
        })
        .collect()
}

fn cell_to_value(row: &AnyRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
