//! Generic service: pass-through to the repository, plus partial update by merge.

use crate::config::{is_managed_column, FieldList, ResourceDef};
use crate::error::AppError;
use crate::record::{to_object, Record};
use crate::repository::Repository;
use crate::sql::FilterClause;
use serde_json::{Map, Value};
use std::sync::Arc;

pub struct GenericService<R: Record> {
    repo: Arc<dyn Repository<R>>,
    resource: Arc<ResourceDef>,
}

impl<R: Record> GenericService<R> {
    pub fn new(repo: Arc<dyn Repository<R>>, resource: Arc<ResourceDef>) -> Self {
        GenericService { repo, resource }
    }

    pub fn resource(&self) -> &ResourceDef {
        &self.resource
    }

    pub async fn get_all(&self, filter: &FilterClause) -> Result<Vec<R>, AppError> {
        self.repo.find_all(filter).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<R, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn create(&self, record: &R) -> Result<String, AppError> {
        self.repo.create(record).await
    }

    /// Load the stored record, apply the JSON payload over it, write the result back.
    /// Fields missing from the payload keep their stored values.
    pub async fn update(&self, id: &str, payload: &[u8]) -> Result<(), AppError> {
        let current = self.repo.find_by_id(id).await?;
        let merged = merge_partial(&current, payload)?;
        self.repo.update(id, &merged).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}

fn parse_object(payload: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice::<Value>(payload) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(_) => Err(AppError::DecodeFailed("payload must be a JSON object".into())),
        Err(e) => Err(AppError::DecodeFailed(e.to_string())),
    }
}

/// Decode a full record from a request body. Keys match the registered fields ignoring ASCII case,
/// the same way a partial update matches them.
pub fn decode_record<R: Record>(payload: &[u8], fields: &FieldList) -> Result<R, AppError> {
    let obj: Map<String, Value> = parse_object(payload)?
        .into_iter()
        .map(|(key, value)| match fields.field_for_column(&key) {
            Some(field) => (field.to_string(), value),
            None => (key, value),
        })
        .collect();
    serde_json::from_value(Value::Object(obj)).map_err(|e| AppError::DecodeFailed(e.to_string()))
}

/// Overlay a partial JSON object onto a record. Keys match the record's fields ignoring ASCII case;
/// `id` and the timestamps are never taken from the payload.
pub fn merge_partial<R: Record>(current: &R, payload: &[u8]) -> Result<R, AppError> {
    let patch = parse_object(payload)?;
    let mut obj = to_object(current)?;
    for (key, value) in patch {
        if is_managed_column(&key) {
            continue;
        }
        let existing = obj.keys().find(|k| k.eq_ignore_ascii_case(&key)).cloned();
        obj.insert(existing.unwrap_or(key), value);
    }
    serde_json::from_value(Value::Object(obj)).map_err(|e| AppError::DecodeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::new_id;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
    #[serde(default)]
    struct Item {
        id: String,
        name: String,
        stock: i64,
        created_at: Option<String>,
        updated_at: Option<String>,
    }

    impl Record for Item {
        const FIELDS: &'static [&'static str] = &["id", "name", "stock", "created_at", "updated_at"];
    }

    #[derive(Default)]
    struct MockRepository {
        rows: Mutex<HashMap<String, Item>>,
        updates: Mutex<Vec<(String, Item)>>,
    }

    #[async_trait]
    impl Repository<Item> for MockRepository {
        async fn find_all(&self, _filter: &FilterClause) -> Result<Vec<Item>, AppError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_id(&self, id: &str) -> Result<Item, AppError> {
            self.rows
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(id.to_string()))
        }

        async fn create(&self, record: &Item) -> Result<String, AppError> {
            let id = new_id();
            let mut stored = record.clone();
            stored.id = id.clone();
            self.rows.lock().unwrap().insert(id.clone(), stored);
            Ok(id)
        }

        async fn update(&self, id: &str, record: &Item) -> Result<(), AppError> {
            self.updates.lock().unwrap().push((id.to_string(), record.clone()));
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<(), AppError> {
            self.rows.lock().unwrap().remove(id);
            Ok(())
        }
    }

    fn service(repo: Arc<MockRepository>) -> GenericService<Item> {
        let resource = Arc::new(ResourceDef::new("item", Item::FIELDS).unwrap());
        GenericService::new(repo, resource)
    }

    fn stored(repo: &MockRepository) -> Item {
        let item = Item {
            id: "a".into(),
            name: "Old".into(),
            stock: 3,
            created_at: Some("2024-01-01 00:00:00".into()),
            updated_at: Some("2024-01-01 00:00:00".into()),
        };
        repo.rows.lock().unwrap().insert("a".into(), item.clone());
        item
    }

    #[tokio::test]
    async fn reads_pass_through() {
        let repo = Arc::new(MockRepository::default());
        let item = stored(&repo);
        let svc = service(repo);
        assert_eq!(svc.get_by_id("a").await.unwrap(), item);
        assert_eq!(svc.get_all(&FilterClause::default()).await.unwrap(), vec![item]);
        assert!(matches!(svc.get_by_id("zzz").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_and_delete_pass_through() {
        let repo = Arc::new(MockRepository::default());
        let svc = service(repo.clone());
        let id = svc
            .create(&Item {
                name: "New".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(svc.get_by_id(&id).await.unwrap().name, "New");
        svc.delete(&id).await.unwrap();
        svc.delete(&id).await.unwrap();
        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_payload_over_stored_record() {
        let repo = Arc::new(MockRepository::default());
        let before = stored(&repo);
        let svc = service(repo.clone());

        svc.update("a", br#"{"name":"New Name"}"#).await.unwrap();

        let updates = repo.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        let (id, merged) = &updates[0];
        assert_eq!(id, "a");
        assert_eq!(merged.name, "New Name");
        assert_eq!(merged.stock, before.stock);
        assert_eq!(merged.created_at, before.created_at);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let repo = Arc::new(MockRepository::default());
        let svc = service(repo.clone());
        let err = svc.update("nope", br#"{"name":"x"}"#).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_bad_payload_is_decode_failure() {
        let repo = Arc::new(MockRepository::default());
        stored(&repo);
        let svc = service(repo.clone());
        let payloads: [&[u8]; 3] = [b"not json", b"[1,2]", br#"{"stock":"many"}"#];
        for payload in payloads {
            let err = svc.update("a", payload).await.unwrap_err();
            assert!(matches!(err, AppError::DecodeFailed(_)), "{:?}", err);
        }
        assert!(repo.updates.lock().unwrap().is_empty());
    }

    #[test]
    fn merge_ignores_managed_fields_and_key_case() {
        let current = Item {
            id: "a".into(),
            name: "Old".into(),
            stock: 1,
            created_at: Some("t0".into()),
            updated_at: Some("t0".into()),
        };
        let merged = merge_partial(
            &current,
            br#"{"ID":"b","created_at":"t9","updated_at":"t9","STOCK":7}"#,
        )
        .unwrap();
        assert_eq!(merged.id, "a");
        assert_eq!(merged.created_at.as_deref(), Some("t0"));
        assert_eq!(merged.updated_at.as_deref(), Some("t0"));
        assert_eq!(merged.stock, 7);
        assert_eq!(merged.name, "Old");
    }

    #[test]
    fn decode_record_matches_keys_ignoring_case() {
        let fields = ResourceDef::new("item", Item::FIELDS).unwrap().fields;
        let item: Item = decode_record(br#"{"Name":"Pen","STOCK":10}"#, &fields).unwrap();
        assert_eq!(item.name, "Pen");
        assert_eq!(item.stock, 10);
    }

    #[test]
    fn decode_record_rejects_bad_bodies() {
        let fields = ResourceDef::new("item", Item::FIELDS).unwrap().fields;
        let payloads: [&[u8]; 3] = [b"{nope", b"\"Pen\"", br#"{"Stock":"many"}"#];
        for payload in payloads {
            let err = decode_record::<Item>(payload, &fields).unwrap_err();
            assert!(matches!(err, AppError::DecodeFailed(_)), "{:?}", err);
        }
    }

    #[test]
    fn empty_object_changes_nothing() {
        let current = Item {
            id: "a".into(),
            name: "Same".into(),
            ..Default::default()
        };
        assert_eq!(merge_partial(&current, b"{}").unwrap(), current);
    }
}
