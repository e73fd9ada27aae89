use std::collections::HashMap;

use async_trait::async_trait;
use models::document;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde_json::Value;

use crate::errors::ServiceError;
use crate::store::{DocumentStore, KeyRange};

/// Document store over one collection of the `document` table.
///
/// Range scans rely on the database ordering keys bytewise; SQLite does so
/// by default, Postgres needs the `C` collation on the key column.
pub struct SeaOrmDocumentStore {
    pub db: DatabaseConnection,
    collection: String,
}

impl SeaOrmDocumentStore {
    pub fn new(db: DatabaseConnection, collection: impl Into<String>) -> Self {
        Self { db, collection: collection.into() }
    }

    pub fn collection(&self) -> &str { &self.collection }

    fn in_collection(&self) -> sea_orm::Select<document::Entity> {
        document::Entity::find().filter(document::Column::Collection.eq(self.collection.as_str()))
    }
}

fn parse_body(row: document::Model) -> Result<(String, Value), ServiceError> {
    let value = serde_json::from_str(&row.body).map_err(|e| ServiceError::Decode(format!("document {}: {e}", row.key)))?;
    Ok((row.key, value))
}

#[async_trait]
impl DocumentStore for SeaOrmDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        let row = document::Entity::find_by_id((self.collection.clone(), key.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        row.map(|r| parse_body(r).map(|(_, v)| v)).transpose()
    }

    async fn scan(&self, range: &KeyRange) -> Result<Vec<(String, Value)>, ServiceError> {
        if range.is_inverted() {
            return Ok(Vec::new());
        }
        let mut query = self.in_collection();
        if let Some(start) = &range.start_key {
            query = query.filter(document::Column::Key.gte(start.as_str()));
        }
        if let Some(end) = &range.end_key {
            query = query.filter(document::Column::Key.lte(end.as_str()));
        }
        let rows = query
            .order_by_asc(document::Column::Key)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        rows.into_iter().map(parse_body).collect()
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<(String, Value)>, ServiceError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self
            .in_collection()
            .filter(document::Column::Key.is_in(keys.iter().map(String::as_str)))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        let mut by_key: HashMap<String, Value> = HashMap::with_capacity(rows.len());
        for row in rows {
            let (key, value) = parse_body(row)?;
            by_key.insert(key, value);
        }
        Ok(keys
            .iter()
            .filter_map(|k| by_key.get(k).map(|v| (k.clone(), v.clone())))
            .collect())
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        let body = serde_json::to_string(&value).map_err(|e| ServiceError::StoreWrite(e.to_string()))?;
        let am = document::ActiveModel {
            collection: Set(self.collection.clone()),
            key: Set(key.to_string()),
            body: Set(body),
        };
        document::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([document::Column::Collection, document::Column::Key])
                    .update_column(document::Column::Body)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| ServiceError::StoreWrite(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    #[tokio::test]
    async fn upsert_and_point_lookup() -> Result<(), anyhow::Error> {
        let store = SeaOrmDocumentStore::new(get_db().await?, "library");
        assert!(store.get("t1").await?.is_none());

        store.put("t1", json!({ "_id": "t1", "status": "ready" })).await?;
        store.put("t1", json!({ "_id": "t1", "status": "error" })).await?;

        let doc = store.get("t1").await?.unwrap();
        assert_eq!(doc["status"], "error");
        Ok(())
    }

    #[tokio::test]
    async fn prefix_scan_is_ordered_and_bounded() -> Result<(), anyhow::Error> {
        let store = SeaOrmDocumentStore::new(get_db().await?, "library");
        for key in ["location::b", "location::a", "locations", "track::1"] {
            store.put(key, json!({ "_id": key })).await?;
        }

        let keys: Vec<String> = store.scan(&KeyRange::prefix("location::")).await?.into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["location::a", "location::b"]);

        assert_eq!(store.scan(&KeyRange::all()).await?.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn prefix_scan_includes_supplementary_plane_keys() -> Result<(), anyhow::Error> {
        let store = SeaOrmDocumentStore::new(get_db().await?, "library");
        for key in ["location::a", "location::🕉", "location::𠀀", "location;"] {
            store.put(key, json!({ "_id": key })).await?;
        }

        let keys: Vec<String> = store.scan(&KeyRange::prefix("location::")).await?.into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["location::a", "location::🕉", "location::𠀀"]);
        Ok(())
    }

    #[tokio::test]
    async fn collections_do_not_see_each_other() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let inbox = SeaOrmDocumentStore::new(db.clone(), "inbox");
        let library = SeaOrmDocumentStore::new(db, "library");
        inbox.put("t1", json!({ "_id": "t1" })).await?;
        library.put("t1", json!({ "_id": "other" })).await?;

        assert_eq!(inbox.get("t1").await?.unwrap()["_id"], "t1");
        assert_eq!(library.scan(&KeyRange::all()).await?.len(), 1);
        assert_eq!(inbox.get_many(&["t1".to_string()]).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn get_many_keeps_request_order() -> Result<(), anyhow::Error> {
        let store = SeaOrmDocumentStore::new(get_db().await?, "library");
        store.put("a", json!(1)).await?;
        store.put("b", json!(2)).await?;

        let keys = vec!["b".to_string(), "nope".to_string(), "a".to_string()];
        let found: Vec<Value> = store.get_many(&keys).await?.into_iter().map(|(_, v)| v).collect();
        assert_eq!(found, vec![json!(2), json!(1)]);
        Ok(())
    }
}
