use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::codec::Codec;
use crate::errors::ServiceError;
use crate::store::{DocumentStore, KeyRange};

/// Typed access to a document store through an entity codec.
///
/// Does not cache; callers that want caching keep their own.
pub struct DatabaseService<E, D> {
    store: Arc<dyn DocumentStore>,
    codec: Arc<dyn Codec<E, D>>,
}

impl<E, D> DatabaseService<E, D>
where
    D: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, codec: Arc<dyn Codec<E, D>>) -> Self {
        Self { store, codec }
    }

    fn decode(&self, key: &str, document: Value) -> Result<E, ServiceError> {
        let document: D = serde_json::from_value(document)
            .map_err(|e| ServiceError::Decode(format!("document {key}: {e}")))?;
        Ok(self.codec.decode(document))
    }

    /// Entity stored at `id`; `NotFound` when there is none.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_one(&self, id: &str) -> Result<E, ServiceError> {
        let document = self.store.get(id).await?.ok_or_else(|| ServiceError::not_found(id))?;
        self.decode(id, document)
    }

    /// Every entity whose key lies in `range` (the whole store when `None`),
    /// in store key order.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_all(&self, range: Option<KeyRange>) -> Result<Vec<E>, ServiceError> {
        let range = range.unwrap_or_default();
        let documents = self.store.scan(&range).await?;
        debug!(count = documents.len(), "range scan returned");
        documents.into_iter().map(|(key, doc)| self.decode(&key, doc)).collect()
    }

    /// Entities for `ids` in request order. Ids without a document are left
    /// out of the result rather than failing the call.
    #[instrument(level = "debug", skip(self, ids), fields(requested = ids.len()))]
    pub async fn get_many(&self, ids: &[String]) -> Result<Vec<E>, ServiceError> {
        let documents = self.store.get_many(ids).await?;
        if documents.len() < ids.len() {
            debug!(missing = ids.len() - documents.len(), "some requested ids have no document");
        }
        documents.into_iter().map(|(key, doc)| self.decode(&key, doc)).collect()
    }

    /// Encode `entity` and upsert it at `id`.
    #[instrument(level = "debug", skip(self, entity))]
    pub async fn update_one(&self, id: &str, entity: &E) -> Result<(), ServiceError> {
        let document = serde_json::to_value(self.codec.encode(entity))
            .map_err(|e| ServiceError::Encode(format!("document {id}: {e}")))?;
        self.store.put(id, document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::IdentityCodec;
    use crate::store::JsonDocumentStore;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(rename = "_id")]
        id: String,
        text: String,
    }

    fn service(store: Arc<JsonDocumentStore>) -> DatabaseService<Note, Note> {
        DatabaseService::new(store, Arc::new(IdentityCodec))
    }

    fn note(id: &str, text: &str) -> Note {
        Note { id: id.into(), text: text.into() }
    }

    #[tokio::test]
    async fn get_one_missing_is_not_found() {
        let svc = service(JsonDocumentStore::in_memory());
        let err = svc.get_one("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_then_get_round_trips() -> Result<(), anyhow::Error> {
        let svc = service(JsonDocumentStore::in_memory());
        let n = note("n1", "hello");
        svc.update_one("n1", &n).await?;
        svc.update_one("n1", &n).await?;
        assert_eq!(svc.get_one("n1").await?, n);
        assert_eq!(svc.get_all(None).await?, vec![n]);
        Ok(())
    }

    #[tokio::test]
    async fn get_all_honours_range() -> Result<(), anyhow::Error> {
        let svc = service(JsonDocumentStore::in_memory());
        for id in ["a", "b", "c"] {
            svc.update_one(id, &note(id, id)).await?;
        }
        let ids: Vec<String> = svc.get_all(Some(KeyRange::between("b", "c"))).await?.into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn get_many_omits_missing_ids() -> Result<(), anyhow::Error> {
        let svc = service(JsonDocumentStore::in_memory());
        svc.update_one("a", &note("a", "1")).await?;
        svc.update_one("b", &note("b", "2")).await?;

        let ids = vec!["b".to_string(), "ghost".to_string(), "a".to_string()];
        let found: Vec<String> = svc.get_many(&ids).await?.into_iter().map(|n| n.id).collect();
        assert_eq!(found, vec!["b", "a"]);
        assert!(svc.get_many(&[]).await?.is_empty());
        Ok(())
    }

    /// Document type serde_json cannot turn into a `Value`: map keys must be strings.
    struct SequenceKeyCodec;

    impl Codec<Note, BTreeMap<Vec<u8>, String>> for SequenceKeyCodec {
        fn encode(&self, entity: &Note) -> BTreeMap<Vec<u8>, String> {
            BTreeMap::from([(entity.id.clone().into_bytes(), entity.text.clone())])
        }
        fn decode(&self, document: BTreeMap<Vec<u8>, String>) -> Note {
            let (id, text) = document.into_iter().next().unwrap_or_default();
            note(&String::from_utf8_lossy(&id), &text)
        }
    }

    #[tokio::test]
    async fn unencodable_entity_is_an_encode_error_and_store_is_untouched() -> Result<(), anyhow::Error> {
        let store = JsonDocumentStore::in_memory();
        let svc: DatabaseService<Note, BTreeMap<Vec<u8>, String>> =
            DatabaseService::new(store.clone(), Arc::new(SequenceKeyCodec));

        let err = svc.update_one("n1", &note("n1", "hello")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Encode(_)), "{err}");
        assert!(store.is_empty().await);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_document_is_a_decode_error() -> Result<(), anyhow::Error> {
        let store = JsonDocumentStore::in_memory();
        store.put("bad", json!({ "_id": "bad" })).await?;
        let svc = service(store);
        assert!(matches!(svc.get_one("bad").await, Err(ServiceError::Decode(_))));
        assert!(matches!(svc.get_all(None).await, Err(ServiceError::Decode(_))));
        Ok(())
    }
}
