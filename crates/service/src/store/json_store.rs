use std::{collections::BTreeMap, ops::Bound, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;
use crate::store::{DocumentStore, KeyRange};

/// Ordered key -> document map, optionally persisted to a JSON file.
///
/// With a file path every `put` rewrites the file before the new document
/// becomes visible, so a failed write leaves both disk and memory untouched.
#[derive(Clone)]
pub struct JsonDocumentStore {
    inner: Arc<RwLock<BTreeMap<String, Value>>>,
    file_path: Option<PathBuf>,
}

impl JsonDocumentStore {
    /// Store living only in process memory.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(BTreeMap::new())), file_path: None })
    }

    /// Open the store at `path`. Creates the file with an empty map if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Store(format!("{}: {e}", parent.display())))?;
        }

        let map: BTreeMap<String, Value> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Store(format!("{}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: BTreeMap<String, Value> = BTreeMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(|e| ServiceError::StoreWrite(e.to_string()))?)
                    .await
                    .map_err(|e| ServiceError::StoreWrite(e.to_string()))?;
                empty
            }
            Err(e) => return Err(ServiceError::Store(format!("{}: {e}", file_path.display()))),
        };
        debug!(path = %file_path.display(), documents = map.len(), "json document store opened");

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path: Some(file_path) }))
    }

    async fn save(&self, map: &BTreeMap<String, Value>) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let data = serde_json::to_vec(map).map_err(|e| ServiceError::StoreWrite(e.to_string()))?;
        fs::write(path, data).await.map_err(|e| ServiceError::StoreWrite(e.to_string()))?;
        Ok(())
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for JsonDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn scan(&self, range: &KeyRange) -> Result<Vec<(String, Value)>, ServiceError> {
        if range.is_inverted() {
            return Ok(Vec::new());
        }
        let lower = range.start_key.as_deref().map_or(Bound::Unbounded, Bound::Included);
        let upper = range.end_key.as_deref().map_or(Bound::Unbounded, Bound::Included);
        let map = self.inner.read().await;
        Ok(map
            .range::<str, _>((lower, upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<(String, Value)>, ServiceError> {
        let map = self.inner.read().await;
        Ok(keys
            .iter()
            .filter_map(|k| map.get(k).map(|v| (k.clone(), v.clone())))
            .collect())
    }

    async fn put(&self, key: &str, document: Value) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        if self.file_path.is_some() {
            let mut next = map.clone();
            next.insert(key.to_string(), document);
            self.save(&next).await?;
            *map = next;
        } else {
            map.insert(key.to_string(), document);
        }
        Ok(())
    }
}
