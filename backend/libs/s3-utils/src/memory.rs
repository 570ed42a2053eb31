/// Process-local object store
///
/// Backs `STORAGE_BACKEND=memory` and the service tests. Failure and latency
/// can be injected to exercise partial-failure paths.
use crate::{ObjectStore, Result, StorageError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct InMemoryObjectStore {
    bucket: String,
    objects: RwLock<BTreeMap<String, Bytes>>,
    fail_puts: AtomicBool,
    fail_deletes: AtomicBool,
    put_delay_ms: AtomicU64,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new("local")
    }
}

impl InMemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(BTreeMap::new()),
            fail_puts: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            put_delay_ms: AtomicU64::new(0),
        }
    }

    /// Make every subsequent `put` fail
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `delete` fail
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Delay every `put` by `delay`
    pub fn set_put_delay(&self, delay: Duration) {
        self.put_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    fn location(&self, key: &str) -> String {
        format!("memory://{}/{}", self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, body: Bytes, _content_type: &str) -> Result<String> {
        let delay = self.put_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!("injected put failure for {key}")));
        }

        self.objects.write().await.insert(key.to_string(), body);
        Ok(self.location(key))
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!(
                "injected delete failure for {key}"
            )));
        }

        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .objects
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
