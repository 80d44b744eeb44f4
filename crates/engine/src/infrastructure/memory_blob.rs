//! In-process blob storage.
//!
//! Stands in for the host slot when the sheet runs outside a host (previews,
//! tests). Reads and writes can be made to fail to exercise error paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{BlobError, BlobStore};

#[derive(Default)]
pub struct InMemoryBlobStore {
    value: RwLock<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing value.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(contents.into())),
            ..Self::default()
        }
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current raw value.
    pub async fn contents(&self) -> Option<String> {
        self.value.read().await.clone()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get_blob(&self) -> Result<Option<String>, BlobError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BlobError::read("storage unavailable"));
        }
        Ok(self.value.read().await.clone())
    }

    async fn set_blob(&self, blob: String) -> Result<(), BlobError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BlobError::write("storage rejected the write"));
        }
        *self.value.write().await = Some(blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty_and_stores_values() {
        let store = InMemoryBlobStore::new();
        assert_eq!(store.get_blob().await.unwrap(), None);
        store.set_blob("{}".to_string()).await.unwrap();
        assert_eq!(store.get_blob().await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_value() {
        let store = InMemoryBlobStore::with_contents("old");
        store.set_fail_writes(true);
        assert!(matches!(
            store.set_blob("new".to_string()).await,
            Err(BlobError::Write(_))
        ));
        assert_eq!(store.contents().await.as_deref(), Some("old"));
    }
}
