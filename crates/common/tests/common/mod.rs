//! Shared test utilities for explorer integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use common::storage::{
    AclRole, AclRule, BucketMetadata, LifecycleAction, LifecycleCondition, LifecyclePolicy,
    LifecycleRule, ListPage, ListQuery, Projection, RawEntry, StorageError, StorageProvider,
};
use common::testkit::{MemoryStore, StoredObject};

/// A thirty-day expiry policy, enough to tell apart from none at all.
pub fn sample_lifecycle() -> LifecyclePolicy {
    LifecyclePolicy {
        rules: vec![LifecycleRule {
            action: LifecycleAction {
                kind: "Delete".to_string(),
                storage_class: None,
            },
            condition: LifecycleCondition {
                age: Some(30),
                ..Default::default()
            },
        }],
    }
}

/// Bucket `test` holding `p/x` and `p/q/x`, with a lifecycle policy.
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.create_bucket("test", Some(sample_lifecycle()));
    store.put_object_with(
        "test",
        "p/x",
        StoredObject {
            size: 42,
            owner: "user-jane@example.com".to_string(),
            acl: vec![
                AclRule::new("user-jane@example.com", AclRole::Owner),
                AclRule::new("allUsers", AclRole::Reader),
            ],
        },
    );
    store.put_object("test", "p/q/x");
    store
}

/// Provider wrapper that counts calls and injects failures.
pub struct RecordingStore {
    inner: MemoryStore,
    list_calls: AtomicUsize,
    metadata_calls: AtomicUsize,
    fail_metadata: bool,
    /// Fail the list call with this zero-based page index.
    fail_list_at_page: Option<usize>,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            list_calls: AtomicUsize::new(0),
            metadata_calls: AtomicUsize::new(0),
            fail_metadata: false,
            fail_list_at_page: None,
        }
    }

    pub fn with_fail_metadata(mut self) -> Self {
        self.fail_metadata = true;
        self
    }

    pub fn with_fail_list_at_page(mut self, page: usize) -> Self {
        self.fail_list_at_page = Some(page);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageProvider for RecordingStore {
    async fn list_page(
        &self,
        query: &ListQuery,
        page_token: Option<&str>,
    ) -> Result<ListPage, StorageError> {
        let page = self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_at_page == Some(page) {
            return Err(StorageError::Transport("injected listing failure".to_string()));
        }
        self.inner.list_page(query, page_token).await
    }

    async fn bucket_metadata(
        &self,
        bucket: &str,
        projection: Projection,
    ) -> Result<BucketMetadata, StorageError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_metadata {
            return Err(StorageError::Transport(
                "injected metadata failure".to_string(),
            ));
        }
        self.inner.bucket_metadata(bucket, projection).await
    }
}

/// Provider that answers every listing with a row carrying neither an
/// object key nor a common prefix.
pub struct AnomalousStore;

#[async_trait]
impl StorageProvider for AnomalousStore {
    async fn list_page(
        &self,
        _query: &ListQuery,
        _page_token: Option<&str>,
    ) -> Result<ListPage, StorageError> {
        Ok(ListPage {
            entries: vec![RawEntry::default()],
            next_page_token: None,
        })
    }

    async fn bucket_metadata(
        &self,
        bucket: &str,
        _projection: Projection,
    ) -> Result<BucketMetadata, StorageError> {
        Ok(BucketMetadata {
            name: bucket.to_string(),
            ..Default::default()
        })
    }
}
