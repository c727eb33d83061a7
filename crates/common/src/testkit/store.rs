use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::storage::{
    AclRule, BucketMetadata, LifecyclePolicy, ListPage, ListQuery, Projection, RawEntry,
    StorageError, StorageProvider,
};

/// Per-object metadata held by the in-memory store.
#[derive(Debug, Clone, Default)]
pub struct StoredObject {
    pub size: i64,
    pub owner: String,
    pub acl: Vec<AclRule>,
}

/// In-memory [`StorageProvider`] for tests and local development.
///
/// Mimics how a flat-listing backend answers scoped queries: keys are
/// delivered in lexicographic order, keys sharing a prefix up to the next
/// delimiter collapse into a single grouping row, and an object key equal
/// to the queried prefix is echoed back as a zero-content grouping row,
/// the self-reference case the explorer's filter exists for. Listings
/// paginate with a numeric continuation token.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    buckets: BTreeMap<String, BucketData>,
    page_size: usize,
}

#[derive(Debug, Default)]
struct BucketData {
    metadata: BucketMetadata,
    objects: BTreeMap<String, StoredObject>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                buckets: BTreeMap::new(),
                page_size: 1000,
            })),
        }
    }

    /// Cap listing pages at `page_size` entries to exercise pagination.
    pub fn with_page_size(self, page_size: usize) -> Self {
        self.inner.lock().page_size = page_size.max(1);
        self
    }

    pub fn create_bucket(&self, name: &str, lifecycle: Option<LifecyclePolicy>) {
        let mut inner = self.inner.lock();
        inner.buckets.insert(
            name.to_string(),
            BucketData {
                metadata: BucketMetadata {
                    name: name.to_string(),
                    location: "US".to_string(),
                    storage_class: "STANDARD".to_string(),
                    lifecycle,
                },
                objects: BTreeMap::new(),
            },
        );
    }

    /// Insert an object with default metadata, creating the bucket when
    /// it does not exist yet.
    pub fn put_object(&self, bucket: &str, key: &str) {
        self.put_object_with(bucket, key, StoredObject::default());
    }

    pub fn put_object_with(&self, bucket: &str, key: &str, object: StoredObject) {
        let mut inner = self.inner.lock();
        let data = inner.buckets.entry(bucket.to_string()).or_default();
        if data.metadata.name.is_empty() {
            data.metadata.name = bucket.to_string();
        }
        data.objects.insert(key.to_string(), object);
    }
}

impl BucketData {
    /// Full listing for a query, before pagination.
    fn entries(&self, query: &ListQuery) -> Vec<RawEntry> {
        let mut entries = Vec::new();
        let mut last_grouping: Option<String> = None;

        for (key, object) in self.objects.range(query.prefix.clone()..) {
            if !key.starts_with(&query.prefix) {
                break;
            }

            if query.delimiter.is_empty() {
                entries.push(object_entry(key, object));
                continue;
            }

            let rest = &key[query.prefix.len()..];

            // a key equal to a delimiter-terminated prefix echoes the
            // queried prefix itself as a zero-content grouping row
            if rest.is_empty() {
                if query.prefix.ends_with(&query.delimiter) {
                    push_grouping(&mut entries, &mut last_grouping, query.prefix.clone());
                } else {
                    entries.push(object_entry(key, object));
                }
                continue;
            }

            match rest.find(&query.delimiter) {
                Some(idx) => {
                    let common = format!(
                        "{}{}",
                        query.prefix,
                        &rest[..idx + query.delimiter.len()]
                    );
                    push_grouping(&mut entries, &mut last_grouping, common);
                }
                None => entries.push(object_entry(key, object)),
            }
        }

        entries
    }
}

fn object_entry(key: &str, object: &StoredObject) -> RawEntry {
    RawEntry {
        key: key.to_string(),
        common_prefix: String::new(),
        size: object.size,
        owner: object.owner.clone(),
        acl: object.acl.clone(),
    }
}

fn push_grouping(entries: &mut Vec<RawEntry>, last: &mut Option<String>, common: String) {
    if last.as_deref() == Some(common.as_str()) {
        return;
    }
    entries.push(RawEntry::grouping(common.clone()));
    *last = Some(common);
}

#[async_trait]
impl StorageProvider for MemoryStore {
    async fn list_page(
        &self,
        query: &ListQuery,
        page_token: Option<&str>,
    ) -> Result<ListPage, StorageError> {
        let inner = self.inner.lock();
        let data = inner
            .buckets
            .get(&query.bucket)
            .ok_or_else(|| StorageError::BucketNotFound(query.bucket.clone()))?;

        let entries = data.entries(query);

        let start = match page_token {
            Some(token) => token.parse::<usize>().map_err(|_| StorageError::Backend {
                status: 400,
                message: format!("invalid page token: {}", token),
            })?,
            None => 0,
        };
        let end = entries.len().min(start.saturating_add(inner.page_size));
        let next_page_token = (end < entries.len()).then(|| end.to_string());

        Ok(ListPage {
            entries: entries.get(start..end).unwrap_or_default().to_vec(),
            next_page_token,
        })
    }

    async fn bucket_metadata(
        &self,
        bucket: &str,
        projection: Projection,
    ) -> Result<BucketMetadata, StorageError> {
        let inner = self.inner.lock();
        let data = inner
            .buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))?;

        let mut metadata = data.metadata.clone();
        if projection != Projection::Full {
            metadata.lifecycle = None;
        }
        Ok(metadata)
    }
}
