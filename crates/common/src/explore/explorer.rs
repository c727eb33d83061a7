use std::sync::Arc;

use super::classify::{classify, ClassifyError, EntryKind};
use super::node::Node;
use super::query::drain_entries;
use crate::storage::{ListQuery, Projection, StorageError, StorageProvider};

/// Separator used to group keys into directory levels.
pub const DELIMITER: &str = "/";

#[derive(Debug, thiserror::Error)]
pub enum ExploreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("classification error: {0}")]
    Classify(#[from] ClassifyError),
}

/// Renders one directory level of a bucket's flat namespace.
///
/// The storage provider is injected at construction, so tests can swap in
/// a fake backend and nothing reaches for process-global client handles.
/// The explorer itself holds no mutable state; every call's working set
/// lives on that call's stack, so one explorer is freely shared across
/// concurrent invocations.
#[derive(Clone)]
pub struct Explorer {
    store: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer").finish()
    }
}

impl Explorer {
    pub fn new(store: Arc<dyn StorageProvider>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn StorageProvider> {
        &self.store
    }

    /// Fetch the direct children of `bucket` under `prefix`.
    ///
    /// An empty prefix lists the bucket root. The prefix is used verbatim;
    /// when descending into a directory node, pass its `fqpn` (which keeps
    /// the trailing delimiter) as the next prefix.
    ///
    /// The bucket's lifecycle policy is fetched first and attached to every
    /// node by reference; if that fetch fails, no listing is attempted. A
    /// prefix matching nothing yields an empty vec, not an error. Any
    /// failure is all-or-nothing: no partial node list escapes.
    pub async fn explore(&self, bucket: &str, prefix: &str) -> Result<Vec<Node>, ExploreError> {
        let metadata = self
            .store
            .bucket_metadata(bucket, Projection::Full)
            .await?;
        let lifecycle = metadata.lifecycle.map(Arc::new);

        let query = ListQuery::single_level(bucket, prefix);
        let entries = drain_entries(self.store.as_ref(), &query, true).await?;

        tracing::debug!(
            bucket = %bucket,
            prefix = %prefix,
            entries = entries.len(),
            "explored one level"
        );

        let mut nodes = Vec::with_capacity(entries.len());
        for entry in entries {
            let classified = classify(&entry, DELIMITER)?;
            nodes.push(match classified.kind {
                EntryKind::Directory => {
                    Node::directory(bucket, classified.fqpn, lifecycle.clone())
                }
                EntryKind::Object => Node::object(
                    bucket,
                    classified.name,
                    classified.fqpn,
                    entry.acl,
                    entry.size,
                    entry.owner,
                    lifecycle.clone(),
                ),
            });
        }

        Ok(nodes)
    }
}
