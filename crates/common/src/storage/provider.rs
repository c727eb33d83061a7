use async_trait::async_trait;

use super::types::{BucketMetadata, ListPage, ListQuery, Projection};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("bucket not found: {0}")]
    BucketNotFound(String),
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid storage payload: {0}")]
    Decode(String),
}

impl StorageError {
    /// Whether a retry at the provider boundary could plausibly succeed.
    ///
    /// Throttling and server-side failures are transient; authorization,
    /// missing buckets and malformed payloads are not.
    pub fn is_transient(&self) -> bool {
        match self {
            StorageError::Transport(_) => true,
            StorageError::Backend { status, .. } => *status >= 500 || *status == 429,
            StorageError::Unauthorized(_)
            | StorageError::BucketNotFound(_)
            | StorageError::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Transport(err.to_string())
    }
}

/// The flat storage backend the explorer consumes.
///
/// Implementations must be safe for concurrent in-flight calls: one handle
/// is shared process-wide across requests, and all per-call state lives on
/// the caller's stack.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Fetch one page of the flat listing scoped by `query`.
    ///
    /// Grouping rows (empty key, non-empty common prefix) must be
    /// distinguishable from object rows. Pass the previous page's
    /// `next_page_token` to continue a drain; `None` starts one.
    async fn list_page(
        &self,
        query: &ListQuery,
        page_token: Option<&str>,
    ) -> Result<ListPage, StorageError>;

    /// Fetch bucket-level metadata.
    ///
    /// The lifecycle policy is only populated under [`Projection::Full`].
    async fn bucket_metadata(
        &self,
        bucket: &str,
        projection: Projection,
    ) -> Result<BucketMetadata, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(StorageError::Transport("connection reset".to_string()).is_transient());
        assert!(StorageError::Backend {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_transient());
        assert!(StorageError::Backend {
            status: 429,
            message: "slow down".to_string()
        }
        .is_transient());

        assert!(!StorageError::Unauthorized("denied".to_string()).is_transient());
        assert!(!StorageError::BucketNotFound("test".to_string()).is_transient());
        assert!(!StorageError::Backend {
            status: 400,
            message: "bad request".to_string()
        }
        .is_transient());
        assert!(!StorageError::Decode("truncated body".to_string()).is_transient());
    }
}
