use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Deserialize;

use common::explore::ExploreError;
use common::storage::StorageError;

use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct NodesQuery {
    /// Path in the bucket to list (defaults to the root). Descending into
    /// a directory means passing that node's `fqpn`, trailing `/` and all.
    #[serde(default)]
    pub prefix: Option<String>,
}

/// `GET /node/:bucket?prefix=` - one directory level as a JSON array of
/// nodes.
#[axum::debug_handler]
pub async fn handler(
    State(state): State<ServiceState>,
    Path(bucket): Path<String>,
    Query(query): Query<NodesQuery>,
) -> Result<impl IntoResponse, NodesError> {
    let prefix = query.prefix.unwrap_or_default();

    let nodes = state.explorer().explore(&bucket, &prefix).await?;

    Ok((StatusCode::OK, Json(nodes)))
}

#[derive(Debug, thiserror::Error)]
pub enum NodesError {
    #[error("explore error: {0}")]
    Explore(#[from] ExploreError),
}

impl IntoResponse for NodesError {
    fn into_response(self) -> Response {
        let NodesError::Explore(ref err) = self;
        let status = match err {
            ExploreError::Storage(StorageError::BucketNotFound(_)) => StatusCode::NOT_FOUND,
            ExploreError::Storage(StorageError::Unauthorized(_)) => StatusCode::FORBIDDEN,
            ExploreError::Storage(_) | ExploreError::Classify(_) => StatusCode::BAD_GATEWAY,
        };

        tracing::error!("Failed to explore bucket: {}", self);
        (status, format!("Error: {}", self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    use common::storage::LifecyclePolicy;
    use common::testkit::MemoryStore;

    fn test_state() -> ServiceState {
        let store = MemoryStore::new();
        store.create_bucket("test", Some(LifecyclePolicy::default()));
        store.put_object("test", "p/x");
        store.put_object("test", "p/q/x");
        ServiceState::with_provider(Arc::new(store))
    }

    #[tokio::test]
    async fn test_handler_lists_root() {
        let response = handler(
            State(test_state()),
            Path("test".to_string()),
            Query(NodesQuery { prefix: None }),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let nodes: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(nodes.as_array().unwrap().len(), 1);
        assert_eq!(nodes[0]["ntype"], "DIR");
        assert_eq!(nodes[0]["fqpn"], "p/");
    }

    #[tokio::test]
    async fn test_handler_lists_prefix() {
        let response = handler(
            State(test_state()),
            Path("test".to_string()),
            Query(NodesQuery {
                prefix: Some("p/".to_string()),
            }),
        )
        .await
        .unwrap()
        .into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let nodes: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let array = nodes.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert!(array.iter().any(|n| n["ntype"] == "OBJ" && n["name"] == "x"));
        assert!(array
            .iter()
            .any(|n| n["ntype"] == "DIR" && n["fqpn"] == "p/q/"));
    }

    #[tokio::test]
    async fn test_handler_unknown_bucket_is_not_found() {
        let result = handler(
            State(test_state()),
            Path("missing".to_string()),
            Query(NodesQuery { prefix: None }),
        )
        .await;

        let response = result.err().unwrap().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
