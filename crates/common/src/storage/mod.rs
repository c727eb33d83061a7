//! Storage provider boundary
//!
//! This module defines the interface the explorer consumes:
//!
//! - **[`StorageProvider`]**: paginated flat listing + bucket metadata
//! - **[`GcsClient`]**: thin client for the storage v1 JSON API
//! - **[`RetryConfig`]**: backoff policy applied at the provider boundary
//!
//! Listing and metadata calls are both idempotent, so the provider
//! implementations are free to retry transient failures before an error
//! ever reaches the explorer. The explorer itself never retries.

mod gcs;
mod provider;
mod retry;
mod types;

pub use gcs::{GcsClient, DEFAULT_ENDPOINT};
pub use provider::{StorageError, StorageProvider};
pub use retry::{with_retry, RetryConfig};
pub use types::{
    AclRole, AclRule, BucketMetadata, LifecycleAction, LifecycleCondition, LifecyclePolicy,
    LifecycleRule, ListPage, ListQuery, Projection, RawEntry,
};
