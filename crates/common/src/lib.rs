/**
 * Single-level exploration of a flat object namespace.
 *  Turns one scoped listing query into classified
 *  directory / object nodes, decorated with the
 *  bucket's lifecycle policy
 */
pub mod explore;
/**
 * Storage provider boundary.
 *  The paginated listing + bucket metadata interface
 *  the explorer consumes, a thin client for the
 *  storage v1 JSON API, and the retry policy applied
 *  at that boundary
 */
pub mod storage;
/**
 * In-memory storage provider for tests and local
 *  development
 */
pub mod testkit;

pub mod prelude {
    pub use crate::explore::{ExploreError, Explorer, Node, NodeKind};
    pub use crate::storage::{
        AclRole, AclRule, BucketMetadata, LifecyclePolicy, ListQuery, StorageError,
        StorageProvider,
    };
}
