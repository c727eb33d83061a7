use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{AclRule, LifecyclePolicy};

// A node is either a directory or an object. Directories are synthetic
// grouping rows with no backing object, so they carry no ACL, size or
// owner; the variant shape makes that a type-level guarantee rather than
// a convention over zeroed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ntype")]
pub enum NodeKind {
    #[serde(rename = "DIR")]
    Directory,
    #[serde(rename = "OBJ")]
    Object {
        #[serde(default)]
        acl: Vec<AclRule>,
        #[serde(default)]
        size: i64,
        #[serde(default)]
        owner: String,
    },
}

/// One entry of a single directory level.
///
/// For an object, `name` is the last path segment and `fqpn` the full
/// object key. For a directory both are the common-prefix string, trailing
/// delimiter retained. Every node of one exploration shares the same
/// lifecycle policy allocation, fetched once per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub bucket: String,
    pub name: String,
    pub fqpn: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub lifecycle: Option<Arc<LifecyclePolicy>>,
}

impl Node {
    /// A directory node for a common-prefix string.
    pub fn directory(
        bucket: impl Into<String>,
        common_prefix: impl Into<String>,
        lifecycle: Option<Arc<LifecyclePolicy>>,
    ) -> Self {
        let common_prefix = common_prefix.into();
        Self {
            bucket: bucket.into(),
            name: common_prefix.clone(),
            fqpn: common_prefix,
            kind: NodeKind::Directory,
            lifecycle,
        }
    }

    /// An object node for a fully-qualified key.
    #[allow(clippy::too_many_arguments)]
    pub fn object(
        bucket: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
        acl: Vec<AclRule>,
        size: i64,
        owner: String,
        lifecycle: Option<Arc<LifecyclePolicy>>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            name: name.into(),
            fqpn: key.into(),
            kind: NodeKind::Object { acl, size, owner },
            lifecycle,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, NodeKind::Object { .. })
    }

    /// ACL entries, if this is an object.
    pub fn acl(&self) -> Option<&[AclRule]> {
        match &self.kind {
            NodeKind::Object { acl, .. } => Some(acl),
            NodeKind::Directory => None,
        }
    }

    /// Size in bytes, if this is an object.
    pub fn size(&self) -> Option<i64> {
        match &self.kind {
            NodeKind::Object { size, .. } => Some(*size),
            NodeKind::Directory => None,
        }
    }

    /// Owner entity, if this is an object.
    pub fn owner(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Object { owner, .. } => Some(owner),
            NodeKind::Directory => None,
        }
    }
}
