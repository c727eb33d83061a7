use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role granted by a single access-control entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AclRole {
    Owner,
    Writer,
    Reader,
}

/// One access-control entry on an object: who, and what they may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclRule {
    /// The grantee, e.g. `user-jane@example.com` or `allUsers`.
    pub entity: String,
    pub role: AclRole,
}

impl AclRule {
    pub fn new(entity: impl Into<String>, role: AclRole) -> Self {
        Self {
            entity: entity.into(),
            role,
        }
    }
}

// The lifecycle types (de)serialize to the shape of the v1 bucket
// metadata document, so the wire client can read them directly.

/// Bucket lifecycle configuration: automated transitions and expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LifecyclePolicy {
    #[serde(rename = "rule", default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<LifecycleRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleRule {
    pub action: LifecycleAction,
    pub condition: LifecycleCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleAction {
    /// Action kind, e.g. `Delete` or `SetStorageClass`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleCondition {
    /// Age in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_newer_versions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_live: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches_storage_class: Vec<String>,
}

/// Bucket-level metadata, from a metadata request rather than a listing.
///
/// The lifecycle policy is only populated when the request asked for the
/// full projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BucketMetadata {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub storage_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<LifecyclePolicy>,
}

/// Projection requested on a metadata call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    NoAcl,
    Full,
}

impl Projection {
    pub fn as_param(&self) -> &'static str {
        match self {
            Projection::NoAcl => "noAcl",
            Projection::Full => "full",
        }
    }
}

/// One row of a flat listing.
///
/// A row is either an object (non-empty `key`) or a grouping (empty `key`,
/// non-empty `common_prefix` standing for everything under that sub-path).
/// A grouping has no backing object, so `size`, `owner` and `acl` are only
/// meaningful on object rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawEntry {
    pub key: String,
    pub common_prefix: String,
    pub size: i64,
    pub owner: String,
    pub acl: Vec<AclRule>,
}

impl RawEntry {
    /// A grouping row for the given common-prefix string.
    pub fn grouping(common_prefix: impl Into<String>) -> Self {
        Self {
            common_prefix: common_prefix.into(),
            ..Default::default()
        }
    }

    /// An object row carrying only its key.
    pub fn object(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn is_grouping(&self) -> bool {
        self.key.is_empty() && !self.common_prefix.is_empty()
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    pub entries: Vec<RawEntry>,
    /// Cursor for the next page, absent on the last page.
    pub next_page_token: Option<String>,
}

/// Scope of a flat listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub bucket: String,
    /// Only keys beginning with this string are listed. Empty means the
    /// whole bucket.
    pub prefix: String,
    /// Separator used to collapse keys sharing a prefix up to the next
    /// occurrence into a single grouping row. Empty disables grouping.
    pub delimiter: String,
    /// Include non-current object generations.
    pub versions: bool,
}

impl ListQuery {
    /// A flat query over the whole bucket, no grouping.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: String::new(),
            delimiter: String::new(),
            versions: false,
        }
    }

    /// The query shape the explorer issues: one directory level under
    /// `prefix`, grouped on `/`.
    pub fn single_level(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            delimiter: "/".to_string(),
            versions: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_versions(mut self, versions: bool) -> Self {
        self.versions = versions;
        self
    }
}
