use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::provider::{StorageError, StorageProvider};
use super::retry::{with_retry, RetryConfig};
use super::types::{AclRule, BucketMetadata, ListPage, ListQuery, Projection, RawEntry};

/// Base URL of the public storage v1 JSON API.
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com/storage/v1/";

const USER_AGENT: &str = concat!("keytree/", env!("CARGO_PKG_VERSION"));

/// Thin client for the storage v1 JSON API.
///
/// Speaks directly to the REST surface: `objects.list` for scoped flat
/// listings and `buckets.get` for bucket metadata. One client handle is
/// shared across concurrent calls; the underlying [`reqwest::Client`]
/// pools connections internally.
///
/// Credential acquisition is the startup layer's concern. The client
/// attaches a bearer token when configured with one, and accepts a custom
/// endpoint for emulators.
#[derive(Debug, Clone)]
pub struct GcsClient {
    http: Client,
    base: Url,
    token: Option<String>,
    retry: RetryConfig,
}

impl GcsClient {
    pub fn new(base: Url, token: Option<String>) -> Result<Self, StorageError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base,
            token,
            retry: RetryConfig::default(),
        })
    }

    /// Client against the public API endpoint.
    pub fn with_defaults(token: Option<String>) -> Result<Self, StorageError> {
        let base = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|e| StorageError::Decode(format!("invalid endpoint url: {}", e)))?;
        Self::new(base, token)
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn resource_url(&self, path: &str) -> Result<Url, StorageError> {
        self.base
            .join(path)
            .map_err(|e| StorageError::Decode(format!("invalid request url: {}", e)))
    }

    async fn get_json<T>(&self, url: Url, query: &[(&str, &str)]) -> Result<T, StorageError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut request = self.http.get(url).query(query);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StorageError::Decode(e.to_string()))
    }

    async fn list_page_once(
        &self,
        query: &ListQuery,
        page_token: Option<&str>,
    ) -> Result<ListPage, StorageError> {
        let url = self.resource_url(&format!("b/{}/o", query.bucket))?;

        let mut params: Vec<(&str, &str)> = Vec::new();
        if !query.prefix.is_empty() {
            params.push(("prefix", query.prefix.as_str()));
        }
        if !query.delimiter.is_empty() {
            params.push(("delimiter", query.delimiter.as_str()));
        }
        if query.versions {
            params.push(("versions", "true"));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let page: ObjectsPage = self.get_json(url, &params).await?;
        page.into_list_page()
    }
}

fn error_for_status(status: StatusCode, message: String) -> StorageError {
    match status.as_u16() {
        401 | 403 => StorageError::Unauthorized(message),
        404 => StorageError::BucketNotFound(message),
        status => StorageError::Backend { status, message },
    }
}

#[async_trait]
impl StorageProvider for GcsClient {
    async fn list_page(
        &self,
        query: &ListQuery,
        page_token: Option<&str>,
    ) -> Result<ListPage, StorageError> {
        tracing::debug!(
            bucket = %query.bucket,
            prefix = %query.prefix,
            continuation = page_token.is_some(),
            "objects.list"
        );
        with_retry(&self.retry, "objects.list", || {
            self.list_page_once(query, page_token)
        })
        .await
    }

    async fn bucket_metadata(
        &self,
        bucket: &str,
        projection: Projection,
    ) -> Result<BucketMetadata, StorageError> {
        tracing::debug!(bucket = %bucket, projection = projection.as_param(), "buckets.get");
        let url = self.resource_url(&format!("b/{}", bucket))?;
        let params = [("projection", projection.as_param())];
        with_retry(&self.retry, "buckets.get", || {
            self.get_json::<BucketMetadata>(url.clone(), &params)
        })
        .await
    }
}

// Wire documents for objects.list. Bucket metadata deserializes straight
// into [`BucketMetadata`], which mirrors the v1 document shape.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectsPage {
    #[serde(default)]
    prefixes: Vec<String>,
    #[serde(default)]
    items: Vec<ObjectResource>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectResource {
    name: String,
    /// The v1 API reports sizes as decimal strings.
    size: Option<String>,
    owner: Option<ObjectOwner>,
    #[serde(default)]
    acl: Vec<AclRule>,
}

#[derive(Debug, Deserialize)]
struct ObjectOwner {
    entity: String,
}

impl ObjectsPage {
    /// Grouping rows first, then object rows, as the v1 page reports them.
    fn into_list_page(self) -> Result<ListPage, StorageError> {
        let mut entries = Vec::with_capacity(self.prefixes.len() + self.items.len());

        for prefix in self.prefixes {
            entries.push(RawEntry::grouping(prefix));
        }

        for item in self.items {
            let size = match item.size {
                Some(ref s) => s
                    .parse::<i64>()
                    .map_err(|_| StorageError::Decode(format!("invalid object size: {}", s)))?,
                None => 0,
            };
            entries.push(RawEntry {
                key: item.name,
                common_prefix: String::new(),
                size,
                owner: item.owner.map(|o| o.entity).unwrap_or_default(),
                acl: item.acl,
            });
        }

        Ok(ListPage {
            entries,
            next_page_token: self.next_page_token,
        })
    }
}
