//! HTTP purge service client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use shelf_core::config::EdgeCacheConfig;
use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_core::traits::{EdgeCache, PurgeError, PurgeRequest};

#[derive(Debug, Serialize)]
struct RedirectBody<'a> {
    from: &'a str,
    to: &'a str,
    modified: Option<DateTime<Utc>>,
}

/// Edge cache reached over HTTP.
///
/// `POST {base_url}/purge` takes a [`PurgeRequest`] and
/// `POST {base_url}/redirect` takes `{from, to, modified}`. Failures are
/// reported through the status code: 409 for a duplicate purge, 404 for a
/// path that is not cached and 412 for content that is already fresh.
#[derive(Debug, Clone)]
pub struct HttpEdgeCache {
    client: Client,
    base_url: String,
}

impl HttpEdgeCache {
    /// Create a new client from configuration.
    pub fn new(config: &EdgeCacheConfig) -> AppResult<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| AppError::configuration("edge_cache.base_url is not set"))?
            .trim_end_matches('/')
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;

        Ok(Self { client, base_url })
    }

    async fn post<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        url: &str,
        body: &T,
    ) -> Result<(), PurgeError> {
        let response = self
            .client
            .post(format!("{}{endpoint}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| PurgeError::Other(format!("{endpoint} request for {url} failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            debug!(endpoint, url, "Edge cache accepted instruction");
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(classify(status, url, &detail))
    }
}

/// Map a purge service status code to a [`PurgeError`].
fn classify(status: StatusCode, url: &str, detail: &str) -> PurgeError {
    match status {
        StatusCode::CONFLICT => PurgeError::Duplicate(url.to_string()),
        StatusCode::NOT_FOUND => PurgeError::NotFound(url.to_string()),
        StatusCode::PRECONDITION_FAILED => PurgeError::NoFreshContent(url.to_string()),
        other => PurgeError::Other(format!("{url}: {other} {detail}")),
    }
}

#[async_trait]
impl EdgeCache for HttpEdgeCache {
    fn provider_type(&self) -> &str {
        "http"
    }

    async fn purge(&self, request: &PurgeRequest) -> Result<(), PurgeError> {
        self.post("/purge", &request.url, request).await
    }

    async fn redirect(
        &self,
        from: &str,
        to: &str,
        modified: Option<DateTime<Utc>>,
    ) -> Result<(), PurgeError> {
        let body = RedirectBody { from, to, modified };
        self.post("/redirect", from, &body).await
    }
}
