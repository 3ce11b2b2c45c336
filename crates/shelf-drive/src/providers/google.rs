//! Drive v3 REST API listing source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use shelf_core::config::DriveConfig;
use shelf_core::error::{AppError, ErrorKind};
use shelf_core::result::AppResult;
use shelf_core::traits::ResourceSource;
use shelf_core::types::{DriveInfo, FOLDER_MIME_TYPE, ListScope, RawResource, ResourcePage};

/// Fields requested for every listed file.
const FILE_FIELDS: &str = "nextPageToken,files(id,name,mimeType,parents,webViewLink,createdTime,modifiedTime,lastModifyingUser)";

/// Page size for the drive enumeration endpoint (API maximum).
const DRIVES_PAGE_SIZE: &str = "100";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<RawResource>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveList {
    #[serde(default)]
    drives: Vec<DriveInfo>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Listing source backed by the Drive and Sheets REST APIs.
#[derive(Debug, Clone)]
pub struct GoogleDriveSource {
    client: Client,
    api_base_url: String,
    sheets_base_url: String,
    access_token: String,
    page_size: u32,
}

impl GoogleDriveSource {
    /// Create a new source from the drive configuration.
    pub fn new(config: &DriveConfig) -> AppResult<Self> {
        let access_token = config
            .access_token
            .clone()
            .ok_or_else(|| AppError::configuration("drive.access_token is not set"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            sheets_base_url: config.sheets_base_url.trim_end_matches('/').to_string(),
            access_token,
            page_size: config.page_size,
        })
    }

    /// Build a `q` clause matching items under any of `parent_ids`.
    fn parents_clause(parent_ids: &[String]) -> String {
        parent_ids
            .iter()
            .map(|id| format!("'{}' in parents", escape_literal(id)))
            .collect::<Vec<_>>()
            .join(" or ")
    }

    /// Query parameters for a listing or search within `scope`.
    fn scope_params(&self, scope: &ListScope, filter: Option<String>) -> Vec<(String, String)> {
        let mut params = vec![
            ("fields".to_string(), FILE_FIELDS.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
            ("supportsAllDrives".to_string(), "true".to_string()),
            ("includeItemsFromAllDrives".to_string(), "true".to_string()),
        ];

        let mut clauses = Vec::new();
        match scope {
            ListScope::Drive { drive_id } => {
                params.push(("driveId".to_string(), drive_id.clone()));
                params.push(("corpora".to_string(), "drive".to_string()));
                clauses.push("trashed = false".to_string());
            }
            ListScope::Parents {
                parent_ids,
                folders_only,
            } => {
                clauses.push(format!("({})", Self::parents_clause(parent_ids)));
                if *folders_only {
                    clauses.push(format!("mimeType = '{FOLDER_MIME_TYPE}'"));
                }
            }
        }
        if let Some(filter) = filter {
            clauses.push(filter);
        }
        params.push(("q".to_string(), clauses.join(" and ")));
        params
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        debug!(url = %url.path(), "Drive API request");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Request to {} failed", url.path()),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => {
                    AppError::not_found(format!("{} returned 404: {body}", url.path()))
                }
                _ => AppError::external_service(format!(
                    "{} returned {status}: {body}",
                    url.path()
                )),
            });
        }

        response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Malformed response from {}", url.path()),
                e,
            )
        })
    }

    fn url(&self, base: &str, path: &str, params: &[(String, String)]) -> AppResult<Url> {
        Url::parse_with_params(&format!("{base}{path}"), params).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid API URL: {base}{path}"),
                e,
            )
        })
    }

    async fn files(
        &self,
        scope: &ListScope,
        filter: Option<String>,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage> {
        let mut params = self.scope_params(scope, filter);
        if let Some(token) = page_token {
            params.push(("pageToken".to_string(), token.to_string()));
        }
        let url = self.url(&self.api_base_url, "/files", &params)?;
        let list: FileList = self.get_json(url).await?;
        Ok(ResourcePage {
            resources: list.files,
            next_page_token: list.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}

/// Escape a value for use inside a single-quoted `q` literal.
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[async_trait]
impl ResourceSource for GoogleDriveSource {
    fn provider_type(&self) -> &str {
        "google"
    }

    async fn list_drives(&self) -> AppResult<Vec<DriveInfo>> {
        let mut drives = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![("pageSize".to_string(), DRIVES_PAGE_SIZE.to_string())];
            if let Some(token) = &page_token {
                params.push(("pageToken".to_string(), token.clone()));
            }
            let url = self.url(&self.api_base_url, "/drives", &params)?;
            let list: DriveList = self.get_json(url).await?;
            drives.extend(list.drives);

            match list.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(drives)
    }

    async fn list_children(
        &self,
        scope: &ListScope,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage> {
        self.files(scope, None, page_token).await
    }

    async fn search(
        &self,
        query: &str,
        scope: &ListScope,
        page_token: Option<&str>,
    ) -> AppResult<ResourcePage> {
        let filter = format!(
            "fullText contains '{}' and mimeType != '{FOLDER_MIME_TYPE}' and trashed = false",
            escape_literal(query)
        );
        self.files(scope, Some(filter), page_token).await
    }

    async fn sheet_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> AppResult<Vec<Vec<String>>> {
        let path = format!("/spreadsheets/{spreadsheet_id}/values/{range}");
        let url = self.url(&self.sheets_base_url, &path, &[])?;
        let values: ValueRange = self.get_json(url).await?;

        Ok(values
            .values
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect())
    }
}
