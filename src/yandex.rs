//! yadi.sk share client: prefetch extraction and fetch-list folder walk.
//!
//! Unlike cloud.mail, the page embeds only the root listing; children of
//! nested folders come from a separate fetch-list endpoint that wants the
//! page's session cookie and security token on every request.

use async_trait::async_trait;
use futures::future::BoxFuture;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::entry::DownloadEntry;
use crate::error::{Result, ShareError};
use crate::extract::parse_yandex_page;
use crate::models::{FetchListResponse, YandexConfig};
use crate::provider::{ShareListing, ShareProvider};

/// Marker substring of yadi.sk share links.
pub const YANDEX_MARKER: &str = "yadi.sk";

/// Public listing endpoint for yadi.sk shares.
const FETCH_LIST_URL: &str = "https://yadi.sk/public/api/fetch-list";

/// Client for yadi.sk public folder shares.
pub struct YandexClient {
    http: Client,
    fetch_list_url: String,
}

impl YandexClient {
    pub fn new() -> Self {
        Self::with_fetch_list_url(FETCH_LIST_URL.to_string())
    }

    /// Create a client against a non-default listing endpoint.
    pub fn with_fetch_list_url(fetch_list_url: String) -> Self {
        Self {
            http: Client::new(),
            fetch_list_url,
        }
    }

    /// Fetch a share page, capture its session cookies, and derive the
    /// walker config from the embedded prefetch payload.
    pub async fn fetch_config(&self, url: &str) -> Result<YandexConfig> {
        let response = self.http.get(url).send().await?;
        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .collect::<Vec<_>>()
            .join("; ");
        let page = response.text().await?;

        let prefetch = parse_yandex_page(url, &page)?;
        let base = prefetch
            .root()
            .ok_or(ShareError::MissingField("resources (root)"))?;
        let base_hash = base
            .hash
            .clone()
            .ok_or(ShareError::MissingField("resources.hash"))?;
        let host = base
            .meta
            .short_url
            .clone()
            .ok_or(ShareError::MissingField("resources.meta.short_url"))?;

        let base_name = base.name.clone();

        Ok(YandexConfig {
            sk: prefetch.environment.sk,
            cookie,
            base_name,
            base_hash,
            host,
        })
    }

    /// Recursively enumerate every file under `path` (relative to the share
    /// root, empty for the root itself).
    ///
    /// Each folder costs exactly one listing request. A non-200 listing
    /// response is recoverable: the subtree is reported empty and traversal
    /// of its siblings continues. Only the first page (`offset: 0`) of each
    /// folder is requested; folders larger than one page are truncated.
    pub fn walk<'a>(
        &'a self,
        config: &'a YandexConfig,
        path: String,
    ) -> BoxFuture<'a, Result<Vec<DownloadEntry>>> {
        Box::pin(async move {
            let path = if path.ends_with('/') {
                path
            } else {
                format!("{path}/")
            };
            let body = serde_json::json!({
                "hash": format!("{}:{}", config.base_hash, path),
                "sk": config.sk,
                "offset": 0,
                "withSizes": true,
            });

            let mut request = self
                .http
                .post(&self.fetch_list_url)
                .header(CONTENT_TYPE, "text/plain")
                .body(body.to_string());
            if !config.cookie.is_empty() {
                request = request.header(COOKIE, config.cookie.clone());
            }
            let response = request.send().await?;

            let status = response.status();
            if status != StatusCode::OK {
                warn!(%status, %path, "listing request failed, skipping subtree");
                return Ok(Vec::new());
            }

            let listing: FetchListResponse = serde_json::from_str(&response.text().await?)?;

            let mut entries = Vec::new();
            for resource in listing.resources {
                let child_path = format!("{path}{}", resource.name);
                if resource.kind != "dir" {
                    entries.push(DownloadEntry::yandex(
                        resource.name,
                        path.clone(),
                        child_path,
                        config.host.clone(),
                    ));
                } else {
                    debug!(folder = %child_path, "descending into folder");
                    entries.extend(self.walk(config, child_path).await?);
                }
            }

            Ok(entries)
        })
    }
}

impl Default for YandexClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShareProvider for YandexClient {
    fn marker(&self) -> &'static str {
        YANDEX_MARKER
    }

    async fn resolve(&self, link: &str) -> Result<ShareListing> {
        let config = self.fetch_config(link).await?;
        let entries = self.walk(&config, String::new()).await?;
        Ok(ShareListing {
            base_folder: config.base_name,
            entries,
        })
    }
}
