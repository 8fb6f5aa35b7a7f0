//! cloud.mail share client: embedded-config fetch and recursive folder walk.

use async_trait::async_trait;
use futures::future::BoxFuture;
use reqwest::Client;
use tracing::debug;

use crate::entry::DownloadEntry;
use crate::error::{Result, ShareError};
use crate::extract::parse_mail_page;
use crate::models::MailConfig;
use crate::provider::{ShareListing, ShareProvider};

/// Marker substring of cloud.mail share links.
pub const MAIL_MARKER: &str = "cloud.mail";

/// Client for cloud.mail public folder shares.
pub struct MailClient {
    http: Client,
}

impl MailClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Fetch a share page and extract its embedded config.
    pub async fn fetch_config(&self, url: &str) -> Result<MailConfig> {
        let page = self.http.get(url).send().await?.text().await?;
        parse_mail_page(url, &page)
    }

    /// Destination base folder for a share: the first ancestor's name, or
    /// the last path segment of the state id when the ancestor tree is empty.
    pub fn base_folder(config: &MailConfig) -> String {
        config
            .folders
            .tree
            .first()
            .and_then(|level| level.list.first())
            .map(|node| node.name.clone())
            .unwrap_or_else(|| {
                config
                    .state
                    .id
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
    }

    /// Recursively enumerate every file under the folder at `folder_url`.
    ///
    /// Child folders embed their own config, so each `folder` node costs one
    /// page fetch. Every level returns its own entries and the caller
    /// concatenates them; a child's URL strictly lengthens per level, which
    /// bounds the recursion.
    pub fn walk(
        &self,
        config: MailConfig,
        folder_url: String,
    ) -> BoxFuture<'_, Result<Vec<DownloadEntry>>> {
        Box::pin(async move {
            let folder_url = if folder_url.ends_with('/') {
                folder_url
            } else {
                format!("{folder_url}/")
            };
            let host = config
                .dispatcher
                .weblink_view
                .first()
                .ok_or(ShareError::MissingField("dispatcher.weblink_view"))?
                .url
                .clone();
            let base = config
                .folders
                .tree
                .first()
                .and_then(|level| level.list.first())
                .map(|node| node.weblink.clone());

            let mut entries = Vec::new();
            for item in &config.folders.folder.list {
                match item.kind.as_str() {
                    "file" => {
                        let entry = match &base {
                            Some(base) => DownloadEntry::mail(
                                item.name.clone(),
                                item.weblink.clone(),
                                host.clone(),
                                base.clone(),
                            ),
                            // No ancestor list: the item's own weblink acts
                            // as the base prefix.
                            None => DownloadEntry::mail(
                                item.name.clone(),
                                format!("{}/{}", item.weblink, item.name),
                                host.clone(),
                                item.weblink.clone(),
                            ),
                        };
                        entries.push(entry);
                    }
                    "folder" => {
                        let child_url = format!("{folder_url}{}", item.name);
                        debug!(folder = %child_url, "descending into folder");
                        let child_config = self.fetch_config(&child_url).await?;
                        entries.extend(self.walk(child_config, child_url).await?);
                    }
                    other => return Err(ShareError::UnknownNodeKind(other.to_string())),
                }
            }

            Ok(entries)
        })
    }
}

impl Default for MailClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShareProvider for MailClient {
    fn marker(&self) -> &'static str {
        MAIL_MARKER
    }

    async fn resolve(&self, link: &str) -> Result<ShareListing> {
        let config = self.fetch_config(link).await?;
        let base_folder = Self::base_folder(&config);
        let entries = self.walk(config, link.to_string()).await?;
        Ok(ShareListing {
            base_folder,
            entries,
        })
    }
}
