//! Data models for the embedded page state of both providers.
//!
//! Neither provider exposes a documented API: the folder listing is inlined
//! into the share page as script content. These models describe only the
//! fields the walkers consume; everything else in the payloads is ignored.

use serde::Deserialize;
use serde_json::Value;

/// Embedded config of a cloud.mail share page (`window.cloudSettings`).
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub dispatcher: MailDispatcher,
    pub folders: MailFolders,
    #[serde(default)]
    pub state: MailState,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailDispatcher {
    #[serde(default)]
    pub weblink_view: Vec<MailWeblinkView>,
}

/// One entry of `dispatcher.weblink_view`; its `url` is the download host.
#[derive(Debug, Clone, Deserialize)]
pub struct MailWeblinkView {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailFolders {
    /// Ancestor chain of the current folder. May be empty for some shares;
    /// when present, the first ancestor's weblink is the base path prefix.
    #[serde(default)]
    pub tree: Vec<MailTreeLevel>,
    /// The immediate children of the current folder.
    pub folder: MailFolderListing,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailTreeLevel {
    #[serde(default)]
    pub list: Vec<MailTreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailTreeNode {
    pub name: String,
    pub weblink: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailFolderListing {
    #[serde(default)]
    pub list: Vec<MailFolderItem>,
}

/// One child of a cloud.mail folder. `kind` is `file` or `folder`; anything
/// else is rejected by the walker.
#[derive(Debug, Clone, Deserialize)]
pub struct MailFolderItem {
    pub name: String,
    pub weblink: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailState {
    /// Fallback share identifier, used for the base folder name when the
    /// ancestor tree is empty.
    #[serde(default)]
    pub id: String,
}

/// Embedded config of a yadi.sk share page (the `store-prefetch` script).
#[derive(Debug, Clone, Deserialize)]
pub struct YandexPrefetch {
    /// Resource id → descriptor. Exactly one resource has no parent; that
    /// one is the share root.
    pub resources: std::collections::HashMap<String, YandexResource>,
    pub environment: YandexEnvironment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YandexEnvironment {
    /// Security token required by the fetch-list endpoint.
    pub sk: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YandexResource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parent: Option<Value>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub meta: YandexResourceMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YandexResourceMeta {
    #[serde(default)]
    pub short_url: Option<String>,
}

impl YandexPrefetch {
    /// The share root: the single resource without a parent.
    pub fn root(&self) -> Option<&YandexResource> {
        self.resources.values().find(|res| res.parent.is_none())
    }
}

/// Everything the yadi.sk walker needs, derived once per share link from the
/// prefetch payload and the page response.
#[derive(Debug, Clone)]
pub struct YandexConfig {
    /// Security token from `environment.sk`.
    pub sk: String,
    /// `name=value` cookie pairs captured from the initial page fetch,
    /// forwarded on every listing request.
    pub cookie: String,
    /// Root resource name; becomes the destination base folder.
    pub base_name: String,
    /// Root resource hash, prefixed onto every listing path.
    pub base_hash: String,
    /// Host (the root's short url) that download links are built on.
    pub host: String,
}

/// Response of the fetch-list endpoint.
#[derive(Debug, Deserialize)]
pub struct FetchListResponse {
    #[serde(default)]
    pub resources: Vec<ListedResource>,
}

#[derive(Debug, Deserialize)]
pub struct ListedResource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}
