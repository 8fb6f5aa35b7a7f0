//! Provider-agnostic representation of one downloadable file.

/// One file discovered during a share traversal, tagged with the provider
/// it came from. Constructed once by the walkers; every accessor is a pure
/// function of the constructed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEntry {
    Mail {
        name: String,
        /// Raw weblink path of the file inside the share.
        weblink: String,
        /// Download host from `dispatcher.weblink_view`.
        host: String,
        /// Base weblink prefix stripped off when computing relative paths.
        base: String,
    },
    Yandex {
        name: String,
        /// Folder path the file lives in, relative to the share root.
        dir_path: String,
        /// Full path of the file, relative to the share root.
        full_path: String,
        /// Host (root short url) that the download link is built on.
        host: String,
    },
}

/// Strip exactly one leading separator, never more.
fn strip_one_leading(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

impl DownloadEntry {
    pub fn mail(name: String, weblink: String, host: String, base: String) -> Self {
        Self::Mail {
            name,
            weblink,
            host,
            base,
        }
    }

    pub fn yandex(name: String, dir_path: String, full_path: String, host: String) -> Self {
        Self::Yandex {
            name,
            dir_path,
            full_path,
            host,
        }
    }

    /// Display name of the file.
    pub fn name(&self) -> &str {
        match self {
            Self::Mail { name, .. } => name,
            Self::Yandex { name, .. } => name,
        }
    }

    /// Absolute download URL: host plus the provider-specific relative path.
    pub fn link(&self) -> String {
        match self {
            Self::Mail { weblink, host, .. } => format!("{host}{weblink}"),
            Self::Yandex {
                full_path, host, ..
            } => format!("{host}{full_path}"),
        }
    }

    /// Directory of the file relative to the destination base folder.
    pub fn dir(&self) -> String {
        match self {
            Self::Mail {
                name,
                weblink,
                base,
                ..
            } => {
                let rel = weblink.strip_prefix(base.as_str()).unwrap_or(weblink);
                let rel = rel.strip_suffix(name.as_str()).unwrap_or(rel);
                strip_one_leading(rel).trim_end_matches('/').to_string()
            }
            Self::Yandex { dir_path, .. } => {
                strip_one_leading(dir_path).trim_end_matches('/').to_string()
            }
        }
    }

    /// Full path of the file relative to the destination base folder.
    pub fn target(&self) -> String {
        match self {
            Self::Mail { weblink, base, .. } => {
                let rel = weblink.strip_prefix(base.as_str()).unwrap_or(weblink);
                strip_one_leading(rel).to_string()
            }
            Self::Yandex { full_path, .. } => strip_one_leading(full_path).to_string(),
        }
    }
}
