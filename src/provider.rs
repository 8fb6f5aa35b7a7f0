//! Provider capability interface and link dispatch.
//!
//! The two providers share one contract: resolve a share link into a flat
//! listing of normalized entries plus the base folder name everything is
//! mirrored under. Links are dispatched to a provider by a marker substring
//! in the URL.

use async_trait::async_trait;

use crate::entry::DownloadEntry;
use crate::error::Result;

/// The resolved contents of one share link.
#[derive(Debug)]
pub struct ShareListing {
    /// Destination folder name under the output root.
    pub base_folder: String,
    /// Every file discovered in the share, in traversal order.
    pub entries: Vec<DownloadEntry>,
}

/// A cloud-storage service that can resolve public share links.
#[async_trait]
pub trait ShareProvider: Send + Sync {
    /// Substring that identifies this provider's links.
    fn marker(&self) -> &'static str;

    /// Resolve a share link into a complete listing of its file tree.
    async fn resolve(&self, link: &str) -> Result<ShareListing>;
}

/// The lines of a links file that belong to the given provider marker.
/// Blank lines and lines without the marker are skipped.
pub fn links_for<'a>(content: &'a str, marker: &str) -> Vec<&'a str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains(marker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_for_filters_by_marker() {
        let content = "\
https://cloud.mail/public/Ab12/share

https://yadi.sk/d/xyz
https://example.com/unrelated
  https://cloud.mail/public/Cd34/other
";
        assert_eq!(
            links_for(content, "cloud.mail"),
            vec![
                "https://cloud.mail/public/Ab12/share",
                "https://cloud.mail/public/Cd34/other"
            ]
        );
        assert_eq!(links_for(content, "yadi.sk"), vec!["https://yadi.sk/d/xyz"]);
    }

    #[test]
    fn test_links_for_skips_unmatched_lines() {
        let content = "https://example.com/folder/123\n\n";
        assert!(links_for(content, "cloud.mail").is_empty());
        assert!(links_for(content, "yadi.sk").is_empty());
    }
}
