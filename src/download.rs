//! Download orchestration: materialize a resolved share listing on disk.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{Result, ShareError};
use crate::provider::ShareListing;

/// Mirrors resolved share listings under a fixed output root.
pub struct Downloader {
    http: Client,
    output_root: PathBuf,
}

impl Downloader {
    pub fn new(output_root: PathBuf) -> Self {
        Self {
            http: Client::new(),
            output_root,
        }
    }

    /// Download every entry of a listing to `output_root/base_folder`,
    /// recreating the remote directory structure. Pre-existing directories
    /// are reused; pre-existing files are overwritten.
    pub async fn download_all(&self, listing: &ShareListing) -> Result<()> {
        let root = self.output_root.join(&listing.base_folder);
        let bar = ProgressBar::new(listing.entries.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{bar:40}] {pos}/{len} {msg}")
                .expect("progress template is valid")
                .progress_chars("=>-"),
        );

        for entry in &listing.entries {
            bar.set_message(format!("Loading {}", entry.name()));
            let directory = root.join(entry.dir());
            tokio::fs::create_dir_all(&directory).await?;
            self.fetch_to_file(&entry.link(), &root.join(entry.target()))
                .await?;
            bar.inc(1);
        }

        bar.finish();
        info!(
            files = listing.entries.len(),
            folder = %root.display(),
            "share mirrored"
        );
        Ok(())
    }

    /// Stream one URL to a local file.
    async fn fetch_to_file(&self, url: &str, destination: &Path) -> Result<()> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ShareError::DownloadFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let mut file = File::create(destination).await?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        Ok(())
    }
}
