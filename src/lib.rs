//! cloud_mirror - A CLI tool for mirroring public cloud-storage shares.
//!
//! This library provides functionality to:
//! - Extract the folder listing a share page embeds as inline script state
//! - Recursively walk nested folders on cloud.mail and yadi.sk shares
//! - Normalize per-provider records into uniform download entries
//! - Stream every discovered file into a local mirror of the remote tree
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use cloud_mirror::{Downloader, MailClient, ShareProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = MailClient::new();
//!     let listing = provider.resolve("https://cloud.mail.example/public/Ab12/share").await?;
//!
//!     let downloader = Downloader::new(PathBuf::from("mirror"));
//!     downloader.download_all(&listing).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod download;
pub mod entry;
pub mod error;
pub mod extract;
pub mod mail;
pub mod models;
pub mod provider;
pub mod yandex;

// Re-exports for convenience
pub use download::Downloader;
pub use entry::DownloadEntry;
pub use error::{Result, ShareError};
pub use mail::MailClient;
pub use provider::{links_for, ShareListing, ShareProvider};
pub use yandex::YandexClient;
