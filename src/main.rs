//! cloud_mirror CLI - Mirror public cloud-storage share links to disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cloud_mirror::{links_for, Downloader, MailClient, ShareProvider, YandexClient};

/// CLI tool for mirroring public cloud-storage shares.
#[derive(Parser)]
#[command(name = "cloud_mirror")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a text file with one share URL per line.
    #[arg(long)]
    links: PathBuf,

    /// Destination root directory, created if absent.
    #[arg(long)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let content = std::fs::read_to_string(&cli.links)
        .with_context(|| format!("Failed to read links file {:?}", cli.links))?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory {:?}", cli.output))?;

    let providers: Vec<Box<dyn ShareProvider>> =
        vec![Box::new(MailClient::new()), Box::new(YandexClient::new())];
    let downloader = Downloader::new(cli.output.clone());

    // One provider pass at a time; a failure on one link never aborts the
    // rest of the batch.
    for provider in &providers {
        for link in links_for(&content, provider.marker()) {
            info!(link, "resolving share link");
            let listing = match provider.resolve(link).await {
                Ok(listing) => listing,
                Err(err) => {
                    error!(link, error = %err, "failed to resolve share link, skipping");
                    continue;
                }
            };

            info!(link, files = listing.entries.len(), "share resolved");
            if let Err(err) = downloader.download_all(&listing).await {
                error!(link, error = %err, "download failed, skipping remainder of link");
            }
        }
    }

    Ok(())
}
