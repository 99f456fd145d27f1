//! Command-line front end for the otafetch engine.
//!
//! Downloads one artifact to a local path, either from a direct URL or by
//! resolving the newest asset of a release manifest, and optionally hands
//! the result to a launch command.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use otafetch::{Release, TransferOptions, TransferRequest, TransferSession, USER_AGENT};

#[derive(Parser)]
#[command(name = "otafetch", version, about = "Fetch update artifacts over HTTP(S)")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Download one artifact URL to a local path.
    Get {
        /// Artifact URL; redirects are followed, at most five hops.
        url: String,

        /// Destination file path, overwritten if present.
        #[arg(short, long)]
        output: PathBuf,

        /// Command to run with the downloaded path on success.
        #[arg(long, value_name = "CMD")]
        launch: Option<String>,

        /// Suppress the progress bar.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Resolve the newest artifact from a release manifest, then download it.
    Latest {
        /// Release manifest URL (GitHub-style releases JSON).
        manifest: String,

        /// Asset name suffix to select.
        #[arg(long, default_value = ".apk")]
        suffix: String,

        /// Destination file path, overwritten if present.
        #[arg(short, long)]
        output: PathBuf,

        /// Command to run with the downloaded path on success.
        #[arg(long, value_name = "CMD")]
        launch: Option<String>,

        /// Suppress the progress bar.
        #[arg(short, long)]
        quiet: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match Cli::parse().command {
        Cmd::Get {
            url,
            output,
            launch,
            quiet,
        } => {
            let path = download(&url, &output, quiet).await?;
            handoff(&path, launch.as_deref())?;
        }
        Cmd::Latest {
            manifest,
            suffix,
            output,
            launch,
            quiet,
        } => {
            let url = resolve_latest(&manifest, &suffix).await?;
            let path = download(&url, &output, quiet).await?;
            handoff(&path, launch.as_deref())?;
        }
    }
    Ok(())
}

async fn download(url: &str, output: &Path, quiet: bool) -> Result<PathBuf> {
    let session = TransferSession::with_defaults(TransferOptions::default())
        .context("failed to build HTTP client")?;
    let handle = session.spawn(TransferRequest::new(url, output));

    let render = if quiet {
        None
    } else {
        let bar = progress_bar();
        let mut rx = handle.subscribe();
        let bar_task = bar.clone();
        Some((
            bar,
            tokio::spawn(async move {
                while rx.changed().await.is_ok() {
                    let event = *rx.borrow_and_update();
                    if let Some(total) = event.total {
                        bar_task.set_length(total);
                        bar_task.set_position(event.downloaded);
                    }
                }
            }),
        ))
    };

    let result = handle.wait().await;
    if let Some((bar, task)) = render {
        let _ = task.await;
        bar.finish_and_clear();
    }

    let path = result.with_context(|| format!("download failed for {url}"))?;
    println!("downloaded {}", path.display());
    Ok(path)
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {bytes}/{total_bytes} ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

async fn resolve_latest(manifest: &str, suffix: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")?;
    let release: Release = client
        .get(manifest)
        .header("Accept", "application/json")
        .send()
        .await
        .with_context(|| format!("failed to fetch release manifest {manifest}"))?
        .error_for_status()
        .context("release manifest request was rejected")?
        .json()
        .await
        .context("release manifest did not parse")?;

    let asset = release.find_asset(suffix).with_context(|| {
        format!(
            "release {} has no asset matching suffix {suffix}",
            release.tag_name
        )
    })?;
    info!(tag = %release.tag_name, asset = %asset.name, "resolved latest release asset");
    Ok(asset.browser_download_url.clone())
}

fn handoff(path: &Path, launch: Option<&str>) -> Result<()> {
    let Some(cmd) = launch else {
        return Ok(());
    };
    let status = Command::new(cmd)
        .arg(path)
        .status()
        .with_context(|| format!("failed to start launch command {cmd}"))?;
    if !status.success() {
        bail!("launch command {cmd} exited with {status}");
    }
    Ok(())
}
