//! Episode file transfer
//!
//! [`EpisodeTransfer`] is the seam between the orchestrator and the code
//! that actually moves bytes. [`HttpTransfer`] streams the file to disk
//! with a progress bar.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::client::ClientConfig;
use crate::error::{AnimeDlError, Result};

const DEFAULT_EXTENSION: &str = "mp4";

/// One episode to save
#[derive(Debug, Clone, Copy)]
pub struct TransferRequest<'a> {
    pub title: &'a str,
    pub episode_number: u32,
    pub link: &'a str,
    pub destination_root: &'a Path,
    /// The title has exactly one episode; save flat instead of in a folder
    pub is_single_episode: bool,
}

#[allow(async_fn_in_trait)]
pub trait EpisodeTransfer {
    /// `Ok(Some(path))` when saved, `Ok(None)` when skipped.
    async fn transfer(&self, request: &TransferRequest<'_>) -> Result<Option<PathBuf>>;
}

/// Replace characters that are not allowed in file names.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_end_matches('.').to_string();
    if cleaned.is_empty() {
        "anime".to_string()
    } else {
        cleaned
    }
}

/// File extension taken from the link path, `mp4` when absent or odd.
fn link_extension(link: &str) -> String {
    reqwest::Url::parse(link)
        .ok()
        .and_then(|url| {
            let last = url.path_segments()?.next_back()?.to_string();
            let (_, ext) = last.rsplit_once('.')?;
            let valid = (1..=4).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric());
            valid.then(|| ext.to_ascii_lowercase())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Where an episode is saved.
///
/// Single-episode titles go to `<root>/<title>.<ext>`, the others to
/// `<root>/<title>/<title> Ep <NN>.<ext>`.
pub fn destination_path(request: &TransferRequest<'_>) -> PathBuf {
    let title = sanitize_file_name(request.title);
    let ext = link_extension(request.link);
    if request.is_single_episode {
        request.destination_root.join(format!("{}.{}", title, ext))
    } else {
        request
            .destination_root
            .join(&title)
            .join(format!("{} Ep {:02}.{}", title, request.episode_number, ext))
    }
}

/// Streams episodes over HTTP into the destination layout
pub struct HttpTransfer {
    client: reqwest::Client,
    show_progress: bool,
}

impl HttpTransfer {
    /// Create a transfer with its own HTTP client and progress bars enabled.
    ///
    /// # Arguments
    /// * `config` - Timeout and user agent for file downloads; pacing is not applied
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: config.build_http()?,
            show_progress: true,
        })
    }

    /// Toggle the progress bar shown while a file streams.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress_bar(&self, total: Option<u64>, label: String) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = match total {
            Some(total) => ProgressBar::new(total),
            None => ProgressBar::new_spinner(),
        };
        pb.set_style(
            ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        pb.set_message(label);
        pb
    }
}

impl EpisodeTransfer for HttpTransfer {
    async fn transfer(&self, request: &TransferRequest<'_>) -> Result<Option<PathBuf>> {
        let target = destination_path(request);
        if fs::try_exists(&target).await? {
            info!(path = %target.display(), "episode already present, skipping");
            return Ok(None);
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut response = self.client.get(request.link).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnimeDlError::Protocol {
                status,
                url: request.link.to_string(),
            });
        }

        let partial = target.with_extension("part");
        let pb = self.progress_bar(
            response.content_length(),
            format!("Episodio {}", request.episode_number),
        );
        let written = async {
            let mut file = fs::File::create(&partial).await?;
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
                pb.inc(chunk.len() as u64);
            }
            file.flush().await?;
            Ok::<_, AnimeDlError>(())
        }
        .await;
        pb.finish_and_clear();

        if let Err(err) = written {
            let _ = fs::remove_file(&partial).await;
            return Err(err);
        }

        fs::rename(&partial, &target).await?;
        debug!(path = %target.display(), "episode saved");
        Ok(Some(target))
    }
}
