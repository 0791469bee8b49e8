//! Per-episode download loop
//!
//! Each selected episode is fetched and transferred on its own. A failure
//! is reported with the episode number and the loop moves on; nothing that
//! happens to one episode stops the others.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::client::SiteClient;
use crate::console::Console;
use crate::error::{AnimeDlError, Result};
use crate::parser::parse_alternative_link;
use crate::selectors::PageQuery;
use crate::transfer::{EpisodeTransfer, TransferRequest};
use crate::types::{DownloadOutcome, DownloadReport, EpisodeRef};

pub struct DownloadOrchestrator<'a, Q, T> {
    client: &'a SiteClient,
    query: &'a Q,
    transfer: &'a T,
    destination_root: &'a Path,
}

impl<'a, Q: PageQuery, T: EpisodeTransfer> DownloadOrchestrator<'a, Q, T> {
    /// Create an orchestrator for one batch.
    ///
    /// # Arguments
    /// * `client` - Primary-site client used for episode pages
    /// * `query` - Selector table used to read episode pages
    /// * `transfer` - Byte-level transfer for each resolved link
    /// * `destination_root` - Directory the transfer saves into
    pub fn new(
        client: &'a SiteClient,
        query: &'a Q,
        transfer: &'a T,
        destination_root: &'a Path,
    ) -> Self {
        Self {
            client,
            query,
            transfer,
            destination_root,
        }
    }

    /// Download every listed episode whose number is in `selected`, in page order.
    ///
    /// When at least one episode was saved the destination directory is
    /// reported once.
    ///
    /// # Arguments
    /// * `episodes` - Episodes of the title, in page order
    /// * `selected` - Episode numbers chosen by the user
    /// * `title` - Title used for messages and file names
    /// * `console` - Receives per-episode failure messages
    ///
    /// # Returns
    /// One outcome per attempted episode. Failures never abort the batch.
    pub async fn download_episodes(
        &self,
        episodes: &[EpisodeRef],
        selected: &BTreeSet<u32>,
        title: &str,
        console: &mut dyn Console,
    ) -> DownloadReport {
        let is_single_episode = episodes.len() == 1;
        let mut report = DownloadReport::default();

        for episode in episodes.iter().filter(|e| selected.contains(&e.number)) {
            let outcome = match self.download_one(episode, title, is_single_episode).await {
                Ok(Some(path)) => {
                    info!(episode = episode.number, path = %path.display(), "episode saved");
                    DownloadOutcome::saved(episode.number, path)
                }
                Ok(None) => {
                    info!(episode = episode.number, "episode skipped by transfer");
                    DownloadOutcome::not_saved(episode.number)
                }
                Err(err) => {
                    let err = AnimeDlError::episode(episode.number, err);
                    warn!(error = %err, "episode failed");
                    console.say(&err.to_string());
                    DownloadOutcome::not_saved(episode.number)
                }
            };
            report.outcomes.push(outcome);
        }

        if let Some(dir) = report.destination() {
            console.say(&format!("I download si trovano in {}\n", dir.display()));
        }
        report
    }

    async fn download_one(
        &self,
        episode: &EpisodeRef,
        title: &str,
        is_single_episode: bool,
    ) -> Result<Option<PathBuf>> {
        let link = {
            let page = self.client.fetch_page(&episode.page_url).await?;
            parse_alternative_link(&page, self.query)?
        };

        let request = TransferRequest {
            title,
            episode_number: episode.number,
            link: &link,
            destination_root: self.destination_root,
            is_single_episode,
        };
        self.transfer.transfer(&request).await
    }
}
