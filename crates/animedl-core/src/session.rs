//! Per-title control flow
//!
//! A [`Session`] owns the primary-site client for the lifetime of the
//! process and runs one search → classify → download cycle per call.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::classify;
use crate::client::{ClientConfig, SiteClient, SITE_URL};
use crate::console::Console;
use crate::error::{AnimeDlError, Result};
use crate::fallback::{FallbackConfig, FallbackIdResolver, WEB_SEARCH_URL};
use crate::orchestrator::DownloadOrchestrator;
use crate::parser::{parse_anime_page, parse_episodes};
use crate::range::{displayed_range, select_range};
use crate::runner::FallbackRunner;
use crate::search::{select_title, SearchResolver};
use crate::selectors::Selectors;
use crate::transfer::EpisodeTransfer;
use crate::types::{Classification, DownloadReport, FallbackIdentifier};

/// Everything a session needs, loadable from a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base URL of the primary site
    pub site_url: String,
    /// Web search endpoint used to find fallback show ids
    pub web_search_url: String,
    /// Root directory for downloaded episodes
    pub download_dir: PathBuf,
    pub client: ClientConfig,
    pub fallback: FallbackConfig,
    pub selectors: Selectors,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            site_url: SITE_URL.to_string(),
            web_search_url: WEB_SEARCH_URL.to_string(),
            download_dir: PathBuf::from("Downloads"),
            client: ClientConfig::default(),
            fallback: FallbackConfig::default(),
            selectors: Selectors::default(),
        }
    }
}

/// How a title was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleOutcome {
    /// Episodes went through the direct path
    Downloaded(DownloadReport),
    /// The title was handed to the secondary service's downloader
    DelegatedToFallback(FallbackIdentifier),
}

pub struct Session<T, R> {
    client: SiteClient,
    config: SessionConfig,
    transfer: T,
    runner: R,
}

impl<T: EpisodeTransfer, R: FallbackRunner> Session<T, R> {
    /// Create the session and its primary-site client.
    ///
    /// # Arguments
    /// * `config` - Site URLs, download directory, client and selector settings
    /// * `transfer` - Saves directly downloadable episodes
    /// * `runner` - Receives identifiers for titles served by the secondary service
    ///
    /// # Errors
    /// * `AnimeDlError::InvalidUrl` if `config.site_url` is not http(s)
    pub fn new(config: SessionConfig, transfer: T, runner: R) -> Result<Self> {
        let client = SiteClient::with_config(config.site_url.as_str(), config.client.clone())?;
        Ok(Self {
            client,
            config,
            transfer,
            runner,
        })
    }

    /// Search, pick a title and download it through whichever path applies.
    ///
    /// # Errors
    /// * `AnimeDlError::UnsupportedTitle` when neither path can serve the title
    /// * `AnimeDlError::Interrupted` when the user leaves a prompt
    /// * transport and protocol errors from the primary site
    pub async fn run_once(&self, console: &mut dyn Console) -> Result<TitleOutcome> {
        let selectors = &self.config.selectors;

        let results = SearchResolver::new(&self.client, selectors)
            .resolve_search(console)
            .await?;
        let chosen = select_title(results, console)?;
        let title = chosen.title;

        let anime = {
            let page = self.client.fetch_page(&chosen.page_url).await?;
            parse_anime_page(&page, selectors)?
        };

        let classification = classify(&anime, &self.config.fallback.service_name);
        info!(
            title = %title,
            ?classification,
            episodes = anime.episode_links.len(),
            "classified"
        );

        match classification {
            Classification::DirectDownload => {
                let episodes = parse_episodes(&anime.episode_links)?;
                let (first, last) = displayed_range(&episodes)
                    .ok_or_else(|| AnimeDlError::UnsupportedTitle(title.clone()))?;
                let selected = select_range(console, &title, episodes.len(), first, last)?;

                let orchestrator = DownloadOrchestrator::new(
                    &self.client,
                    selectors,
                    &self.transfer,
                    &self.config.download_dir,
                );
                let report = orchestrator
                    .download_episodes(&episodes, &selected, &title, console)
                    .await;
                Ok(TitleOutcome::Downloaded(report))
            }
            Classification::FallbackService => {
                let resolver = FallbackIdResolver::new(
                    &self.config.web_search_url,
                    &self.config.fallback,
                    &self.config.client,
                    selectors,
                );
                let id = resolver
                    .resolve_fallback_id(&title)
                    .await
                    .ok_or(AnimeDlError::UnsupportedTitle(title))?;
                self.runner.run(&id).await?;
                Ok(TitleOutcome::DelegatedToFallback(id))
            }
            Classification::Unsupported => Err(AnimeDlError::UnsupportedTitle(title)),
        }
    }
}
