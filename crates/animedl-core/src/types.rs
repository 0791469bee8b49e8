//! Data types for animedl
//!
//! This module contains the core data structures passed between the
//! search, classification and download stages.

use std::fmt;
use std::path::{Path, PathBuf};

/// Search result item from the primary site's search page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Display title
    pub title: String,
    /// Relative or absolute URL of the anime page
    pub page_url: String,
}

/// Link to a single episode page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRef {
    /// Episode number as displayed on the page
    pub number: u32,
    /// Relative or absolute URL of the episode page
    pub page_url: String,
}

/// Episode anchor as found on the anime page, before its label is read as a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeLink {
    /// Trimmed anchor text, e.g. `"12"` or `"Film"`
    pub label: String,
    /// `href` of the anchor, if any
    pub page_url: Option<String>,
}

/// Everything the engine needs from an anime page
///
/// Only the classification signals are interpreted when the page is read.
/// Episode links keep their raw labels in page order and are turned into
/// [`EpisodeRef`]s only once the title goes down the direct path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimePage {
    /// Episode anchors of the active server, in page order
    pub episode_links: Vec<EpisodeLink>,
    /// Whether the download section marker is present
    pub download_section: bool,
    /// `href` of the first alternative download link, possibly empty
    pub first_alternative_link: Option<String>,
    /// Labels of the server tabs, as displayed
    pub server_tabs: Vec<String>,
}

/// Which download path applies to a title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    DirectDownload,
    FallbackService,
    Unsupported,
}

/// Show identifier on the secondary service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackIdentifier(String);

impl FallbackIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FallbackIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one attempted episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub episode_number: u32,
    pub saved_path: Option<PathBuf>,
    pub succeeded: bool,
}

impl DownloadOutcome {
    pub fn saved(episode_number: u32, path: PathBuf) -> Self {
        Self {
            episode_number,
            saved_path: Some(path),
            succeeded: true,
        }
    }

    pub fn not_saved(episode_number: u32) -> Self {
        Self {
            episode_number,
            saved_path: None,
            succeeded: false,
        }
    }
}

/// Outcomes of a batch, in the order episodes were attempted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub outcomes: Vec<DownloadOutcome>,
}

impl DownloadReport {
    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    /// Directory containing the last saved episode.
    pub fn destination(&self) -> Option<&Path> {
        self.outcomes
            .iter()
            .rev()
            .filter(|o| o.succeeded)
            .find_map(|o| o.saved_path.as_deref())
            .and_then(Path::parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_destination_is_parent_of_last_success() {
        let report = DownloadReport {
            outcomes: vec![
                DownloadOutcome::saved(1, PathBuf::from("/dl/Naruto/Naruto Ep 01.mp4")),
                DownloadOutcome::not_saved(2),
            ],
        };
        assert_eq!(report.succeeded_count(), 1);
        assert_eq!(report.destination(), Some(Path::new("/dl/Naruto")));
    }

    #[test]
    fn test_report_without_success_has_no_destination() {
        let report = DownloadReport {
            outcomes: vec![DownloadOutcome::not_saved(1)],
        };
        assert_eq!(report.succeeded_count(), 0);
        assert_eq!(report.destination(), None);
    }
}
