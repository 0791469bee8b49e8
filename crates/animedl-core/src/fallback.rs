//! Secondary service identifier lookup
//!
//! When a title is only streamed through VVVVID, its show id is found by a
//! general web search. The lookup uses its own short-lived client: it
//! shares no cookies with the primary site session.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::client::{ClientConfig, SiteClient};
use crate::error::Result;
use crate::parser::{find_fallback_id, ShowLinkPattern};
use crate::selectors::PageQuery;
use crate::types::FallbackIdentifier;

/// Default web search endpoint; the query is appended verbatim
pub const WEB_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Secondary service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Server tab label and search keyword for the service
    pub service_name: String,
    /// How result links to the service's show pages look
    pub link_pattern: ShowLinkPattern,
    /// External program run with the show id as its only argument
    pub runner_command: Option<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            service_name: "VVVVID".to_string(),
            link_pattern: ShowLinkPattern::default(),
            runner_command: None,
        }
    }
}

/// Web search query: service name and title words joined by `+`.
///
/// # Examples
/// ```
/// use animedl_core::fallback::search_query;
///
/// assert_eq!(search_query("VVVVID", "Lupin III"), "VVVVID+Lupin+III");
/// ```
pub fn search_query(service_name: &str, title: &str) -> String {
    std::iter::once(service_name)
        .chain(title.split_whitespace())
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

pub struct FallbackIdResolver<'a, Q> {
    search_url: &'a str,
    config: &'a FallbackConfig,
    client_config: &'a ClientConfig,
    query: &'a Q,
}

impl<'a, Q: PageQuery> FallbackIdResolver<'a, Q> {
    /// Create a resolver for one lookup cycle.
    ///
    /// # Arguments
    /// * `search_url` - Web search endpoint; the encoded query is appended to it
    /// * `config` - Service name and show link pattern
    /// * `client_config` - Settings for the short-lived web search client
    /// * `query` - Selector table used to read the results page
    pub fn new(
        search_url: &'a str,
        config: &'a FallbackConfig,
        client_config: &'a ClientConfig,
        query: &'a Q,
    ) -> Self {
        Self {
            search_url,
            config,
            client_config,
            query,
        }
    }

    /// Look up the show id for `title`.
    ///
    /// # Returns
    /// The first identifier found among the result links, in page order.
    /// `None` means no result link matched; a failed web search is logged
    /// and reported the same way. No refinement or retry is attempted.
    pub async fn resolve_fallback_id(&self, title: &str) -> Option<FallbackIdentifier> {
        match self.lookup(title).await {
            Ok(Some(id)) => {
                info!(title, id = %id, "fallback identifier found");
                Some(id)
            }
            Ok(None) => {
                debug!(title, "no fallback link in web search results");
                None
            }
            Err(err) => {
                warn!(title, error = %err, "web search failed");
                None
            }
        }
    }

    async fn lookup(&self, title: &str) -> Result<Option<FallbackIdentifier>> {
        let client = SiteClient::with_config(self.search_url, self.client_config.clone())?;
        let url = format!(
            "{}{}",
            self.search_url,
            search_query(&self.config.service_name, title)
        );
        let page = client.fetch_page(&url).await?;
        find_fallback_id(&page, self.query, &self.config.link_pattern)
    }
}
