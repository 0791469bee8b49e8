//! Title search on the primary site
//!
//! Keeps asking for a phrase until the site returns at least one result,
//! then lets the user pick one of them.

use tracing::{debug, info};

use crate::client::SiteClient;
use crate::console::Console;
use crate::error::{AnimeDlError, Result};
use crate::parser::parse_search_results;
use crate::selectors::PageQuery;
use crate::types::SearchResult;

const SEARCH_PROMPT: &str = "Cerca un anime: ";
const SELECT_PROMPT: &str = "Seleziona uno di questi risultati";

/// Search path for a phrase: words URL-encoded and joined by `+`.
///
/// # Examples
/// ```
/// use animedl_core::search::search_path;
///
/// assert_eq!(search_path("one  piece"), "/search?keyword=one+piece");
/// assert_eq!(search_path("k-on!"), "/search?keyword=k-on%21");
/// ```
pub fn search_path(phrase: &str) -> String {
    let keyword = phrase
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    format!("/search?keyword={}", keyword)
}

pub struct SearchResolver<'a, Q> {
    client: &'a SiteClient,
    query: &'a Q,
}

impl<'a, Q: PageQuery> SearchResolver<'a, Q> {
    /// Create a resolver over the primary site.
    ///
    /// # Arguments
    /// * `client` - Primary-site client, shared with the rest of the session
    /// * `query` - Selector table used to read the search page
    pub fn new(client: &'a SiteClient, query: &'a Q) -> Self {
        Self { client, query }
    }

    /// Prompt until a phrase yields at least one result.
    ///
    /// Empty input and empty result sets re-prompt without limit.
    ///
    /// # Returns
    /// The non-empty result list, in page order
    ///
    /// # Errors
    /// * `AnimeDlError::Interrupted` if the user leaves the prompt
    /// * `AnimeDlError::Transport` / `AnimeDlError::Protocol` from the primary site
    pub async fn resolve_search(&self, console: &mut dyn Console) -> Result<Vec<SearchResult>> {
        loop {
            let phrase = ask_search_phrase(console)?;
            let results = self.search(&phrase).await?;
            if results.is_empty() {
                console.say(&AnimeDlError::EmptyResults(phrase).to_string());
                continue;
            }

            info!(phrase = %phrase, count = results.len(), "search results");
            return Ok(results);
        }
    }

    /// Run one search on the primary site.
    ///
    /// # Errors
    /// * `AnimeDlError::EmptyInput` if `phrase` is empty or whitespace-only
    pub async fn search(&self, phrase: &str) -> Result<Vec<SearchResult>> {
        if phrase.trim().is_empty() {
            return Err(AnimeDlError::EmptyInput);
        }

        let page = self.client.fetch_page(&search_path(phrase)).await?;
        let results = parse_search_results(&page, self.query)?;
        debug!(phrase, count = results.len(), "parsed search page");
        Ok(results)
    }
}

/// Let the user pick one result from a numbered menu.
pub fn select_title(
    mut results: Vec<SearchResult>,
    console: &mut dyn Console,
) -> Result<SearchResult> {
    let titles: Vec<String> = results.iter().map(|r| r.title.clone()).collect();
    let idx = console.choose(SELECT_PROMPT, &titles)?;
    Ok(results.swap_remove(idx))
}

fn ask_search_phrase(console: &mut dyn Console) -> Result<String> {
    loop {
        let line = console.read_line(SEARCH_PROMPT)?;
        let phrase = line.trim();
        if phrase.is_empty() {
            console.say(&AnimeDlError::EmptyInput.to_string());
            continue;
        }
        return Ok(phrase.to_string());
    }
}
