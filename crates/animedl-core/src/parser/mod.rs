//! HTML parsers for AnimeWorld and web search pages
//!
//! This module contains parsers for extracting data from fetched pages:
//! - `search`: Parse the primary site's search results
//! - `anime`: Parse an anime page into availability signals and episode links
//! - `episode`: Extract the alternative download link from an episode page
//! - `web_search`: Find the secondary service's show identifier in search links

pub mod anime;
pub mod episode;
pub mod search;
pub mod web_search;

// Re-export main parsing functions
pub use anime::{parse_anime_page, parse_episode_number, parse_episodes};
pub use episode::parse_alternative_link;
pub use search::parse_search_results;
pub use web_search::{extract_show_id, find_fallback_id, ShowLinkPattern};
