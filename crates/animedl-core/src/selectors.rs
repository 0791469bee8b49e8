//! Semantic page queries
//!
//! Classification and orchestration code never sees CSS. It asks for a
//! [`SelectorName`] and the [`Selectors`] table resolves it, so markup
//! changes on the sites only touch this table (or the user's config file).

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{AnimeDlError, Result};

/// Semantic names for the elements the engine needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorName {
    /// Result links on the primary site's search page
    SearchResults,
    /// Marker for the direct download section on an anime page
    DownloadSection,
    /// Anchor carrying the alternative download link
    AlternativeDownloadLink,
    /// Labels of the streaming server tabs
    ServerTabs,
    /// Episode anchors of the active server
    EpisodeList,
    /// Result anchors on the web search page
    WebSearchLinks,
}

/// CSS selector table, one entry per [`SelectorName`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub search_results: String,
    pub download_section: String,
    pub alternative_download_link: String,
    pub server_tabs: String,
    pub episode_list: String,
    pub web_search_links: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            search_results: ".film-list .name".to_string(),
            download_section: "#download".to_string(),
            alternative_download_link: "#alternativeDownloadLink".to_string(),
            server_tabs: ".server-tab".to_string(),
            episode_list: ".server.active .episodes.range .episode a".to_string(),
            web_search_links: "div div a".to_string(),
        }
    }
}

impl Selectors {
    /// CSS string configured for `name`.
    pub fn css(&self, name: SelectorName) -> &str {
        match name {
            SelectorName::SearchResults => &self.search_results,
            SelectorName::DownloadSection => &self.download_section,
            SelectorName::AlternativeDownloadLink => &self.alternative_download_link,
            SelectorName::ServerTabs => &self.server_tabs,
            SelectorName::EpisodeList => &self.episode_list,
            SelectorName::WebSearchLinks => &self.web_search_links,
        }
    }

    fn compile(&self, name: SelectorName) -> Result<Selector> {
        let css = self.css(name);
        Selector::parse(css)
            .map_err(|e| AnimeDlError::ParseError(format!("Invalid selector {:?}: {:?}", css, e)))
    }
}

/// A fetched and parsed HTML page
pub struct Page {
    document: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

/// Capability interface: given a page and a semantic name, return the matching elements.
pub trait PageQuery {
    fn select<'a>(&self, page: &'a Page, name: SelectorName) -> Result<Vec<ElementRef<'a>>>;
}

impl PageQuery for Selectors {
    fn select<'a>(&self, page: &'a Page, name: SelectorName) -> Result<Vec<ElementRef<'a>>> {
        let selector = self.compile(name)?;
        Ok(page.document.select(&selector).collect())
    }
}

/// Concatenated, trimmed text of an element.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// `href` of an element, if present.
pub fn element_href(element: &ElementRef) -> Option<String> {
    element.value().attr("href").map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        let selectors = Selectors::default();
        for name in [
            SelectorName::SearchResults,
            SelectorName::DownloadSection,
            SelectorName::AlternativeDownloadLink,
            SelectorName::ServerTabs,
            SelectorName::EpisodeList,
            SelectorName::WebSearchLinks,
        ] {
            assert!(selectors.compile(name).is_ok(), "{:?}", name);
        }
    }

    #[test]
    fn test_invalid_selector_is_parse_error() {
        let selectors = Selectors {
            server_tabs: "[[".to_string(),
            ..Selectors::default()
        };
        let page = Page::parse("<html></html>");
        let result = selectors.select(&page, SelectorName::ServerTabs);
        assert!(matches!(result, Err(AnimeDlError::ParseError(_))));
    }

    #[test]
    fn test_select_returns_document_order() {
        let page = Page::parse(
            r#"<div class="film-list">
                 <a class="name" href="/a">Alpha</a>
                 <a class="name" href="/b"> Beta </a>
               </div>"#,
        );
        let selectors = Selectors::default();
        let found = selectors.select(&page, SelectorName::SearchResults).unwrap();
        let texts: Vec<String> = found.iter().map(element_text).collect();
        assert_eq!(texts, vec!["Alpha", "Beta"]);
        assert_eq!(element_href(&found[1]), Some("/b".to_string()));
    }

    #[test]
    fn test_custom_selector_is_used() {
        let page = Page::parse(r#"<ul><li class="tab">VVVVID</li></ul>"#);
        let selectors = Selectors {
            server_tabs: "li.tab".to_string(),
            ..Selectors::default()
        };
        let found = selectors.select(&page, SelectorName::ServerTabs).unwrap();
        assert_eq!(found.len(), 1);
    }
}
