//! Search results parser for AnimeWorld
//!
//! Parses the primary site's search page into [`SearchResult`] items.

use crate::error::Result;
use crate::selectors::{element_href, element_text, Page, PageQuery, SelectorName};
use crate::types::SearchResult;

/// Parse search results from a search page.
///
/// Entries without a link or a title are skipped. Order follows the page
/// and duplicate titles are kept.
pub fn parse_search_results(page: &Page, query: &impl PageQuery) -> Result<Vec<SearchResult>> {
    let results = query
        .select(page, SelectorName::SearchResults)?
        .iter()
        .filter_map(|element| {
            let page_url = element_href(element)?;
            let title = element_text(element);
            if title.is_empty() || page_url.is_empty() {
                return None;
            }
            Some(SearchResult { title, page_url })
        })
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Selectors;

    #[test]
    fn test_parse_empty_html() {
        let page = Page::parse("<html><body></body></html>");
        let results = parse_search_results(&page, &Selectors::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_results_in_page_order() {
        let page = Page::parse(
            r#"<div class="film-list">
                 <div class="item"><a class="name" href="/play/naruto.Ab1">Naruto</a></div>
                 <div class="item"><a class="name" href="/play/naruto-shippuden.Cd2">Naruto Shippuden</a></div>
               </div>"#,
        );
        let results = parse_search_results(&page, &Selectors::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Naruto");
        assert_eq!(results[0].page_url, "/play/naruto.Ab1");
        assert_eq!(results[1].title, "Naruto Shippuden");
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let page = Page::parse(
            r#"<div class="film-list">
                 <a class="name" href="/play/hunter.1">Hunter x Hunter</a>
                 <a class="name" href="/play/hunter.2">Hunter x Hunter</a>
               </div>"#,
        );
        let results = parse_search_results(&page, &Selectors::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_ne!(results[0].page_url, results[1].page_url);
    }

    #[test]
    fn test_entries_without_link_or_title_are_skipped() {
        let page = Page::parse(
            r#"<div class="film-list">
                 <a class="name">No link</a>
                 <a class="name" href="/play/empty.1">   </a>
                 <a class="name" href="/play/ok.1">Ok</a>
               </div>"#,
        );
        let results = parse_search_results(&page, &Selectors::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Ok");
    }
}
