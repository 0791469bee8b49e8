//! Episode page parser for AnimeWorld

use crate::error::{AnimeDlError, Result};
use crate::selectors::{element_href, Page, PageQuery, SelectorName};

/// Extract the alternative download link target from an episode page.
///
/// # Errors
/// * `AnimeDlError::ElementNotFound` if the anchor is missing or its `href` is empty
pub fn parse_alternative_link(page: &Page, query: &impl PageQuery) -> Result<String> {
    query
        .select(page, SelectorName::AlternativeDownloadLink)?
        .first()
        .and_then(element_href)
        .filter(|href| !href.trim().is_empty())
        .ok_or_else(|| AnimeDlError::ElementNotFound("link di download alternativo".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Selectors;

    #[test]
    fn test_parse_alternative_link() {
        let page = Page::parse(
            r#"<div id="download">
                 <a id="alternativeDownloadLink" href="https://cdn.example.org/ep_05.mp4">Scarica</a>
               </div>"#,
        );
        assert_eq!(
            parse_alternative_link(&page, &Selectors::default()).unwrap(),
            "https://cdn.example.org/ep_05.mp4"
        );
    }

    #[test]
    fn test_missing_link() {
        let page = Page::parse("<div id=\"download\"></div>");
        let result = parse_alternative_link(&page, &Selectors::default());
        assert!(matches!(result, Err(AnimeDlError::ElementNotFound(_))));
    }

    #[test]
    fn test_empty_href_is_missing() {
        let page = Page::parse(r#"<a id="alternativeDownloadLink" href="">x</a>"#);
        let result = parse_alternative_link(&page, &Selectors::default());
        assert!(matches!(result, Err(AnimeDlError::ElementNotFound(_))));
    }
}
