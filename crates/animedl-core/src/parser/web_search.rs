//! Web search results parser
//!
//! Scans the anchors of a web search results page for a redirect to the
//! secondary service's show page and extracts the show identifier.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::selectors::{element_href, Page, PageQuery, SelectorName};
use crate::types::FallbackIdentifier;

/// Shape of a result link pointing at a show on the secondary service:
/// `<redirect_prefix><show_url><ID>/...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowLinkPattern {
    /// Redirect wrapper used by the search engine
    pub redirect_prefix: String,
    /// Show path on the secondary service
    pub show_url: String,
}

impl Default for ShowLinkPattern {
    fn default() -> Self {
        Self {
            redirect_prefix: "/url?q=".to_string(),
            show_url: "https://www.vvvvid.it/show/".to_string(),
        }
    }
}

impl ShowLinkPattern {
    fn marker(&self) -> String {
        format!("{}{}", self.redirect_prefix, self.show_url)
    }
}

/// Extract the identifier segment following the show path.
///
/// The segment must be non-empty; it ends at the first `/`, `&`, `#` or `?`
/// or at the end of the link.
///
/// # Examples
/// ```
/// use animedl_core::parser::{extract_show_id, ShowLinkPattern};
///
/// let pattern = ShowLinkPattern::default();
/// assert_eq!(
///     extract_show_id("/url?q=https://www.vvvvid.it/show/12345/lupin&sa=U", &pattern),
///     Some("12345")
/// );
/// assert_eq!(extract_show_id("/url?q=https://www.vvvvid.it/", &pattern), None);
/// ```
pub fn extract_show_id<'a>(href: &'a str, pattern: &ShowLinkPattern) -> Option<&'a str> {
    let marker = pattern.marker();
    let start = href.find(&marker)? + marker.len();
    let rest = &href[start..];
    let id = rest
        .find(['/', '&', '#', '?'])
        .map_or(rest, |end| &rest[..end]);
    if id.is_empty() {
        return None;
    }
    Some(id)
}

/// First show identifier found among the page's result links, in page order.
pub fn find_fallback_id(
    page: &Page,
    query: &impl PageQuery,
    pattern: &ShowLinkPattern,
) -> Result<Option<FallbackIdentifier>> {
    let found = query
        .select(page, SelectorName::WebSearchLinks)?
        .iter()
        .filter_map(element_href)
        .find_map(|href| extract_show_id(&href, pattern).map(FallbackIdentifier::new));

    Ok(found)
}
