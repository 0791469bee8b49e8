//! Anime page parser for AnimeWorld
//!
//! Extracts the active server's episode list and the signals used to
//! decide between the direct and the fallback download path.

use crate::error::{AnimeDlError, Result};
use crate::selectors::{element_href, element_text, Page, PageQuery, SelectorName};
use crate::types::{AnimePage, EpisodeLink, EpisodeRef};

/// Parse an anime detail page.
///
/// Episode labels are kept as text: a page whose list contains entries
/// such as `"Film"` or `"1-2"` still yields its classification signals.
/// Server-tab labels are kept exactly as displayed.
///
/// # Arguments
/// * `page` - Parsed anime page
/// * `query` - Selector table used to locate the page's parts
///
/// # Errors
/// * `AnimeDlError::ParseError` if a configured selector is invalid
pub fn parse_anime_page(page: &Page, query: &impl PageQuery) -> Result<AnimePage> {
    let download_section = !query.select(page, SelectorName::DownloadSection)?.is_empty();

    let first_alternative_link = query
        .select(page, SelectorName::AlternativeDownloadLink)?
        .first()
        .map(|element| element_href(element).unwrap_or_default());

    let server_tabs = query
        .select(page, SelectorName::ServerTabs)?
        .iter()
        .map(|element| element.text().collect::<String>())
        .collect();

    let episode_links = query
        .select(page, SelectorName::EpisodeList)?
        .iter()
        .map(|element| EpisodeLink {
            label: element_text(element),
            page_url: element_href(element),
        })
        .collect();

    Ok(AnimePage {
        episode_links,
        download_section,
        first_alternative_link,
        server_tabs,
    })
}

/// Turn the raw episode anchors into numbered episodes, keeping page order.
///
/// # Errors
/// * `AnimeDlError::ParseError` if a label is not an integer
/// * `AnimeDlError::ElementNotFound` if an anchor has no `href`
pub fn parse_episodes(links: &[EpisodeLink]) -> Result<Vec<EpisodeRef>> {
    links
        .iter()
        .map(|link| {
            let number = parse_episode_number(&link.label)?;
            let page_url = link
                .page_url
                .clone()
                .ok_or_else(|| AnimeDlError::ElementNotFound(format!("link episodio {}", number)))?;
            Ok(EpisodeRef { number, page_url })
        })
        .collect()
}

/// Parse a displayed episode label such as `"12"`.
///
/// # Examples
/// ```
/// use animedl_core::parser::parse_episode_number;
///
/// assert_eq!(parse_episode_number(" 12 ").unwrap(), 12);
/// assert!(parse_episode_number("12.5").is_err());
/// ```
pub fn parse_episode_number(label: &str) -> Result<u32> {
    label
        .trim()
        .parse()
        .map_err(|_| AnimeDlError::ParseError(format!("numero episodio non valido: {:?}", label)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Selectors;

    const DIRECT_PAGE: &str = r#"
        <div class="server-tab" data-name="9">AnimeWorld Server</div>
        <div class="server-tab" data-name="4">Streamtape</div>
        <div class="server active">
          <ul class="episodes range">
            <li class="episode"><a href="/play/naruto.Ab1/ep1">1</a></li>
            <li class="episode"><a href="/play/naruto.Ab1/ep2">2</a></li>
            <li class="episode"><a href="/play/naruto.Ab1/ep3">3</a></li>
          </ul>
        </div>
        <div class="server">
          <ul class="episodes range">
            <li class="episode"><a href="/other/ep1">1</a></li>
          </ul>
        </div>
        <div id="download">
          <a id="alternativeDownloadLink" href="https://cdn.example.org/naruto_ep_1.mp4">Download</a>
        </div>"#;

    #[test]
    fn test_parse_direct_page() {
        let page = Page::parse(DIRECT_PAGE);
        let anime = parse_anime_page(&page, &Selectors::default()).unwrap();

        assert!(anime.download_section);
        assert_eq!(
            anime.first_alternative_link.as_deref(),
            Some("https://cdn.example.org/naruto_ep_1.mp4")
        );
        assert_eq!(anime.server_tabs, vec!["AnimeWorld Server", "Streamtape"]);
        assert_eq!(anime.episode_links.len(), 3);

        let episodes = parse_episodes(&anime.episode_links).unwrap();
        assert_eq!(episodes[0].number, 1);
        assert_eq!(episodes[2].page_url, "/play/naruto.Ab1/ep3");
    }

    #[test]
    fn test_parse_page_without_download_section() {
        let page = Page::parse(
            r#"<span class="server-tab">VVVVID</span>
               <div class="server active"><ul class="episodes range">
                 <li class="episode"><a href="/play/x/1">1</a></li>
               </ul></div>"#,
        );
        let anime = parse_anime_page(&page, &Selectors::default()).unwrap();
        assert!(!anime.download_section);
        assert_eq!(anime.first_alternative_link, None);
        assert_eq!(anime.server_tabs, vec!["VVVVID"]);
    }

    #[test]
    fn test_alternative_link_without_href_is_empty() {
        let page = Page::parse(r#"<div id="download"><a id="alternativeDownloadLink">x</a></div>"#);
        let anime = parse_anime_page(&page, &Selectors::default()).unwrap();
        assert_eq!(anime.first_alternative_link.as_deref(), Some(""));
    }

    #[test]
    fn test_non_numeric_label_keeps_page_signals() {
        let page = Page::parse(
            r#"<span class="server-tab">VVVVID</span>
               <div class="server active"><ul class="episodes range">
                 <li class="episode"><a href="/play/x/film">Film</a></li>
               </ul></div>"#,
        );
        let anime = parse_anime_page(&page, &Selectors::default()).unwrap();
        assert_eq!(anime.server_tabs, vec!["VVVVID"]);
        assert_eq!(
            anime.episode_links,
            vec![EpisodeLink {
                label: "Film".to_string(),
                page_url: Some("/play/x/film".to_string()),
            }]
        );
    }

    #[test]
    fn test_server_tab_labels_are_not_trimmed() {
        let page = Page::parse(r#"<span class="server-tab"> VVVVID </span>"#);
        let anime = parse_anime_page(&page, &Selectors::default()).unwrap();
        assert_eq!(anime.server_tabs, vec![" VVVVID "]);
        assert_eq!(
            crate::classifier::classify(&anime, "VVVVID"),
            crate::types::Classification::Unsupported
        );
    }

    #[test]
    fn test_non_numeric_episode_is_parse_error() {
        let links = vec![EpisodeLink {
            label: "1-2".to_string(),
            page_url: Some("/play/x/1".to_string()),
        }];
        assert!(matches!(parse_episodes(&links), Err(AnimeDlError::ParseError(_))));
    }

    #[test]
    fn test_episode_without_href_is_element_not_found() {
        let page = Page::parse(
            r#"<div class="server active"><ul class="episodes range">
                 <li class="episode"><a>4</a></li>
               </ul></div>"#,
        );
        let anime = parse_anime_page(&page, &Selectors::default()).unwrap();
        let result = parse_episodes(&anime.episode_links);
        assert!(matches!(result, Err(AnimeDlError::ElementNotFound(_))));
    }

    #[test]
    fn test_parse_episode_number() {
        assert_eq!(parse_episode_number("1").unwrap(), 1);
        assert_eq!(parse_episode_number("\n 220 \n").unwrap(), 220);
        assert!(parse_episode_number("").is_err());
        assert!(parse_episode_number("-1").is_err());
        assert!(parse_episode_number("Film").is_err());
    }
}
