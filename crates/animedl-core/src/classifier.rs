//! Decides which download path serves a title.

use crate::types::{AnimePage, Classification};

/// Classify from the raw page signals.
///
/// Direct download wins whenever the download section is present with a
/// non-empty first link, regardless of server tabs. Otherwise a tab
/// labeled exactly `service_name` selects the fallback service.
pub fn classify_signals(
    has_download_section: bool,
    alternative_link: Option<&str>,
    server_tabs: &[String],
    service_name: &str,
) -> Classification {
    let has_link = alternative_link.is_some_and(|link| !link.is_empty());
    if has_download_section && has_link {
        Classification::DirectDownload
    } else if server_tabs.iter().any(|label| label == service_name) {
        Classification::FallbackService
    } else {
        Classification::Unsupported
    }
}

/// Classify a parsed anime page.
///
/// Only the download section, the first alternative link and the server
/// tabs are read; episode labels play no part. Tab labels are compared as
/// displayed, surrounding whitespace included.
///
/// # Arguments
/// * `page` - Signals read from the anime page
/// * `service_name` - Tab label of the secondary service, e.g. `"VVVVID"`
pub fn classify(page: &AnimePage, service_name: &str) -> Classification {
    classify_signals(
        page.download_section,
        page.first_alternative_link.as_deref(),
        &page.server_tabs,
        service_name,
    )
}
