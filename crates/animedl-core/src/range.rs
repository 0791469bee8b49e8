//! Episode selection
//!
//! Accepted input, comma-separated: `tutti`/`all` (or nothing) for the
//! whole span, `N` for one episode, `A-B` for an inclusive range.
//!
//! The span is bounded by the first and last episodes shown on the page.
//! Gaps inside that span are not detected: a selected number with no
//! matching episode is simply never attempted.

use std::collections::BTreeSet;

use regex_lite::Regex;

use crate::console::Console;
use crate::error::{AnimeDlError, Result};
use crate::types::EpisodeRef;

/// Numbers of the first and last listed episodes.
pub fn displayed_range(episodes: &[EpisodeRef]) -> Option<(u32, u32)> {
    let first = episodes.first()?.number;
    let last = episodes.last()?.number;
    Some((first, last))
}

/// Parse a selection against the span `[first, last]`.
///
/// The bounds may be given in either order.
///
/// # Errors
/// * `AnimeDlError::InvalidSelection` if a token is malformed, reversed or out of the span
pub fn parse_selection(input: &str, first: u32, last: u32) -> Result<BTreeSet<u32>> {
    let (low, high) = if first <= last { (first, last) } else { (last, first) };
    let range_re = Regex::new(r"^(\d+)\s*-\s*(\d+)$")
        .map_err(|e| AnimeDlError::ParseError(e.to_string()))?;

    let input = input.trim();
    if input.is_empty() {
        return Ok((low..=high).collect());
    }

    let mut selected = BTreeSet::new();
    for token in input.split(',').map(str::trim) {
        if token.eq_ignore_ascii_case("tutti") || token.eq_ignore_ascii_case("all") {
            selected.extend(low..=high);
            continue;
        }

        let (start, end) = if let Some(caps) = range_re.captures(token) {
            (parse_bound(&caps[1])?, parse_bound(&caps[2])?)
        } else {
            let n = parse_bound(token)?;
            (n, n)
        };

        if start > end {
            return Err(AnimeDlError::InvalidSelection(format!(
                "intervallo invertito {}",
                token
            )));
        }
        if start < low || end > high {
            return Err(AnimeDlError::InvalidSelection(format!(
                "{} fuori dall'intervallo {}-{}",
                token, low, high
            )));
        }
        selected.extend(start..=end);
    }

    if selected.is_empty() {
        return Err(AnimeDlError::InvalidSelection("nessun episodio".to_string()));
    }
    Ok(selected)
}

fn parse_bound(token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| AnimeDlError::InvalidSelection(format!("{:?} non e' un numero", token)))
}

/// Ask which episodes to download until the answer is valid.
///
/// The returned set is non-empty and contained in the displayed span.
pub fn select_range(
    console: &mut dyn Console,
    title: &str,
    episode_count: usize,
    first: u32,
    last: u32,
) -> Result<BTreeSet<u32>> {
    console.say(&format!(
        "{} ha {} episodi ({}-{}).",
        title, episode_count, first, last
    ));

    loop {
        let answer =
            console.read_line("Episodi da scaricare (es. 3, 1-5, 1,4,7-9, tutti) [tutti]: ")?;
        match parse_selection(&answer, first, last) {
            Ok(selected) => return Ok(selected),
            Err(err) => console.say(&err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use proptest::prelude::*;

    fn set(items: &[u32]) -> BTreeSet<u32> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_displayed_range_uses_first_and_last() {
        assert_eq!(displayed_range(&[]), None);
        let episodes: Vec<EpisodeRef> = [12, 13, 24]
            .into_iter()
            .map(|number| EpisodeRef { number, page_url: format!("/ep{}", number) })
            .collect();
        assert_eq!(displayed_range(&episodes), Some((12, 24)));
    }

    #[test]
    fn test_single_episode() {
        assert_eq!(parse_selection("3", 1, 220).unwrap(), set(&[3]));
    }

    #[test]
    fn test_range() {
        assert_eq!(parse_selection("1-3", 1, 220).unwrap(), set(&[1, 2, 3]));
        assert_eq!(parse_selection(" 5 - 7 ", 1, 220).unwrap(), set(&[5, 6, 7]));
    }

    #[test]
    fn test_all_and_empty() {
        assert_eq!(parse_selection("tutti", 12, 14).unwrap(), set(&[12, 13, 14]));
        assert_eq!(parse_selection("ALL", 12, 14).unwrap(), set(&[12, 13, 14]));
        assert_eq!(parse_selection("", 12, 14).unwrap(), set(&[12, 13, 14]));
    }

    #[test]
    fn test_list() {
        assert_eq!(
            parse_selection("1,4, 7-9", 1, 12).unwrap(),
            set(&[1, 4, 7, 8, 9])
        );
    }

    #[test]
    fn test_rejects_out_of_span() {
        assert!(parse_selection("0", 1, 12).is_err());
        assert!(parse_selection("13", 1, 12).is_err());
        assert!(parse_selection("10-13", 1, 12).is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_selection("3-1", 1, 12).is_err());
        assert!(parse_selection("abc", 1, 12).is_err());
        assert!(parse_selection("1,", 1, 12).is_err());
        assert!(parse_selection("-2", 1, 12).is_err());
    }

    #[test]
    fn test_descending_page_bounds() {
        assert_eq!(parse_selection("", 3, 1).unwrap(), set(&[1, 2, 3]));
        assert_eq!(parse_selection("2", 3, 1).unwrap(), set(&[2]));
    }

    #[test]
    fn test_select_range_reprompts() {
        let mut console = ScriptedConsole::new(["500", "x", "1-3"]);
        let selected = select_range(&mut console, "Naruto", 220, 1, 220).unwrap();
        assert_eq!(selected, set(&[1, 2, 3]));
        assert!(console.saw("Naruto ha 220 episodi (1-220)."));
        assert!(console.saw("fuori dall'intervallo 1-220"));
    }

    proptest! {
        #[test]
        fn prop_selection_within_span(
            first in 0u32..500,
            len in 0u32..300,
            input in "[0-9]{1,3}(-[0-9]{1,3})?(,[0-9]{1,3}(-[0-9]{1,3})?){0,3}",
        ) {
            let last = first + len;
            if let Ok(selected) = parse_selection(&input, first, last) {
                prop_assert!(!selected.is_empty());
                prop_assert!(selected.iter().all(|n| (first..=last).contains(n)));
            }
        }

        #[test]
        fn prop_single_in_span_accepted(first in 0u32..500, len in 0u32..300, offset in 0u32..300) {
            let last = first + len;
            let n = first + offset % (len + 1);
            prop_assert_eq!(parse_selection(&n.to_string(), first, last).unwrap(), set(&[n]));
        }
    }
}
