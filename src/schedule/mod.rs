//! Monthly schedule pages: candidate URL generation and parsing

pub mod parser;

pub use parser::{fetch_month, parse_schedule};

pub const BASE_URL: &str = "https://www.basketball-reference.com";

/// Months in which NBA games are played, in season order. A season runs
/// from October of the prior calendar year through June.
const SEASON_MONTHS: [u8; 9] = [10, 11, 12, 1, 2, 3, 4, 5, 6];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// One candidate monthly schedule page for a season. The URL is built
/// blindly; whether the month actually had games is discovered downstream
/// when the page turns out to have no schedule table.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthPage {
    /// Season identified by its ending calendar year.
    pub year: u16,
    pub month: u8,
    pub url: String,
}

/// Enumerate candidate schedule pages for every season in
/// `start..=end` (seasons named by ending year). An inverted range
/// yields an empty list.
pub fn season_urls(start: u16, end: u16) -> Vec<MonthPage> {
    let mut pages = Vec::new();
    for year in start..=end {
        for &month in &SEASON_MONTHS {
            pages.push(MonthPage {
                year,
                month,
                url: format!(
                    "{}/leagues/NBA_{}_games-{}.html",
                    BASE_URL,
                    year,
                    MONTH_NAMES[(month - 1) as usize]
                ),
            });
        }
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_nine_pages_per_season() {
        assert_eq!(season_urls(1989, 1989).len(), 9);
        assert_eq!(season_urls(1989, 1992).len(), 9 * 4);
    }

    #[test]
    fn test_urls_are_distinct() {
        let pages = season_urls(1998, 2002);
        let urls: HashSet<_> = pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls.len(), pages.len());
    }

    #[test]
    fn test_url_format() {
        let pages = season_urls(1989, 1989);
        assert_eq!(
            pages[0].url,
            "https://www.basketball-reference.com/leagues/NBA_1989_games-october.html"
        );
        assert_eq!(pages[0].month, 10);
        assert_eq!(
            pages[8].url,
            "https://www.basketball-reference.com/leagues/NBA_1989_games-june.html"
        );
        assert_eq!(pages[8].month, 6);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(season_urls(1992, 1989).is_empty());
    }
}
