//! Schedule page parsing: one GameRecord per played game
//!
//! Game fields and the box-score link are pulled from the same table row
//! in a single pass, so the link list can never fall out of alignment
//! with the game list.

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};
use crate::model::{is_modern, GameRecord};
use crate::net;
use crate::schedule::MonthPage;

lazy_static! {
    static ref BOX_SCORE_HREF: Regex =
        Regex::new(r"^/boxscores/\d{9}[A-Z]{3}\.html$").unwrap();
}

/// Minimum cells in a game row: Date, Visitor, PTS, Home, PTS, box-score
/// cell, OT. Modern pages insert a start-time column after the date.
const MIN_COLUMNS_LEGACY: usize = 7;
const MIN_COLUMNS_MODERN: usize = 8;

/// Fetch one monthly schedule page and parse it into game records.
///
/// A 404 means the month page does not exist (no games scheduled) and is
/// reported as `TableNotFound`, the same skippable condition as a page
/// with no schedule table.
pub fn fetch_month(
    client: &reqwest::blocking::Client,
    page: &MonthPage,
) -> Result<Vec<GameRecord>> {
    let html = match net::fetch(client, &page.url) {
        Ok(html) => html,
        Err(ScrapeError::Http { url, status }) if status == reqwest::StatusCode::NOT_FOUND => {
            return Err(ScrapeError::TableNotFound { url });
        }
        Err(e) => return Err(e),
    };
    parse_schedule(&html, &page.url, is_modern(page.year))
}

/// Parse a schedule page's game table. `modern` indicates the page carries
/// a game start-time column (seasons after 2000), which is dropped so the
/// output schema is uniform across eras.
pub fn parse_schedule(html: &str, page_url: &str, modern: bool) -> Result<Vec<GameRecord>> {
    let document = Html::parse_document(html);

    let table = find_schedule_table(&document).ok_or_else(|| ScrapeError::TableNotFound {
        url: page_url.to_string(),
    })?;

    validate_header(&table, page_url, modern)?;

    let base = url::Url::parse(page_url)?;
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let min_columns = if modern {
        MIN_COLUMNS_MODERN
    } else {
        MIN_COLUMNS_LEGACY
    };

    let mut games = Vec::new();
    for row in table.select(&row_selector) {
        let cell_elements: Vec<ElementRef> = row.select(&cell_selector).collect();
        let mut cells: Vec<String> = cell_elements
            .iter()
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();

        if cells.is_empty() || cells[0] == "Date" {
            // Header row, possibly repeated mid-table.
            continue;
        }
        // Regular-season / playoff section delimiter.
        if cells[0].contains("Playoffs") {
            continue;
        }

        if cells.len() < min_columns {
            return Err(ScrapeError::ParseIntegrity(format!(
                "Schedule row at {} has {} columns, expected at least {}: {:?}",
                page_url,
                cells.len(),
                min_columns,
                cells
            )));
        }

        // Drop the start-time column so positions match the legacy layout.
        if modern {
            cells.remove(1);
        }

        let box_score_url = match box_score_link(&cell_elements, &base)? {
            Some(url) => url,
            None => {
                // Future games are listed without a box-score link.
                warn!(
                    "Skipping game row without a box score link on {}: {} at {}",
                    page_url, cells[1], cells[3]
                );
                continue;
            }
        };

        let game = GameRecord {
            date: cells[0].clone(),
            away_team: cells[1].clone(),
            away_points: cells[2].clone(),
            home_team: cells[3].clone(),
            home_points: cells[4].clone(),
            overtime: cells[6].clone(),
            box_score_url,
        };
        game.validate()?;
        games.push(game);
    }

    Ok(games)
}

/// The schedule table is identified by id where present, falling back to
/// the first table on the page.
fn find_schedule_table<'a>(document: &'a Html) -> Option<ElementRef<'a>> {
    let by_id = Selector::parse("table#schedule").unwrap();
    if let Some(table) = document.select(&by_id).next() {
        return Some(table);
    }
    let any = Selector::parse("table").unwrap();
    document.select(&any).next()
}

/// Assert the expected column labels before trusting positions. Catches
/// upstream layout drift instead of silently mislabeling data.
fn validate_header(table: &ElementRef, page_url: &str, modern: bool) -> Result<()> {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let header: Vec<String> = table
        .select(&row_selector)
        .next()
        .map(|row| {
            row.select(&cell_selector)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    if header.first().map(String::as_str) != Some("Date") {
        return Err(ScrapeError::ParseIntegrity(format!(
            "Unexpected schedule header at {}: {:?}",
            page_url, header
        )));
    }
    if modern && !header.get(1).map(|h| h.contains("Start")).unwrap_or(false) {
        return Err(ScrapeError::ParseIntegrity(format!(
            "Expected a start-time column on modern-era page {}, got header {:?}",
            page_url, header
        )));
    }
    Ok(())
}

/// Extract the row's "Box Score" anchor, absolutized against the page URL.
/// Returns Ok(None) when the row has no such link.
fn box_score_link(cells: &[ElementRef], base: &url::Url) -> Result<Option<String>> {
    let anchor_selector = Selector::parse("a").unwrap();
    for cell in cells {
        for anchor in cell.select(&anchor_selector) {
            let text: String = anchor.text().collect::<String>().trim().to_string();
            if text != "Box Score" {
                continue;
            }
            let href = match anchor.value().attr("href") {
                Some(h) => h,
                None => continue,
            };
            if !BOX_SCORE_HREF.is_match(href) {
                return Err(ScrapeError::ParseIntegrity(format!(
                    "Box score link has unexpected form: {}",
                    href
                )));
            }
            return Ok(Some(base.join(href)?.to_string()));
        }
    }
    Ok(None)
}
