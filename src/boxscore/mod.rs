//! Box-score page parsing: player statistical lines for one game
//!
//! Each page carries a basic-stats table per team. Seasons from roughly
//! 2001 onward interleave an advanced-stats table after the away team's
//! basic table, so the home table sits at index 2 instead of 1.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};
use crate::minutes;
use crate::model::{GameRecord, PlayerGameLine};
use crate::net;

/// Rows injected by the source table that never represent a player.
const DELIMITER_ROWS: [&str; 2] = ["Reserves", "Team Totals"];

/// Fetch and parse one game's box-score page.
pub fn fetch_game(
    client: &reqwest::blocking::Client,
    game: &GameRecord,
) -> Result<Vec<PlayerGameLine>> {
    let html = net::fetch(client, &game.box_score_url)?;
    parse_box_score(&html, game)
}

/// Parse the player tables of a box-score page, tagging every line with
/// the owning game's context. Home and away lines are merged into one
/// list, home first.
pub fn parse_box_score(html: &str, game: &GameRecord) -> Result<Vec<PlayerGameLine>> {
    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table").unwrap();
    let tables: Vec<ElementRef> = document.select(&table_selector).collect();

    // Away basic stats always lead. With an interleaved advanced-stats
    // table the home basic table is third; legacy pages put it second.
    let (away_idx, home_idx) = match tables.len() {
        n if n >= 3 => (0, 2),
        2 => (0, 1),
        n => {
            return Err(ScrapeError::ParseIntegrity(format!(
                "Expected at least 2 box score tables for {} ({}), found {}",
                game.describe(),
                game.box_score_url,
                n
            )));
        }
    };

    let away = parse_team_table(&tables[away_idx], &game.away_team, &game.home_team, false, game)?;
    let home = parse_team_table(&tables[home_idx], &game.home_team, &game.away_team, true, game)?;

    let mut lines = home;
    lines.extend(away);
    Ok(lines)
}

/// Parse one team's basic-stats table. Column labels come from the
/// "Starters" header row (the page has an over-header row of column
/// groups above it); delimiter rows are dropped; empty stat cells become
/// "0"; the MP cell is normalized to a float of minutes.
fn parse_team_table(
    table: &ElementRef,
    team: &str,
    opponent: &str,
    home: bool,
    game: &GameRecord,
) -> Result<Vec<PlayerGameLine>> {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut columns: Option<Vec<String>> = None;
    let mut mp_idx = 0;
    let mut lines = Vec::new();

    for row in table.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();
        if cells.is_empty() {
            continue;
        }

        if columns.is_none() {
            // Skip over-header rows until the column-label row.
            if cells[0] == "Starters" {
                let stat_columns: Vec<String> = cells[1..].to_vec();
                mp_idx = stat_columns
                    .iter()
                    .position(|c| c == "MP")
                    .ok_or_else(|| {
                        ScrapeError::ParseIntegrity(format!(
                            "No MP column in box score table for {} ({})",
                            game.describe(),
                            game.box_score_url
                        ))
                    })?;
                columns = Some(stat_columns);
            }
            continue;
        }
        let stat_columns = columns.as_ref().unwrap();

        let player = cells[0].clone();
        if player.is_empty() || DELIMITER_ROWS.contains(&player.as_str()) {
            continue;
        }

        // DNP rows collapse the stat cells into a single placeholder, so
        // the row can be shorter than the header. The lone cell is the
        // minutes placeholder wherever MP sits in the header; every other
        // stat is zero.
        let values = &cells[1..];
        let collapsed = values.len() == 1 && stat_columns.len() > 1;
        let mp_raw = if collapsed {
            values[0].as_str()
        } else {
            values.get(mp_idx).map(String::as_str).unwrap_or("")
        };
        let (minutes, player_note) = minutes::normalize(mp_raw);

        let mut stats = Vec::with_capacity(stat_columns.len().saturating_sub(1));
        for (i, col) in stat_columns.iter().enumerate() {
            if i == mp_idx {
                continue;
            }
            let value = if collapsed {
                "0".to_string()
            } else {
                values
                    .get(i)
                    .filter(|v| !v.is_empty())
                    .cloned()
                    .unwrap_or_else(|| "0".to_string())
            };
            stats.push((col.clone(), value));
        }

        lines.push(PlayerGameLine {
            player,
            team: team.to_string(),
            opponent: opponent.to_string(),
            home,
            minutes,
            player_note,
            date: game.date.clone(),
            overtime: game.overtime.clone(),
            game_link: game.box_score_url.clone(),
            stats,
        });
    }

    if columns.is_none() {
        return Err(ScrapeError::ParseIntegrity(format!(
            "No Starters header row in box score table for {} ({})",
            game.describe(),
            game.box_score_url
        )));
    }

    Ok(lines)
}
